pub mod classifier;
pub mod config;
pub mod error;
pub mod inference;
pub mod metrics;
pub mod models;
pub mod staging;
pub mod summary;
pub mod validation;

use tracing_subscriber::EnvFilter;

pub use classifier::RiskClassifier;
pub use error::{ClassifierError, ValidationError};
pub use staging::classify_stage;
pub use validation::{validate_features, RawFeatures};

/// Install the global tracing subscriber. Honours `RUST_LOG`, falling back to
/// `config::default_log_filter()`. Safe to call more than once; later calls
/// are no-ops.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}
