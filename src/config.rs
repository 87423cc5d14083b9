use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ClassifierError;
use crate::models::ScoringMode;

/// Application-level constants
pub const APP_NAME: &str = "Diacheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the model artifact directory.
pub const MODEL_DIR_ENV: &str = "DIACHECK_MODEL_DIR";
/// Environment variable selecting `single` or `ensemble` scoring.
pub const SCORING_MODE_ENV: &str = "DIACHECK_SCORING_MODE";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "diacheck=info"
}

/// Get the application data directory
/// ~/Diacheck/ on all platforms, falling back to the working directory
/// when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the models directory (exported scaler and classifier artifacts)
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

/// Startup configuration. Built once, validated, then never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    model_dir: PathBuf,
    mode: ScoringMode,
}

impl ClassifierConfig {
    pub fn new(model_dir: impl Into<PathBuf>, mode: ScoringMode) -> Result<Self, ClassifierError> {
        let config = Self {
            model_dir: model_dir.into(),
            mode,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read `DIACHECK_MODEL_DIR` and `DIACHECK_SCORING_MODE`.
    pub fn from_env() -> Result<Self, ClassifierError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClassifierError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_dir = lookup(MODEL_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(models_dir);
        let mode = match lookup(SCORING_MODE_ENV) {
            Some(raw) => ScoringMode::from_str(raw.trim().to_lowercase().as_str()).map_err(|_| {
                ClassifierError::Config(format!(
                    "{SCORING_MODE_ENV} must be \"single\" or \"ensemble\", got {raw:?}"
                ))
            })?,
            None => ScoringMode::default(),
        };
        Self::new(model_dir, mode)
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.model_dir.as_os_str().is_empty() {
            return Err(ClassifierError::Config("model directory is empty".into()));
        }
        Ok(())
    }

    pub fn model_dir(&self) -> &std::path::Path {
        &self.model_dir
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn models_dir_under_app_data() {
        let models = models_dir();
        assert!(models.starts_with(app_data_dir()));
        assert!(models.ends_with("models"));
    }

    #[test]
    fn app_name_is_diacheck() {
        assert_eq!(APP_NAME, "Diacheck");
    }

    #[test]
    fn defaults_to_ensemble_in_models_dir() {
        let config = ClassifierConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.mode(), ScoringMode::Ensemble);
        assert_eq!(config.model_dir(), models_dir().as_path());
    }

    #[test]
    fn reads_overrides() {
        let config = ClassifierConfig::from_lookup(lookup(&[
            (MODEL_DIR_ENV, "/srv/diacheck/models"),
            (SCORING_MODE_ENV, " Single "),
        ]))
        .unwrap();
        assert_eq!(config.mode(), ScoringMode::Single);
        assert_eq!(config.model_dir(), std::path::Path::new("/srv/diacheck/models"));
    }

    #[test]
    fn unknown_mode_is_a_config_error() {
        let result = ClassifierConfig::from_lookup(lookup(&[(SCORING_MODE_ENV, "majority")]));
        assert!(matches!(result, Err(ClassifierError::Config(_))));
    }

    #[test]
    fn empty_model_dir_rejected() {
        assert!(matches!(
            ClassifierConfig::new("", ScoringMode::Single),
            Err(ClassifierError::Config(_))
        ));
    }
}
