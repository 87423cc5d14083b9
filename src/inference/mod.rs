//! Model-serving capabilities the risk classifier depends on.
//!
//! The classifier only sees two traits: `FeatureScaler` (applied once,
//! upstream, to the whole vector) and `BinaryClassifier`. Concrete handles
//! are loaded from JSON artifacts exported by the offline trainer, or
//! injected directly through `ModelSet::builder()`.

mod artifact;
pub mod linear;
pub mod scaler;
pub mod tree;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::ClassifierError;
use crate::models::{Label, ModelKind, ScaledFeatures, FEATURE_COUNT};

pub use linear::LogisticRegression;
pub use scaler::StandardScaler;
pub use tree::{Aggregation, DecisionTree, TreeEnsemble, TreeNode};

/// File name of the exported scaler artifact.
pub const SCALER_FILE: &str = "scaler.json";

/// Transforms the raw eight-feature vector into model space.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, raw: &[f64; FEATURE_COUNT]) -> Result<ScaledFeatures, ClassifierError>;
}

/// A trained binary classifier. Read-only, so safe to share across requests.
pub trait BinaryClassifier: Send + Sync {
    /// Probability of the diabetic class, in [0, 1].
    fn predict_probability(&self, features: &ScaledFeatures) -> Result<f64, ClassifierError>;

    /// Diabetic only when the probability is strictly above one half; a tie
    /// is `NotDiabetic`.
    fn predict(&self, features: &ScaledFeatures) -> Result<Label, ClassifierError> {
        Ok(Label::from_vote(self.predict_probability(features)? > 0.5))
    }
}

/// The scaler and models available to a classifier. Any slot may be empty;
/// the classifier refuses to run when a slot it needs is.
#[derive(Clone, Default)]
pub struct ModelSet {
    scaler: Option<Arc<dyn FeatureScaler>>,
    models: HashMap<ModelKind, Arc<dyn BinaryClassifier>>,
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut loaded: Vec<&str> = self.models.keys().map(|k| k.as_str()).collect();
        loaded.sort_unstable();
        f.debug_struct("ModelSet")
            .field("scaler", &self.scaler.is_some())
            .field("models", &loaded)
            .finish()
    }
}

impl ModelSet {
    pub fn builder() -> ModelSetBuilder {
        ModelSetBuilder::default()
    }

    /// Load every artifact present in `dir`.
    ///
    /// A missing file leaves its slot empty and is logged; a file that is
    /// present but malformed is an error.
    pub fn load(dir: &Path) -> Result<Self, ClassifierError> {
        let mut set = ModelSet::default();

        let scaler_path = dir.join(SCALER_FILE);
        if scaler_path.is_file() {
            set.scaler = Some(Arc::new(StandardScaler::load(&scaler_path)?));
            tracing::info!(file = SCALER_FILE, "Feature scaler loaded");
        } else {
            tracing::warn!(file = SCALER_FILE, dir = %dir.display(), "Feature scaler not found");
        }

        for kind in ModelKind::ENSEMBLE {
            let path = dir.join(kind.artifact_file());
            if !path.is_file() {
                tracing::warn!(model = kind.as_str(), dir = %dir.display(), "Model artifact not found");
                continue;
            }
            let model: Arc<dyn BinaryClassifier> = match kind {
                ModelKind::LogisticRegression => Arc::new(LogisticRegression::load(&path)?),
                ModelKind::RandomForest | ModelKind::GradientBoosting => {
                    Arc::new(TreeEnsemble::load(&path)?)
                }
            };
            tracing::info!(model = kind.as_str(), "Model loaded");
            set.models.insert(kind, model);
        }

        Ok(set)
    }

    pub fn scaler(&self) -> Option<&Arc<dyn FeatureScaler>> {
        self.scaler.as_ref()
    }

    pub fn model(&self, kind: ModelKind) -> Option<&Arc<dyn BinaryClassifier>> {
        self.models.get(&kind)
    }

    pub fn has_scaler(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn has_model(&self, kind: ModelKind) -> bool {
        self.models.contains_key(&kind)
    }
}

/// Injects handles directly, bypassing artifact files.
#[derive(Default)]
pub struct ModelSetBuilder {
    set: ModelSet,
}

impl ModelSetBuilder {
    pub fn scaler(mut self, scaler: Arc<dyn FeatureScaler>) -> Self {
        self.set.scaler = Some(scaler);
        self
    }

    pub fn model(mut self, kind: ModelKind, model: Arc<dyn BinaryClassifier>) -> Self {
        self.set.models.insert(kind, model);
        self
    }

    pub fn build(self) -> ModelSet {
        self.set
    }
}
