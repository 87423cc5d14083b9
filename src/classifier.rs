//! Risk classifier: model voting plus rule-based staging.
//!
//! The final label comes from the model vote and the stage comes from the
//! glucose/BMI/insulin rule table. They are computed independently and may
//! disagree; neither overrides the other.

use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::inference::{BinaryClassifier, FeatureScaler, ModelSet};
use crate::models::{
    confidence_percent, Agreement, HealthFeatures, HealthObservation, Label, ModelKind,
    ModelRole, ModelVerdict, RiskAssessment, ScaledFeatures, ScoringMode,
};
use crate::staging::{classify_stage, suggestions_for};

/// Votes and verdicts from the three-model ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleOutcome {
    pub final_label: Label,
    pub agreement: Agreement,
    pub per_model: Vec<ModelVerdict>,
}

/// Majority vote over three labels. Ties cannot occur with three voters.
pub fn tally_votes(votes: [Label; 3]) -> (Label, Agreement) {
    let sum: u8 = votes.iter().map(Label::vote).sum();
    let label = Label::from_vote(sum >= 2);
    let agreement = match sum {
        0 | 3 => Agreement::AllAgree,
        _ => Agreement::MajorityConsensus,
    };
    (label, agreement)
}

/// Ask one injected model for its label.
pub fn score_single_model(
    features: &ScaledFeatures,
    model: &dyn BinaryClassifier,
) -> Result<Label, ClassifierError> {
    model.predict(features)
}

/// Run three models on the same scaled vector and combine their votes.
///
/// Confidence is reported per model for transparency but never changes
/// the outcome.
pub fn score_ensemble(
    features: &ScaledFeatures,
    models: [(ModelKind, &dyn BinaryClassifier); 3],
) -> Result<EnsembleOutcome, ClassifierError> {
    let mut per_model = Vec::with_capacity(3);
    for (kind, model) in models {
        let label = model.predict(features)?;
        let probability = model.predict_probability(features)?;
        per_model.push(ModelVerdict {
            model: kind,
            label,
            confidence_percent: confidence_percent(probability),
        });
    }
    let (final_label, agreement) =
        tally_votes([per_model[0].label, per_model[1].label, per_model[2].label]);
    Ok(EnsembleOutcome {
        final_label,
        agreement,
        per_model,
    })
}

/// Stateless classifier over a fixed set of handles. Shared freely across
/// threads; no call mutates it.
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    models: ModelSet,
    mode: ScoringMode,
}

impl RiskClassifier {
    pub fn new(models: ModelSet, mode: ScoringMode) -> Self {
        Self { models, mode }
    }

    /// Load artifacts from the configured directory.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let models = ModelSet::load(config.model_dir())?;
        Ok(Self::new(models, config.mode()))
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Whether every handle the configured mode needs is loaded.
    pub fn is_ready(&self) -> bool {
        self.missing_role().is_none()
    }

    fn required_models(&self) -> &'static [ModelKind] {
        match self.mode {
            ScoringMode::Single => &[ModelKind::LogisticRegression],
            ScoringMode::Ensemble => &ModelKind::ENSEMBLE,
        }
    }

    fn missing_role(&self) -> Option<ModelRole> {
        if !self.models.has_scaler() {
            return Some(ModelRole::Scaler);
        }
        self.required_models()
            .iter()
            .find(|kind| !self.models.has_model(**kind))
            .map(|kind| ModelRole::Model(*kind))
    }

    fn scaler(&self) -> Result<&dyn FeatureScaler, ClassifierError> {
        match self.models.scaler() {
            Some(scaler) => Ok(scaler.as_ref()),
            None => Err(ClassifierError::ModelUnavailable(ModelRole::Scaler)),
        }
    }

    fn model(&self, kind: ModelKind) -> Result<&dyn BinaryClassifier, ClassifierError> {
        match self.models.model(kind) {
            Some(model) => Ok(model.as_ref()),
            None => Err(ClassifierError::ModelUnavailable(ModelRole::Model(kind))),
        }
    }

    /// Score one submission end to end.
    ///
    /// Every handle is checked before any model runs, so a partial model
    /// set never yields a stage or label.
    pub fn assess(&self, features: &HealthFeatures) -> Result<RiskAssessment, ClassifierError> {
        if let Some(role) = self.missing_role() {
            tracing::warn!(%role, "Refusing to classify: handle not loaded");
            return Err(ClassifierError::ModelUnavailable(role));
        }

        let scaled = self.scaler()?.transform(&features.to_vector())?;

        let (final_label, agreement, per_model) = match self.mode {
            ScoringMode::Single => {
                let label = score_single_model(&scaled, self.model(ModelKind::LogisticRegression)?)?;
                (label, None, None)
            }
            ScoringMode::Ensemble => {
                let outcome = score_ensemble(
                    &scaled,
                    [
                        (
                            ModelKind::LogisticRegression,
                            self.model(ModelKind::LogisticRegression)?,
                        ),
                        (ModelKind::RandomForest, self.model(ModelKind::RandomForest)?),
                        (
                            ModelKind::GradientBoosting,
                            self.model(ModelKind::GradientBoosting)?,
                        ),
                    ],
                )?;
                (
                    outcome.final_label,
                    Some(outcome.agreement),
                    Some(outcome.per_model),
                )
            }
        };

        // staging reads the unscaled measurements
        let stage = classify_stage(features.glucose, features.bmi, features.insulin);

        tracing::debug!(
            stage = stage.as_str(),
            label = final_label.as_str(),
            mode = self.mode.as_str(),
            "Submission classified"
        );

        Ok(RiskAssessment {
            stage,
            suggestions: suggestions_for(stage),
            final_label,
            agreement,
            per_model,
        })
    }

    /// Score a submission and wrap it as a new observation for `user_id`.
    pub fn assess_observation(
        &self,
        user_id: &str,
        features: &HealthFeatures,
    ) -> Result<HealthObservation, ClassifierError> {
        let assessment = self.assess(features)?;
        Ok(HealthObservation::new(user_id, *features, assessment))
    }
}
