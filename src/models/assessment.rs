use serde::{Deserialize, Serialize};

use super::enums::{Agreement, Label, ModelKind, Stage};

/// One model's vote plus its positive-class confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelVerdict {
    pub model: ModelKind,
    pub label: Label,
    /// P(diabetic) scaled to 0–100, one decimal.
    pub confidence_percent: f64,
}

/// Scale a probability in [0, 1] to a percentage rounded to one decimal.
pub fn confidence_percent(probability: f64) -> f64 {
    (probability * 1000.0).round() / 10.0
}

/// Result handed to persistence and presentation.
///
/// `stage` comes from the glucose/BMI/insulin rule table while
/// `final_label` comes from the model vote; the two may disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub stage: Stage,
    pub suggestions: Vec<String>,
    pub final_label: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<Agreement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_model: Option<Vec<ModelVerdict>>,
}

impl RiskAssessment {
    /// Suggestions joined one per line, the form stored alongside history rows.
    pub fn suggestion_text(&self) -> String {
        self.suggestions.join("\n")
    }
}
