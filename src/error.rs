use thiserror::Error;

use crate::models::ModelRole;

/// Errors raised while loading model handles or classifying a submission.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Prediction unavailable: {0} is not loaded")]
    ModelUnavailable(ModelRole),

    #[error("Model artifact load failed ({0}): {1}")]
    ArtifactLoad(String, String),

    #[error("Model artifact parse failed ({0}): {1}")]
    ArtifactParse(String, String),

    #[error("Model artifact invalid ({0}): {1}")]
    InvalidArtifact(String, String),

    #[error("Feature vector has {actual} values, expected {expected}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// One out-of-range or malformed input field.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Input-contract violations found before classification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{} invalid field(s): {}", .0.len(), join_messages(.0))]
    OutOfRange(Vec<FieldViolation>),
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ValidationError::OutOfRange(v) => v,
        }
    }
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
