//! Range checks that turn raw numeric input into `HealthFeatures`.
//!
//! The classifier trusts its input; this is the gate in front of it.

use serde::{Deserialize, Serialize};

use crate::error::{FieldViolation, ValidationError};
use crate::models::HealthFeatures;

/// Unvalidated numeric input, as parsed from a form or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeatures {
    #[serde(default)]
    pub name: Option<String>,
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree: f64,
    pub age: f64,
}

struct Range {
    field: &'static str,
    min: f64,
    max: f64,
    whole: bool,
    message: &'static str,
}

const RANGES: [Range; 8] = [
    Range {
        field: "age",
        min: 1.0,
        max: 120.0,
        whole: true,
        message: "Age must be between 1 and 120 years",
    },
    Range {
        field: "pregnancies",
        min: 0.0,
        max: 20.0,
        whole: true,
        message: "Pregnancies must be between 0 and 20",
    },
    Range {
        field: "glucose",
        min: 0.0,
        max: 400.0,
        whole: false,
        message: "Glucose must be between 0 and 400 mg/dL",
    },
    Range {
        field: "blood_pressure",
        min: 40.0,
        max: 200.0,
        whole: false,
        message: "Blood Pressure must be between 40 and 200 mmHg",
    },
    Range {
        field: "skin_thickness",
        min: 0.0,
        max: 100.0,
        whole: false,
        message: "Skin Thickness must be between 0 and 100 mm",
    },
    Range {
        field: "insulin",
        min: 0.0,
        max: 900.0,
        whole: false,
        message: "Insulin must be between 0 and 900 µU/mL",
    },
    Range {
        field: "bmi",
        min: 10.0,
        max: 70.0,
        whole: false,
        message: "BMI must be between 10 and 70",
    },
    Range {
        field: "diabetes_pedigree",
        min: 0.0,
        max: 3.0,
        whole: false,
        message: "Diabetes Pedigree Function must be between 0 and 3",
    },
];

impl RawFeatures {
    fn value_of(&self, field: &str) -> f64 {
        match field {
            "age" => self.age,
            "pregnancies" => self.pregnancies,
            "glucose" => self.glucose,
            "blood_pressure" => self.blood_pressure,
            "skin_thickness" => self.skin_thickness,
            "insulin" => self.insulin,
            "bmi" => self.bmi,
            "diabetes_pedigree" => self.diabetes_pedigree,
            _ => f64::NAN,
        }
    }
}

/// Check every field and report all violations together.
pub fn validate_features(raw: &RawFeatures) -> Result<HealthFeatures, ValidationError> {
    let mut violations = Vec::new();

    if let Some(name) = &raw.name {
        if name.trim().chars().count() < 2 {
            violations.push(FieldViolation {
                field: "name",
                message: "Name must be at least 2 characters long".into(),
            });
        }
    }

    for range in &RANGES {
        let value = raw.value_of(range.field);
        let in_range = value.is_finite() && value >= range.min && value <= range.max;
        if !in_range {
            violations.push(FieldViolation {
                field: range.field,
                message: range.message.into(),
            });
        } else if range.whole && value.fract() != 0.0 {
            violations.push(FieldViolation {
                field: range.field,
                message: format!("{} must be a whole number", capitalise(range.field)),
            });
        }
    }

    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "Submission rejected by validator");
        return Err(ValidationError::OutOfRange(violations));
    }

    // whole-number fields are range-checked above, so the casts are exact
    Ok(HealthFeatures {
        pregnancies: raw.pregnancies as u32,
        glucose: raw.glucose,
        blood_pressure: raw.blood_pressure,
        skin_thickness: raw.skin_thickness,
        insulin: raw.insulin,
        bmi: raw.bmi,
        diabetes_pedigree: raw.diabetes_pedigree,
        age: raw.age as u32,
    })
}

fn capitalise(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
