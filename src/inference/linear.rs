use std::path::Path;

use serde::{Deserialize, Serialize};

use super::artifact::{check_finite, check_width, file_label, read_json, sigmoid};
use super::BinaryClassifier;
use crate::error::ClassifierError;
use crate::models::ScaledFeatures;

/// Binary logistic regression exported as coefficients and intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let model: Self = read_json(path)?;
        model.validate(&file_label(path))?;
        Ok(model)
    }

    pub fn validate(&self, file: &str) -> Result<(), ClassifierError> {
        check_width(file, "coefficients", self.coefficients.len())?;
        check_finite(file, "coefficients", &self.coefficients)?;
        check_finite(file, "intercept", &[self.intercept])
    }

    fn margin(&self, features: &ScaledFeatures) -> f64 {
        self.coefficients
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl BinaryClassifier for LogisticRegression {
    fn predict_probability(&self, features: &ScaledFeatures) -> Result<f64, ClassifierError> {
        if self.coefficients.len() != features.values().len() {
            return Err(ClassifierError::FeatureCount {
                expected: self.coefficients.len(),
                actual: features.values().len(),
            });
        }
        Ok(sigmoid(self.margin(features)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;

    fn glucose_only(weight: f64, intercept: f64) -> LogisticRegression {
        let mut coefficients = vec![0.0; 8];
        coefficients[1] = weight;
        LogisticRegression {
            coefficients,
            intercept,
        }
    }

    #[test]
    fn probability_is_sigmoid_of_margin() {
        let model = glucose_only(2.0, -1.0);
        let x = ScaledFeatures::from_scaled([0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let p = model.predict_probability(&x).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_margin_is_not_diabetic() {
        let model = LogisticRegression {
            coefficients: vec![0.0; 8],
            intercept: 0.0,
        };
        let x = ScaledFeatures::from_scaled([0.0; 8]);
        assert_eq!(model.predict_probability(&x).unwrap(), 0.5);
        assert_eq!(model.predict(&x).unwrap(), Label::NotDiabetic);
    }

    #[test]
    fn predict_thresholds_at_one_half() {
        let model = glucose_only(1.5, 0.0);
        let high = ScaledFeatures::from_scaled([0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let low = ScaledFeatures::from_scaled([0.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(model.predict(&high).unwrap(), Label::Diabetic);
        assert_eq!(model.predict(&low).unwrap(), Label::NotDiabetic);
    }

    #[test]
    fn wrong_width_fails_instead_of_truncating() {
        let model = LogisticRegression {
            coefficients: vec![1.0; 5],
            intercept: 0.0,
        };
        let x = ScaledFeatures::from_scaled([0.0; 8]);
        assert!(matches!(
            model.predict_probability(&x),
            Err(ClassifierError::FeatureCount { expected: 5, actual: 8 })
        ));
    }

    #[test]
    fn load_rejects_short_coefficient_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logistic_regression.json");
        std::fs::write(&path, r#"{"coefficients":[0.4,1.1,-0.2],"intercept":-0.8}"#).unwrap();
        assert!(matches!(
            LogisticRegression::load(&path),
            Err(ClassifierError::InvalidArtifact(file, _)) if file == "logistic_regression.json"
        ));
    }
}
