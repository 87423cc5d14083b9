use std::path::Path;

use serde::{Deserialize, Serialize};

use super::artifact::{check_finite, check_width, file_label, read_json};
use super::FeatureScaler;
use crate::error::ClassifierError;
use crate::models::{ScaledFeatures, FEATURE_COUNT};

/// Per-column standardisation `(x - mean) / scale` fitted offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Load `scaler.json` (or any file with the same shape).
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let scaler: Self = read_json(path)?;
        scaler.validate(&file_label(path))?;
        Ok(scaler)
    }

    pub fn validate(&self, file: &str) -> Result<(), ClassifierError> {
        check_width(file, "mean", self.mean.len())?;
        check_width(file, "scale", self.scale.len())?;
        check_finite(file, "mean", &self.mean)?;
        check_finite(file, "scale", &self.scale)
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, raw: &[f64; FEATURE_COUNT]) -> Result<ScaledFeatures, ClassifierError> {
        for width in [self.mean.len(), self.scale.len()] {
            if width != FEATURE_COUNT {
                return Err(ClassifierError::FeatureCount {
                    expected: width,
                    actual: FEATURE_COUNT,
                });
            }
        }
        let mut out = [0.0; FEATURE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            // zero-variance columns are left centred but unscaled
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            *slot = (raw[i] - self.mean[i]) / scale;
        }
        Ok(ScaledFeatures::from_scaled(out))
    }
}
