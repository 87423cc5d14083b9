use serde::{Deserialize, Serialize};

/// Width of the feature vector every model is trained on.
pub const FEATURE_COUNT: usize = 8;

/// Column names in trainer order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree",
    "age",
];

/// One validated submission of the eight health measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthFeatures {
    pub pregnancies: u32,
    /// Plasma glucose, mg/dL.
    pub glucose: f64,
    /// Diastolic blood pressure, mmHg.
    pub blood_pressure: f64,
    /// Triceps skin fold thickness, mm.
    pub skin_thickness: f64,
    /// Two-hour serum insulin, µU/mL.
    pub insulin: f64,
    /// Body mass index, kg/m².
    pub bmi: f64,
    pub diabetes_pedigree: f64,
    pub age: u32,
}

impl HealthFeatures {
    /// Raw vector in trainer column order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.pregnancies),
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree,
            f64::from(self.age),
        ]
    }
}

/// Feature vector after the upstream scaler has run.
///
/// Only a `FeatureScaler` builds one, so a model never sees raw form values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFeatures([f64; FEATURE_COUNT]);

impl ScaledFeatures {
    /// Wrap values that are already scaled (artifact tests, foreign scalers).
    pub fn from_scaled(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_follows_trainer_column_order() {
        let f = HealthFeatures {
            pregnancies: 2,
            glucose: 130.0,
            blood_pressure: 72.0,
            skin_thickness: 25.0,
            insulin: 80.0,
            bmi: 27.5,
            diabetes_pedigree: 0.4,
            age: 41,
        };
        assert_eq!(f.to_vector(), [2.0, 130.0, 72.0, 25.0, 80.0, 27.5, 0.4, 41.0]);
        assert_eq!(FEATURE_NAMES[1], "glucose");
        assert_eq!(FEATURE_NAMES[7], "age");
    }

    #[test]
    fn scaled_get_is_bounds_checked() {
        let s = ScaledFeatures::from_scaled([0.5; FEATURE_COUNT]);
        assert_eq!(s.get(7), Some(0.5));
        assert_eq!(s.get(8), None);
    }
}
