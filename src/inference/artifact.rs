use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ClassifierError;
use crate::models::FEATURE_COUNT;

/// Read and deserialise one JSON artifact exported by the offline trainer.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ClassifierError> {
    let name = file_label(path);
    let json = std::fs::read_to_string(path)
        .map_err(|e| ClassifierError::ArtifactLoad(name.clone(), e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| ClassifierError::ArtifactParse(name, e.to_string()))
}

/// Reject a per-feature array whose width does not match the trained vector.
pub(crate) fn check_width(file: &str, field: &str, len: usize) -> Result<(), ClassifierError> {
    if len != FEATURE_COUNT {
        return Err(ClassifierError::InvalidArtifact(
            file.into(),
            format!("{field} has {len} entries, expected {FEATURE_COUNT}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_finite(file: &str, field: &str, values: &[f64]) -> Result<(), ClassifierError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ClassifierError::InvalidArtifact(
            file.into(),
            format!("{field} contains a non-finite value"),
        ));
    }
    Ok(())
}

pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Logistic function.
pub(crate) fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Vec<f64>, _> = read_json(&dir.path().join("absent.json"));
        match result {
            Err(ClassifierError::ArtifactLoad(file, _)) => assert_eq!(file, "absent.json"),
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error_naming_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result: Result<Vec<f64>, _> = read_json(&path);
        match result {
            Err(ClassifierError::ArtifactParse(file, _)) => assert_eq!(file, "scaler.json"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn width_and_finiteness_checks() {
        assert!(check_width("f", "mean", 8).is_ok());
        assert!(check_width("f", "mean", 7).is_err());
        assert!(check_finite("f", "mean", &[1.0, 2.0]).is_ok());
        assert!(check_finite("f", "mean", &[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn sigmoid_midpoint_and_tails() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(20.0) > 0.999);
        assert!(sigmoid(-20.0) < 0.001);
    }
}
