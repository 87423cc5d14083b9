use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment::RiskAssessment;
use super::enums::{Label, Stage};
use super::features::HealthFeatures;

/// One scored submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthObservation {
    id: Uuid,
    user_id: String,
    features: HealthFeatures,
    assessment: RiskAssessment,
    created_at: NaiveDateTime,
}

impl HealthObservation {
    /// Record a fresh observation stamped with the local time.
    pub fn new(user_id: impl Into<String>, features: HealthFeatures, assessment: RiskAssessment) -> Self {
        Self::recorded_at(
            user_id,
            features,
            assessment,
            chrono::Local::now().naive_local(),
        )
    }

    /// Record an observation with an explicit timestamp (imports, tests).
    pub fn recorded_at(
        user_id: impl Into<String>,
        features: HealthFeatures,
        assessment: RiskAssessment,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            features,
            assessment,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn features(&self) -> &HealthFeatures {
        &self.features
    }

    pub fn assessment(&self) -> &RiskAssessment {
        &self.assessment
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn stage(&self) -> Stage {
        self.assessment.stage
    }

    pub fn label(&self) -> Label {
        self.assessment.final_label
    }

    pub fn suggestion_text(&self) -> String {
        self.assessment.suggestion_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (HealthFeatures, RiskAssessment) {
        let features = HealthFeatures {
            pregnancies: 0,
            glucose: 95.0,
            blood_pressure: 70.0,
            skin_thickness: 20.0,
            insulin: 50.0,
            bmi: 22.0,
            diabetes_pedigree: 0.3,
            age: 30,
        };
        let assessment = RiskAssessment {
            stage: Stage::Normal,
            suggestions: vec!["Annual checkup".into()],
            final_label: Label::NotDiabetic,
            agreement: None,
            per_model: None,
        };
        (features, assessment)
    }

    #[test]
    fn observations_get_distinct_ids() {
        let (f, a) = sample();
        let one = HealthObservation::new("user-1", f, a.clone());
        let two = HealthObservation::new("user-1", f, a);
        assert_ne!(one.id(), two.id());
        assert_eq!(one.user_id(), "user-1");
        assert_eq!(one.stage(), Stage::Normal);
        assert_eq!(one.label(), Label::NotDiabetic);
    }

    #[test]
    fn explicit_timestamp_is_kept() {
        let (f, a) = sample();
        let at = NaiveDateTime::parse_from_str("2025-10-04 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let obs = HealthObservation::recorded_at("u", f, a, at);
        assert_eq!(obs.created_at(), at);
        assert_eq!(obs.suggestion_text(), "Annual checkup");
    }
}
