//! Aggregates over a user's scored history.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{HealthObservation, Label, Stage};

/// How many recent points the trend keeps.
pub const TREND_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub glucose: f64,
    pub bmi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub diabetic: usize,
    pub not_diabetic: usize,
    pub avg_glucose: f64,
    pub min_glucose: f64,
    pub max_glucose: f64,
    pub avg_bmi: f64,
    pub min_bmi: f64,
    pub max_bmi: f64,
    pub avg_blood_pressure: f64,
    /// Every stage, in `Stage::ALL` order, even when its count is zero.
    pub stage_distribution: Vec<StageCount>,
    /// Oldest first.
    pub trend: Vec<TrendPoint>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

struct Stats {
    sum: f64,
    min: f64,
    max: f64,
}

impl Stats {
    fn over(values: impl Iterator<Item = f64>) -> Self {
        values.fold(
            Stats {
                sum: 0.0,
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |acc, v| Stats {
                sum: acc.sum + v,
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        )
    }
}

impl HistorySummary {
    pub fn from_observations(observations: &[HealthObservation]) -> Self {
        let total = observations.len();
        let stage_distribution = Stage::ALL
            .iter()
            .map(|&stage| StageCount {
                stage,
                count: observations.iter().filter(|o| o.stage() == stage).count(),
            })
            .collect();

        if total == 0 {
            return Self {
                total,
                diabetic: 0,
                not_diabetic: 0,
                avg_glucose: 0.0,
                min_glucose: 0.0,
                max_glucose: 0.0,
                avg_bmi: 0.0,
                min_bmi: 0.0,
                max_bmi: 0.0,
                avg_blood_pressure: 0.0,
                stage_distribution,
                trend: Vec::new(),
            };
        }

        let diabetic = observations
            .iter()
            .filter(|o| o.label() == Label::Diabetic)
            .count();
        let glucose = Stats::over(observations.iter().map(|o| o.features().glucose));
        let bmi = Stats::over(observations.iter().map(|o| o.features().bmi));
        let bp_sum: f64 = observations.iter().map(|o| o.features().blood_pressure).sum();
        let n = total as f64;

        let mut by_date: Vec<&HealthObservation> = observations.iter().collect();
        by_date.sort_by_key(|o| std::cmp::Reverse(o.created_at()));
        let mut trend: Vec<TrendPoint> = by_date
            .into_iter()
            .take(TREND_LEN)
            .map(|o| TrendPoint {
                date: o.created_at().date(),
                glucose: o.features().glucose,
                bmi: o.features().bmi,
            })
            .collect();
        trend.reverse();

        Self {
            total,
            diabetic,
            not_diabetic: total - diabetic,
            avg_glucose: round1(glucose.sum / n),
            min_glucose: round1(glucose.min),
            max_glucose: round1(glucose.max),
            avg_bmi: round1(bmi.sum / n),
            min_bmi: round1(bmi.min),
            max_bmi: round1(bmi.max),
            avg_blood_pressure: round1(bp_sum / n),
            stage_distribution,
            trend,
        }
    }

    pub fn count_for(&self, stage: Stage) -> usize {
        self.stage_distribution
            .iter()
            .find(|c| c.stage == stage)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthFeatures, RiskAssessment};
    use crate::staging::{classify_stage, suggestions_for};

    fn obs(day: u32, glucose: f64, bmi: f64, label: Label) -> HealthObservation {
        let features = HealthFeatures {
            pregnancies: 0,
            glucose,
            blood_pressure: 80.0,
            skin_thickness: 20.0,
            insulin: 50.0,
            bmi,
            diabetes_pedigree: 0.3,
            age: 45,
        };
        let stage = classify_stage(glucose, bmi, features.insulin);
        let assessment = RiskAssessment {
            stage,
            suggestions: suggestions_for(stage),
            final_label: label,
            agreement: None,
            per_model: None,
        };
        let at = NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        HealthObservation::recorded_at("u-1", features, assessment, at)
    }

    #[test]
    fn empty_history_is_zeroed() {
        let s = HistorySummary::from_observations(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.avg_glucose, 0.0);
        assert!(s.trend.is_empty());
        assert_eq!(s.stage_distribution.len(), 4);
        assert!(s.stage_distribution.iter().all(|c| c.count == 0));
    }

    #[test]
    fn aggregates_and_rounds() {
        let history = vec![
            obs(1, 90.0, 22.0, Label::NotDiabetic),
            obs(2, 120.0, 23.0, Label::NotDiabetic),
            obs(3, 150.0, 31.0, Label::Diabetic),
        ];
        let s = HistorySummary::from_observations(&history);
        assert_eq!(s.total, 3);
        assert_eq!(s.diabetic, 1);
        assert_eq!(s.not_diabetic, 2);
        assert_eq!(s.avg_glucose, 120.0);
        assert_eq!(s.min_glucose, 90.0);
        assert_eq!(s.max_glucose, 150.0);
        assert_eq!(s.avg_bmi, 25.3);
        assert_eq!(s.avg_blood_pressure, 80.0);
    }

    #[test]
    fn extremes_round_to_one_decimal() {
        let history = vec![
            obs(1, 99.04, 22.46, Label::NotDiabetic),
            obs(2, 131.26, 27.81, Label::NotDiabetic),
        ];
        let s = HistorySummary::from_observations(&history);
        assert_eq!(s.min_glucose, 99.0);
        assert_eq!(s.max_glucose, 131.3);
        assert_eq!(s.min_bmi, 22.5);
        assert_eq!(s.max_bmi, 27.8);
    }

    #[test]
    fn distribution_is_zero_filled() {
        let history = vec![
            obs(1, 90.0, 22.0, Label::NotDiabetic),
            obs(2, 95.0, 21.0, Label::NotDiabetic),
        ];
        let s = HistorySummary::from_observations(&history);
        assert_eq!(s.count_for(Stage::Normal), 2);
        assert_eq!(s.count_for(Stage::PreDiabetic), 0);
        assert_eq!(s.count_for(Stage::Type1Diabetes), 0);
        assert_eq!(s.count_for(Stage::Type2Diabetes), 0);
    }

    #[test]
    fn trend_keeps_latest_five_oldest_first() {
        // inserted out of order on purpose
        let days = [4, 1, 7, 2, 6, 3, 5];
        let history: Vec<_> = days
            .iter()
            .map(|&d| obs(d, 100.0 + d as f64, 22.0, Label::NotDiabetic))
            .collect();
        let s = HistorySummary::from_observations(&history);
        let trend_days: Vec<u32> = s.trend.iter().map(|p| p.glucose as u32 - 100).collect();
        assert_eq!(trend_days, vec![3, 4, 5, 6, 7]);
    }
}
