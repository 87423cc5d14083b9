//! Reference-range flags for the headline measurements shown in reports.

use serde::Serialize;

use crate::models::{HealthFeatures, MetricFlag};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStatus {
    pub parameter: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub normal_range: &'static str,
    pub flag: MetricFlag,
}

/// Flag glucose, BMI and blood pressure against their reference ranges.
pub fn assess_metrics(features: &HealthFeatures) -> Vec<MetricStatus> {
    let glucose_flag = if features.glucose < 140.0 {
        MetricFlag::Normal
    } else {
        MetricFlag::Elevated
    };
    let bmi_flag = if (18.5..=24.9).contains(&features.bmi) {
        MetricFlag::Normal
    } else {
        MetricFlag::Abnormal
    };
    let bp_flag = if (80.0..=120.0).contains(&features.blood_pressure) {
        MetricFlag::Normal
    } else {
        MetricFlag::Abnormal
    };

    vec![
        MetricStatus {
            parameter: "Glucose Level",
            value: features.glucose,
            unit: "mg/dL",
            normal_range: "70-140 mg/dL",
            flag: glucose_flag,
        },
        MetricStatus {
            parameter: "Body Mass Index (BMI)",
            value: features.bmi,
            unit: "kg/m²",
            normal_range: "18.5-24.9",
            flag: bmi_flag,
        },
        MetricStatus {
            parameter: "Blood Pressure",
            value: features.blood_pressure,
            unit: "mmHg",
            normal_range: "80-120 mmHg",
            flag: bp_flag,
        },
    ]
}
