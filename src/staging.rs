//! Rule-based risk staging from glucose, BMI and insulin.
//!
//! Rules are evaluated top to bottom and the first match wins. The second
//! rule is broad (any BMI ≥ 25 lands there) and shadows the Type 1 rule for
//! overweight patients; that precedence is the established contract.

use crate::models::Stage;

/// Inputs the staging rules look at. Values are unscaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageInputs {
    pub glucose: f64,
    pub bmi: f64,
    pub insulin: f64,
}

/// One row of the staging table.
pub struct StageRule {
    pub stage: Stage,
    pub condition: &'static str,
    pub matches: fn(&StageInputs) -> bool,
}

pub const STAGE_RULES: [StageRule; 4] = [
    StageRule {
        stage: Stage::Normal,
        condition: "glucose < 110 and bmi < 25",
        matches: is_normal,
    },
    StageRule {
        stage: Stage::PreDiabetic,
        condition: "110 <= glucose <= 140 or bmi >= 25",
        matches: is_pre_diabetic,
    },
    StageRule {
        stage: Stage::Type1Diabetes,
        condition: "glucose >= 140 and insulin < 30",
        matches: is_type_one,
    },
    StageRule {
        stage: Stage::Type2Diabetes,
        condition: "otherwise",
        matches: always,
    },
];

fn is_normal(i: &StageInputs) -> bool {
    i.glucose < 110.0 && i.bmi < 25.0
}

fn is_pre_diabetic(i: &StageInputs) -> bool {
    (110.0..=140.0).contains(&i.glucose) || i.bmi >= 25.0
}

fn is_type_one(i: &StageInputs) -> bool {
    i.glucose >= 140.0 && i.insulin < 30.0
}

fn always(_: &StageInputs) -> bool {
    true
}

/// Classify a submission into one of the four risk stages.
pub fn classify_stage(glucose: f64, bmi: f64, insulin: f64) -> Stage {
    let inputs = StageInputs {
        glucose,
        bmi,
        insulin,
    };
    STAGE_RULES
        .iter()
        .find(|rule| (rule.matches)(&inputs))
        .map(|rule| rule.stage)
        .unwrap_or(Stage::Type2Diabetes)
}

/// Owned copy of the stage's fixed suggestions.
pub fn suggestions_for(stage: Stage) -> Vec<String> {
    stage.suggestions().iter().map(|s| (*s).to_string()).collect()
}
