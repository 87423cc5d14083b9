use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The serde form matches `as_str`, so stored and serialised values agree.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ClassifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ClassifierError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Stage {
    Normal => "Normal",
    PreDiabetic => "Pre-Diabetic",
    Type1Diabetes => "Type 1 Diabetes",
    Type2Diabetes => "Type 2 Diabetes",
});

str_enum!(Label {
    Diabetic => "Diabetic",
    NotDiabetic => "Not Diabetic",
});

str_enum!(Agreement {
    AllAgree => "all_agree",
    MajorityConsensus => "majority_consensus",
});

str_enum!(ModelKind {
    LogisticRegression => "logistic_regression",
    RandomForest => "random_forest",
    GradientBoosting => "gradient_boosting",
});

str_enum!(MetricFlag {
    Normal => "Normal",
    Elevated => "Elevated",
    Abnormal => "Abnormal",
});

str_enum!(ScoringMode {
    Single => "single",
    Ensemble => "ensemble",
});

impl Stage {
    /// Every stage, in rule-table order.
    pub const ALL: [Stage; 4] = [
        Stage::Normal,
        Stage::PreDiabetic,
        Stage::Type1Diabetes,
        Stage::Type2Diabetes,
    ];

    /// Fixed recommendation list shown with this stage.
    pub fn suggestions(&self) -> &'static [&'static str; 3] {
        match self {
            Stage::Normal => &[
                "Maintain healthy diet",
                "Exercise 30 min daily",
                "Annual checkup",
            ],
            Stage::PreDiabetic => &[
                "Reduce sugar",
                "Exercise 5 days/week",
                "Monitor glucose 3 months",
            ],
            Stage::Type1Diabetes => &[
                "Consult doctor for insulin",
                "Blood glucose monitoring",
                "Balanced meals",
            ],
            Stage::Type2Diabetes => &[
                "Strict medication & diet",
                "Weight management",
                "Consult doctor",
            ],
        }
    }

    /// Stable keys for the suggestions, for presentation layers that localise them.
    pub fn suggestion_keys(&self) -> &'static [&'static str; 3] {
        match self {
            Stage::Normal => &["rec_maintain_diet", "rec_exercise_30", "rec_annual_checkup"],
            Stage::PreDiabetic => &["rec_reduce_sugar", "rec_exercise_5", "rec_monitor_3"],
            Stage::Type1Diabetes => &[
                "rec_consult_insulin",
                "rec_monitor_glucose",
                "rec_balanced_meals",
            ],
            Stage::Type2Diabetes => &["rec_medication", "rec_weight", "rec_consult"],
        }
    }

    /// One-sentence explanation printed in reports.
    pub fn risk_summary(&self) -> &'static str {
        match self {
            Stage::Normal => {
                "Your health metrics are within normal ranges. Continue maintaining a healthy lifestyle."
            }
            Stage::PreDiabetic => {
                "You're at increased risk. Lifestyle changes can reduce diabetes risk by up to 58%."
            }
            Stage::Type1Diabetes => {
                "Requires insulin therapy. Consult an endocrinologist for comprehensive care."
            }
            Stage::Type2Diabetes => {
                "Manageable with medication, diet, and exercise. Regular monitoring is essential."
            }
        }
    }
}

impl Label {
    pub fn from_vote(diabetic: bool) -> Self {
        if diabetic {
            Label::Diabetic
        } else {
            Label::NotDiabetic
        }
    }

    /// 1 for diabetic, 0 otherwise.
    pub fn vote(&self) -> u8 {
        match self {
            Label::Diabetic => 1,
            Label::NotDiabetic => 0,
        }
    }
}

impl Agreement {
    /// Human-readable agreement line used in reports and emails.
    pub fn label(&self) -> &'static str {
        match self {
            Agreement::AllAgree => "All Models Agree (100%)",
            Agreement::MajorityConsensus => "Majority Consensus (67%)",
        }
    }
}

impl ModelKind {
    /// The three ensemble voters, in reporting order.
    pub const ENSEMBLE: [ModelKind; 3] = [
        ModelKind::LogisticRegression,
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
    ];

    /// Artifact file the offline trainer exports for this model.
    pub fn artifact_file(&self) -> &'static str {
        match self {
            ModelKind::LogisticRegression => "logistic_regression.json",
            ModelKind::RandomForest => "random_forest.json",
            ModelKind::GradientBoosting => "gradient_boosting.json",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::LogisticRegression => "Logistic Regression",
            ModelKind::RandomForest => "Random Forest",
            ModelKind::GradientBoosting => "Gradient Boosting",
        }
    }
}

impl Default for ScoringMode {
    fn default() -> Self {
        ScoringMode::Ensemble
    }
}

/// A handle the classifier depends on. Named in fail-closed errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Scaler,
    Model(ModelKind),
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelRole::Scaler => f.write_str("feature scaler"),
            ModelRole::Model(kind) => write!(f, "{} model", kind.display_name()),
        }
    }
}
