//! Categorical inputs and outputs of the health calculator
//!
//! Sex and activity level arrive as free-form strings from the registration
//! form; both parse totally into a tagged variant with an explicit fallback.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sex
// ============================================================================

/// Biological sex category, used only to pick the BMR offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    /// Anything that is not "male" or "female". Gets no offset at all.
    Unspecified,
}

/// Mifflin-St Jeor offset for men
pub const BMR_MALE_OFFSET: f64 = 5.0;
/// Mifflin-St Jeor offset for women
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

impl Sex {
    /// Parse a sex string case-insensitively. Never fails.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" => Sex::Male,
            "female" => Sex::Female,
            _ => Sex::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unspecified => "unspecified",
        }
    }

    /// Constant added to the base BMR term
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Sex::Male => BMR_MALE_OFFSET,
            Sex::Female => BMR_FEMALE_OFFSET,
            Sex::Unspecified => 0.0,
        }
    }
}

impl From<&str> for Sex {
    fn from(s: &str) -> Self {
        Sex::parse(s)
    }
}

// ============================================================================
// Activity Level
// ============================================================================

/// Activity level with a known TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

/// TDEE multipliers, keyed by activity level
pub const ACTIVITY_MULTIPLIERS: [(ActivityLevel, f64); 4] = [
    (ActivityLevel::Sedentary, 1.2),
    (ActivityLevel::Light, 1.375),
    (ActivityLevel::Moderate, 1.55),
    (ActivityLevel::Active, 1.725),
];

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
    ];

    /// Look up a level by its exact table name ("Sedentary", "Light",
    /// "Moderate", "Active").
    ///
    /// Any other spelling, including "moderate" and display-only levels such
    /// as "very active", returns `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }

    /// Case-insensitive match against the table names
    pub fn parse_loose(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
    }

    /// Rewrite a user-entered level to its table spelling.
    ///
    /// "moderate" becomes "Moderate". Levels outside the table are returned
    /// unchanged so they still display as entered.
    pub fn normalize(level: &str) -> String {
        match Self::parse_loose(level) {
            Some(known) => known.as_str().to_string(),
            None => level.to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::Active => "Active",
        }
    }

    pub fn multiplier(&self) -> f64 {
        ACTIVITY_MULTIPLIERS
            .iter()
            .find(|(level, _)| level == self)
            .map(|(_, m)| *m)
            .unwrap_or(SEDENTARY_MULTIPLIER)
    }

    /// Multiplier for an arbitrary level string, falling back to Sedentary
    pub fn multiplier_for(level: &str) -> f64 {
        match Self::from_str(level) {
            Some(level) => level.multiplier(),
            None => {
                tracing::warn!(
                    activity_level = level,
                    "unknown activity level, using sedentary multiplier"
                );
                SEDENTARY_MULTIPLIER
            }
        }
    }
}

/// Fallback multiplier for unknown activity levels
pub const SEDENTARY_MULTIPLIER: f64 = 1.2;

// ============================================================================
// BMI Category
// ============================================================================

pub const BMI_UNDERWEIGHT_BELOW: f64 = 18.5;
pub const BMI_OVERWEIGHT_FROM: f64 = 25.0;
pub const BMI_OBESE_FROM: f64 = 30.0;

/// Weight category for a BMI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 up to (not including) 25.0
    Normal,
    /// 25.0 up to (not including) 30.0
    Overweight,
    /// 30.0 and above
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value. Half-open intervals, no rounding.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < BMI_UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < BMI_OVERWEIGHT_FROM {
            BmiCategory::Normal
        } else if bmi < BMI_OBESE_FROM {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
