//! Health calculation module
//!
//! Stateless derivation of BMI, BMR, calorie and water goals, and the input
//! range checks that gate them.

pub mod calculator;
pub mod levels;

pub use calculator::{
    bmi_category, calculate_bmi, calculate_bmr, calculate_calorie_goal,
    calculate_calorie_goal_full, calculate_water_goal, is_valid_age, is_valid_height,
    is_valid_weight, progress_percent, BodyMeasurements, HealthMetrics,
};
pub use levels::{ActivityLevel, BmiCategory, Sex, ACTIVITY_MULTIPLIERS};
