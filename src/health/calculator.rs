//! Health metric formulas
//!
//! Pure functions deriving BMI, BMR, TDEE and water goals from body
//! measurements, plus the range checks the registration form runs first.
//!
//! Out-of-domain input never fails: non-positive measurements produce a
//! "safe zero", unknown activity levels use the sedentary multiplier.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::levels::{ActivityLevel, BmiCategory, Sex};

// ============================================================================
// Constants
// ============================================================================

/// Milliliters of water per kilogram of body weight per day
pub const WATER_ML_PER_KG: f64 = 35.0;

/// Mifflin-St Jeor coefficients
pub const BMR_WEIGHT_COEF: f64 = 10.0;
pub const BMR_HEIGHT_COEF: f64 = 6.25;
pub const BMR_AGE_COEF: f64 = 5.0;

pub const VALID_AGE: RangeInclusive<i32> = 1..=120;
pub const VALID_WEIGHT_KG: RangeInclusive<f64> = 20.0..=500.0;
pub const VALID_HEIGHT_CM: RangeInclusive<f64> = 50.0..=300.0;

// ============================================================================
// Derivations
// ============================================================================

/// Body Mass Index: weight(kg) / height(m)^2, rounded to one decimal place.
///
/// Rounds half away from zero at the tenths digit. Returns 0.0 when either
/// input is non-positive.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    (bmi * 10.0).round() / 10.0
}

/// Category for a BMI value
pub fn bmi_category(bmi: f64) -> BmiCategory {
    BmiCategory::from_bmi(bmi)
}

/// Daily water goal in milliliters, truncated toward zero
pub fn calculate_water_goal(weight_kg: f64) -> i64 {
    if weight_kg <= 0.0 {
        return 0;
    }
    (weight_kg * WATER_ML_PER_KG).trunc() as i64
}

/// Basal Metabolic Rate (Mifflin-St Jeor), kcal/day.
///
/// `10w + 6.25h - 5a`, then +5 for men and -161 for women. Any other sex
/// keeps the unadjusted base term. Returns 0.0 when weight, height or age is
/// non-positive.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: i32, sex: impl Into<Sex>) -> f64 {
    if weight_kg <= 0.0 || height_cm <= 0.0 || age <= 0 {
        return 0.0;
    }
    let base = BMR_WEIGHT_COEF * weight_kg + BMR_HEIGHT_COEF * height_cm
        - BMR_AGE_COEF * f64::from(age);
    base + sex.into().bmr_offset()
}

/// Daily calorie goal (TDEE): BMR scaled by the activity multiplier,
/// truncated toward zero.
pub fn calculate_calorie_goal(bmr: f64, activity_level: &str) -> i64 {
    (bmr * ActivityLevel::multiplier_for(activity_level)).trunc() as i64
}

/// BMR and calorie goal in one step
pub fn calculate_calorie_goal_full(
    weight_kg: f64,
    height_cm: f64,
    age: i32,
    sex: impl Into<Sex>,
    activity_level: &str,
) -> i64 {
    let bmr = calculate_bmr(weight_kg, height_cm, age, sex);
    calculate_calorie_goal(bmr, activity_level)
}

/// Intake as a whole percentage of goal, clamped to 0..=100.
///
/// A goal of zero gives 0. Integer arithmetic, truncated toward zero.
pub fn progress_percent(current: i64, goal: i64) -> i64 {
    if goal == 0 {
        return 0;
    }
    let percent = i128::from(current) * 100 / i128::from(goal);
    percent.clamp(0, 100) as i64
}

// ============================================================================
// Validation
// ============================================================================

pub fn is_valid_age(age: i32) -> bool {
    VALID_AGE.contains(&age)
}

pub fn is_valid_weight(weight_kg: f64) -> bool {
    VALID_WEIGHT_KG.contains(&weight_kg)
}

pub fn is_valid_height(height_cm: f64) -> bool {
    VALID_HEIGHT_CM.contains(&height_cm)
}

// ============================================================================
// Bundled Metrics
// ============================================================================

/// Raw body measurements as entered at registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub sex: String,
    pub activity_level: String,
}

/// Everything derived from a set of body measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub bmr: f64,
    pub water_goal_ml: i64,
    pub calorie_goal: i64,
}

impl HealthMetrics {
    pub fn compute(m: &BodyMeasurements) -> Self {
        let bmi = calculate_bmi(m.weight_kg, m.height_cm);
        let bmr = calculate_bmr(m.weight_kg, m.height_cm, m.age, m.sex.as_str());
        let metrics = Self {
            bmi,
            bmi_category: BmiCategory::from_bmi(bmi),
            bmr,
            water_goal_ml: calculate_water_goal(m.weight_kg),
            calorie_goal: calculate_calorie_goal(bmr, &m.activity_level),
        };
        tracing::debug!(
            bmi = metrics.bmi,
            bmr = metrics.bmr,
            water_goal_ml = metrics.water_goal_ml,
            calorie_goal = metrics.calorie_goal,
            "computed health metrics"
        );
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bmi_rounds_to_one_decimal() {
        assert_eq!(calculate_bmi(70.0, 175.0), 22.9);
        assert_eq!(calculate_bmi(68.0, 170.0), 23.5);
        assert_eq!(calculate_bmi(100.0, 200.0), 25.0);
    }

    #[test]
    fn test_bmi_matches_formula() {
        for (w, h) in [(55.0, 160.0), (82.3, 181.0), (120.0, 190.5), (45.5, 150.0)] {
            let expected = ((w / ((h / 100.0) * (h / 100.0))) * 10.0_f64).round() / 10.0;
            assert_eq!(calculate_bmi(w, h), expected);
        }
    }

    #[test]
    fn test_bmi_safe_zero() {
        assert_eq!(calculate_bmi(0.0, 175.0), 0.0);
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(-70.0, 175.0), 0.0);
        assert_eq!(calculate_bmi(70.0, -175.0), 0.0);
        assert_eq!(calculate_bmi(-1.0, -1.0), 0.0);
    }

    #[test]
    fn test_bmi_category_wrapper() {
        assert_eq!(bmi_category(calculate_bmi(70.0, 175.0)), BmiCategory::Normal);
        assert_eq!(bmi_category(17.0), BmiCategory::Underweight);
        assert_eq!(bmi_category(31.2), BmiCategory::Obese);
    }

    #[test]
    fn test_water_goal() {
        assert_eq!(calculate_water_goal(60.0), 2100);
        assert_eq!(calculate_water_goal(68.0), 2380);
        assert_eq!(calculate_water_goal(0.0), 0);
        assert_eq!(calculate_water_goal(-5.0), 0);
    }

    #[test]
    fn test_water_goal_truncates_fractional_weight() {
        // 70.5 * 35 = 2467.5
        assert_eq!(calculate_water_goal(70.5), 2467);
        // 60.99 * 35 = 2134.65
        assert_eq!(calculate_water_goal(60.99), 2134);
    }

    #[test]
    fn test_bmr_male() {
        let bmr = calculate_bmr(70.0, 175.0, 25, "male");
        assert!(approx(bmr, 10.0 * 70.0 + 6.25 * 175.0 - 5.0 * 25.0 + 5.0));
        assert!(approx(bmr, 1673.75));
    }

    #[test]
    fn test_bmr_female() {
        let bmr = calculate_bmr(70.0, 175.0, 25, "female");
        assert!(approx(bmr, 10.0 * 70.0 + 6.25 * 175.0 - 5.0 * 25.0 - 161.0));
    }

    #[test]
    fn test_bmr_sex_is_case_insensitive() {
        assert!(approx(
            calculate_bmr(70.0, 175.0, 25, "MALE"),
            calculate_bmr(70.0, 175.0, 25, "male")
        ));
        assert!(approx(
            calculate_bmr(70.0, 175.0, 25, "Female"),
            calculate_bmr(70.0, 175.0, 25, Sex::Female)
        ));
    }

    #[test]
    fn test_bmr_unknown_sex_gets_base_term() {
        let base = 10.0 * 70.0 + 6.25 * 175.0 - 5.0 * 25.0;
        assert!(approx(calculate_bmr(70.0, 175.0, 25, "other"), base));
        assert!(approx(calculate_bmr(70.0, 175.0, 25, ""), base));
        assert!(!approx(
            calculate_bmr(70.0, 175.0, 25, "other"),
            calculate_bmr(70.0, 175.0, 25, "male")
        ));
    }

    #[test]
    fn test_bmr_safe_zero() {
        assert_eq!(calculate_bmr(0.0, 175.0, 25, "male"), 0.0);
        assert_eq!(calculate_bmr(70.0, 0.0, 25, "male"), 0.0);
        assert_eq!(calculate_bmr(70.0, 175.0, 0, "male"), 0.0);
        assert_eq!(calculate_bmr(70.0, 175.0, -3, "female"), 0.0);
    }

    #[test]
    fn test_calorie_goal_multipliers() {
        let bmr = 1673.75;
        assert_eq!(calculate_calorie_goal(bmr, "Sedentary"), (bmr * 1.2).trunc() as i64);
        assert_eq!(calculate_calorie_goal(bmr, "Light"), (bmr * 1.375).trunc() as i64);
        assert_eq!(calculate_calorie_goal(bmr, "Moderate"), (bmr * 1.55).trunc() as i64);
        assert_eq!(calculate_calorie_goal(bmr, "Active"), (bmr * 1.725).trunc() as i64);
    }

    #[test]
    fn test_calorie_goal_unknown_level_uses_sedentary() {
        let bmr = 1500.0;
        assert_eq!(calculate_calorie_goal(bmr, "very active"), 1800);
        assert_eq!(calculate_calorie_goal(bmr, ""), 1800);
        assert_eq!(
            calculate_calorie_goal(bmr, "extremely active"),
            calculate_calorie_goal(bmr, "Sedentary")
        );
    }

    #[test]
    fn test_calorie_goal_level_names_are_exact() {
        let bmr = 1500.0;
        assert_eq!(calculate_calorie_goal(bmr, "moderate"), 1800);
        assert_eq!(calculate_calorie_goal(bmr, "ACTIVE"), 1800);
        assert_eq!(calculate_calorie_goal(bmr, "Moderate"), 2325);
    }

    #[test]
    fn test_calorie_goal_truncates_toward_zero() {
        assert_eq!(calculate_calorie_goal(1431.5, "Moderate"), 2218);
        assert_eq!(calculate_calorie_goal(0.0, "Active"), 0);
        // negative intermediate truncates toward zero, not down
        assert_eq!(calculate_calorie_goal(-10.5, "Sedentary"), -12);
    }

    #[test]
    fn test_calorie_goal_full_composes() {
        let full = calculate_calorie_goal_full(80.0, 180.0, 40, "male", "Light");
        let bmr = calculate_bmr(80.0, 180.0, 40, "male");
        assert_eq!(full, calculate_calorie_goal(bmr, "Light"));
        assert_eq!(calculate_calorie_goal_full(0.0, 180.0, 40, "male", "Active"), 0);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(1050, 2100), 50);
        assert_eq!(progress_percent(0, 2100), 0);
        assert_eq!(progress_percent(2100, 2100), 100);
        assert_eq!(progress_percent(4200, 2100), 100);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(7, 100), 7);
    }

    #[test]
    fn test_progress_percent_zero_goal() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(500, 0), 0);
    }

    #[test]
    fn test_progress_percent_clamps_negative() {
        assert_eq!(progress_percent(-250, 2000), 0);
        assert_eq!(progress_percent(i64::MAX, 1), 100);
    }

    #[test]
    fn test_progress_percent_is_stable() {
        let first = progress_percent(1234, 2380);
        assert_eq!(progress_percent(1234, 2380), first);
    }

    #[test]
    fn test_valid_age_bounds() {
        assert!(!is_valid_age(0));
        assert!(is_valid_age(1));
        assert!(is_valid_age(120));
        assert!(!is_valid_age(121));
        assert!(!is_valid_age(-1));
    }

    #[test]
    fn test_valid_weight_bounds() {
        assert!(!is_valid_weight(19.9));
        assert!(is_valid_weight(20.0));
        assert!(is_valid_weight(500.0));
        assert!(!is_valid_weight(500.1));
        assert!(!is_valid_weight(f64::NAN));
    }

    #[test]
    fn test_valid_height_bounds() {
        assert!(!is_valid_height(49.9));
        assert!(is_valid_height(50.0));
        assert!(is_valid_height(300.0));
        assert!(!is_valid_height(300.1));
    }

    #[test]
    fn test_metrics_scenario_female_moderate() {
        let metrics = HealthMetrics::compute(&BodyMeasurements {
            weight_kg: 68.0,
            height_cm: 170.0,
            age: 30,
            sex: "female".to_string(),
            activity_level: "Moderate".to_string(),
        });
        assert_eq!(metrics.bmi, 23.5);
        assert_eq!(metrics.bmi_category, BmiCategory::Normal);
        assert!(approx(metrics.bmr, 1431.5));
        assert_eq!(metrics.calorie_goal, 2218);
        assert_eq!(metrics.water_goal_ml, 2380);
    }

    #[test]
    fn test_metrics_zero_inputs() {
        let metrics = HealthMetrics::compute(&BodyMeasurements {
            weight_kg: 0.0,
            height_cm: 0.0,
            age: 0,
            sex: "male".to_string(),
            activity_level: "Active".to_string(),
        });
        assert_eq!(metrics.bmi, 0.0);
        assert_eq!(metrics.bmr, 0.0);
        assert_eq!(metrics.water_goal_ml, 0);
        assert_eq!(metrics.calorie_goal, 0);
    }
}
