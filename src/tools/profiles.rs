//! Profile and Intake MCP Tools
//!
//! Registration, profile lookup, measurement updates and the daily intake
//! counters.

use serde::Serialize;

use crate::db::Database;
use crate::health::{self, BodyMeasurements, HealthMetrics};
use crate::models::{IntakeKind, RegistrationInput, UserProfile};

/// Response for register_profile
#[derive(Debug, Serialize)]
pub struct RegisterProfileResponse {
    pub success: bool,
    pub profile: Option<UserProfile>,
    pub errors: Vec<String>,
}

/// Response for list_profiles
#[derive(Debug, Serialize)]
pub struct ListProfilesResponse {
    pub profiles: Vec<ProfileSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Profile summary for listing
#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub bmi: f64,
    pub daily_water_goal: i64,
    pub daily_calorie_goal: i64,
    pub water_percent: i64,
    pub calorie_percent: i64,
}

/// Response for add_water / add_calories
#[derive(Debug, Serialize)]
pub struct AdjustIntakeResponse {
    pub uid: String,
    pub kind: IntakeKind,
    pub amount: i64,
    pub current: i64,
    pub goal: i64,
    pub progress_percent: i64,
    pub message: String,
}

/// Response for reset_daily_intake
#[derive(Debug, Serialize)]
pub struct ResetIntakeResponse {
    pub uid: String,
    pub current_water_intake: i64,
    pub current_calorie_intake: i64,
}

/// Response for update_measurements
#[derive(Debug, Serialize)]
pub struct UpdateMeasurementsResponse {
    pub success: bool,
    pub profile: Option<UserProfile>,
    pub errors: Vec<String>,
}

/// Response for delete_profile
#[derive(Debug, Serialize)]
pub struct DeleteProfileResponse {
    pub success: bool,
    pub uid: String,
    pub message: String,
}

// ============================================================================
// Profile Tools
// ============================================================================

/// Validate a sign-up form, derive goals and store the profile.
///
/// Validation failures are reported in the response, not as an error.
pub fn register_profile(
    db: &Database,
    uid: &str,
    input: RegistrationInput,
) -> Result<RegisterProfileResponse, String> {
    if uid.trim().is_empty() {
        return Err("uid is required".to_string());
    }

    if let Err(errors) = input.validate() {
        return Ok(RegisterProfileResponse {
            success: false,
            profile: None,
            errors: errors.iter().map(|e| e.to_string()).collect(),
        });
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let existing = UserProfile::get_by_uid(&conn, uid)
        .map_err(|e| format!("Failed to check profile: {}", e))?;
    if existing.is_some() {
        return Err(format!("Profile already exists for uid {}", uid));
    }

    let data = input.into_profile(uid);
    let profile = UserProfile::create(&conn, &data)
        .map_err(|e| format!("Failed to create profile: {}", e))?;

    tracing::info!(
        uid,
        water_goal = profile.daily_water_goal,
        calorie_goal = profile.daily_calorie_goal,
        "registered profile"
    );

    Ok(RegisterProfileResponse {
        success: true,
        profile: Some(profile),
        errors: Vec::new(),
    })
}

pub fn get_profile(db: &Database, uid: &str) -> Result<Option<UserProfile>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    UserProfile::get_by_uid(&conn, uid).map_err(|e| format!("Failed to get profile: {}", e))
}

pub fn list_profiles(db: &Database, limit: i64, offset: i64) -> Result<ListProfilesResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profiles = UserProfile::list(&conn, limit, offset)
        .map_err(|e| format!("Failed to list profiles: {}", e))?;
    let total = UserProfile::count(&conn).map_err(|e| format!("Failed to count profiles: {}", e))?;

    let profiles = profiles
        .into_iter()
        .map(|p| ProfileSummary {
            water_percent: p.water_progress(),
            calorie_percent: p.calorie_progress(),
            uid: p.uid,
            full_name: p.full_name,
            email: p.email,
            bmi: p.bmi,
            daily_water_goal: p.daily_water_goal,
            daily_calorie_goal: p.daily_calorie_goal,
        })
        .collect();

    Ok(ListProfilesResponse {
        profiles,
        total,
        limit,
        offset,
    })
}

/// Replace measurements and re-derive goals. Range checks match registration.
pub fn update_measurements(
    db: &Database,
    uid: &str,
    measurements: BodyMeasurements,
) -> Result<Option<UpdateMeasurementsResponse>, String> {
    let errors = measurement_errors(&measurements);
    if !errors.is_empty() {
        return Ok(Some(UpdateMeasurementsResponse {
            success: false,
            profile: None,
            errors,
        }));
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = UserProfile::update_measurements(&conn, uid, &measurements)
        .map_err(|e| format!("Failed to update measurements: {}", e))?;

    Ok(profile.map(|p| UpdateMeasurementsResponse {
        success: true,
        profile: Some(p),
        errors: Vec::new(),
    }))
}

fn measurement_errors(m: &BodyMeasurements) -> Vec<String> {
    let mut errors = Vec::new();
    if !health::is_valid_age(m.age) {
        errors.push("age must be between 1 and 120".to_string());
    }
    if !health::is_valid_weight(m.weight_kg) {
        errors.push("weight must be between 20 and 500 kg".to_string());
    }
    if !health::is_valid_height(m.height_cm) {
        errors.push("height must be between 50 and 300 cm".to_string());
    }
    errors
}

pub fn delete_profile(db: &Database, uid: &str) -> Result<DeleteProfileResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = UserProfile::delete(&conn, uid)
        .map_err(|e| format!("Failed to delete profile: {}", e))?;

    Ok(DeleteProfileResponse {
        success: deleted,
        uid: uid.to_string(),
        message: if deleted {
            "Profile deleted".to_string()
        } else {
            "Profile not found".to_string()
        },
    })
}

// ============================================================================
// Intake Tools
// ============================================================================

/// Add (or with a negative amount, remove) intake. The counter floors at 0.
pub fn adjust_intake(
    db: &Database,
    uid: &str,
    kind: IntakeKind,
    amount: i64,
) -> Result<Option<AdjustIntakeResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = UserProfile::adjust_intake(&conn, uid, kind, amount)
        .map_err(|e| format!("Failed to update {} intake: {}", kind.as_str(), e))?;

    Ok(profile.map(|p| {
        let (current, goal, progress_percent) = match kind {
            IntakeKind::Water => (p.current_water_intake, p.daily_water_goal, p.water_progress()),
            IntakeKind::Calories => {
                (p.current_calorie_intake, p.daily_calorie_goal, p.calorie_progress())
            }
        };
        AdjustIntakeResponse {
            uid: p.uid,
            kind,
            amount,
            current,
            goal,
            progress_percent,
            message: format!("{:+}{} {} logged", amount, kind.unit(), kind.as_str()),
        }
    }))
}

pub fn reset_daily_intake(db: &Database, uid: &str) -> Result<Option<ResetIntakeResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = UserProfile::reset_intake(&conn, uid)
        .map_err(|e| format!("Failed to reset intake: {}", e))?;

    Ok(profile.map(|p| ResetIntakeResponse {
        uid: p.uid,
        current_water_intake: p.current_water_intake,
        current_calorie_intake: p.current_calorie_intake,
    }))
}

// ============================================================================
// Calculator Tool
// ============================================================================

/// Response for calculate_metrics
#[derive(Debug, Serialize)]
pub struct CalculateMetricsResponse {
    #[serde(flatten)]
    pub metrics: HealthMetrics,
    pub activity_multiplier: f64,
    pub activity_level_recognized: bool,
    pub inputs_valid: bool,
}

/// Derive metrics without storing anything
pub fn calculate_metrics(measurements: &BodyMeasurements) -> CalculateMetricsResponse {
    let recognized = health::ActivityLevel::from_str(&measurements.activity_level);
    CalculateMetricsResponse {
        metrics: HealthMetrics::compute(measurements),
        activity_multiplier: recognized
            .map(|level| level.multiplier())
            .unwrap_or(health::levels::SEDENTARY_MULTIPLIER),
        activity_level_recognized: recognized.is_some(),
        inputs_valid: measurement_errors(measurements).is_empty(),
    }
}
