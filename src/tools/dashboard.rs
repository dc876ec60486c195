//! Dashboard MCP Tool
//!
//! Home-screen view of a profile. Every value is re-derived from the stored
//! record on each call; nothing here is cached.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::db::Database;
use crate::models::UserProfile;

/// Everything the home screen shows for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub uid: String,
    pub first_name: String,
    pub date: String,
    pub calorie_goal: String,
    pub activity_badge: String,
    pub bmi: String,
    pub bmi_category: String,
    pub weight_kg: i64,
    pub height_cm: i64,
    pub water_progress_text: String,
    pub water_percent: i64,
    pub calorie_progress_text: String,
    pub calorie_percent: i64,
}

impl Dashboard {
    pub fn build(profile: &UserProfile, today: NaiveDate) -> Self {
        Self {
            uid: profile.uid.clone(),
            first_name: profile.first_name().to_string(),
            date: today.format("%A, %B %-d").to_string(),
            calorie_goal: format_thousands(profile.daily_calorie_goal),
            activity_badge: format!(
                "{} {}",
                activity_emoji(&profile.activity_level),
                profile.activity_level
            ),
            bmi: format!("{:.1}", profile.bmi),
            bmi_category: profile.bmi_category().label().to_string(),
            weight_kg: profile.weight.trunc() as i64,
            height_cm: profile.height.trunc() as i64,
            water_progress_text: format!(
                "{} / {} ml",
                format_thousands(profile.current_water_intake),
                format_thousands(profile.daily_water_goal)
            ),
            water_percent: profile.water_progress(),
            calorie_progress_text: format!(
                "{} / {} kcal",
                format_thousands(profile.current_calorie_intake),
                format_thousands(profile.daily_calorie_goal)
            ),
            calorie_percent: profile.calorie_progress(),
        }
    }
}

/// Badge emoji keyed by the long display labels. Calculator level names
/// other than "Sedentary" get the default badge.
pub fn activity_emoji(activity_level: &str) -> &'static str {
    match activity_level.to_lowercase().as_str() {
        "sedentary" => "🛋️",
        "lightly active" => "🚶",
        "moderately active" => "🔥",
        "very active" => "🏃",
        "extremely active" => "💪",
        _ => "🔥",
    }
}

/// Group digits in threes with commas: 12345 -> "12,345"
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ============================================================================
// Tool
// ============================================================================

/// Dashboard for a user as of today (local time)
pub fn get_dashboard(db: &Database, uid: &str) -> Result<Option<Dashboard>, String> {
    get_dashboard_on(db, uid, Local::now().date_naive())
}

pub fn get_dashboard_on(
    db: &Database,
    uid: &str,
    today: NaiveDate,
) -> Result<Option<Dashboard>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = UserProfile::get_by_uid(&conn, uid)
        .map_err(|e| format!("Failed to get profile: {}", e))?;

    Ok(profile.map(|p| Dashboard::build(&p, today)))
}
