//! BioSync Status Tool
//!
//! Provides runtime status information about the BioSync service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Profile and intake instructions for AI assistants
pub const PROFILE_INSTRUCTIONS: &str = r#"
# BioSync Profile Instructions

BioSync stores one profile per user and tracks two counters for the day:
water (ml) and calories (kcal).

## Registering a User

Call `register_profile` with the user's account `uid` and:

| Field | Rule |
|-------|------|
| full_name | required |
| email | required, `name@domain.tld` |
| age | whole years, 1 to 120 |
| weight_kg | 20 to 500 |
| height_cm | 50 to 300 |
| sex | "male" or "female"; anything else gets no BMR adjustment |
| activity_level | "Sedentary", "Light", "Moderate" or "Active" (any case) |

Other activity levels (for example "very active") are accepted and shown on
the dashboard, but the calorie goal then uses the Sedentary multiplier.

If `success` is false, show every entry in `errors` to the user and retry.

## Derived Goals

- **BMI** = weight / (height in m)^2, one decimal
- **Water goal** = weight x 35 ml, whole milliliters
- **BMR** (Mifflin-St Jeor) = 10 x weight + 6.25 x height - 5 x age, +5 men, -161 women
- **Calorie goal** = BMR x activity multiplier (1.2 / 1.375 / 1.55 / 1.725)

Use `calculate_metrics` to preview these without storing anything.

## Daily Tracking

- `add_water` with `amount_ml` (the app's quick-add buttons are 250 and 500)
- `add_calories` with `amount`
- Negative amounts correct a mistake; counters never drop below 0
- `reset_daily_intake` at the start of a new day
- `get_dashboard` for the home-screen summary; percentages are capped at 100

## Changing Measurements

`update_measurements` replaces weight, height, age, sex and activity level
and recalculates every goal. Intake counters are left alone.
"#;

/// Runtime status of the BioSync service
#[derive(Debug, Clone, Serialize)]
pub struct BioSyncStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> BioSyncStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        BioSyncStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/biosync.db"));
        let status = tracker.get_status();
        assert_eq!(status.database_path, "/nonexistent/biosync.db");
        assert!(status.database_size_bytes.is_none());
        assert_eq!(status.process_id, std::process::id());
    }
}
