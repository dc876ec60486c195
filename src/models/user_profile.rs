//! User profile model
//!
//! One record per account: measurements entered at registration, the goals
//! derived from them, and today's intake counters.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::health::{progress_percent, BmiCategory, BodyMeasurements, HealthMetrics};

/// A stored user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub gender: String,
    pub activity_level: String,
    pub daily_water_goal: i64,
    pub daily_calorie_goal: i64,
    pub current_water_intake: i64,
    pub current_calorie_intake: i64,
    pub bmi: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a profile. Goals and BMI are already derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileCreate {
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub gender: String,
    pub activity_level: String,
    pub daily_water_goal: i64,
    pub daily_calorie_goal: i64,
    pub bmi: f64,
}

/// Which daily intake counter to adjust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeKind {
    Water,
    Calories,
}

impl IntakeKind {
    fn column(&self) -> &'static str {
        match self {
            IntakeKind::Water => "current_water_intake",
            IntakeKind::Calories => "current_calorie_intake",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeKind::Water => "water",
            IntakeKind::Calories => "calories",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            IntakeKind::Water => "ml",
            IntakeKind::Calories => "kcal",
        }
    }
}

impl UserProfile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            uid: row.get("uid")?,
            full_name: row.get("full_name")?,
            email: row.get("email")?,
            age: row.get("age")?,
            weight: row.get("weight")?,
            height: row.get("height")?,
            gender: row.get("gender")?,
            activity_level: row.get("activity_level")?,
            daily_water_goal: row.get("daily_water_goal")?,
            daily_calorie_goal: row.get("daily_calorie_goal")?,
            current_water_intake: row.get("current_water_intake")?,
            current_calorie_intake: row.get("current_calorie_intake")?,
            bmi: row.get("bmi")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new profile
    pub fn create(conn: &Connection, data: &UserProfileCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO users (
                uid, full_name, email, age, weight, height, gender, activity_level,
                daily_water_goal, daily_calorie_goal, bmi
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                data.uid,
                data.full_name,
                data.email,
                data.age,
                data.weight,
                data.height,
                data.gender,
                data.activity_level,
                data.daily_water_goal,
                data.daily_calorie_goal,
                data.bmi,
            ],
        )?;

        Self::get_by_uid(conn, &data.uid)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a profile by account uid
    pub fn get_by_uid(conn: &Connection, uid: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE uid = ?1")?;

        let result = stmt.query_row([uid], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List profiles, oldest first
    pub fn list(conn: &Connection, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM users ORDER BY created_at ASC, uid ASC LIMIT ?1 OFFSET ?2",
        )?;

        let profiles = stmt
            .query_map(params![limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(profiles)
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Add a signed delta to one intake counter, never going below zero.
    ///
    /// The sum saturates at `i64::MAX`; SQLite would otherwise promote an
    /// overflowing INTEGER sum to REAL.
    pub fn adjust_intake(
        conn: &Connection,
        uid: &str,
        kind: IntakeKind,
        delta: i64,
    ) -> DbResult<Option<Self>> {
        let column = kind.column();
        let sql = format!(
            r#"
            UPDATE users SET
                {column} = CASE
                    WHEN ?1 > 0 AND {column} > ?3 - ?1 THEN ?3
                    ELSE MAX(0, {column} + ?1)
                END,
                updated_at = datetime('now')
            WHERE uid = ?2
            "#
        );
        let rows = conn.execute(&sql, params![delta, uid, i64::MAX])?;
        if rows == 0 {
            return Ok(None);
        }

        tracing::info!(uid, kind = kind.as_str(), delta, "adjusted intake");
        Self::get_by_uid(conn, uid)
    }

    /// Zero both intake counters (start of a new day)
    pub fn reset_intake(conn: &Connection, uid: &str) -> DbResult<Option<Self>> {
        let rows = conn.execute(
            r#"
            UPDATE users SET
                current_water_intake = 0,
                current_calorie_intake = 0,
                updated_at = datetime('now')
            WHERE uid = ?1
            "#,
            [uid],
        )?;
        if rows == 0 {
            return Ok(None);
        }

        tracing::info!(uid, "reset daily intake");
        Self::get_by_uid(conn, uid)
    }

    /// Store new measurements and re-derive every goal from them
    pub fn update_measurements(
        conn: &Connection,
        uid: &str,
        measurements: &BodyMeasurements,
    ) -> DbResult<Option<Self>> {
        let metrics = HealthMetrics::compute(measurements);
        let rows = conn.execute(
            r#"
            UPDATE users SET
                age = ?1,
                weight = ?2,
                height = ?3,
                gender = ?4,
                activity_level = ?5,
                daily_water_goal = ?6,
                daily_calorie_goal = ?7,
                bmi = ?8,
                updated_at = datetime('now')
            WHERE uid = ?9
            "#,
            params![
                measurements.age,
                measurements.weight_kg,
                measurements.height_cm,
                measurements.sex,
                measurements.activity_level,
                metrics.water_goal_ml,
                metrics.calorie_goal,
                metrics.bmi,
                uid,
            ],
        )?;
        if rows == 0 {
            return Ok(None);
        }

        Self::get_by_uid(conn, uid)
    }

    /// Re-derive goals from the measurements already stored
    pub fn recalculate_goals(conn: &Connection, uid: &str) -> DbResult<Option<Self>> {
        match Self::get_by_uid(conn, uid)? {
            Some(profile) => Self::update_measurements(conn, uid, &profile.measurements()),
            None => Ok(None),
        }
    }

    pub fn delete(conn: &Connection, uid: &str) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM users WHERE uid = ?1", [uid])?;
        Ok(rows > 0)
    }

    pub fn measurements(&self) -> BodyMeasurements {
        BodyMeasurements {
            weight_kg: self.weight,
            height_cm: self.height,
            age: self.age,
            sex: self.gender.clone(),
            activity_level: self.activity_level.clone(),
        }
    }

    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi)
    }

    /// Water intake as a percentage of goal, 0..=100
    pub fn water_progress(&self) -> i64 {
        progress_percent(self.current_water_intake, self.daily_water_goal)
    }

    /// Calorie intake as a percentage of goal, 0..=100
    pub fn calorie_progress(&self) -> i64 {
        progress_percent(self.current_calorie_intake, self.daily_calorie_goal)
    }

    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(self.full_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::RegistrationInput;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn registration() -> RegistrationInput {
        RegistrationInput {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            age: 30,
            weight_kg: 68.0,
            height_cm: 170.0,
            sex: "female".to_string(),
            activity_level: "Moderate".to_string(),
        }
    }

    fn create_jane(conn: &Connection) -> UserProfile {
        UserProfile::create(conn, &registration().into_profile("jane")).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let conn = setup();
        let created = create_jane(&conn);

        assert_eq!(created.uid, "jane");
        assert_eq!(created.daily_water_goal, 2380);
        assert_eq!(created.daily_calorie_goal, 2218);
        assert_eq!(created.bmi, 23.5);
        assert_eq!(created.current_water_intake, 0);
        assert_eq!(created.current_calorie_intake, 0);

        let fetched = UserProfile::get_by_uid(&conn, "jane").unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_get_missing_profile() {
        let conn = setup();
        assert!(UserProfile::get_by_uid(&conn, "nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_uid_rejected() {
        let conn = setup();
        create_jane(&conn);
        let again = UserProfile::create(&conn, &registration().into_profile("jane"));
        assert!(again.is_err());
    }

    #[test]
    fn test_adjust_water_intake() {
        let conn = setup();
        create_jane(&conn);

        let p = UserProfile::adjust_intake(&conn, "jane", IntakeKind::Water, 250)
            .unwrap()
            .unwrap();
        assert_eq!(p.current_water_intake, 250);

        let p = UserProfile::adjust_intake(&conn, "jane", IntakeKind::Water, 500)
            .unwrap()
            .unwrap();
        assert_eq!(p.current_water_intake, 750);
        assert_eq!(p.current_calorie_intake, 0);
    }

    #[test]
    fn test_adjust_intake_floors_at_zero() {
        let conn = setup();
        create_jane(&conn);

        UserProfile::adjust_intake(&conn, "jane", IntakeKind::Calories, 300).unwrap();
        let p = UserProfile::adjust_intake(&conn, "jane", IntakeKind::Calories, -1000)
            .unwrap()
            .unwrap();
        assert_eq!(p.current_calorie_intake, 0);
    }

    #[test]
    fn test_adjust_intake_unknown_uid() {
        let conn = setup();
        let result = UserProfile::adjust_intake(&conn, "ghost", IntakeKind::Water, 250).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_reset_intake() {
        let conn = setup();
        create_jane(&conn);
        UserProfile::adjust_intake(&conn, "jane", IntakeKind::Water, 1000).unwrap();
        UserProfile::adjust_intake(&conn, "jane", IntakeKind::Calories, 1200).unwrap();

        let p = UserProfile::reset_intake(&conn, "jane").unwrap().unwrap();
        assert_eq!(p.current_water_intake, 0);
        assert_eq!(p.current_calorie_intake, 0);
    }

    #[test]
    fn test_update_measurements_rederives_goals() {
        let conn = setup();
        create_jane(&conn);

        let p = UserProfile::update_measurements(
            &conn,
            "jane",
            &BodyMeasurements {
                weight_kg: 60.0,
                height_cm: 170.0,
                age: 30,
                sex: "female".to_string(),
                activity_level: "Sedentary".to_string(),
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(p.weight, 60.0);
        assert_eq!(p.daily_water_goal, 2100);
        // 600 + 1062.5 - 150 - 161 = 1351.5; * 1.2 = 1621.8
        assert_eq!(p.daily_calorie_goal, 1621);
        assert_eq!(p.activity_level, "Sedentary");
    }

    #[test]
    fn test_recalculate_goals_repairs_stale_values() {
        let conn = setup();
        create_jane(&conn);
        conn.execute(
            "UPDATE users SET daily_water_goal = 1, daily_calorie_goal = 1, bmi = 0 WHERE uid = 'jane'",
            [],
        )
        .unwrap();

        let p = UserProfile::recalculate_goals(&conn, "jane").unwrap().unwrap();
        assert_eq!(p.daily_water_goal, 2380);
        assert_eq!(p.daily_calorie_goal, 2218);
        assert_eq!(p.bmi, 23.5);
    }

    #[test]
    fn test_list_count_delete() {
        let conn = setup();
        create_jane(&conn);
        UserProfile::create(&conn, &registration().into_profile("john")).unwrap();

        assert_eq!(UserProfile::count(&conn).unwrap(), 2);
        assert_eq!(UserProfile::list(&conn, 10, 0).unwrap().len(), 2);
        assert_eq!(UserProfile::list(&conn, 1, 1).unwrap().len(), 1);

        assert!(UserProfile::delete(&conn, "jane").unwrap());
        assert!(!UserProfile::delete(&conn, "jane").unwrap());
        assert_eq!(UserProfile::count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_adjust_intake_saturates_at_max() {
        let conn = setup();
        create_jane(&conn);
        UserProfile::adjust_intake(&conn, "jane", IntakeKind::Water, 1000).unwrap();

        let p = UserProfile::adjust_intake(&conn, "jane", IntakeKind::Water, i64::MAX)
            .unwrap()
            .unwrap();
        assert_eq!(p.current_water_intake, i64::MAX);

        let p = UserProfile::adjust_intake(&conn, "jane", IntakeKind::Water, 1)
            .unwrap()
            .unwrap();
        assert_eq!(p.current_water_intake, i64::MAX);
        assert_eq!(p.water_progress(), 100);

        // the row must stay readable for every listing
        assert_eq!(UserProfile::list(&conn, 10, 0).unwrap().len(), 1);

        let p = UserProfile::adjust_intake(&conn, "jane", IntakeKind::Water, i64::MIN)
            .unwrap()
            .unwrap();
        assert_eq!(p.current_water_intake, 0);
    }

    #[test]
    fn test_progress_helpers() {
        let conn = setup();
        create_jane(&conn);
        UserProfile::adjust_intake(&conn, "jane", IntakeKind::Water, 1190).unwrap();
        let p = UserProfile::adjust_intake(&conn, "jane", IntakeKind::Calories, 5000)
            .unwrap()
            .unwrap();

        assert_eq!(p.water_progress(), 50);
        assert_eq!(p.calorie_progress(), 100);
        assert_eq!(p.bmi_category(), BmiCategory::Normal);
    }

    #[test]
    fn test_progress_with_zero_goal() {
        let conn = setup();
        let mut data = registration().into_profile("zero");
        data.daily_water_goal = 0;
        let p = UserProfile::create(&conn, &data).unwrap();
        let p = UserProfile::adjust_intake(&conn, &p.uid, IntakeKind::Water, 500)
            .unwrap()
            .unwrap();
        assert_eq!(p.water_progress(), 0);
    }

    #[test]
    fn test_first_name() {
        let conn = setup();
        let p = create_jane(&conn);
        assert_eq!(p.first_name(), "Jane");

        let mut single = p.clone();
        single.full_name = "Cher".to_string();
        assert_eq!(single.first_name(), "Cher");
    }
}
