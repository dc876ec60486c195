//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: user profiles
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USERS
        -- One profile per account: raw measurements, derived goals,
        -- and today's intake counters
        -- ============================================
        CREATE TABLE users (
            uid TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,

            -- Measurements as entered at registration
            age INTEGER NOT NULL,
            weight REAL NOT NULL,                -- kilograms
            height REAL NOT NULL,                -- centimeters
            gender TEXT NOT NULL,
            activity_level TEXT NOT NULL,

            -- Derived goals
            daily_water_goal INTEGER NOT NULL DEFAULT 0,    -- milliliters
            daily_calorie_goal INTEGER NOT NULL DEFAULT 0,  -- kcal
            bmi REAL NOT NULL DEFAULT 0,

            -- Progress counters, never negative
            current_water_intake INTEGER NOT NULL DEFAULT 0 CHECK(current_water_intake >= 0),
            current_calorie_intake INTEGER NOT NULL DEFAULT 0 CHECK(current_calorie_intake >= 0),

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_users_email ON users(email);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
