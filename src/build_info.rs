//! Build information module
//!
//! Contains compile-time constants for build number and timestamp.

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("BIOSYNC_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("BIOSYNC_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Package description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Build information structure for serialization
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }
}

impl BuildInfo {
    /// One-line identifier, e.g. "biosync 1.0.0 (build 42)"
    pub fn label(&self) -> String {
        format!("{} {} (build {})", self.name, self.version, self.build_number)
    }
}

/// What the server found when it opened its profile store
#[derive(Debug, Clone)]
pub struct StartupSummary {
    pub build: BuildInfo,
    pub database_path: String,
    pub schema_version: i32,
    pub profile_count: i64,
}

impl StartupSummary {
    pub fn banner_lines(&self) -> Vec<String> {
        let rule = "=".repeat(47);
        vec![
            rule.clone(),
            "  BioSync Health Server".to_string(),
            format!(
                "  Version: {} | Build: {}",
                self.build.version, self.build.build_number
            ),
            format!("  Compiled: {}", self.build.build_timestamp),
            format!("  Database: {}", self.database_path),
            format!(
                "  Schema: v{} | Profiles: {}",
                self.schema_version, self.profile_count
            ),
            rule,
        ]
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner(summary: &StartupSummary) {
    for line in summary.banner_lines() {
        eprintln!("{}", line);
    }
}
