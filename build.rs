//! Build script for BioSync
//!
//! Increments build number on each recompilation and embeds build metadata.

use std::fs;
use std::path::Path;

fn main() {
    // Only rerun when src/ files change (not on every cargo build)
    println!("cargo:rerun-if-changed=src");

    // Build counter lives next to Cargo.toml
    let build_number_path = Path::new("build_number.txt");

    // Missing or unreadable counter starts over at 0
    let current_build: u64 = fs::read_to_string(build_number_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);

    let new_build = current_build + 1;

    // Persist the new count for the next build
    fs::write(build_number_path, new_build.to_string())
        .expect("Failed to write build number file");

    // UTC, second precision
    let now = chrono::Utc::now();
    let timestamp = now.format("%Y-%m-%dT%H:%M:%SZ").to_string();

    // Read back by build_info.rs through option_env!
    println!("cargo:rustc-env=BIOSYNC_BUILD_NUMBER={}", new_build);
    println!("cargo:rustc-env=BIOSYNC_BUILD_TIMESTAMP={}", timestamp);

    // Shown in the cargo build log
    println!("cargo:warning=BioSync Build #{} at {}", new_build, timestamp);
}
