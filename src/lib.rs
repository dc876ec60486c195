//! BioSync Library
//!
//! Health metric derivation (BMI, BMR, calorie and water goals) and the
//! user profile store that tracks daily intake against those goals.

pub mod build_info;
pub mod db;
pub mod health;
pub mod mcp;
pub mod models;
pub mod tools;
