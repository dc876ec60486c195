//! BioSync Tools module
//!
//! MCP tool implementations for BioSync.

pub mod dashboard;
pub mod profiles;
pub mod status;
