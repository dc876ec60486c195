//! MCP server module
//!
//! Exposes BioSync tools over the Model Context Protocol.

pub mod server;

pub use server::BioSyncService;
