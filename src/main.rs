//! BioSync
//!
//! An MCP server for daily wellness tracking.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use biosync::build_info;
use biosync::db;
use biosync::mcp::BioSyncService;
use biosync::models::UserProfile;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("biosync=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let db_path = db::database_path();
    tracing::info!(path = %db_path.display(), "using database");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;

    let (schema_version, profile_count) = database.with_conn(|conn| {
        if db::migrations::needs_migration(conn)? {
            tracing::info!("applying database migrations");
        }
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        let profiles = UserProfile::count(conn)?;
        tracing::info!(version, profiles, "database schema ready");
        Ok((version, profiles))
    })?;

    let build = build_info::BuildInfo::current();
    let label = build.label();
    build_info::print_startup_banner(&build_info::StartupSummary {
        build,
        database_path: db_path.display().to_string(),
        schema_version,
        profile_count,
    });

    let service = BioSyncService::new(db_path, database);

    tracing::info!(build = %label, "starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
