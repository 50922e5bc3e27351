/// Workforce planner: resource allocation service
///
/// Main entry point. Loads `.env`, builds the configuration and starts the HTTP server.

use workforce_planner::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Planning CRUD at /api/{role-types,people,projects,requirements,allocations,leave}
/// - Analysis at /api/projects/{id}/gaps, /api/analytics/* and /api/dashboard
/// - Timeline layouts at /api/projects/{id}/timeline and /api/people/{id}/timeline
/// - Health check at /healthz
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
