// Vendor Registry - Web Server
// REST API with Axum over the SQLite vendor store

use anyhow::{Context, Result};
use tracing::info;

use vendor_registry::api::{router, AppState};
use vendor_registry::config::Settings;
use vendor_registry::{count_vendors, logging, open_database};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_stdout_logging()?;

    let settings = Settings::load().context("Failed to load settings")?;
    info!("🌐 Vendor Registry - Web Server v{}", vendor_registry::VERSION);

    // Open database (created on first run)
    let conn = open_database(&settings.database.path)?;
    info!(
        path = %settings.database.path.display(),
        vendors = count_vendors(&conn)?,
        "✓ Database opened"
    );

    let app = router(AppState::new(conn));

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("🚀 Server running on http://{addr}");
    info!("   API: http://{addr}/api/vendor/getvendors");

    axum::serve(listener, app)
        .await
        .context("Server stopped with an error")?;

    Ok(())
}
