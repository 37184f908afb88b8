//! Payroll engine HTTP server.
//!
//! Loads the statutory tables, then serves the API on `PORT` (default 3000).
//! Log verbosity follows `RUST_LOG` (default `info`).

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, ServerSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = ServerSettings::from_env().map_err(|e| {
        tracing::error!("Invalid server settings: {e}");
        e
    })?;

    let config = ConfigLoader::load(&settings.config_dir).map_err(|e| {
        tracing::error!("Failed to load statutory tables: {e}");
        e
    })?;
    tracing::info!(
        scheme = %config.scheme().code,
        version = %config.scheme().version,
        config_dir = %settings.config_dir.display(),
        "Statutory tables loaded"
    );

    let app = create_router(AppState::new(config));

    let addr = settings.bind_addr();
    tracing::info!("Payroll engine listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
