//! Booking HTTP Server binary

use booking_core::AuthGate;
use booking_server::{probe::PgProbe, AppState, ServerConfig};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    if config.otel_enabled {
        booking_server::tracing::init_tracing_stack("booking-server", &config)?;
        info!("OpenTelemetry tracing enabled");
    } else {
        booking_server::tracing::init_console_logging()?;
        info!("Console logging enabled (set OTEL_ENABLED=true for OpenTelemetry)");
    }

    info!("Starting booking server v{}", env!("CARGO_PKG_VERSION"));

    booking_server::metrics::init_prometheus()?;
    booking_server::metrics::init_metrics();

    let gate = AuthGate::new(config.api_key.clone());
    if gate.is_open() {
        warn!("API_KEY is not set; protected endpoints accept every request");
    }

    info!(
        "Datastore {}:{} (health probe only)",
        config.database.host, config.database.port
    );
    let probe = Arc::new(PgProbe::connect_lazy(&config.database));

    let state = AppState::with_debug(gate, probe, config.debug);
    let app = booking_server::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("booking-engine listening on {}", config.bind_address);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    if config.otel_enabled {
        info!("Flushing OpenTelemetry traces...");
        booking_server::tracing::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}
