use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use freight_api::{app, AppState};
use freight_core::CountryDatabase;
use freight_shipment::ShipmentService;
use freight_store::{app_config::Config, MemoryShipmentRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "freight_api=debug,freight_shipment=debug,freight_store=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("failed to load config")?;
    tracing::info!(
        service = %config.service.name,
        version = %config.service.version,
        environment = %config.service.environment,
        "Starting shipment service on port {}",
        config.server.port
    );

    let countries = Arc::new(CountryDatabase::iso3166());
    let repo = Arc::new(MemoryShipmentRepository::new());
    let shipments = Arc::new(ShipmentService::new(countries, repo));

    let app = app(AppState::new(&config, shipments));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("unable to listen on {}", addr))?;
    tracing::info!("Listening on {}", addr);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined.context("server task panicked")?.context("server failed")?;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutdown requested, draining connections");
    let _ = stop_tx.send(());

    let timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    match tokio::time::timeout(timeout, &mut server).await {
        Ok(joined) => {
            joined.context("server task panicked")?.context("server failed")?;
            tracing::info!("Server gracefully stopped listening on {}", addr);
        }
        Err(_) => {
            tracing::warn!("Graceful shutdown timed out after {:?}", timeout);
            server.abort();
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
