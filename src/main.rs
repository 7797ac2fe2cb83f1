use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitalwatch::api::RestApi;
use vitalwatch::config::load_config;
use vitalwatch::{Dashboard, JsonFileRepository, VitalsError};

#[tokio::main]
async fn main() -> Result<(), VitalsError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vitalwatch=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(Path::new("config.yaml"))?;

    info!(path = %config.storage.path.display(), "starting VitalWatch");

    let repository = JsonFileRepository::open(&config.storage.path)?;
    let dashboard = Arc::new(Dashboard::new(repository));
    dashboard.fetch_patients()?;

    let api = RestApi::new(Arc::clone(&dashboard));
    let host: IpAddr = config.api.host.parse()?;
    let addr = SocketAddr::new(host, config.api.port);

    info!(%addr, "starting server");

    // Create a channel for shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let (_, server) = warp::serve(api.routes()).try_bind_with_graceful_shutdown(addr, async move {
        shutdown_rx.await.ok();
        info!("shutting down server");
    })?;

    let server_handle = tokio::spawn(server);

    signal::ctrl_c().await?;
    info!("Ctrl+C received, starting graceful shutdown");

    if shutdown_tx.send(()).is_err() {
        error!("server already stopped before shutdown signal");
    }

    server_handle.await?;

    info!("server shutdown complete");
    Ok(())
}
