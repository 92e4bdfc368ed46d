//! pulse demo service.
//!
//! - Business endpoints: `/`, `/api/data`, `/api/users`, `/api/health`
//! - Prometheus scrape endpoint: `/metrics`
//! - Config: YAML at `$PULSE_CONFIG`; if unset, `pulse.yaml` or built-in defaults

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use pulse_core::metrics::Registry;
use pulse_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let explicit = std::env::var("PULSE_CONFIG").ok();
    let cfg = config::load(explicit.as_deref())?;
    let listen: SocketAddr = cfg.server.listen.parse()?;

    let registry = Arc::new(Registry::new());
    let state = AppState::new(cfg, registry)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "pulse-server starting");
    tracing::info!("metrics available at http://{listen}/metrics");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
