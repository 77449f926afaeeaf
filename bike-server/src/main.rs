use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bike_server::config::{DashboardConfig, MapConfig};
use bike_server::dashboard::Dashboard;
use bike_server::feed::{FeedClient, FeedClientConfig, RefreshTask, StationDataSource};
use bike_server::usage::UsageHistory;
use bike_server::web::{AppState, EventHub, create_router};

/// Static assets served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Usage history shown in the chart panel.
const USAGE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/usage_count.json");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bike_server=info,tower_http=info")),
        )
        .init();

    let config = DashboardConfig::default();
    let events = EventHub::new();
    let dashboard = Arc::new(Dashboard::new(
        Arc::new(events.clone()),
        config.clone(),
        MapConfig::default(),
    ));

    // Start refreshing stations; the first refresh runs immediately
    let client = FeedClient::new(FeedClientConfig::new())?;
    info!(url = client.url(), "using station feed");
    let source = Arc::new(StationDataSource::new(client, dashboard.store().clone()));
    let refresh = RefreshTask::spawn(source, config.refresh_interval);

    let usage = match UsageHistory::load(USAGE_PATH).await {
        Ok(history) => {
            info!(records = history.len(), "loaded usage history");
            history
        }
        Err(e) => {
            warn!(error = %e, path = USAGE_PATH, "usage chart will be empty");
            UsageHistory::default()
        }
    };

    let state = AppState::new(Arc::clone(&dashboard), events, usage);
    let app = create_router(state, STATIC_DIR);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("YouBike dashboard listening on http://{addr}");

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    refresh.cancel();
    dashboard.tear_down();

    Ok(())
}
