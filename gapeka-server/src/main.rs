use gapeka_server::cache::{CacheConfig, PositionCache};
use gapeka_server::config::ServerConfig;
use gapeka_server::data::{self, DataDir};
use gapeka_server::store::RouteStore;
use gapeka_server::web::{AppState, create_router};

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().expect("invalid GAPEKA_* configuration");
    let data_dir = DataDir::new(&config.data_dir);

    // Fail fast if the required data is unavailable
    let schedules =
        data::load_schedules(&data_dir.schedules()).expect("failed to load timetable");
    let routes = RouteStore::load(&data_dir.routes())
        .expect("failed to load precomputed routes (run the precompute binary first)");
    info!(
        trains = schedules.len(),
        routes = routes.len(),
        timezone = %config.timezone,
        "data loaded"
    );

    let cache = PositionCache::new(&CacheConfig::default());
    let addr = config.addr;
    let state = AppState::new(schedules, routes, cache, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    info!(%addr, "listening");
    axum::serve(listener, app).await.expect("server error");
}
