use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tea_selector::auth::TokenService;
use tea_selector::config::Config;
use tea_selector::router::{AppState, tea_router};
use tea_selector::Database;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database = %cfg.database.location.display(),
        port = cfg.server.port,
        register_enabled = cfg.server.register_enabled,
        loglevel = %cfg.loglevel
    );

    // No degraded mode: a store that cannot be opened ends the process.
    let db = Database::open(
        &cfg.database.location,
        &cfg.database.tea_types,
        &cfg.database.owners,
    )
    .await?;

    let state = AppState::new(
        db.clone(),
        TokenService::new(&cfg.server.signing_key),
        cfg.server.register_enabled,
    );
    let app = tea_router(state);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
