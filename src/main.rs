use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use paddock::auth::jwt::JwtService;
use paddock::config::{Cli, Config};
use paddock::db;
use paddock::likes::registry::SqliteLikeRegistry;
use paddock::routes;
use paddock::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    if config.auth.jwt_secret == "default_secret" {
        tracing::warn!("Using the built-in token secret; set auth.jwt_secret for production");
    }

    // Initialize database
    let pool = db::create_pool(config.db_path())?;
    db::run_migrations(&pool)?;

    // Build app state
    let jwt = JwtService::new(
        &config.auth.jwt_secret,
        (config.auth.token_hours * 3600) as i64,
    );
    let state = AppState {
        db: pool.clone(),
        config: config.clone(),
        jwt,
        likes: Arc::new(SqliteLikeRegistry::new(pool)),
    };

    // Build router; CORS stays permissive for the SPA frontend
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
