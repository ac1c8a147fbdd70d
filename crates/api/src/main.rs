use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting draft session core API server");
    tracing::info!("Server will listen on: {}", config.server_address());

    let pool = db::create_pool(&config.database.url).await?;
    tracing::info!("Database connection pool created");

    let state = AppState::new(pool, &config.redis_url).await?;
    tracing::info!("Connected to state cache");

    let app = api::routes::create_router_with_cors(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.server_address()).await?;
    tracing::info!("Server listening on {}", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
