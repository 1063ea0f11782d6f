use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use stock_review_backend::config::AppConfig;
use stock_review_backend::logging::{init_logging, LoggingConfig};
use stock_review_backend::state::AppState;
use stock_review_backend::{app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    db::run_migrations(&pool).await?;
    tracing::info!("✅ Database connected and migrated");

    let state = AppState { pool };
    let app = app::create_app(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Stock review backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
