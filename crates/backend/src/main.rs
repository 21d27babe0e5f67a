use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobspring_backend::{
    auth::AuthConfig, build_cors_layer, build_router, config::Config, db, repository::PgStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobspring_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    tracing::info!("Starting Job Spring backend with {:?}", config);

    // Connections are opened lazily by the pool
    let pool = db::establish_connection_pool(
        &config.database_url,
        config.db_tls,
        config.db_max_connections,
    )?;

    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        AuthConfig::new(config.jwt_secret.clone(), config.cross_site_cookies),
    );

    let app = build_router(state).layer(build_cors_layer(&config.cors_allowed_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
