use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio::backend::Backend;
use folio::config::Config;
use folio::db::{create_pool, run_migrations};
use folio::models::profile::Profile;
use folio::realtime;
use folio::routes::build_router;
use folio::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    let profile = Profile::load(config.profile_path.as_deref())?;
    info!("Profile loaded for {}", profile.name);

    // Initialize PostgreSQL (optional)
    let pool = match &config.database_url {
        Some(url) => Some(create_pool(url)?),
        None => {
            warn!("DATABASE_URL not set; serving fallback content only");
            None
        }
    };

    if let (Some(pool), true) = (&pool, config.run_migrations) {
        run_migrations(pool).await?;
    }

    let backend = Backend::from_config(
        pool,
        config.fetch_max_retries,
        config.fetch_retry_delay_ms,
    );

    let state = AppState::new(backend, profile);

    // Attaches the change feed, then hydrates. Held for the server's lifetime;
    // dropping it unsubscribes.
    let _subscription = realtime::sync::subscribe(
        &state.backend,
        &config.realtime_channel,
        state.store.clone(),
        state.hub.clone(),
        Duration::from_millis(config.realtime_retry_ms),
    );

    let app = build_router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
