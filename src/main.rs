use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cropcare::config::{self, APP_NAME, APP_VERSION, Cli};
use cropcare::core::db::AgriDb;
use cropcare::{AppState, DiseaseDetector, HttpSettings, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter(args.verbose))),
        )
        .init();

    if args.image_size == 0 {
        anyhow::bail!("--image-size must be greater than zero");
    }

    // Storage is optional: without it reads answer with fallback bodies.
    let db = match AgriDb::new(&args.database).await {
        Ok(db) => Some(db),
        Err(e) => {
            tracing::warn!(error = %e, path = ?args.database, "Database unavailable, continuing without storage");
            None
        }
    };

    let detector = DiseaseDetector::new(args.detector_mode, args.image_size).with_verbose(args.verbose);
    let state = AppState::new(db.clone(), detector);
    let router = build_router(state, &HttpSettings::from(&args));

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, version = APP_VERSION, mode = ?args.detector_mode, "{} listening", APP_NAME);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(db) = db {
        db.close().await?;
    }
    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
