//! Library Desk server
//!
//! Lending desk REST API for books, movies, memberships and fines.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use library_desk::{
    api, config::AppConfig, repository::Repository, seed::seed_demo_data, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_desk={},tower_http=debug", config.logging.level).into());

    let stdout_layer = match config.logging.format.as_str() {
        "json" => tracing_subscriber::fmt::layer().json().boxed(),
        _ => tracing_subscriber::fmt::layer().boxed(),
    };

    // The guard flushes the file writer on drop, so it lives as long as main
    let (file_layer, _log_guard) = match config.logging.directory.as_deref() {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "library-desk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .with(filter)
        .init();

    tracing::info!("Starting Library Desk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        loan_period_days = config.loans.loan_period_days,
        fine_per_day = %config.loans.fine_per_day,
        "Loan policy"
    );

    let repository = Repository::in_memory();
    if config.seed.load_demo_data {
        seed_demo_data(&repository)
            .await
            .context("Failed to load demo data")?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, repository);
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
