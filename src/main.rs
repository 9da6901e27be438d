// src/main.rs

use note_colors::config::{Config, StoreKind};
use note_colors::routes;
use note_colors::state::AppState;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    match config.store {
        StoreKind::Sheets => tracing::info!(
            "Using spreadsheet store {} (sheet '{}')",
            config.sheets.spreadsheet_id,
            config.sheets.sheet_name
        ),
        StoreKind::Memory => tracing::warn!("Using in-memory store, results are lost on restart"),
    }
    if config.admin_token.is_none() {
        tracing::info!("ADMIN_TOKEN not set, admin routes are disabled");
    }

    let addr = config.bind_addr;
    let state = AppState::from_config(config);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}
