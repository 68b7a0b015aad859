use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use quotation_api::{config, db, events, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: the tracing filter and format come from it. Load
    // failures go to stderr since no subscriber exists yet.
    let app_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    config::init_tracing(app_config.log_level(), app_config.log_json);

    info!(
        environment = %app_config.environment,
        host = %app_config.host,
        port = app_config.port,
        "Starting quotation-api"
    );

    let db_pool = Arc::new(
        db::establish_connection_from_app_config(&app_config)
            .await
            .context("failed to establish database connection")?,
    );

    if app_config.auto_migrate {
        db::run_migrations(&db_pool)
            .await
            .context("failed to run database migrations")?;
    }

    let (event_tx, event_rx) = mpsc::channel(app_config.event_channel_capacity);
    let event_sender = Arc::new(events::EventSender::new(event_tx));
    tokio::spawn(events::process_events(event_rx));

    let bind_addr = format!("{}:{}", app_config.host, app_config.port);
    let state = AppState::new(db_pool, app_config, Some(event_sender));
    let app = quotation_api::create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
