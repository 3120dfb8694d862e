//! print-bridge - receives label print commands from the scan front end

use print_bridge::logger::init_logger_with_file;
use print_bridge::{Config, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );

    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!(
        "print-bridge listening on {} (allowed origin: {})",
        listener.local_addr()?,
        config.allowed_origin
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("print-bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
