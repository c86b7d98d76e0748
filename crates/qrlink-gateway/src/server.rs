use std::sync::Arc;

use anyhow::Context;
use qrlink_core::LinkStore;
use qrlink_generator::RandomGenerator;
use qrlink_qrcode::PngQrEncoder;
use qrlink_shortener::ShortenerService;
use qrlink_storage::JsonFileStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::app::App;
use crate::config::Config;
use crate::state::AppState;

pub type FileShortener = ShortenerService<JsonFileStore, RandomGenerator, PngQrEncoder>;

/// Builds the production service from `config`.
///
/// The data file is loaded once up front: a missing file is fine, a corrupt
/// one stops startup instead of failing every write later on.
pub async fn build_shortener(config: &Config) -> anyhow::Result<FileShortener> {
    let store = JsonFileStore::new(&config.data_file);
    let table = store
        .load()
        .await
        .with_context(|| format!("failed to load data file {}", config.data_file.display()))?;

    info!(
        data_file = %config.data_file.display(),
        records = table.len(),
        "link table ready"
    );

    Ok(ShortenerService::new(
        store,
        RandomGenerator::new(usize::from(config.code_length)),
        PngQrEncoder::new(config.qr_settings()),
        config.base_url.clone(),
    ))
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let shortener = build_shortener(&config).await?;
    let state = AppState::new(Arc::new(shortener));

    let listen_addr = config.listen_addr();
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;

    info!(
        listen_addr = %listener.local_addr()?,
        base_url = %config.base_url,
        code_length = config.code_length,
        log_format = %config.log_format,
        "starting gateway server"
    );

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
