mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use jiff::SignedDuration;
use shortly_core::SystemClock;
use shortly_gateway::{App, AppState, SharedClock, SharedStore, RESERVED_ROUTES};
use shortly_shortener::{GenerationPolicy, ShortenerSettings};
use shortly_storage::{FileStore, InMemoryStore, KeyValueStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    shortly_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        storage_backend = %config.storage,
        default_validity_minutes = config.default_validity_minutes,
        code_length = config.code_length,
        "starting shortly gateway"
    );

    let store: SharedStore = match config.storage {
        StorageBackendArg::InMemory => Arc::new(InMemoryStore::new()),
        StorageBackendArg::File => {
            let data_dir = config
                .data_dir
                .context("data dir is required when storage backend is file")?;
            let store = FileStore::open(&data_dir)
                .await
                .with_context(|| format!("failed to open data dir {}", data_dir.display()))?;
            Arc::new(store)
        }
    };
    store.init().await.context("failed to initialize storage")?;

    let settings = ShortenerSettings::builder()
        .default_validity(SignedDuration::from_mins(i64::from(
            config.default_validity_minutes,
        )))
        .generation(
            GenerationPolicy::builder()
                .initial_length(config.code_length as usize)
                .build(),
        )
        .reserved(
            RESERVED_ROUTES
                .iter()
                .map(|route| route.to_string())
                .collect::<Vec<_>>(),
        )
        .build();

    let clock: SharedClock = Arc::new(SystemClock);
    let state = AppState::new(store, clock, settings, config.public_base_url);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
