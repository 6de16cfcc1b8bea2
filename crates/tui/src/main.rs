mod app;

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use flagquiz_core::{
    config::{self, AppConfig},
    engine::StdRandom,
    provider::{spawn_fetch, CountryProvider},
    storage::FileStore,
    GameSession,
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let provider = CountryProvider::from_config(&config)?;
    let (pool_tx, pool_rx) = mpsc::channel(1);
    let fetch = spawn_fetch(provider, pool_tx);

    let store = FileStore::new(config.data_dir.clone());
    info!(data_dir = %store.root().display(), "Scores stored on disk");
    let session = GameSession::new(store, StdRandom::from_entropy());

    let mut app = app::FlagQuizApp::new(session);
    app.attach_pool(pool_rx);
    let result = app.run().await;
    fetch.abort();
    result
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("flagquiz.log"))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal belongs to the UI, so only the file receives output.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
