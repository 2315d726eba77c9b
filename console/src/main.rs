use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use console_management::ConsoleManager;
use jam_rooms::{
    directory::{JsonFileStore, MemoryStore, UserStore},
    metadata::{MetadataResolver, NoMetadata, OEmbedResolver},
    Hub, JamConfig,
};
use state_store::{session::Session, StateStore};
use termination::{create_termination, Interrupted, Terminator};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub(crate) mod console_management;
pub(crate) mod state_store;
pub(crate) mod termination;

const DEFAULT_LOG_FILTER: &str = "info,jam_console=debug,jam_rooms=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the events, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("JAM_CONFIG").ok())
        .map(PathBuf::from);
    let config = JamConfig::load_layered(config_path.as_deref())?;

    let store: Box<dyn UserStore> = match config.users_file.as_ref() {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };
    let resolver: Arc<dyn MetadataResolver> = if config.fetch_metadata {
        Arc::new(OEmbedResolver::new(Duration::from_millis(config.metadata_timeout_ms))?)
    } else {
        Arc::new(NoMetadata)
    };
    let eviction_delay = Duration::from_millis(config.kick_eviction_delay_ms);

    info!(users_file = ?config.users_file, fetch_metadata = config.fetch_metadata, "starting jam rooms console");

    let session = Session::new(Hub::new(config, store));
    let (terminator, mut interrupt_rx) = create_termination();
    let (state_store, event_rx) = StateStore::new(resolver, eviction_delay);
    let (console_manager, action_rx) = ConsoleManager::new();

    tokio::try_join!(
        state_store.main_loop(session, terminator, action_rx, interrupt_rx.resubscribe()),
        console_manager.main_loop(
            tokio::io::stdin(),
            tokio::io::stdout(),
            event_rx,
            interrupt_rx.resubscribe()
        ),
    )
    .context("console session failed")?;

    if let Ok(reason) = interrupt_rx.recv().await {
        match reason {
            Interrupted::UserInt => info!("exited per user request"),
            Interrupted::OsSigInt => info!("exited because of an os sig int"),
            Interrupted::OsSigTerm => info!("exited because of an os sig term"),
        }
    } else {
        info!("exited because of an unexpected error");
    }

    Ok(())
}
