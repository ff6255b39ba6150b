/// Player construction from configuration
use crate::config::GzConfig;
use crate::error::Result;
use gz_catalog_client::{CatalogClient, CatalogClientConfig};
use gz_core::Catalog;
use gz_playback::{MediaDriver, Player, SimulatedDriver};
use gz_storage::{ImportLibrary, JsonFileStore, KeyValueStore, KvSessionStore, MemoryStore};
use std::path::Path;
use tracing::warn;

/// Fetch the catalog from the configured source (file first, then URL)
pub async fn load_catalog(config: &GzConfig) -> Result<Catalog> {
    if let Some(path) = &config.catalog.file {
        return Ok(CatalogClient::load_file(path).await?);
    }

    let url = config.catalog.url.clone().unwrap_or_default();
    let client = CatalogClient::new(CatalogClientConfig::new(url).with_timeout(config.catalog_timeout()))?;
    Ok(client.fetch().await?)
}

/// State backend of one CLI run
///
/// Falls back to memory when the state file cannot be used, so a run keeps
/// working without persistence.
#[derive(Debug, Clone)]
pub enum StateStore {
    File(JsonFileStore),
    Memory(MemoryStore),
}

impl StateStore {
    /// Open a state file, degrading to memory on failure
    pub fn open(path: &Path) -> Self {
        match JsonFileStore::open(path) {
            Ok(store) => Self::File(store),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "State file unusable, continuing without persistence");
                Self::Memory(MemoryStore::new())
            }
        }
    }

    /// Whether writes reach disk
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl KeyValueStore for StateStore {
    fn get(&self, key: &str) -> gz_storage::Result<Option<String>> {
        match self {
            Self::File(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: String) -> gz_storage::Result<()> {
        match self {
            Self::File(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> gz_storage::Result<()> {
        match self {
            Self::File(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }
}

/// Session store (favorites and last-played)
pub fn open_store(config: &GzConfig) -> StateStore {
    StateStore::open(&config.storage.path)
}

/// Imported-track store, kept apart from the session file so position
/// writes never rewrite audio payloads
pub fn open_imports(config: &GzConfig) -> StateStore {
    StateStore::open(&config.storage.imports_path())
}

/// Player over the configured store with the catalog and imported tracks loaded
///
/// A catalog failure is recorded in the player state before it is returned.
/// Storage problems are logged and never abort.
pub async fn open_player<D: MediaDriver>(config: &GzConfig, driver: D) -> Result<Player<D>> {
    let mut player = Player::new(
        driver,
        KvSessionStore::new(open_store(config)),
        config.player_config(),
    );

    let catalog = match load_catalog(config).await {
        Ok(catalog) => catalog,
        Err(e) => {
            player.catalog_load_failed(e.to_string());
            return Err(e);
        }
    };
    player.load_catalog(catalog);

    let imported = match ImportLibrary::new(open_imports(config)).load_tracks() {
        Ok(tracks) => tracks,
        Err(e) => {
            warn!(error = %e, "Imported tracks unavailable");
            Vec::new()
        }
    };
    for track in imported {
        if player.catalog().contains(&track.id) {
            continue;
        }
        if let Err(e) = player.add_imported(track) {
            warn!(error = %e, "Skipping imported track");
        }
    }

    Ok(player)
}

/// Forward queued simulated-driver events; returns how many tracks ended
pub fn pump(player: &mut Player<SimulatedDriver>) -> usize {
    let mut ended = 0;
    loop {
        let events = player.driver_mut().take_events();
        if events.is_empty() {
            return ended;
        }
        for event in events {
            if event == gz_playback::MediaEvent::Ended {
                ended += 1;
            }
            player.handle_media_event(event);
        }
    }
}
