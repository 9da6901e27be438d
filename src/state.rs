use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::{Config, StoreKind},
    store::{MemoryRowStore, RowStore, SheetsClient},
    utils::{
        audio::{NoteAudio, StaticNoteAudio},
        in_flight::SubmitGuard,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RowStore>,
    pub audio: Arc<dyn NoteAudio>,
    pub submits: SubmitGuard,
    pub config: Config,
}

impl AppState {
    /// Builds the state with the row store selected by the configuration.
    pub fn from_config(config: Config) -> Self {
        let store: Arc<dyn RowStore> = match config.store {
            StoreKind::Sheets => Arc::new(SheetsClient::new(config.sheets.clone())),
            StoreKind::Memory => Arc::new(MemoryRowStore::new()),
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn RowStore>) -> Self {
        Self {
            store,
            audio: Arc::new(StaticNoteAudio::new(config.assets_url.clone())),
            submits: SubmitGuard::new(),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<dyn RowStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
