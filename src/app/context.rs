use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{HttpTransport, RetryingClient};
use crate::render::{self, Renderer};
use crate::session::PageSettings;
use crate::store::{EntryStore, RemoteStore};

/// Wires the configured store and renderer together.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn EntryStore>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.token, Duration::from_secs(config.timeout_secs))?;
        let client = RetryingClient::new(Arc::new(transport));
        let store: Arc<dyn EntryStore> = Arc::new(RemoteStore::new(client, config.base_url()));
        let renderer = render::from_config(&config.renderer);

        Ok(Self::with_parts(config, store, renderer))
    }

    pub fn with_parts(config: Config, store: Arc<dyn EntryStore>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            config,
            store,
            renderer,
        }
    }

    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            entries_per_page: self.config.entries_per_page,
            lines_per_page: self.config.lines_per_page,
        }
    }
}
