// Shared application state

use crate::config::Config;
use crate::context::RequestContext;
use crate::directory::Directory;
use crate::validation::RecordValidator;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    pub validator: Arc<RecordValidator>,
    /// Deadline handed to the core for each request
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        directory: Directory,
        validator: RecordValidator,
        request_timeout: Duration,
    ) -> Self {
        AppState {
            directory: Arc::new(directory),
            validator: Arc::new(validator),
            request_timeout,
        }
    }

    /// Open the configured store and wire the directory on top of it
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = config.open_store()?;
        let directory = Directory::new(store).with_fetch_timeout(config.fetch_timeout);
        Ok(AppState::new(
            directory,
            RecordValidator::new(),
            config.request_timeout,
        ))
    }

    /// One context per request. Dropping the handler future (client
    /// disconnect) drops the aggregator's JoinSet and aborts its fetches.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
