//! Server state

use std::sync::Arc;

use crate::backend::BackendClient;
use crate::core::Config;

/// Shared state handed to every handler
///
/// Cheap to clone: the config is behind an `Arc` and the backend client
/// shares its connection pool and snapshot cache.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub backend: BackendClient,
}

impl ServerState {
    /// Build the state for a configuration
    pub fn initialize(config: &Config) -> Self {
        let backend = BackendClient::new(config);
        Self {
            config: Arc::new(config.clone()),
            backend,
        }
    }
}
