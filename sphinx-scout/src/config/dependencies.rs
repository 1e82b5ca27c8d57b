//! Dependency initialization and wiring for the search driver.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::ScoutError;
use sphinx_scout_repository::{MySqlSphinxClient, SphinxEngine, SphinxQlExecutor};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured engine ready to serve requests.
    pub engine: SphinxEngine,
    /// The client behind the engine, kept for shutdown.
    pub client: Arc<MySqlSphinxClient>,
}

impl Dependencies {
    /// Initialize all dependencies from settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ScoutError)` - If the daemon cannot be reached
    pub async fn new(settings: &Settings) -> Result<Self, ScoutError> {
        info!(
            max_connections = settings.max_connections,
            key_column = %settings.engine.key_column,
            "Initializing dependencies"
        );

        let client = MySqlSphinxClient::new(&settings.sphinx_url, settings.max_connections)
            .await
            .map_err(|e| ScoutError::config(format!("Failed to create SphinxQL client: {}", e)))?;
        let client = Arc::new(client);

        // Verify the daemon answers
        let healthy = client
            .health_check()
            .await
            .map_err(|e| ScoutError::config(format!("Search daemon health check failed: {}", e)))?;
        if !healthy {
            return Err(ScoutError::config("Search daemon is unhealthy"));
        }

        info!("Search daemon connection verified");

        let engine = SphinxEngine::with_config(client.clone(), settings.engine.clone());

        Ok(Self { engine, client })
    }

    /// Close pooled connections.
    pub async fn shutdown(&self) {
        self.client.close().await;
    }
}
