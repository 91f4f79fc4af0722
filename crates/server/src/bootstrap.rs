use std::sync::Arc;

use griddle_agent::prompt::{self, PromptError};
use griddle_agent::session::{build_registry, OrderSession};
use griddle_agent::tools::ToolRegistry;
use griddle_api::client::{ApiError, OrderApiClient};
use griddle_core::config::{AppConfig, ConfigError, LoadOptions};
use griddle_core::menu::Catalog;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub registry: ToolRegistry,
    pub system_prompt: String,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("backend client construction failed: {0}")]
    Client(#[source] ApiError),
    #[error("catalog load failed: {0}")]
    CatalogLoad(#[source] ApiError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let client = OrderApiClient::new(&config.backend).map_err(BootstrapError::Client)?;

    // The catalog fetch is the one startup step that may not fail softly:
    // without prices there is no valid session to run.
    let items = client.fetch_catalog().await.map_err(BootstrapError::CatalogLoad)?;
    let catalog = Arc::new(Catalog::new(items));
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        item_count = catalog.len(),
        "catalog loaded from order backend"
    );

    let system_prompt = prompt::render_system_prompt(&catalog)?;

    let session = OrderSession::new(catalog.clone());
    let registry = build_registry(&session, Arc::new(client));
    info!(
        event_name = "system.bootstrap.ready",
        tool_count = registry.len(),
        "session tools registered"
    );

    Ok(Application { config, catalog, registry, system_prompt })
}
