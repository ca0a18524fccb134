use std::sync::Arc;

use genrerows_core::catalog::{Catalog, CatalogAdapter};
use genrerows_core::config::PluginConfiguration;
use genrerows_core::injection::{ScriptInjector, SCRIPT_SRC};
use genrerows_core::section_table::SectionTable;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Plugin configuration, read-only after startup.
    pub plugin: Arc<PluginConfiguration>,
    /// Genre queries against the host catalog (or a fixture).
    pub catalog: CatalogAdapter,
    /// In-process section registry.
    pub sections: Arc<SectionTable>,
    /// Index page script injection.
    pub injector: Arc<ScriptInjector>,
}

impl AppState {
    /// Assemble the state with an empty section table. The injected script
    /// tag points at [`SCRIPT_SRC`] under the configured public URL.
    pub fn new(
        config: ServerConfig,
        plugin: PluginConfiguration,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        let injector = ScriptInjector::new(
            &config.public_endpoint(SCRIPT_SRC),
            plugin.use_script_injection,
        );
        Self {
            config: Arc::new(config),
            plugin: Arc::new(plugin),
            catalog: CatalogAdapter::new(catalog),
            sections: Arc::new(SectionTable::new()),
            injector: Arc::new(injector),
        }
    }
}
