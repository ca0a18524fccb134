//! Startup registration with the host's extension plugins.
//!
//! After the configured delay, registers one section per selected genre with
//! the section registry (in-process or over HTTP), then asks the host's file
//! transformation plugin to route index pages through our transform callback.
//! Every failure is logged and degrades the feature; nothing is retried.

use std::sync::Arc;

use genrerows_core::section::GenreSection;
use genrerows_core::section_table::SectionRegistry;
use genrerows_registry::http::HostEndpoint;
use genrerows_registry::{
    HttpRegistrar, InProcessRegistrar, RegistrationError, RegistrationMode, RegistrationReport,
    RegistrationRunner, SectionRegistrar, TransformationRegistrar,
};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Callback path the host's transformation plugin POSTs index pages to.
pub const TRANSFORM_CALLBACK: &str = "/GenreManager/transform";

/// Run the startup registration once.
///
/// Returns the section registration report, or `None` when registration is
/// disabled or `cancel` fired during the startup delay. A registrar that
/// could not be built yields a report flagged `registry_unavailable`.
pub async fn run(state: AppState, cancel: CancellationToken) -> Option<RegistrationReport> {
    let config = Arc::clone(&state.config);
    let delay = config.registration_delay;

    let report = match build_registrar(&state) {
        Ok(Some(registrar)) => {
            let sections = GenreSection::from_config(&state.catalog, &state.plugin);
            let report = RegistrationRunner::new(registrar, delay)
                .run(sections, cancel.clone())
                .await?;
            if !report.failed.is_empty() {
                tracing::warn!(
                    failed = report.failed.len(),
                    "Some genre rows could not be registered"
                );
            }
            Some(report)
        }
        Ok(None) => {
            tracing::info!(mode = %config.registration_mode, "Genre row registration disabled");
            wait_for_delay(&state, &cancel).await?;
            None
        }
        Err(e) => {
            tracing::error!(
                mode = %config.registration_mode,
                error = %e,
                "Genre rows will not be shown: section registrar could not be built"
            );
            wait_for_delay(&state, &cancel).await?;
            Some(RegistrationReport {
                registry_unavailable: true,
                ..RegistrationReport::default()
            })
        }
    };

    if state.injector.is_enabled() && !cancel.is_cancelled() {
        register_transformation(&state).await;
    }

    report
}

/// Sleep out the startup delay; `None` when cancelled first.
async fn wait_for_delay(state: &AppState, cancel: &CancellationToken) -> Option<()> {
    tokio::select! {
        _ = cancel.cancelled() => None,
        _ = tokio::time::sleep(state.config.registration_delay) => Some(()),
    }
}

/// The registrar for the configured mode; `Ok(None)` when registration is
/// switched off.
fn build_registrar(
    state: &AppState,
) -> Result<Option<Arc<dyn SectionRegistrar>>, RegistrationError> {
    let config = &state.config;
    let registrar: Arc<dyn SectionRegistrar> = match config.registration_mode {
        RegistrationMode::InProcess => {
            let registry: Arc<dyn SectionRegistry> = state.sections.clone();
            Arc::new(InProcessRegistrar::new(Some(registry)))
        }
        RegistrationMode::Http => {
            let endpoint =
                HostEndpoint::new(config.host_url.clone(), config.host_api_key.clone())?;
            Arc::new(HttpRegistrar::new(endpoint, config.public_url.clone()))
        }
        RegistrationMode::Disabled => return Ok(None),
    };
    Ok(Some(registrar))
}

async fn register_transformation(state: &AppState) {
    let config = &state.config;
    let endpoint = match HostEndpoint::new(config.host_url.clone(), config.host_api_key.clone()) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            tracing::warn!(error = %e, "Script injection unavailable: HTTP client error");
            return;
        }
    };

    if let Err(e) = TransformationRegistrar::new(endpoint)
        .register(&config.public_endpoint(TRANSFORM_CALLBACK))
        .await
    {
        tracing::warn!(error = %e, "Script injection unavailable");
    }
}
