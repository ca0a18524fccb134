//! Startup registration of every configured genre.
//!
//! The runner waits a fixed delay so the registry plugin can finish its own
//! initialization, then registers each section once. A failure for one genre
//! is logged and the remaining genres still register. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use genrerows_core::section::GenreSection;
use tokio_util::sync::CancellationToken;

use crate::registrar::{RegistrationError, SectionRegistrar};

/// Outcome of one registration pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Section ids that were registered.
    pub registered: Vec<String>,
    /// Section ids that failed, with the error message.
    pub failed: Vec<(String, String)>,
    /// The registry was not available; no section was registered.
    pub registry_unavailable: bool,
}

pub struct RegistrationRunner {
    registrar: Arc<dyn SectionRegistrar>,
    delay: Duration,
}

impl RegistrationRunner {
    pub fn new(registrar: Arc<dyn SectionRegistrar>, delay: Duration) -> Self {
        Self { registrar, delay }
    }

    /// Wait for the startup delay, then register `sections`.
    ///
    /// Returns `None` if `cancel` fires before registration starts.
    pub async fn run(
        self,
        sections: Vec<GenreSection>,
        cancel: CancellationToken,
    ) -> Option<RegistrationReport> {
        tracing::info!(
            strategy = self.registrar.strategy(),
            delay_secs = self.delay.as_secs(),
            "Waiting for the section registry before registering genres"
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Genre registration cancelled before it started");
                return None;
            }
            _ = tokio::time::sleep(self.delay) => {}
        }

        Some(self.register_all(&sections).await)
    }

    /// Register each section in order, isolating failures per genre.
    pub async fn register_all(&self, sections: &[GenreSection]) -> RegistrationReport {
        let mut report = RegistrationReport::default();

        if sections.is_empty() {
            tracing::warn!("No genres configured, nothing to register");
            return report;
        }
        tracing::info!(
            count = sections.len(),
            strategy = self.registrar.strategy(),
            "Registering genre sections"
        );

        for section in sections {
            let section_id = section.row().section_id();
            match self.registrar.register_section(section).await {
                Ok(()) => {
                    tracing::info!(
                        genre = section.row().genre_name(),
                        section_id = %section_id,
                        "Registered genre section"
                    );
                    report.registered.push(section_id);
                }
                Err(RegistrationError::Unavailable(reason)) => {
                    tracing::warn!(
                        reason = %reason,
                        "Section registry unavailable, genre rows will not be shown"
                    );
                    report.registry_unavailable = true;
                    return report;
                }
                Err(e) => {
                    tracing::error!(
                        genre = section.row().genre_name(),
                        section_id = %section_id,
                        error = %e,
                        "Failed to register genre section"
                    );
                    report.failed.push((section_id, e.to_string()));
                }
            }
        }

        tracing::info!(
            registered = report.registered.len(),
            failed = report.failed.len(),
            "Genre section registration finished"
        );
        report
    }
}
