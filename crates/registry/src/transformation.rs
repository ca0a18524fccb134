//! Registration with the host's file transformation facility.
//!
//! Asks the host to route every served `index.html` through this service's
//! transform callback, which inserts the client script tag.

use genrerows_core::injection::INDEX_FILE_PATTERN;
use serde::Serialize;

use crate::http::HostEndpoint;
use crate::registrar::RegistrationError;
use crate::PLUGIN_ID;

/// Transformation plugin path that accepts registrations.
pub const REGISTER_TRANSFORMATION_PATH: &str = "/FileTransformation/RegisterTransformation";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationPayload {
    pub id: String,
    pub file_name_pattern: String,
    pub callback_endpoint: String,
}

pub struct TransformationRegistrar {
    endpoint: HostEndpoint,
}

impl TransformationRegistrar {
    pub fn new(endpoint: HostEndpoint) -> Self {
        Self { endpoint }
    }

    /// Register `callback_endpoint` as the transform for index pages.
    pub async fn register(&self, callback_endpoint: &str) -> Result<(), RegistrationError> {
        let payload = TransformationPayload {
            id: PLUGIN_ID.to_string(),
            file_name_pattern: INDEX_FILE_PATTERN.to_string(),
            callback_endpoint: callback_endpoint.to_string(),
        };

        match self
            .endpoint
            .post_json(REGISTER_TRANSFORMATION_PATH, &payload)
            .await
        {
            Ok(_) => {
                tracing::info!(callback = callback_endpoint, "File transformation registered");
                Ok(())
            }
            Err(RegistrationError::Rejected { status: 404, .. }) => {
                Err(RegistrationError::Unavailable(
                    "file transformation plugin is not installed".into(),
                ))
            }
            Err(e) => Err(e),
        }
    }
}
