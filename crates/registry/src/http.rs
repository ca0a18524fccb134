//! HTTP registration with the home screen sections plugin.
//!
//! Each genre is announced with a `POST /HomeScreen/RegisterSection` on the
//! host, carrying the row descriptor and the URL the registry should call to
//! fetch the row's items. That URL lives under this service's public origin,
//! not the host's.

use std::time::Duration;

use async_trait::async_trait;
use genrerows_core::section::GenreSection;
use serde::Serialize;

use crate::registrar::{RegistrationError, SectionRegistrar};

/// Registry plugin path that accepts section registrations.
pub const REGISTER_SECTION_PATH: &str = "/HomeScreen/RegisterSection";

/// Header the host reads API keys from.
const API_KEY_HEADER: &str = "X-Emby-Token";

/// HTTP request timeout for a single registration call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON body of a section registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSectionPayload {
    pub id: String,
    pub display_text: String,
    pub limit: u32,
    pub additional_data: Option<String>,
    pub results_endpoint: String,
}

impl RegisterSectionPayload {
    /// Payload for `section`, with its results path joined onto `public_url`.
    pub fn for_section(section: &GenreSection, public_url: &str) -> Self {
        let row = section.row();
        Self {
            id: row.section_id(),
            display_text: row.display_text.clone(),
            limit: row.limit(),
            additional_data: row.additional_data.clone(),
            results_endpoint: format!("{public_url}{}", row.results_endpoint()),
        }
    }
}

/// JSON POST target on the host, shared by the registration clients.
#[derive(Clone)]
pub struct HostEndpoint {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HostEndpoint {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, RegistrationError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `path` and return the response text of a 2xx answer.
    pub async fn post_json<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<String, RegistrationError> {
        let mut request = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        if !status.is_success() {
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

/// Registers sections by POSTing them to the registry plugin's REST endpoint.
pub struct HttpRegistrar {
    endpoint: HostEndpoint,
    public_url: String,
}

impl HttpRegistrar {
    /// `public_url` is the origin the registry reaches this service at.
    pub fn new(endpoint: HostEndpoint, public_url: impl Into<String>) -> Self {
        Self {
            endpoint,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SectionRegistrar for HttpRegistrar {
    fn strategy(&self) -> &'static str {
        "http"
    }

    async fn register_section(&self, section: &GenreSection) -> Result<(), RegistrationError> {
        let payload = RegisterSectionPayload::for_section(section, &self.public_url);
        tracing::info!(
            section_id = %payload.id,
            endpoint = %payload.results_endpoint,
            base_url = self.endpoint.base_url(),
            "Registering section over HTTP"
        );

        let response = self.endpoint.post_json(REGISTER_SECTION_PATH, &payload).await?;
        tracing::debug!(section_id = %payload.id, response = %response, "Registry accepted section");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use genrerows_core::catalog::CatalogAdapter;
    use genrerows_core::config::PluginConfiguration;
    use genrerows_core::memory::InMemoryCatalog;

    #[test]
    fn payload_describes_the_row() {
        let adapter = CatalogAdapter::new(Arc::new(InMemoryCatalog::new(vec![], vec![])));
        let section = GenreSection::new(
            "Science Fiction",
            adapter,
            Arc::new(PluginConfiguration::default()),
        );

        let payload = RegisterSectionPayload::for_section(&section, "http://media.lan:8097");
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            serde_json::json!({
                "id": "Genre_ScienceFiction",
                "displayText": "Science Fiction",
                "limit": 1,
                "additionalData": "Science Fiction",
                "resultsEndpoint": "http://media.lan:8097/GenreSection/Science%20Fiction",
            })
        );
    }

    #[test]
    fn empty_public_url_keeps_the_endpoint_host_relative() {
        let adapter = CatalogAdapter::new(Arc::new(InMemoryCatalog::new(vec![], vec![])));
        let section = GenreSection::new("Drama", adapter, Arc::new(PluginConfiguration::default()));

        let payload = RegisterSectionPayload::for_section(&section, "");
        assert_eq!(payload.results_endpoint, "/GenreSection/Drama");
    }
}
