//! REST client for the host media server.
//!
//! Covers user lookup (`GET /Users/{id}`), session lookup (`GET /Users/Me`)
//! and recursive item search (`GET /Items`) using [`reqwest`]. Requests carry
//! the configured API key in the `X-Emby-Token` header, except session
//! lookups, which send the caller's own token there.

use std::time::Duration;

use genrerows_core::catalog::{CatalogUser, ItemPage};
use genrerows_core::error::CoreError;
use genrerows_core::types::{ItemKind, UserId};
use reqwest::StatusCode;
use serde::Deserialize;

/// Header the host reads API keys from.
pub const API_KEY_HEADER: &str = "X-Emby-Token";

/// Timeout for a single host request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Item fields requested on top of the host's defaults.
const ITEM_FIELDS: &str = "Genres,Overview,PremiereDate,SortName";

/// Errors from the host REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum HostApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host returned a non-2xx status code.
    #[error("Host API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<HostApiError> for CoreError {
    fn from(err: HostApiError) -> Self {
        match &err {
            HostApiError::Request(e) if e.is_connect() || e.is_timeout() => {
                CoreError::Unavailable(err.to_string())
            }
            _ => CoreError::Internal(err.to_string()),
        }
    }
}

/// User record as returned by `GET /Users/{id}` and `GET /Users/Me`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HostUser {
    id: UserId,
    name: String,
}

/// Parameters of a `GET /Items` search.
#[derive(Debug, Clone)]
pub struct ItemsRequest {
    pub user_id: UserId,
    pub genre: Option<String>,
    pub kinds: Vec<ItemKind>,
    pub start_index: usize,
    pub limit: Option<usize>,
    pub sort_by: &'static str,
}

/// HTTP client for one host instance.
#[derive(Clone)]
pub struct HostApi {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HostApi {
    /// Create a client for the host at `base_url`, e.g. `http://localhost:8096`.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, HostApiError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up a user. A 404 from the host is `Ok(None)`.
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<CatalogUser>, HostApiError> {
        let response = self
            .authorized(self.client.get(format!(
                "{}/Users/{}",
                self.base_url,
                user_id.simple()
            )))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let user: HostUser = Self::ensure_success(response).await?.json().await?;
        Ok(Some(CatalogUser {
            id: user.id,
            name: user.name,
        }))
    }

    /// Resolve the user owning session `token`. A 401 or 403 from the host is
    /// `Ok(None)`.
    pub async fn get_current_user(
        &self,
        token: &str,
    ) -> Result<Option<CatalogUser>, HostApiError> {
        let response = self
            .client
            .get(format!("{}/Users/Me", self.base_url))
            .header(API_KEY_HEADER, token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let user: HostUser = Self::ensure_success(response).await?.json().await?;
        Ok(Some(CatalogUser {
            id: user.id,
            name: user.name,
        }))
    }

    /// Run a recursive item search.
    pub async fn get_items(&self, request: &ItemsRequest) -> Result<ItemPage, HostApiError> {
        let kinds = request
            .kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let mut params: Vec<(&str, String)> = vec![
            ("userId", request.user_id.simple().to_string()),
            ("recursive", "true".into()),
            ("includeItemTypes", kinds),
            ("startIndex", request.start_index.to_string()),
            ("sortBy", request.sort_by.to_string()),
            ("sortOrder", "Ascending".into()),
            ("fields", ITEM_FIELDS.into()),
            ("enableTotalRecordCount", "true".into()),
        ];
        if let Some(genre) = &request.genre {
            params.push(("genres", genre.clone()));
        }
        if let Some(limit) = request.limit {
            params.push(("limit", limit.to_string()));
        }

        let response = self
            .authorized(self.client.get(format!("{}/Items", self.base_url)))
            .query(&params)
            .send()
            .await?;

        let page: ItemPage = Self::ensure_success(response).await?.json().await?;
        Ok(page)
    }

    // ---- private helpers ----

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// Ensure the response has a success status code, otherwise capture the
    /// status and body in a [`HostApiError::ApiError`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, HostApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HostApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
