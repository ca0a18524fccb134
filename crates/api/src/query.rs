//! Shared query parameter types for API handlers.

use genrerows_core::error::CoreError;
use genrerows_core::types::UserId;
use serde::Deserialize;

use crate::error::AppResult;

/// `?userId=` as sent by the web client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    pub user_id: Option<UserId>,
}

impl UserParams {
    /// The requested user; missing or nil ids are rejected.
    pub fn require(&self) -> AppResult<UserId> {
        require_user(self.user_id)
    }
}

/// Paging parameters of `/section/{genreName}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionParams {
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub start_index: usize,
    /// Page size; defaults to the configured items per section.
    pub limit: Option<u32>,
}

pub(crate) fn require_user(user_id: Option<UserId>) -> AppResult<UserId> {
    user_id
        .filter(|id| !id.is_nil())
        .ok_or_else(|| CoreError::Validation("userId is required".into()).into())
}
