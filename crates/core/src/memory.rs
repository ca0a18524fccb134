//! Fixture-backed [`Catalog`] implementation.
//!
//! Serves a fixed set of users and items, loaded from a JSON file when the
//! service runs without a reachable host.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::catalog::{Catalog, CatalogUser, ItemOrdering, ItemPage, ItemQuery, ItemSummary};
use crate::error::{CoreError, CoreResult};
use crate::types::UserId;

/// On-disk fixture layout:
/// `{"users": [...], "items": [...], "sessions": {"<token>": "<user id>"}}`.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    users: Vec<CatalogUser>,
    #[serde(default)]
    items: Vec<ItemSummary>,
    #[serde(default)]
    sessions: HashMap<String, UserId>,
}

pub struct InMemoryCatalog {
    users: HashMap<UserId, CatalogUser>,
    items: Vec<ItemSummary>,
    sessions: HashMap<String, UserId>,
}

impl InMemoryCatalog {
    pub fn new(users: Vec<CatalogUser>, items: Vec<ItemSummary>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            items,
            sessions: HashMap::new(),
        }
    }

    /// Accept `token` as a session of `user_id`.
    pub fn with_session(mut self, token: impl Into<String>, user_id: UserId) -> Self {
        self.sessions.insert(token.into(), user_id);
        self
    }

    /// Load a catalog fixture from a JSON file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        let fixture: CatalogFixture = serde_json::from_str(&raw).map_err(|e| {
            CoreError::Validation(format!("Invalid catalog in {}: {e}", path.display()))
        })?;
        tracing::info!(
            path = %path.display(),
            users = fixture.users.len(),
            items = fixture.items.len(),
            sessions = fixture.sessions.len(),
            "Loaded catalog fixture"
        );
        let mut catalog = Self::new(fixture.users, fixture.items);
        catalog.sessions = fixture.sessions;
        Ok(catalog)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn find_user(&self, user_id: UserId) -> CoreResult<Option<CatalogUser>> {
        Ok(self.users.get(&user_id).cloned())
    }

    async fn find_session_user(&self, token: &str) -> CoreResult<Option<CatalogUser>> {
        Ok(self
            .sessions
            .get(token)
            .and_then(|user_id| self.users.get(user_id))
            .cloned())
    }

    async fn query_items(&self, _user: &CatalogUser, query: &ItemQuery) -> CoreResult<ItemPage> {
        let mut matches: Vec<&ItemSummary> = self
            .items
            .iter()
            .filter(|item| query.kinds.contains(&item.kind))
            .filter(|item| query.genre.as_deref().is_none_or(|g| item.has_genre(g)))
            .collect();

        match query.ordering {
            ItemOrdering::SortName => matches.sort_by_cached_key(|item| item.sort_key()),
            ItemOrdering::Random => matches.shuffle(&mut rand::rng()),
        }

        let total_record_count = matches.len();
        let items = matches
            .into_iter()
            .skip(query.start_index)
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(ItemPage {
            items,
            total_record_count,
            start_index: query.start_index,
        })
    }
}
