//! Catalog abstraction and the genre query adapter.
//!
//! The host owns the library index; [`Catalog`] is the narrow slice of it
//! this service needs (user lookup plus a filtered, paged item search).
//! [`CatalogAdapter`] turns a genre request into a catalog query and enforces
//! the request-level invariants (genre name bounds, known user, page size).

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{ItemId, ItemKind, Timestamp, UserId};

/// Longest genre name accepted by [`CatalogAdapter::query_genre`], in characters.
pub const MAX_GENRE_NAME_LEN: usize = 100;

/// Ordering strategies for catalog queries.
///
/// The `/section` endpoint pages through a stable alphabetical list while
/// registry callbacks show a fresh shuffle on every call. Both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrdering {
    /// Ascending by sort name.
    SortName,
    /// Unseeded random shuffle.
    Random,
}

impl ItemOrdering {
    /// Sort key as the host spells it in query strings.
    pub fn as_host_sort(self) -> &'static str {
        match self {
            ItemOrdering::SortName => "SortName",
            ItemOrdering::Random => "Random",
        }
    }
}

/// A user known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogUser {
    pub id: UserId,
    pub name: String,
}

/// Display-oriented projection of a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: String,
    /// Host collation key with leading articles dropped. Items without one
    /// sort by `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_name: Option<String>,
    #[serde(rename = "Type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(rename = "PremiereDate", default)]
    pub release_date: Option<Timestamp>,
    /// Image type (`Primary`, `Backdrop`, ...) to image tag.
    #[serde(rename = "ImageTags", default)]
    pub image_refs: BTreeMap<String, String>,
}

impl ItemSummary {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Case-insensitive key for [`ItemOrdering::SortName`].
    pub fn sort_key(&self) -> String {
        self.sort_name.as_deref().unwrap_or(&self.name).to_lowercase()
    }
}

/// One page of a catalog query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemPage {
    pub items: Vec<ItemSummary>,
    /// Number of matches under the query's filters, ignoring paging.
    pub total_record_count: usize,
    #[serde(default)]
    pub start_index: usize,
}

impl ItemPage {
    pub fn empty(start_index: usize) -> Self {
        Self {
            items: Vec::new(),
            total_record_count: 0,
            start_index,
        }
    }
}

/// Recursive item search against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    /// Exact genre tag to match; `None` matches every item.
    pub genre: Option<String>,
    pub kinds: Vec<ItemKind>,
    pub start_index: usize,
    /// Page size; `None` returns every match.
    pub limit: Option<usize>,
    pub ordering: ItemOrdering,
}

/// The host's library index, as seen by this service.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Resolve a user id; `Ok(None)` when the host does not know the user.
    async fn find_user(&self, user_id: UserId) -> CoreResult<Option<CatalogUser>>;

    /// Resolve the user owning a host session token; `Ok(None)` when the
    /// host rejects the token.
    async fn find_session_user(&self, token: &str) -> CoreResult<Option<CatalogUser>>;

    /// Run a filtered, ordered, paged item search on behalf of `user`.
    async fn query_items(&self, user: &CatalogUser, query: &ItemQuery) -> CoreResult<ItemPage>;
}

/// Parameters of one genre row query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreQuery {
    pub genre_name: String,
    pub user_id: UserId,
    pub items_per_section: u32,
    pub show_only_movies: bool,
    pub start_index: usize,
    pub ordering: ItemOrdering,
}

/// Translates genre requests into catalog queries.
#[derive(Clone)]
pub struct CatalogAdapter {
    catalog: Arc<dyn Catalog>,
}

impl CatalogAdapter {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Resolve `user_id` or fail with [`CoreError::NotFound`].
    pub async fn resolve_user(&self, user_id: UserId) -> CoreResult<CatalogUser> {
        self.catalog
            .find_user(user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "User",
                id: user_id.to_string(),
            })
    }

    /// Resolve the user behind a host session token or fail with
    /// [`CoreError::Unauthorized`].
    pub async fn resolve_session(&self, token: &str) -> CoreResult<CatalogUser> {
        if token.is_empty() {
            return Err(CoreError::Unauthorized("Empty session token".into()));
        }
        self.catalog
            .find_session_user(token)
            .await?
            .ok_or_else(|| CoreError::Unauthorized("Invalid or expired session token".into()))
    }

    /// Fetch one page of items tagged with `request.genre_name`.
    ///
    /// Zero matches is a successful, empty page.
    pub async fn query_genre(&self, request: &GenreQuery) -> CoreResult<ItemPage> {
        let genre = validate_genre_name(&request.genre_name)?;
        if request.items_per_section == 0 {
            return Err(CoreError::Validation(
                "items per section must be greater than zero".into(),
            ));
        }

        let user = self.resolve_user(request.user_id).await?;
        let limit = request.items_per_section as usize;
        let query = ItemQuery {
            genre: Some(genre.to_string()),
            kinds: ItemKind::filter(request.show_only_movies),
            start_index: request.start_index,
            limit: Some(limit),
            ordering: request.ordering,
        };

        let mut page = self.catalog.query_items(&user, &query).await?;
        page.items.truncate(limit);
        page.start_index = request.start_index;

        tracing::debug!(
            genre,
            user_id = %user.id,
            returned = page.items.len(),
            total = page.total_record_count,
            "Queried genre row"
        );
        Ok(page)
    }

    /// Sorted distinct genre names over every movie and series the user can see.
    pub async fn distinct_genres(&self, user_id: UserId) -> CoreResult<Vec<String>> {
        let user = self.resolve_user(user_id).await?;
        let query = ItemQuery {
            genre: None,
            kinds: ItemKind::filter(false),
            start_index: 0,
            limit: None,
            ordering: ItemOrdering::SortName,
        };

        let page = self.catalog.query_items(&user, &query).await?;
        let genres: BTreeSet<String> = page
            .items
            .into_iter()
            .flat_map(|item| item.genres)
            .collect();
        Ok(genres.into_iter().collect())
    }
}

/// Check a genre name against the accepted bounds, returning it unchanged.
pub fn validate_genre_name(name: &str) -> CoreResult<&str> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("genre name must not be empty".into()));
    }
    if name.chars().count() > MAX_GENRE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "genre name must be at most {MAX_GENRE_NAME_LEN} characters"
        )));
    }
    Ok(name)
}
