//! Home screen section capability and the genre implementation of it.
//!
//! A section registry only needs three things from a row: describe it,
//! clone it for a new context, and produce its items. [`HomeSection`] is that
//! capability set; [`GenreSection`] binds a [`GenreRow`] to the catalog and
//! configuration it queries with.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogAdapter, GenreQuery, ItemOrdering, ItemPage};
use crate::config::PluginConfiguration;
use crate::error::{CoreError, CoreResult};
use crate::row::{GenreRow, SectionInfo};
use crate::types::UserId;

/// Body of a registry results callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionPayload {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub additional_data: Option<String>,
}

#[async_trait]
pub trait HomeSection: Send + Sync {
    /// Registry key.
    fn section_id(&self) -> String;

    fn info(&self) -> SectionInfo;

    /// Fresh working copy for a user or request.
    fn create_instance(&self) -> Arc<dyn HomeSection>;

    /// Items for this section. An empty page is a success.
    async fn results(&self, payload: &SectionPayload) -> CoreResult<ItemPage>;
}

#[derive(Clone)]
pub struct GenreSection {
    row: GenreRow,
    adapter: CatalogAdapter,
    config: Arc<PluginConfiguration>,
}

impl GenreSection {
    pub fn new(
        genre_name: impl Into<String>,
        adapter: CatalogAdapter,
        config: Arc<PluginConfiguration>,
    ) -> Self {
        Self {
            row: GenreRow::new(genre_name),
            adapter,
            config,
        }
    }

    /// One section per selected genre, deduplicated and in priority order.
    ///
    /// Genres whose section ids collide ("Sci Fi" and "SciFi") keep only the
    /// first in priority order.
    pub fn from_config(adapter: &CatalogAdapter, config: &Arc<PluginConfiguration>) -> Vec<Self> {
        let mut seen = HashSet::new();
        config
            .ordered_genres()
            .into_iter()
            .map(|genre| Self::new(genre.name, adapter.clone(), Arc::clone(config)))
            .filter(|section| {
                let fresh = seen.insert(section.row.section_id());
                if !fresh {
                    tracing::warn!(
                        genre = section.row.genre_name(),
                        section_id = %section.row.section_id(),
                        "Genre collides with another selected genre's section id, skipping it"
                    );
                }
                fresh
            })
            .collect()
    }

    pub fn row(&self) -> &GenreRow {
        &self.row
    }

    pub fn row_mut(&mut self) -> &mut GenreRow {
        &mut self.row
    }
}

#[async_trait]
impl HomeSection for GenreSection {
    fn section_id(&self) -> String {
        self.row.section_id()
    }

    fn info(&self) -> SectionInfo {
        self.row.info()
    }

    fn create_instance(&self) -> Arc<dyn HomeSection> {
        Arc::new(Self {
            row: self.row.create_instance(),
            adapter: self.adapter.clone(),
            config: Arc::clone(&self.config),
        })
    }

    async fn results(&self, payload: &SectionPayload) -> CoreResult<ItemPage> {
        let user_id = payload
            .user_id
            .filter(|id| !id.is_nil())
            .ok_or_else(|| CoreError::Validation("UserId is required".into()))?;
        let genre = self.row.operative_genre(payload.additional_data.as_deref());

        let page = self
            .adapter
            .query_genre(&GenreQuery {
                genre_name: genre.to_string(),
                user_id,
                items_per_section: self.config.items_per_section,
                show_only_movies: self.config.show_only_movies,
                start_index: 0,
                ordering: ItemOrdering::Random,
            })
            .await?;

        tracing::info!(
            section_id = %self.row.section_id(),
            genre,
            count = page.items.len(),
            "Resolved section results"
        );
        Ok(page)
    }
}
