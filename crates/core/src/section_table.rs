//! In-process home screen section registry.
//!
//! [`SectionTable`] keeps registered sections keyed by section id in
//! registration order. Registering an id that is already present replaces
//! the previous section in place, so re-registration never duplicates a row.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::catalog::ItemPage;
use crate::error::{CoreError, CoreResult};
use crate::row::SectionInfo;
use crate::section::{HomeSection, SectionPayload};

/// Registration entry point of a section registry.
#[async_trait]
pub trait SectionRegistry: Send + Sync {
    /// Register `section`, replacing any section with the same id.
    async fn register(&self, section: Arc<dyn HomeSection>);
}

#[derive(Default)]
pub struct SectionTable {
    sections: RwLock<IndexMap<String, Arc<dyn HomeSection>>>,
}

impl SectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, section_id: &str) -> Option<Arc<dyn HomeSection>> {
        self.sections.read().await.get(section_id).cloned()
    }

    /// Describe every section through a fresh working copy.
    pub async fn infos(&self) -> Vec<SectionInfo> {
        self.sections
            .read()
            .await
            .values()
            .map(|s| s.create_instance().info())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.sections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sections.read().await.is_empty()
    }

    /// Remove one section. Returns whether it was registered.
    pub async fn unregister(&self, section_id: &str) -> bool {
        self.sections.write().await.shift_remove(section_id).is_some()
    }

    /// Remove every section, returning how many were registered.
    pub async fn clear(&self) -> usize {
        let mut sections = self.sections.write().await;
        let count = sections.len();
        sections.clear();
        count
    }

    /// Run a registered section's results on a fresh working copy.
    pub async fn invoke(&self, section_id: &str, payload: &SectionPayload) -> CoreResult<ItemPage> {
        let section = self
            .get(section_id)
            .await
            .ok_or_else(|| CoreError::NotFound {
                entity: "Section",
                id: section_id.to_string(),
            })?;
        section.create_instance().results(payload).await
    }
}

#[async_trait]
impl SectionRegistry for SectionTable {
    async fn register(&self, section: Arc<dyn HomeSection>) {
        let id = section.section_id();
        let replaced = self.sections.write().await.insert(id.clone(), section);
        if replaced.is_some() {
            tracing::debug!(section_id = %id, "Replaced registered section");
        } else {
            tracing::debug!(section_id = %id, "Registered section");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogAdapter;
    use crate::config::PluginConfiguration;
    use crate::memory::InMemoryCatalog;
    use crate::section::GenreSection;
    use assert_matches::assert_matches;

    fn section(genre: &str, label: &str) -> Arc<dyn HomeSection> {
        let adapter = CatalogAdapter::new(Arc::new(InMemoryCatalog::new(vec![], vec![])));
        let mut section =
            GenreSection::new(genre, adapter, Arc::new(PluginConfiguration::default()));
        section.row_mut().display_text = label.to_string();
        Arc::new(section)
    }

    #[tokio::test]
    async fn re_registering_replaces_and_latest_label_wins() {
        let table = SectionTable::new();
        table.register(section("Action", "Action")).await;
        table.register(section("Comedy", "Comedy")).await;
        table.register(section("Action", "Action Movies")).await;

        assert_eq!(table.len().await, 2);
        let infos = table.infos().await;
        assert_eq!(infos[0].section, "Genre_Action");
        assert_eq!(infos[0].display_text, "Action Movies");
        assert_eq!(infos[1].section, "Genre_Comedy");
    }

    #[tokio::test]
    async fn unregister_and_clear_remove_sections() {
        let table = SectionTable::new();
        table.register(section("Action", "Action")).await;
        table.register(section("Drama", "Drama")).await;

        assert!(table.unregister("Genre_Action").await);
        assert!(!table.unregister("Genre_Action").await);
        assert_eq!(table.clear().await, 1);
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn invoking_unknown_section_is_not_found() {
        let table = SectionTable::new();
        let result = table.invoke("Genre_Missing", &SectionPayload::default()).await;
        assert_matches!(result, Err(CoreError::NotFound { entity: "Section", .. }));
    }
}
