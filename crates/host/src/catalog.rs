use async_trait::async_trait;
use genrerows_core::catalog::{Catalog, CatalogUser, ItemPage, ItemQuery};
use genrerows_core::error::CoreResult;
use genrerows_core::types::UserId;

use crate::api::{HostApi, ItemsRequest};

/// [`Catalog`] backed by the host's library through its REST API.
#[derive(Clone)]
pub struct HostCatalog {
    api: HostApi,
}

impl HostCatalog {
    pub fn new(api: HostApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Catalog for HostCatalog {
    async fn find_user(&self, user_id: UserId) -> CoreResult<Option<CatalogUser>> {
        Ok(self.api.get_user(user_id).await?)
    }

    async fn find_session_user(&self, token: &str) -> CoreResult<Option<CatalogUser>> {
        Ok(self.api.get_current_user(token).await?)
    }

    async fn query_items(&self, user: &CatalogUser, query: &ItemQuery) -> CoreResult<ItemPage> {
        let request = ItemsRequest {
            user_id: user.id,
            genre: query.genre.clone(),
            kinds: query.kinds.clone(),
            start_index: query.start_index,
            limit: query.limit,
            sort_by: query.ordering.as_host_sort(),
        };
        let page = self.api.get_items(&request).await?;
        tracing::debug!(
            base_url = self.api.base_url(),
            genre = ?query.genre,
            returned = page.items.len(),
            total = page.total_record_count,
            "Host item search completed"
        );
        Ok(page)
    }
}
