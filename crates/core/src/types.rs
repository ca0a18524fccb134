use serde::{Deserialize, Serialize};

/// Host user identifiers are GUIDs.
pub type UserId = uuid::Uuid;

/// Catalog item identifiers are GUIDs.
pub type ItemId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Item kinds that can appear in a genre row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Movie,
    Series,
}

impl ItemKind {
    /// Kind name as the host spells it in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Movie => "Movie",
            ItemKind::Series => "Series",
        }
    }

    /// Item-type filter derived from the movies-only setting.
    pub fn filter(show_only_movies: bool) -> Vec<ItemKind> {
        if show_only_movies {
            vec![ItemKind::Movie]
        } else {
            vec![ItemKind::Movie, ItemKind::Series]
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
