//! Plugin configuration record.
//!
//! One [`PluginConfiguration`] exists per process. It is created with
//! defaults on first load, persisted as camelCase JSON, and then shared as an
//! `Arc` handle that every component reads and none mutates.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, CoreResult};

/// Default genres shown on a fresh install (the host's native genre names).
pub const DEFAULT_GENRES: [&str; 8] = [
    "Action",
    "Comedy",
    "Drama",
    "Science Fiction",
    "Horror",
    "Romance",
    "Thriller",
    "Animation",
];

/// Default page size for every catalog query.
pub const DEFAULT_ITEMS_PER_SECTION: u32 = 20;

/// Display priority for one genre; lower sorts first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenrePriority {
    pub genre_name: String,
    pub priority: i32,
}

/// A selected genre after normalization, with its priority if one is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedGenre {
    pub name: String,
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfiguration {
    /// Genres to materialize as rows, in selection order.
    pub selected_genres: Vec<String>,
    /// Page size passed to every catalog query.
    #[validate(range(min = 1))]
    pub items_per_section: u32,
    /// Restrict rows to movies (exclude series).
    pub show_only_movies: bool,
    /// Optional per-genre display priorities.
    pub genre_ordering: Vec<GenrePriority>,
    /// Whether the client script is injected into the web client's index page.
    pub use_script_injection: bool,
}

impl Default for PluginConfiguration {
    fn default() -> Self {
        Self {
            selected_genres: DEFAULT_GENRES.iter().map(|g| g.to_string()).collect(),
            items_per_section: DEFAULT_ITEMS_PER_SECTION,
            show_only_movies: false,
            genre_ordering: Vec::new(),
            use_script_injection: true,
        }
    }
}

impl PluginConfiguration {
    /// Load the configuration from `path`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_init(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            let config = Self::default();
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| CoreError::Internal(format!("Failed to encode configuration: {e}")))?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Internal(format!("Failed to create {}: {e}", parent.display()))
                })?;
            }
            std::fs::write(path, json).map_err(|e| {
                CoreError::Internal(format!("Failed to write {}: {e}", path.display()))
            })?;
            tracing::info!(path = %path.display(), "Wrote default plugin configuration");
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Internal(format!("Failed to read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            CoreError::Validation(format!("Invalid configuration in {}: {e}", path.display()))
        })?;
        config.check()?;
        Ok(config)
    }

    /// Validate field constraints, mapping failures to [`CoreError::Validation`].
    pub fn check(&self) -> CoreResult<()> {
        self.validate()
            .map_err(|e| CoreError::Validation(format!("Invalid configuration: {e}")))
    }

    /// Selected genres trimmed, with blanks dropped and duplicates removed.
    /// The first occurrence of a genre keeps its position.
    pub fn normalized_genres(&self) -> Vec<String> {
        self.selected_genres
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Normalized genres sorted by ascending priority.
    ///
    /// Genres missing from `genre_ordering` sort after every prioritized
    /// genre and keep their selection order among themselves.
    pub fn ordered_genres(&self) -> Vec<OrderedGenre> {
        let priorities: HashMap<&str, i32> = self
            .genre_ordering
            .iter()
            .map(|p| (p.genre_name.trim(), p.priority))
            .collect();

        let mut genres: Vec<OrderedGenre> = self
            .normalized_genres()
            .into_iter()
            .map(|name| {
                let priority = priorities.get(name.as_str()).copied();
                OrderedGenre { name, priority }
            })
            .collect();

        genres.sort_by_key(|g| match g.priority {
            Some(p) => (0, p),
            None => (1, 0),
        });
        genres
    }
}
