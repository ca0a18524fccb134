//! Genre row descriptors.
//!
//! A [`GenreRow`] identifies one genre's home screen row to a section
//! registry. The registry keys rows by [`GenreRow::section_id`] and hands
//! [`GenreRow::additional_data`] back on every results callback.

use serde::{Deserialize, Serialize};
use url::Url;

/// Prefix of every section id this service registers.
pub const SECTION_ID_PREFIX: &str = "Genre_";

/// Route the client deep-links to when a row header is activated.
pub const ROW_ROUTE: &str = "genres";

/// Number of rows a single descriptor contributes to the home screen.
pub const ROW_LIMIT: u32 = 1;

/// Registry key for a genre: `Genre_` followed by the name with every space
/// removed. Names that differ only in spacing map to the same id.
pub fn section_id_for(genre_name: &str) -> String {
    format!("{SECTION_ID_PREFIX}{}", genre_name.replace(' ', ""))
}

/// Percent-encode `segment` for use as a single URL path segment.
pub fn escape_path_segment(segment: &str) -> String {
    let mut url = Url::parse("http://localhost/").expect("static base url");
    url.path_segments_mut()
        .expect("http url has a path")
        .clear()
        .push(segment);
    url.path().trim_start_matches('/').to_string()
}

/// Path the section registry calls back to fetch a genre's items.
pub fn results_endpoint_for(genre_name: &str) -> String {
    format!("/GenreSection/{}", escape_path_segment(genre_name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionViewMode {
    Landscape,
}

/// What a section registry lists to clients for one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInfo {
    pub section: String,
    pub display_text: String,
    pub limit: u32,
    pub route: String,
    pub additional_data: Option<String>,
    pub view_mode: SectionViewMode,
    pub display_title_text: bool,
    pub show_details_menu: bool,
    pub allow_view_mode_change: bool,
    pub original_payload: Option<serde_json::Value>,
}

/// Descriptor for one genre's row.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreRow {
    genre_name: String,
    /// Header label; the registry may relabel it.
    pub display_text: String,
    /// Literal genre name carried across the registry boundary.
    pub additional_data: Option<String>,
    /// Request-scoped payload; cleared by [`GenreRow::create_instance`].
    pub original_payload: Option<serde_json::Value>,
}

impl GenreRow {
    pub fn new(genre_name: impl Into<String>) -> Self {
        let genre_name = genre_name.into();
        Self {
            display_text: genre_name.clone(),
            additional_data: Some(genre_name.clone()),
            original_payload: None,
            genre_name,
        }
    }

    pub fn genre_name(&self) -> &str {
        &self.genre_name
    }

    pub fn section_id(&self) -> String {
        section_id_for(&self.genre_name)
    }

    pub fn limit(&self) -> u32 {
        ROW_LIMIT
    }

    pub fn route(&self) -> &'static str {
        ROW_ROUTE
    }

    pub fn results_endpoint(&self) -> String {
        results_endpoint_for(&self.genre_name)
    }

    /// Working copy for a new user or context. Keeps the label and the
    /// additional data, drops any request payload.
    pub fn create_instance(&self) -> Self {
        Self {
            genre_name: self.genre_name.clone(),
            display_text: self.display_text.clone(),
            additional_data: self.additional_data.clone(),
            original_payload: None,
        }
    }

    /// Genre a results call should query.
    ///
    /// Non-empty `additional_data` from the caller wins over the row's own
    /// genre, so one shared callback route can serve any genre.
    pub fn operative_genre<'a>(&'a self, additional_data: Option<&'a str>) -> &'a str {
        additional_data
            .filter(|d| !d.is_empty())
            .unwrap_or(self.genre_name.as_str())
    }

    pub fn info(&self) -> SectionInfo {
        SectionInfo {
            section: self.section_id(),
            display_text: self.display_text.clone(),
            limit: ROW_LIMIT,
            route: ROW_ROUTE.to_string(),
            additional_data: self.additional_data.clone(),
            view_mode: SectionViewMode::Landscape,
            display_title_text: true,
            show_details_menu: true,
            allow_view_mode_change: true,
            original_payload: self.original_payload.clone(),
        }
    }
}
