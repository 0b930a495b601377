//! Search settings.

use serde::{Deserialize, Serialize};

use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema, ValidationResult};

/// Index the default search sorts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSortIndex {
    Relevance,
    /// Newest first.
    Date,
    /// Alphabetically.
    SortableTitle,
}

/// Site search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Show live results while typing, if the browser supports it.
    pub enable_livesearch: bool,

    /// Content types excluded from search results. Newly installed
    /// types are searched unless listed here.
    pub types_not_searched: Vec<String>,

    /// Crop the item description in search result listings after this
    /// many characters.
    pub search_results_description_length: u32,

    /// Sort the default search on this index.
    pub sort_on: SearchSortIndex,

    /// Show images in results.
    pub search_show_images: bool,

    /// Image scale for results.
    pub search_image_scale: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enable_livesearch: true,
            types_not_searched: vec!["Site".to_string(), "Temp Folder".to_string()],
            search_results_description_length: 160,
            sort_on: SearchSortIndex::Relevance,
            search_show_images: true,
            search_image_scale: "mini".to_string(),
        }
    }
}

impl SearchSettings {
    /// Crop an item description for result listings to the configured
    /// length.
    pub fn crop_description(&self, text: &str) -> String {
        crate::utils::crop_text(text, self.search_results_description_length as usize, "...")
    }
}

const SEARCH_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("enable_livesearch", "Enable LiveSearch", FieldKind::Bool).describe(
        "Enables the LiveSearch feature, which shows live results if the \
         browser supports JavaScript.",
    ),
    FieldDescriptor::new(
        "types_not_searched",
        "Select content types which should be excluded from search results",
        FieldKind::List,
    ),
    FieldDescriptor::new(
        "search_results_description_length",
        "Crop the item description in search result listings after a number of characters.",
        FieldKind::Int,
    ),
    FieldDescriptor::new("sort_on", "Sort on", FieldKind::Choice)
        .describe("Sort the default search on this index")
        .vocabulary(&["relevance", "date", "sortable_title"])
        .required(),
    FieldDescriptor::new("search_show_images", "Show images in results", FieldKind::Bool),
    FieldDescriptor::new("search_image_scale", "Image scale for results", FieldKind::Choice),
];

impl SettingsSchema for SearchSettings {
    const RECORD: &'static str = "quill.search";

    fn fields() -> &'static [FieldDescriptor] {
        SEARCH_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        ValidationResult::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SearchSettings::default();
        assert!(settings.enable_livesearch);
        assert_eq!(settings.search_results_description_length, 160);
        assert_eq!(settings.sort_on, SearchSortIndex::Relevance);
        assert!(settings
            .types_not_searched
            .contains(&"Temp Folder".to_string()));
    }

    #[test]
    fn test_crop_description_uses_configured_length() {
        let mut settings = SearchSettings::default();
        settings.search_results_description_length = 12;
        let cropped = settings.crop_description("a summary that runs long");
        assert!(cropped.ends_with("..."));
        assert!(cropped.chars().count() <= 15);

        assert_eq!(settings.crop_description("short"), "short");
    }

    #[test]
    fn test_sort_index_roundtrip() {
        let value = serde_json::to_value(SearchSortIndex::SortableTitle).unwrap();
        assert_eq!(value, "sortable_title");
        let back: SearchSortIndex = serde_json::from_value(value).unwrap();
        assert_eq!(back, SearchSortIndex::SortableTitle);
    }
}
