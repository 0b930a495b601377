//! Navigation and site-map settings.

use serde::{Deserialize, Serialize};

use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema, ValidationResult};

/// Catalog index used to order tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabSortIndex {
    /// Position in the parent container.
    PositionInParent,
    /// Title.
    SortableTitle,
    /// Short name (id).
    Id,
}

/// Navigation tree and tab generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Number of folder levels to show in the navigation.
    pub navigation_depth: u32,

    /// Items created at the root level appear as tabs.
    pub generate_tabs: bool,

    /// Generate tabs for items other than folders.
    pub nonfolderish_tabs: bool,

    /// Index used to sort the tabs.
    pub sort_tabs_on: TabSortIndex,

    /// Sort tabs in descending order.
    pub sort_tabs_reversed: bool,

    /// Content types shown in the navigation and site map.
    pub displayed_types: Vec<String>,

    /// Filter navigation entries on workflow state.
    pub filter_on_workflow: bool,

    /// Workflow states shown when filtering is on.
    pub workflow_states_to_show: Vec<String>,

    /// Show items excluded from navigation while viewing their
    /// children.
    pub show_excluded_items: bool,

    /// Path used as navigation root, relative to the site root. Starts
    /// with `/`.
    pub root: String,

    /// Number of folder levels to show in the site map.
    pub sitemap_depth: u32,

    /// Hide content inside these types.
    pub parent_types_not_to_query: Vec<String>,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            navigation_depth: 3,
            generate_tabs: true,
            nonfolderish_tabs: true,
            sort_tabs_on: TabSortIndex::PositionInParent,
            sort_tabs_reversed: false,
            displayed_types: vec![
                "Link".to_string(),
                "News Item".to_string(),
                "Folder".to_string(),
                "Document".to_string(),
                "Event".to_string(),
                "Collection".to_string(),
            ],
            filter_on_workflow: false,
            workflow_states_to_show: Vec::new(),
            show_excluded_items: false,
            root: "/".to_string(),
            sitemap_depth: 3,
            parent_types_not_to_query: vec!["Temp Folder".to_string()],
        }
    }
}

const NAVIGATION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("navigation_depth", "Navigation depth", FieldKind::Int)
        .describe("Number of folder levels to show in the navigation.")
        .required(),
    FieldDescriptor::new("generate_tabs", "Automatically generate tabs", FieldKind::Bool)
        .describe(
            "By default, all items created at the root level will appear as \
             tabs. You can turn this off if you prefer manually constructing \
             this part of the navigation.",
        ),
    FieldDescriptor::new(
        "nonfolderish_tabs",
        "Generate tabs for items other than folders.",
        FieldKind::Bool,
    ),
    FieldDescriptor::new("sort_tabs_on", "Sort tabs on", FieldKind::Choice)
        .describe("Index used to sort the tabs")
        .vocabulary(&["position_in_parent", "sortable_title", "id"])
        .required(),
    FieldDescriptor::new(
        "sort_tabs_reversed",
        "Reversed sort order for tabs.",
        FieldKind::Bool,
    ),
    FieldDescriptor::new("displayed_types", "Displayed content types", FieldKind::List)
        .describe("The content types that should be shown in the navigation and site map."),
    FieldDescriptor::new("filter_on_workflow", "Filter on workflow state", FieldKind::Bool),
    FieldDescriptor::new("workflow_states_to_show", "Workflow states to show", FieldKind::List),
    FieldDescriptor::new(
        "show_excluded_items",
        "Show items normally excluded from navigation if viewing their children.",
        FieldKind::Bool,
    ),
    FieldDescriptor::new("root", "Root", FieldKind::TextLine)
        .describe(
            "Path to be used as navigation root, relative to the site root. \
             Starts with '/'.",
        )
        .required(),
    FieldDescriptor::new("sitemap_depth", "Sitemap depth", FieldKind::Int)
        .describe("Number of folder levels to show in the site map.")
        .required(),
    FieldDescriptor::new(
        "parent_types_not_to_query",
        "Hide children of these types",
        FieldKind::List,
    ),
];

impl SettingsSchema for NavigationSettings {
    const RECORD: &'static str = "quill.navigation";

    fn fields() -> &'static [FieldDescriptor] {
        NAVIGATION_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if !self.root.starts_with('/') {
            result.add_error(format!(
                "root: \"{}\" must start with '/' (relative to the site root)",
                self.root
            ));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = NavigationSettings::default();
        assert_eq!(settings.navigation_depth, 3);
        assert_eq!(settings.root, "/");
        assert_eq!(settings.sort_tabs_on, TabSortIndex::PositionInParent);
        assert!(settings.validate().is_valid);
    }

    #[test]
    fn test_root_must_be_absolute() {
        let mut settings = NavigationSettings::default();
        settings.root = "en/front-page".to_string();
        assert!(!settings.validate().is_valid);

        settings.root = "/en/front-page".to_string();
        assert!(settings.validate().is_valid);
    }

    #[test]
    fn test_sort_index_serializes_as_snake_case() {
        let value = serde_json::to_value(TabSortIndex::PositionInParent).unwrap();
        assert_eq!(value, "position_in_parent");
    }
}
