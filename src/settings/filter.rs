//! HTML filtering settings.
//!
//! Controls which tags and attributes survive when user-supplied HTML
//! is saved or rendered.

use serde::{Deserialize, Serialize};

use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema, ValidationResult};

/// HTML filter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Disable HTML filtering entirely. Dangerous.
    pub disable_filtering: bool,

    /// Tags stripped together with their content, unless also listed as
    /// valid.
    pub nasty_tags: Vec<String>,

    /// Tags that pass the filter.
    pub valid_tags: Vec<String>,

    /// Attributes additionally allowed on valid tags.
    pub custom_attributes: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            disable_filtering: false,
            nasty_tags: to_strings(&["style", "object", "embed", "applet", "script", "meta"]),
            valid_tags: to_strings(&[
                "a", "abbr", "acronym", "address", "article", "aside", "audio", "b", "bdo",
                "big", "blockquote", "body", "br", "canvas", "caption", "cite", "code", "col",
                "colgroup", "command", "datalist", "dd", "del", "details", "dfn", "dialog",
                "div", "dl", "dt", "em", "figure", "figcaption", "footer", "h1", "h2", "h3",
                "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe",
                "img", "ins", "kbd", "keygen", "li", "map", "mark", "meter", "nav", "ol",
                "output", "p", "pre", "picture", "progress", "q", "rp", "rt", "ruby", "samp",
                "section", "small", "source", "span", "strong", "sub", "summary", "sup",
                "table", "tbody", "td", "tfoot", "th", "thead", "time", "title", "tr", "tt",
                "u", "ul", "var", "video",
            ]),
            custom_attributes: to_strings(&[
                "style", "controls", "poster", "autoplay", "loading", "srcset", "sizes", "open",
            ]),
        }
    }
}

impl FilterSettings {
    /// Whether a tag passes the filter.
    pub fn is_tag_allowed(&self, tag: &str) -> bool {
        if self.disable_filtering {
            return true;
        }
        self.valid_tags.iter().any(|t| t == tag)
    }

    /// Whether a tag is stripped together with its content. A tag
    /// marked valid is only deleted, never blocked.
    pub fn is_tag_nasty(&self, tag: &str) -> bool {
        if self.disable_filtering {
            return false;
        }
        self.nasty_tags.iter().any(|t| t == tag) && !self.valid_tags.iter().any(|t| t == tag)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

const FILTER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("disable_filtering", "Disable HTML filtering", FieldKind::Bool)
        .describe(
            "Warning: disabling this can be dangerous. Only disable if you know \
             what you are doing.",
        ),
    FieldDescriptor::new("nasty_tags", "Nasty tags", FieldKind::List).describe(
        "These tags and their content are completely blocked when a page is \
         saved or rendered. They are only deleted if they are not marked as \
         valid tags.",
    ),
    FieldDescriptor::new("valid_tags", "Valid tags", FieldKind::List)
        .describe("A list of valid tags which will be not filtered out."),
    FieldDescriptor::new("custom_attributes", "Custom attributes", FieldKind::List)
        .describe("These attributes are additionally allowed."),
];

impl SettingsSchema for FilterSettings {
    const RECORD: &'static str = "quill.filter";

    fn fields() -> &'static [FieldDescriptor] {
        FILTER_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if self.disable_filtering {
            result.add_warning("disable_filtering: HTML filtering is turned off");
        }
        result
    }
}
