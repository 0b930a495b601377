//! Editor behavior settings.
//!
//! [`EditingSettings`] covers the site-wide editing policy; the
//! visual-editor configuration lives in [`TinyMceSettings`], one flat
//! record combining layout, plugin, resource-type, and advanced
//! options. The JSON-typed fields hold raw configuration handed to the
//! editor as-is, so they only get a well-formedness check.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::settings::schema::{
    validate_json, FieldDescriptor, FieldKind, SettingsSchema, ValidationResult,
};

/// Site-wide editing policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
    /// Editors users may pick from.
    pub available_editors: Vec<String>,

    /// Default wysiwyg editor; users may choose their own.
    pub default_editor: String,

    /// Enable the external-editor feature (requires a client-side
    /// helper application).
    pub ext_editor: bool,

    /// Warn when deleting or moving content that is linked from inside
    /// the site.
    pub enable_link_integrity_checks: bool,

    /// Lock content during through-the-web edits. WebDAV clients are
    /// locked regardless.
    pub lock_on_web_edit: bool,

    /// Limit the tags vocabulary to terms used inside the current
    /// navigation root.
    pub subjects_of_navigation_root: bool,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            available_editors: vec!["TinyMCE".to_string(), "None".to_string()],
            default_editor: "TinyMCE".to_string(),
            ext_editor: false,
            enable_link_integrity_checks: true,
            lock_on_web_edit: true,
            subjects_of_navigation_root: false,
        }
    }
}

const EDITING_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("available_editors", "Available editors", FieldKind::List)
        .describe("Available editors in the portal.")
        .required(),
    FieldDescriptor::new("default_editor", "Default editor", FieldKind::Choice)
        .describe(
            "Select the default wysiwyg editor. Users will be able to choose \
             their own or select to use the site default.",
        )
        .required(),
    FieldDescriptor::new("ext_editor", "Enable External Editor feature", FieldKind::Bool)
        .describe(
            "Determines if the external editor feature is enabled. This feature \
             requires a special client-side application installed.",
        ),
    FieldDescriptor::new(
        "enable_link_integrity_checks",
        "Enable link integrity checks",
        FieldKind::Bool,
    )
    .describe(
        "Determines if the users should get warnings when they delete or move \
         content that is linked from inside the site.",
    ),
    FieldDescriptor::new(
        "lock_on_web_edit",
        "Enable locking for through-the-web edits",
        FieldKind::Bool,
    ),
    FieldDescriptor::new(
        "subjects_of_navigation_root",
        "Limit tags/keywords to the current navigation root",
        FieldKind::Bool,
    ),
];

impl SettingsSchema for EditingSettings {
    const RECORD: &'static str = "quill.editing";

    fn fields() -> &'static [FieldDescriptor] {
        EDITING_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if self.default_editor != "None"
            && !self.available_editors.contains(&self.default_editor)
        {
            result.add_error(format!(
                "default_editor: \"{}\" is not an available editor",
                self.default_editor
            ));
        }
        result
    }
}

/// Plugins shipped with the editor.
pub const TINYMCE_PLUGINS: &[&str] = &[
    "accordion",
    "advlist",
    "anchor",
    "autolink",
    "autosave",
    "charmap",
    "code",
    "colorpicker",
    "contextmenu",
    "directionality",
    "emoticons",
    "fullpage",
    "fullscreen",
    "help",
    "hr",
    "insertdatetime",
    "layer",
    "lists",
    "media",
    "nonbreaking",
    "noneditable",
    "pagebreak",
    "paste",
    "preview",
    "print",
    "searchreplace",
    "tabfocus",
    "table",
    "textcolor",
    "textpattern",
    "template",
    "visualblocks",
    "visualchars",
    "wordcount",
];

/// How the editor encodes entities/characters on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityEncoding {
    /// Convert characters into named entities.
    Named,
    /// Convert characters into numeric entities.
    Numeric,
    /// Store characters in non-entity form except the XML defaults.
    Raw,
}

/// Visual editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TinyMceSettings {
    // Layout
    pub resizing: bool,
    pub autoresize: bool,
    pub inline: bool,
    /// Editor width, like `100%` or `400px`.
    pub editor_width: Option<String>,
    /// Editor height in pixels; the minimum height when auto resize is
    /// enabled.
    pub editor_height: Option<String>,
    /// CSS files used inside the editable area.
    pub content_css: Vec<String>,
    /// `Name|tag` pairs.
    pub header_styles: Vec<String>,
    /// `Name|format|icon` triples.
    pub inline_styles: Vec<String>,
    /// `Name|format` pairs.
    pub block_styles: Vec<String>,
    /// `Name|format|icon` triples.
    pub alignment_styles: Vec<String>,
    /// `Name|class` pairs.
    pub table_styles: Vec<String>,
    /// JSON style-format configuration.
    pub formats: String,

    // Plugins and toolbar
    pub plugins: Vec<String>,
    pub menubar: String,
    /// JSON menu configuration.
    pub menu: String,
    /// JSON template list.
    pub templates: String,
    pub toolbar: String,
    /// `pluginname|location` pairs, one per line.
    pub custom_plugins: Vec<String>,
    pub custom_buttons: Vec<String>,

    // Resource types
    /// Content types able to contain other objects.
    pub contains_objects: Vec<String>,
    /// Content types usable as images.
    pub image_objects: Vec<String>,
    pub entity_encoding: EntityEncoding,

    // Advanced
    /// Further editor configuration as JSON.
    pub other_settings: String,
}

impl Default for TinyMceSettings {
    fn default() -> Self {
        let formats = json!({
            "discreet": {"inline": "span", "classes": "discreet"},
            "clearfix": {"block": "div", "classes": "clearfix"},
            "alignleft": {
                "selector": "p,h1,h2,h3,h4,h5,h6,td,th,div,ul,ol,li,table",
                "classes": "text-start",
            },
            "aligncenter": {
                "selector": "p,h1,h2,h3,h4,h5,h6,td,th,div,ul,ol,li,table",
                "classes": "text-center",
            },
            "alignright": {
                "selector": "p,h1,h2,h3,h4,h5,h6,td,th,div,ul,ol,li,table",
                "classes": "text-end",
            },
            "alignjustify": {
                "selector": "p,h1,h2,h3,h4,h5,h6,td,th,div,ul,ol,li,table",
                "classes": "text-justify",
            },
            "textcolumns2": {"selector": "p", "classes": "text-columns-2"},
            "textcolumns3": {"selector": "p", "classes": "text-columns-3"},
        });
        let menu = json!({
            "edit": {
                "title": "Edit",
                "items": "undo redo | cut copy paste pastetext | \
                          searchreplace textpattern selectall | textcolor",
            },
            "insert": {"title": "Insert", "items": "link media | template hr"},
            "view": {
                "title": "View",
                "items": "visualaid visualchars visualblocks preview \
                          fullpage fullscreen code",
            },
            "format": {
                "title": "Format",
                "items": "bold italic underline strikethrough \
                          superscript subscript | formats | removeformat",
            },
            "table": {
                "title": "Table",
                "items": "inserttable tableprops deletetable | cell row column",
            },
            "tools": {
                "title": "Tools",
                "items": "spellchecker charmap emoticons insertdatetime layer",
            },
        });

        Self {
            resizing: true,
            autoresize: false,
            inline: false,
            editor_width: None,
            editor_height: None,
            content_css: Vec::new(),
            header_styles: vec![
                "Header 1|h1".to_string(),
                "Header 2|h2".to_string(),
                "Header 3|h3".to_string(),
                "Header 4|h4".to_string(),
                "Header 5|h5".to_string(),
                "Header 6|h6".to_string(),
            ],
            inline_styles: vec![
                "Bold|bold|bold".to_string(),
                "Italic|italic|italic".to_string(),
                "Underline|underline|underline".to_string(),
                "Strikethrough|strikethrough|strike-through".to_string(),
                "Superscript|superscript|superscript".to_string(),
                "Subscript|subscript|subscript".to_string(),
                "Code|code|sourcecode".to_string(),
                "Text in 2 columns|textcolumns2".to_string(),
                "Text in 3 columns|textcolumns3".to_string(),
            ],
            block_styles: vec![
                "Paragraph|p".to_string(),
                "Blockquote|blockquote".to_string(),
                "Div|div".to_string(),
                "Pre|pre".to_string(),
            ],
            alignment_styles: vec![
                "Left|alignleft|align-left".to_string(),
                "Center|aligncenter|align-center".to_string(),
                "Right|alignright|align-right".to_string(),
                "Justify|alignjustify|align-justify".to_string(),
            ],
            table_styles: vec![
                "Listing|listing".to_string(),
                "Listing compact|listing-compact".to_string(),
                "Subdued grid|plain".to_string(),
                "Invisible Grid|invisible-grid".to_string(),
            ],
            formats: pretty_json(&formats),
            plugins: vec![
                "fullscreen".to_string(),
                "hr".to_string(),
                "lists".to_string(),
                "media".to_string(),
                "nonbreaking".to_string(),
                "noneditable".to_string(),
                "pagebreak".to_string(),
                "paste".to_string(),
                "preview".to_string(),
                "print".to_string(),
                "searchreplace".to_string(),
                "tabfocus".to_string(),
                "table".to_string(),
                "visualchars".to_string(),
                "wordcount".to_string(),
                "code".to_string(),
            ],
            menubar: "edit table format tools view insert".to_string(),
            menu: pretty_json(&menu),
            templates: "{}".to_string(),
            toolbar: "ltr rtl | undo redo | styleselect | bold italic | \
                      alignleft aligncenter alignright alignjustify | \
                      bullist numlist outdent indent | \
                      inserttable | unlink quilllink quillimage"
                .to_string(),
            custom_plugins: Vec::new(),
            custom_buttons: Vec::new(),
            contains_objects: vec![
                "Folder".to_string(),
                "Large Folder".to_string(),
                "Site".to_string(),
            ],
            image_objects: vec!["Image".to_string()],
            entity_encoding: EntityEncoding::Raw,
            other_settings: "{}".to_string(),
        }
    }
}

const TINYMCE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("resizing", "Enable resizing the editor window.", FieldKind::Bool),
    FieldDescriptor::new(
        "autoresize",
        "Enable auto resizing of the editor window.",
        FieldKind::Bool,
    ),
    FieldDescriptor::new("inline", "Run the editor in inline mode.", FieldKind::Bool),
    FieldDescriptor::new("editor_width", "Editor width", FieldKind::TextLine),
    FieldDescriptor::new("editor_height", "Editor height", FieldKind::TextLine),
    FieldDescriptor::new(
        "content_css",
        "Choose the CSS used in the editor area",
        FieldKind::List,
    ),
    FieldDescriptor::new("header_styles", "Header styles", FieldKind::List).describe("Name|tag"),
    FieldDescriptor::new("inline_styles", "Inline styles", FieldKind::List)
        .describe("Name|format|icon"),
    FieldDescriptor::new("block_styles", "Block styles", FieldKind::List).describe("Name|format"),
    FieldDescriptor::new("alignment_styles", "Alignment styles", FieldKind::List)
        .describe("Name|format|icon"),
    FieldDescriptor::new("table_styles", "Table styles", FieldKind::List).describe("Name|class"),
    FieldDescriptor::new("formats", "Formats", FieldKind::Json)
        .describe("JSON-formatted style format configuration.")
        .required(),
    FieldDescriptor::new("plugins", "Editor plugins", FieldKind::List)
        .vocabulary(TINYMCE_PLUGINS),
    FieldDescriptor::new("menubar", "Menubar", FieldKind::TextLine).required(),
    FieldDescriptor::new("menu", "Menu", FieldKind::Json)
        .describe("JSON formatted Menu configuration."),
    FieldDescriptor::new("templates", "Templates", FieldKind::Json),
    FieldDescriptor::new("toolbar", "Toolbar", FieldKind::Text).required(),
    FieldDescriptor::new("custom_plugins", "Custom plugins", FieldKind::List)
        .describe("Format is pluginname|location, one per line."),
    FieldDescriptor::new("custom_buttons", "Custom buttons", FieldKind::List),
    FieldDescriptor::new("contains_objects", "Contains objects", FieldKind::List),
    FieldDescriptor::new("image_objects", "Image objects", FieldKind::List),
    FieldDescriptor::new("entity_encoding", "Entity encoding", FieldKind::Choice)
        .vocabulary(&["named", "numeric", "raw"]),
    FieldDescriptor::new("other_settings", "Other settings", FieldKind::Json)
        .describe("Other editor configuration formatted as JSON."),
];

impl SettingsSchema for TinyMceSettings {
    const RECORD: &'static str = "quill.tinymce";

    fn fields() -> &'static [FieldDescriptor] {
        TINYMCE_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        result.check("formats", validate_json(&self.formats));
        result.check("menu", validate_json(&self.menu));
        result.check("templates", validate_json(&self.templates));
        result.check("other_settings", validate_json(&self.other_settings));
        for plugin in &self.plugins {
            if !TINYMCE_PLUGINS.contains(&plugin.as_str()) {
                result.add_warning(format!("plugins: \"{plugin}\" is not a known plugin"));
            }
        }
        result
    }
}

fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
