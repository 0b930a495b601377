//! Site-wide appearance and metadata settings.

use serde::{Deserialize, Serialize};

use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema, ValidationResult};

/// Default robots.txt body. `{site_url}` is replaced with the site URL
/// when served.
pub const ROBOTS_TXT: &str = "\
Sitemap: {site_url}/sitemap.xml.gz

# Define access-restrictions for robots/spiders
# http://www.robotstxt.org/wc/norobots.html



# By default we allow robots to access all areas of our site
# already accessible to anonymous users

User-agent: *
Disallow:



# Add Googlebot-specific syntax extension to exclude forms
# that are repeated for each piece of content in the site
# the wildcard is only supported by Googlebot

User-Agent: Googlebot
Disallow: /*?
Disallow: /*folder_factories$
Disallow: /*folder_summary_view$
Disallow: /*login_form$
Disallow: /*mail_password_form$
Disallow: /@@search
Disallow: /*search_rss$
Disallow: /*sendto_form$
Disallow: /*summary_view$
Disallow: /*thumbnail_view$
Disallow: /*view$
";

/// Listing icon and thumbnail visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Never,
    Always,
    /// For authenticated users only.
    Authenticated,
}

/// Where the editing toolbar renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarPosition {
    /// Vertical mode.
    Side,
    /// Horizontal mode.
    Top,
}

/// Site title, branding assets, and listing display policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Shown in browser title bars and syndication feeds.
    pub site_title: String,

    /// Custom site logo, stored inline.
    #[serde(with = "base64_bytes")]
    pub site_logo: Option<Vec<u8>>,

    /// MIME type of the favicon, set when a new favicon is uploaded.
    pub site_favicon_mimetype: String,

    /// Custom favicon, stored inline.
    #[serde(with = "base64_bytes")]
    pub site_favicon: Option<Vec<u8>>,

    /// Expose Dublin Core properties as metatags.
    pub expose_dc_meta_tags: bool,

    /// Expose content as sitemap.xml.gz for search engines.
    pub enable_sitemap: bool,

    /// Third-party JavaScript rendered at the end of the head section.
    pub webstats_head_js: String,

    /// Third-party JavaScript rendered near the end of the page.
    pub webstats_js: String,

    /// Show the publication date in content bylines.
    pub display_publication_date_in_byline: bool,

    /// Show icons in listings.
    pub icon_visibility: Visibility,

    /// Show thumbnail images in listings.
    pub thumb_visibility: Visibility,

    /// Suppress thumbs in portlets.
    pub no_thumbs_portlet: bool,

    /// Suppress thumbs in list views.
    pub no_thumbs_lists: bool,

    /// Suppress thumbs in summary views.
    pub no_thumbs_summary: bool,

    /// Suppress thumbs in table views and folder contents.
    pub no_thumbs_tables: bool,

    pub thumb_scale_portlet: String,
    pub thumb_scale_listing: String,
    pub thumb_scale_table: String,
    pub thumb_scale_summary: String,

    pub toolbar_position: ToolbarPosition,

    /// Toolbar logo URL, relative to the site root.
    pub toolbar_logo: String,

    /// robots.txt body served to crawlers.
    pub robots_txt: String,

    /// Ids that can act as fallback default pages for a container.
    pub default_page: Vec<String>,

    /// Only these roles can add new keywords.
    pub roles_allowed_to_add_keywords: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_title: "Quill site".to_string(),
            site_logo: None,
            site_favicon_mimetype: "image/vnd.microsoft.icon".to_string(),
            site_favicon: None,
            expose_dc_meta_tags: false,
            enable_sitemap: false,
            webstats_head_js: String::new(),
            webstats_js: String::new(),
            display_publication_date_in_byline: false,
            icon_visibility: Visibility::Always,
            thumb_visibility: Visibility::Always,
            no_thumbs_portlet: false,
            no_thumbs_lists: false,
            no_thumbs_summary: false,
            no_thumbs_tables: false,
            thumb_scale_portlet: "icon".to_string(),
            thumb_scale_listing: "thumb".to_string(),
            thumb_scale_table: "tile".to_string(),
            thumb_scale_summary: "mini".to_string(),
            toolbar_position: ToolbarPosition::Side,
            toolbar_logo: "/static/toolbar-logo.svg".to_string(),
            robots_txt: ROBOTS_TXT.to_string(),
            default_page: vec![
                "index_html".to_string(),
                "index.html".to_string(),
                "index.htm".to_string(),
                "FrontPage".to_string(),
            ],
            roles_allowed_to_add_keywords: vec![
                "Manager".to_string(),
                "Site Administrator".to_string(),
                "Reviewer".to_string(),
            ],
        }
    }
}

impl SiteSettings {
    /// robots.txt body with the site URL substituted in.
    pub fn rendered_robots_txt(&self, site_url: &str) -> String {
        self.robots_txt.replace("{site_url}", site_url)
    }
}

const SITE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("site_title", "Site title", FieldKind::TextLine)
        .describe("This shows up in the title bar of browsers and in syndication feeds.")
        .required(),
    FieldDescriptor::new("site_logo", "Site Logo", FieldKind::Bytes)
        .describe("This shows a custom logo on your site."),
    FieldDescriptor::new(
        "site_favicon_mimetype",
        "MIME type of the site favicon",
        FieldKind::TextLine,
    ),
    FieldDescriptor::new("site_favicon", "Site Favicon", FieldKind::Bytes),
    FieldDescriptor::new("expose_dc_meta_tags", "Expose Dublin Core metadata", FieldKind::Bool),
    FieldDescriptor::new("enable_sitemap", "Expose sitemap.xml.gz", FieldKind::Bool),
    FieldDescriptor::new(
        "webstats_head_js",
        "JavaScript integrations included in head section",
        FieldKind::SourceText,
    ),
    FieldDescriptor::new(
        "webstats_js",
        "JavaScript integrations included after the footer",
        FieldKind::SourceText,
    ),
    FieldDescriptor::new(
        "display_publication_date_in_byline",
        "Display publication date",
        FieldKind::Bool,
    ),
    FieldDescriptor::new("icon_visibility", "Icon visibility", FieldKind::Choice)
        .vocabulary(&["never", "always", "authenticated"])
        .required(),
    FieldDescriptor::new("thumb_visibility", "Thumb visibility", FieldKind::Choice)
        .vocabulary(&["never", "always", "authenticated"])
        .required(),
    FieldDescriptor::new("no_thumbs_portlet", "No thumbs in portlets", FieldKind::Bool),
    FieldDescriptor::new("no_thumbs_lists", "No thumbs in list views", FieldKind::Bool),
    FieldDescriptor::new("no_thumbs_summary", "No thumbs in summary views", FieldKind::Bool),
    FieldDescriptor::new("no_thumbs_tables", "No thumbs in table views", FieldKind::Bool),
    FieldDescriptor::new("thumb_scale_portlet", "Thumb scale for portlets", FieldKind::Choice)
        .required(),
    FieldDescriptor::new("thumb_scale_listing", "Thumb scale for listings", FieldKind::Choice)
        .required(),
    FieldDescriptor::new("thumb_scale_table", "Thumb scale for tables", FieldKind::Choice)
        .required(),
    FieldDescriptor::new(
        "thumb_scale_summary",
        "Thumb scale for summary view",
        FieldKind::Choice,
    )
    .required(),
    FieldDescriptor::new("toolbar_position", "Toolbar position", FieldKind::Choice)
        .vocabulary(&["side", "top"])
        .required(),
    FieldDescriptor::new(
        "toolbar_logo",
        "Relative URL for the toolbar logo",
        FieldKind::TextLine,
    ),
    FieldDescriptor::new("robots_txt", "robots.txt", FieldKind::SourceText)
        .describe("Use '{site_url}' for the site URL."),
    FieldDescriptor::new("default_page", "Default page IDs", FieldKind::List).describe(
        "Select which IDs (short names) can act as fallback default pages for \
         a container.",
    ),
    FieldDescriptor::new(
        "roles_allowed_to_add_keywords",
        "Roles that can add keywords",
        FieldKind::List,
    ),
];

impl SettingsSchema for SiteSettings {
    const RECORD: &'static str = "quill.site";

    fn fields() -> &'static [FieldDescriptor] {
        SITE_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if !self.toolbar_logo.is_empty() && !self.toolbar_logo.starts_with('/') {
            result.add_error(format!(
                "toolbar_logo: \"{}\" must be a URL relative to the site root",
                self.toolbar_logo
            ));
        }
        result
    }
}

/// Optional binary settings values stored as base64 text in records.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        match encoded {
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SiteSettings::default();
        assert_eq!(settings.site_title, "Quill site");
        assert_eq!(settings.icon_visibility, Visibility::Always);
        assert_eq!(settings.toolbar_position, ToolbarPosition::Side);
        assert!(settings.validate().is_valid);
    }

    #[test]
    fn test_robots_txt_substitution() {
        let settings = SiteSettings::default();
        let rendered = settings.rendered_robots_txt("https://example.org");
        assert!(rendered.starts_with("Sitemap: https://example.org/sitemap.xml.gz"));
        assert!(!rendered.contains("{site_url}"));
    }

    #[test]
    fn test_logo_roundtrips_as_base64() {
        let mut settings = SiteSettings::default();
        settings.site_logo = Some(vec![0x89, b'P', b'N', b'G']);

        let value = serde_json::to_value(&settings).unwrap();
        assert!(value["site_logo"].is_string());

        let back: SiteSettings = serde_json::from_value(value).unwrap();
        assert_eq!(back.site_logo, settings.site_logo);
        assert_eq!(back.site_favicon, None);
    }

    #[test]
    fn test_toolbar_logo_must_be_relative() {
        let mut settings = SiteSettings::default();
        settings.toolbar_logo = "https://cdn.example.org/logo.svg".to_string();
        assert!(!settings.validate().is_valid);
    }
}
