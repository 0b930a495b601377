//! Social media metadata settings.

use serde::{Deserialize, Serialize};

use crate::settings::schema::{
    validate_handle_prefix, FieldDescriptor, FieldKind, SettingsSchema, ValidationResult,
};

/// Hints for social networks rendering shared pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMediaSettings {
    /// Include meta tags on pages to give hints to social media on how
    /// to better render shared pages.
    pub share_social_data: bool,

    /// Twitter/X username, without the `@` prefix character.
    pub twitter_username: String,

    /// Facebook App ID, used with Open Graph integrations.
    pub facebook_app_id: String,

    /// Facebook username for linking Open Graph data to an account.
    pub facebook_username: String,
}

impl Default for SocialMediaSettings {
    fn default() -> Self {
        Self {
            share_social_data: true,
            twitter_username: String::new(),
            facebook_app_id: String::new(),
            facebook_username: String::new(),
        }
    }
}

const SOCIAL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("share_social_data", "Share social data", FieldKind::Bool).describe(
        "Include meta tags on pages to give hints to social media on how to \
         better render your pages when shared",
    ),
    FieldDescriptor::new("twitter_username", "Twitter username", FieldKind::TextLine)
        .describe("Do not include the \"@\" prefix character."),
    FieldDescriptor::new("facebook_app_id", "Facebook App ID", FieldKind::TextLine)
        .describe("To be used with some integrations like Open Graph data"),
    FieldDescriptor::new("facebook_username", "Facebook username", FieldKind::TextLine)
        .describe("For linking Open Graph data to a Facebook account"),
];

impl SettingsSchema for SocialMediaSettings {
    const RECORD: &'static str = "quill.social";

    fn fields() -> &'static [FieldDescriptor] {
        SOCIAL_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        result.check(
            "twitter_username",
            validate_handle_prefix(&self.twitter_username, '@'),
        );
        result
    }
}
