//! The smaller control-panel groups: types, markup, user/groups,
//! login, links, maintenance, and date/time.

use serde::{Deserialize, Serialize};

use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema, ValidationResult};

/// Content type listing behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypesSettings {
    /// Types which use the view action when clicked in listings.
    pub types_use_view_action_in_listings: Vec<String>,

    /// Redirect to a Link's URL instead of its default view.
    pub redirect_links: bool,

    /// Types selectable as a default page.
    pub default_page_types: Vec<String>,
}

impl Default for TypesSettings {
    fn default() -> Self {
        Self {
            types_use_view_action_in_listings: vec!["Image".to_string(), "File".to_string()],
            redirect_links: true,
            default_page_types: vec![
                "Document".to_string(),
                "Event".to_string(),
                "News Item".to_string(),
                "Collection".to_string(),
            ],
        }
    }
}

const TYPES_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(
        "types_use_view_action_in_listings",
        "Types which use the view action in listing views.",
        FieldKind::List,
    ),
    FieldDescriptor::new("redirect_links", "Redirect links", FieldKind::Bool).describe(
        "When clicking on a Link type, should the user be taken to the default \
         view or be redirected to the Link's URL?",
    ),
    FieldDescriptor::new(
        "default_page_types",
        "Types that can be set as a default page",
        FieldKind::List,
    ),
];

impl SettingsSchema for TypesSettings {
    const RECORD: &'static str = "quill.types";

    fn fields() -> &'static [FieldDescriptor] {
        TYPES_FIELDS
    }
}

/// Text markup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupSettings {
    /// Default format of text fields for newly created content.
    pub default_type: String,

    /// Formats available as alternatives to the default.
    pub allowed_types: Vec<String>,

    /// Enabled markdown extensions.
    pub markdown_extensions: Vec<String>,
}

impl Default for MarkupSettings {
    fn default() -> Self {
        Self {
            default_type: "text/html".to_string(),
            allowed_types: vec![
                "text/html".to_string(),
                "text/x-web-textile".to_string(),
            ],
            markdown_extensions: vec![
                "markdown.extensions.fenced_code".to_string(),
                "markdown.extensions.nl2br".to_string(),
            ],
        }
    }
}

const MARKUP_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("default_type", "Default format", FieldKind::Choice)
        .describe(
            "Select the default format of textfields for newly created content \
             objects.",
        )
        .required(),
    FieldDescriptor::new("allowed_types", "Alternative formats", FieldKind::List).required(),
    FieldDescriptor::new(
        "markdown_extensions",
        "Enabled markdown extensions",
        FieldKind::List,
    ),
];

impl SettingsSchema for MarkupSettings {
    const RECORD: &'static str = "quill.markup";

    fn fields() -> &'static [FieldDescriptor] {
        MARKUP_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if !self.allowed_types.contains(&self.default_type) {
            result.add_error(format!(
                "default_type: \"{}\" is not among the allowed formats",
                self.default_type
            ));
        }
        result
    }
}

/// Scaling hints for sites with many users or groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGroupsSettings {
    /// Search for groups instead of listing all of them.
    pub many_groups: bool,

    /// Search for users instead of listing all of them.
    pub many_users: bool,
}

const USERGROUPS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("many_groups", "Many groups?", FieldKind::Bool).describe(
        "In environments with a lot of groups it can be very slow or \
         impossible to build a list of all groups. This option tunes the user \
         interface for this case by allowing you to search for groups instead \
         of listing all of them.",
    ),
    FieldDescriptor::new("many_users", "Many users?", FieldKind::Bool),
];

impl SettingsSchema for UserGroupsSettings {
    const RECORD: &'static str = "quill.usergroups";

    fn fields() -> &'static [FieldDescriptor] {
        USERGROUPS_FIELDS
    }
}

/// External login integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginSettings {
    pub auth_cookie_length: u32,
    pub verify_login_name: bool,
    pub allow_external_login_sites: Vec<String>,
    pub external_login_url: Option<String>,
    pub external_logout_url: Option<String>,
    pub external_login_iframe: bool,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            auth_cookie_length: 0,
            verify_login_name: true,
            allow_external_login_sites: Vec::new(),
            external_login_url: None,
            external_logout_url: None,
            external_login_iframe: false,
        }
    }
}

const LOGIN_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("auth_cookie_length", "Auth cookie length", FieldKind::Int),
    FieldDescriptor::new("verify_login_name", "Verify login name", FieldKind::Bool),
    FieldDescriptor::new(
        "allow_external_login_sites",
        "Allow external login sites",
        FieldKind::List,
    ),
    FieldDescriptor::new("external_login_url", "External login url", FieldKind::TextLine),
    FieldDescriptor::new("external_logout_url", "External logout url", FieldKind::TextLine),
    FieldDescriptor::new("external_login_iframe", "External login iframe", FieldKind::Bool),
];

impl SettingsSchema for LoginSettings {
    const RECORD: &'static str = "quill.login";

    fn fields() -> &'static [FieldDescriptor] {
        LOGIN_FIELDS
    }
}

/// Link rendering policy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Open external links in a new window.
    pub external_links_open_new_window: bool,

    /// Mark external or special protocol links with a class.
    pub mark_special_links: bool,
}

const LINK_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(
        "external_links_open_new_window",
        "Open external links in a new window",
        FieldKind::Bool,
    ),
    FieldDescriptor::new("mark_special_links", "Mark special links", FieldKind::Bool),
];

impl SettingsSchema for LinkSettings {
    const RECORD: &'static str = "quill.link";

    fn fields() -> &'static [FieldDescriptor] {
        LINK_FIELDS
    }
}

/// Database maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceSettings {
    /// Days of object history to keep after packing. Unrelated to
    /// content versioning.
    pub days: u32,
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        Self { days: 7 }
    }
}

const MAINTENANCE_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new(
    "days",
    "Days of object history to keep after packing",
    FieldKind::Int,
)
.describe(
    "You should pack your database regularly. This number indicates how many \
     days of undo history you want to keep. Recommended value is 7 days.",
)
.required()];

impl SettingsSchema for MaintenanceSettings {
    const RECORD: &'static str = "quill.maintenance";

    fn fields() -> &'static [FieldDescriptor] {
        MAINTENANCE_FIELDS
    }
}

/// Weekday names accepted for `first_weekday`.
pub const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Timezone and calendar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeSettings {
    /// Default timezone of the site. Users can pick their own when
    /// more timezones are made available.
    pub portal_timezone: String,

    /// Timezones available for users and events.
    pub available_timezones: Vec<String>,

    /// First day in the week.
    pub first_weekday: String,
}

impl Default for DateTimeSettings {
    fn default() -> Self {
        Self {
            portal_timezone: "UTC".to_string(),
            available_timezones: Vec::new(),
            first_weekday: "monday".to_string(),
        }
    }
}

const DATETIME_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("portal_timezone", "Site default timezone", FieldKind::Choice)
        .required(),
    FieldDescriptor::new("available_timezones", "Available timezones", FieldKind::List),
    FieldDescriptor::new("first_weekday", "First weekday", FieldKind::Choice)
        .vocabulary(WEEKDAYS)
        .required(),
];

impl SettingsSchema for DateTimeSettings {
    const RECORD: &'static str = "quill.datetime";

    fn fields() -> &'static [FieldDescriptor] {
        DATETIME_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if !WEEKDAYS.contains(&self.first_weekday.as_str()) {
            result.add_error(format!(
                "first_weekday: \"{}\" is not a weekday",
                self.first_weekday
            ));
        }
        if !self.available_timezones.is_empty()
            && !self.available_timezones.contains(&self.portal_timezone)
        {
            result.add_warning(
                "portal_timezone: the default timezone is not among the available ones",
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(TypesSettings::default().validate().is_valid);
        assert!(MarkupSettings::default().validate().is_valid);
        assert!(UserGroupsSettings::default().validate().is_valid);
        assert!(LoginSettings::default().validate().is_valid);
        assert!(LinkSettings::default().validate().is_valid);
        assert!(MaintenanceSettings::default().validate().is_valid);
        assert!(DateTimeSettings::default().validate().is_valid);
    }

    #[test]
    fn test_markup_default_must_be_allowed() {
        let mut settings = MarkupSettings::default();
        settings.default_type = "text/x-rst".to_string();
        assert!(!settings.validate().is_valid);
    }

    #[test]
    fn test_datetime_weekday_checked() {
        let mut settings = DateTimeSettings::default();
        settings.first_weekday = "caturday".to_string();
        assert!(!settings.validate().is_valid);
    }

    #[test]
    fn test_datetime_timezone_consistency_warns() {
        let mut settings = DateTimeSettings::default();
        settings.available_timezones = vec!["Europe/Vienna".to_string()];
        let result = settings.validate();
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_maintenance_default() {
        assert_eq!(MaintenanceSettings::default().days, 7);
    }
}
