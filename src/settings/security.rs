//! Security settings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema};

/// Membership and login policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Allow users to register themselves on the site.
    pub enable_self_reg: bool,

    /// Let users select their own passwords; otherwise a reset URL is
    /// generated and mailed.
    pub enable_user_pwd_choice: bool,

    /// Create home folders where users can add content when they log
    /// in.
    pub enable_user_folders: bool,

    /// Allow anyone to view creator and modification information.
    pub allow_anon_views_about: bool,

    /// Let users log in with their email address instead of a separate
    /// login name.
    pub use_email_as_login: bool,

    /// Use generated UUIDs as user ids for new users.
    pub use_uuid_as_userid: bool,

    /// Log the user in automatically after a successful password
    /// reset.
    pub autologin_after_password_reset: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            enable_self_reg: false,
            enable_user_pwd_choice: false,
            enable_user_folders: false,
            allow_anon_views_about: false,
            use_email_as_login: false,
            use_uuid_as_userid: false,
            autologin_after_password_reset: true,
        }
    }
}

impl SecuritySettings {
    /// User id for a new member: a generated UUID when
    /// `use_uuid_as_userid` is on, else the login name as given.
    pub fn userid_for_login(&self, login: &str) -> String {
        if self.use_uuid_as_userid {
            Uuid::new_v4().simple().to_string()
        } else {
            login.to_string()
        }
    }
}

const SECURITY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("enable_self_reg", "Enable self-registration", FieldKind::Bool)
        .describe(
            "Allows users to register themselves on the site. If not selected, \
             only site managers can add new users.",
        ),
    FieldDescriptor::new(
        "enable_user_pwd_choice",
        "Let users select their own passwords",
        FieldKind::Bool,
    ),
    FieldDescriptor::new("enable_user_folders", "Enable User Folders", FieldKind::Bool)
        .describe(
            "If selected, home folders where users can create content will be \
             created when they log in.",
        ),
    FieldDescriptor::new(
        "allow_anon_views_about",
        "Allow anyone to view 'about' information",
        FieldKind::Bool,
    ),
    FieldDescriptor::new(
        "use_email_as_login",
        "Use email address as login name",
        FieldKind::Bool,
    )
    .describe(
        "Allows users to login with their email address instead of specifying \
         a separate login name. The login name is saved as lower case.",
    ),
    FieldDescriptor::new("use_uuid_as_userid", "Use UUID user ids", FieldKind::Bool),
    FieldDescriptor::new(
        "autologin_after_password_reset",
        "Login user after password reset",
        FieldKind::Bool,
    ),
];

impl SettingsSchema for SecuritySettings {
    const RECORD: &'static str = "quill.security";

    fn fields() -> &'static [FieldDescriptor] {
        SECURITY_FIELDS
    }
}
