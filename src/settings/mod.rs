//! Site-wide settings schemas and the settings registry.
//!
//! Each schema group is a flat struct of typed, defaulted fields. The
//! structs serve three purposes at once: they are the serde shape of a
//! registry record, the source of the production default values, and
//! (through their field-descriptor tables) the input for auto-generated
//! control-panel forms.

pub mod actions;
pub mod editing;
pub mod filter;
pub mod imaging;
pub mod mail;
pub mod misc;
pub mod navigation;
pub mod recyclebin;
pub mod registry;
pub mod schema;
pub mod search;
pub mod security;
pub mod site;
pub mod social;

pub use actions::{Action, ActionRegistry, NewAction, ACTION_CATEGORIES};
pub use editing::{EditingSettings, EntityEncoding, TinyMceSettings, TINYMCE_PLUGINS};
pub use filter::FilterSettings;
pub use imaging::{ImagingSettings, PixelDensityMode, ScaleSpec};
pub use mail::MailSettings;
pub use misc::{
    DateTimeSettings, LinkSettings, LoginSettings, MaintenanceSettings, MarkupSettings,
    TypesSettings, UserGroupsSettings, WEEKDAYS,
};
pub use navigation::{NavigationSettings, TabSortIndex};
pub use recyclebin::{
    DeletedItem, MemoryRecycleBin, RecycleBin, RecycleBinItemId, RecycleBinSettings,
};
pub use registry::SettingsRegistry;
pub use schema::{
    validate_expression, validate_handle_prefix, validate_json, FieldDescriptor, FieldKind,
    SettingsSchema, ValidationResult,
};
pub use search::{SearchSettings, SearchSortIndex};
pub use security::SecuritySettings;
pub use site::{SiteSettings, ToolbarPosition, Visibility, ROBOTS_TXT};
pub use social::SocialMediaSettings;

use crate::error::BaseResult;

/// Bake the defaults of every settings group into a registry, as done
/// on first site activation. Existing records are left alone.
pub fn install_all_defaults(registry: &mut SettingsRegistry) -> BaseResult<usize> {
    let mut installed = 0;
    macro_rules! install {
        ($($schema:ty),+ $(,)?) => {
            $(
                if registry.install_defaults::<$schema>()? {
                    installed += 1;
                }
            )+
        };
    }
    install!(
        EditingSettings,
        TinyMceSettings,
        FilterSettings,
        NavigationSettings,
        SearchSettings,
        SecuritySettings,
        SiteSettings,
        MailSettings,
        MarkupSettings,
        ImagingSettings,
        SocialMediaSettings,
        TypesSettings,
        UserGroupsSettings,
        LoginSettings,
        LinkSettings,
        MaintenanceSettings,
        DateTimeSettings,
        RecycleBinSettings,
    );
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_all_defaults() {
        let mut registry = SettingsRegistry::new();
        let installed = install_all_defaults(&mut registry).unwrap();
        assert_eq!(installed, 18);
        assert!(registry.contains("quill.navigation"));
        assert!(registry.contains("quill.recyclebin"));

        // Second activation changes nothing.
        assert_eq!(install_all_defaults(&mut registry).unwrap(), 0);
    }

    #[test]
    fn test_descriptors_match_record_fields() {
        fn check<S: SettingsSchema>() {
            let value = serde_json::to_value(S::default()).unwrap();
            let record = value.as_object().unwrap();
            for field in S::fields() {
                assert!(
                    record.contains_key(field.name),
                    "{} has no field named {}",
                    S::RECORD,
                    field.name
                );
            }
        }
        check::<EditingSettings>();
        check::<TinyMceSettings>();
        check::<FilterSettings>();
        check::<NavigationSettings>();
        check::<SearchSettings>();
        check::<SecuritySettings>();
        check::<SiteSettings>();
        check::<MailSettings>();
        check::<MarkupSettings>();
        check::<ImagingSettings>();
        check::<SocialMediaSettings>();
        check::<TypesSettings>();
        check::<UserGroupsSettings>();
        check::<LoginSettings>();
        check::<LinkSettings>();
        check::<MaintenanceSettings>();
        check::<DateTimeSettings>();
        check::<RecycleBinSettings>();
    }

    #[test]
    fn test_record_names_are_prefixed() {
        let mut registry = SettingsRegistry::new();
        install_all_defaults(&mut registry).unwrap();
        assert!(registry.record_names().all(|name| name.starts_with("quill.")));
    }
}
