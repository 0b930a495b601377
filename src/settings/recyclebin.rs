//! Recycle bin settings and the host-facing recycle bin contract.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::settings::registry::SettingsRegistry;
use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema, ValidationResult};

/// Recycle bin policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecycleBinSettings {
    /// Enable or disable the recycle bin feature.
    pub recycling_enabled: bool,

    /// Days to keep deleted items; 0 disables automatic purging.
    pub retention_period: u32,

    /// Maximum size of the recycle bin in MB. Oldest items are purged
    /// when the total size exceeds it.
    pub maximum_size: u32,

    /// Restore content to its initial workflow state instead of the
    /// state it was deleted in.
    pub restore_to_initial_state: bool,
}

impl Default for RecycleBinSettings {
    fn default() -> Self {
        Self {
            recycling_enabled: false,
            retention_period: 30,
            maximum_size: 100,
            restore_to_initial_state: false,
        }
    }
}

const RECYCLEBIN_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("recycling_enabled", "Enable the recycle bin", FieldKind::Bool),
    FieldDescriptor::new("retention_period", "Retention period", FieldKind::Int).describe(
        "Number of days to keep deleted items in the recycle bin. Set to '0' \
         to disable automatic purging.",
    ),
    FieldDescriptor::new("maximum_size", "Maximum size", FieldKind::Int).describe(
        "Maximum size of the recycle bin in MB. When the total size of items \
         in the recycle bin exceeds its maximum size, the oldest items will be \
         permanently purged.",
    ),
    FieldDescriptor::new(
        "restore_to_initial_state",
        "Restore to initial workflow state",
        FieldKind::Bool,
    ),
];

impl SettingsSchema for RecycleBinSettings {
    const RECORD: &'static str = "quill.recyclebin";

    fn fields() -> &'static [FieldDescriptor] {
        RECYCLEBIN_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if self.maximum_size < 10 {
            result.add_error(format!(
                "maximum_size: {} MB is below the minimum of 10 MB",
                self.maximum_size
            ));
        }
        result
    }
}

/// Identifier of an entry in the recycle bin.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecycleBinItemId(String);

impl RecycleBinItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecycleBinItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a deleted item as stored in the recycle bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedItem {
    /// Original short name of the item.
    pub item_id: String,

    pub title: String,

    /// Path of the item before deletion.
    pub original_path: String,

    /// Path of the container the item was deleted from.
    pub original_container: String,

    pub deleted_at: DateTime<Utc>,

    pub size_bytes: u64,
}

/// The recycle bin contract implemented by the host.
pub trait RecycleBin {
    /// Store a deleted item; returns its bin entry id.
    fn add_item(&mut self, item: DeletedItem) -> RecycleBinItemId;

    /// All entries, oldest first.
    fn items(&self) -> Vec<(&RecycleBinItemId, &DeletedItem)>;

    /// One entry by id.
    fn item(&self, id: &RecycleBinItemId) -> Option<&DeletedItem>;

    /// Take an entry out for restoration.
    fn restore_item(&mut self, id: &RecycleBinItemId) -> Option<DeletedItem>;

    /// Permanently delete an entry; true on success.
    fn purge_item(&mut self, id: &RecycleBinItemId) -> bool;

    /// Purge entries past the retention period and, oldest first,
    /// entries over the size limit. Returns the number purged.
    fn purge_expired(&mut self, settings: &RecycleBinSettings, now: DateTime<Utc>) -> usize;

    /// Whether recycling is turned on in the registry.
    fn is_enabled(&self, registry: &SettingsRegistry) -> bool {
        registry
            .read::<RecycleBinSettings>()
            .map(|settings| settings.recycling_enabled)
            .unwrap_or(false)
    }
}

/// In-memory recycle bin, also the reference for host implementations.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecycleBin {
    entries: BTreeMap<RecycleBinItemId, DeletedItem>,
}

impl MemoryRecycleBin {
    pub fn new() -> Self {
        Self::default()
    }

    fn total_size(&self) -> u64 {
        self.entries.values().map(|item| item.size_bytes).sum()
    }
}

impl RecycleBin for MemoryRecycleBin {
    fn add_item(&mut self, item: DeletedItem) -> RecycleBinItemId {
        let id = RecycleBinItemId::generate();
        info!(path = %item.original_path, bin_id = %id, "recycling item");
        self.entries.insert(id.clone(), item);
        id
    }

    fn items(&self) -> Vec<(&RecycleBinItemId, &DeletedItem)> {
        let mut items: Vec<_> = self.entries.iter().collect();
        items.sort_by_key(|(_, item)| item.deleted_at);
        items
    }

    fn item(&self, id: &RecycleBinItemId) -> Option<&DeletedItem> {
        self.entries.get(id)
    }

    fn restore_item(&mut self, id: &RecycleBinItemId) -> Option<DeletedItem> {
        self.entries.remove(id)
    }

    fn purge_item(&mut self, id: &RecycleBinItemId) -> bool {
        self.entries.remove(id).is_some()
    }

    fn purge_expired(&mut self, settings: &RecycleBinSettings, now: DateTime<Utc>) -> usize {
        let mut purged = 0;

        if settings.retention_period > 0 {
            let cutoff = now - chrono::Duration::days(i64::from(settings.retention_period));
            let expired: Vec<RecycleBinItemId> = self
                .entries
                .iter()
                .filter(|(_, item)| item.deleted_at < cutoff)
                .map(|(id, _)| id.clone())
                .collect();
            for id in expired {
                self.entries.remove(&id);
                purged += 1;
            }
        }

        let limit = u64::from(settings.maximum_size) * 1024 * 1024;
        while self.total_size() > limit {
            let oldest = self
                .items()
                .first()
                .map(|(id, _)| (*id).clone());
            match oldest {
                Some(id) => {
                    self.entries.remove(&id);
                    purged += 1;
                }
                None => break,
            }
        }

        purged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: &str, days_ago: i64, size_bytes: u64) -> DeletedItem {
        let deleted_at = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
            - chrono::Duration::days(days_ago);
        DeletedItem {
            item_id: id.to_string(),
            title: id.to_string(),
            original_path: format!("/site/news/{id}"),
            original_container: "/site/news".to_string(),
            deleted_at,
            size_bytes,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_settings_minimum_size() {
        let mut settings = RecycleBinSettings::default();
        assert!(settings.validate().is_valid);
        settings.maximum_size = 5;
        assert!(!settings.validate().is_valid);
    }

    #[test]
    fn test_add_restore_purge() {
        let mut bin = MemoryRecycleBin::new();
        let id = bin.add_item(item("a", 0, 10));
        assert!(bin.item(&id).is_some());

        let restored = bin.restore_item(&id).unwrap();
        assert_eq!(restored.item_id, "a");
        assert!(bin.item(&id).is_none());
        assert!(!bin.purge_item(&id));
    }

    #[test]
    fn test_purge_expired_by_retention() {
        let mut bin = MemoryRecycleBin::new();
        bin.add_item(item("old", 45, 10));
        let kept = bin.add_item(item("fresh", 3, 10));

        let settings = RecycleBinSettings::default();
        assert_eq!(bin.purge_expired(&settings, now()), 1);
        assert!(bin.item(&kept).is_some());
        assert_eq!(bin.items().len(), 1);
    }

    #[test]
    fn test_retention_zero_disables_purging() {
        let mut bin = MemoryRecycleBin::new();
        bin.add_item(item("ancient", 400, 10));

        let settings = RecycleBinSettings {
            retention_period: 0,
            ..RecycleBinSettings::default()
        };
        assert_eq!(bin.purge_expired(&settings, now()), 0);
    }

    #[test]
    fn test_size_limit_purges_oldest_first() {
        let mut bin = MemoryRecycleBin::new();
        let mb = 1024 * 1024;
        bin.add_item(item("oldest", 3, 6 * mb));
        let middle = bin.add_item(item("middle", 2, 5 * mb));
        let newest = bin.add_item(item("newest", 1, 4 * mb));

        let settings = RecycleBinSettings {
            maximum_size: 10,
            ..RecycleBinSettings::default()
        };
        assert_eq!(bin.purge_expired(&settings, now()), 1);
        assert!(bin.item(&middle).is_some());
        assert!(bin.item(&newest).is_some());
    }

    #[test]
    fn test_is_enabled_reads_registry() {
        let bin = MemoryRecycleBin::new();
        let mut registry = SettingsRegistry::new();
        assert!(!bin.is_enabled(&registry));

        let settings = RecycleBinSettings {
            recycling_enabled: true,
            ..RecycleBinSettings::default()
        };
        registry.write(&settings).unwrap();
        assert!(bin.is_enabled(&registry));
    }
}
