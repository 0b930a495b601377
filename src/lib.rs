//! Quill Base Library
//!
//! This crate contains the shared building blocks of the Quill content
//! management system: site-wide settings schemas with their defaults
//! and validators, pagination for result listings, the explicit
//! content-tree model with navigation-root resolution, and small
//! coercion and formatting helpers used all over the stack.
//!
//! # Features
//!
//! - **Settings**: Declarative settings groups, a registry of named
//!   records, and field metadata for auto-generated control panels
//! - **Pagination**: Batches over full or lazily-counted sequences
//!   with navigation link helpers
//! - **Content**: An explicit content tree with markers, type
//!   information, and id validation
//! - **Utilities**: Safe coercion, human readable sizes, localized
//!   date formatting
//!
//! # Usage
//!
//! ```rust
//! use quill_base::batch::Batch;
//! use quill_base::settings::{NavigationSettings, SettingsRegistry};
//!
//! let results: Vec<u32> = (0..100).collect();
//! let batch = Batch::new(&results, 10, 40);
//! assert_eq!(batch.pagenumber(), 5);
//!
//! let mut registry = SettingsRegistry::new();
//! registry.install_defaults::<NavigationSettings>().unwrap();
//! let nav: NavigationSettings = registry.read().unwrap();
//! assert_eq!(nav.navigation_depth, 3);
//! ```

pub mod batch;
pub mod content;
pub mod error;
pub mod l10n;
pub mod logging;
pub mod navroot;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use batch::{Batch, BatchBuilder};
pub use content::{ContentId, ContentNode, ContentTree, Marker, NodeKind, TypeInfo, TypeRegistry};
pub use error::{BaseError, BaseResult, ConstraintError};
pub use l10n::{ulocalized_time, DefaultTranslator, TimeFlavor, Translator};
pub use navroot::{
    navigation_root_object, navigation_root_path, top_request, top_site_from_url, Request,
};
pub use settings::{SettingsRegistry, SettingsSchema, ValidationResult};
pub use utils::{
    check_id, crop_text, human_readable_size, normalize_id, safe_bytes, safe_int, safe_text,
    transaction_note, CatalogInfo, IdCheckContext, TextEncoding, TransactionJournal,
};

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the settings record layout written by this library
pub const RECORD_FORMAT_VERSION: &str = "1.0";
