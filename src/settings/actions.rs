//! Portal action schemas.
//!
//! Unlike the other groups, actions are not a single site-wide record:
//! each action is its own entry under a category in the action
//! registry. [`Action`] is the edit-form schema for an existing action,
//! [`NewAction`] the creation form whose invariant checks the
//! (category, id) pair against the registry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ConstraintError;
use crate::settings::schema::{
    validate_expression, validate_json, FieldDescriptor, FieldKind, ValidationResult,
};

/// Action categories known to the default installation.
pub const ACTION_CATEGORIES: &[&str] = &[
    "site_actions",
    "object",
    "object_buttons",
    "portal_tabs",
    "user",
    "document_actions",
];

/// One portal action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    /// Category the action is filed under.
    pub category: String,

    pub title: String,

    pub description: String,

    /// Translation domain for title and description.
    pub i18n_domain: String,

    /// Expression producing the called URL, e.g.
    /// `string:${globals_view/navigationRootUrl}/page`.
    pub url_expr: String,

    /// Boolean expression guarding availability.
    pub available_expr: String,

    /// Permissions required to see the action.
    pub permissions: Vec<String>,

    pub visible: bool,

    /// Position within the category, starting at 1.
    pub position: u32,

    /// Modal dialog settings as JSON.
    pub modal: String,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            category: "site_actions".to_string(),
            title: String::new(),
            description: String::new(),
            i18n_domain: "quill".to_string(),
            url_expr: String::new(),
            available_expr: String::new(),
            permissions: vec!["View".to_string()],
            visible: true,
            position: 1,
            modal: String::new(),
        }
    }
}

const ACTION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("category", "Category", FieldKind::Choice)
        .vocabulary(ACTION_CATEGORIES)
        .required(),
    FieldDescriptor::new("title", "Title", FieldKind::TextLine).required(),
    FieldDescriptor::new("description", "Description", FieldKind::Text),
    FieldDescriptor::new("i18n_domain", "I18n domain", FieldKind::TextLine),
    FieldDescriptor::new("url_expr", "Action URL", FieldKind::TextLine)
        .describe(
            "An expression producing the called URL. Example: \
             string:${globals_view/navigationRootUrl}/page",
        )
        .required(),
    FieldDescriptor::new("available_expr", "Condition", FieldKind::TextLine)
        .describe("A boolean expression"),
    FieldDescriptor::new("permissions", "Permissions", FieldKind::List).required(),
    FieldDescriptor::new("visible", "Visible?", FieldKind::Bool),
    FieldDescriptor::new("position", "Position", FieldKind::Int).required(),
    FieldDescriptor::new("modal", "Settings for the modal dialog", FieldKind::Json),
];

impl Action {
    /// Field metadata for the action edit form.
    pub fn fields() -> &'static [FieldDescriptor] {
        ACTION_FIELDS
    }

    /// Check the whole action.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if self.title.trim().is_empty() {
            result.add_error("title: must not be empty");
        }
        result.check("url_expr", validate_expression(&self.url_expr));
        if !self.available_expr.trim().is_empty() {
            result.check("available_expr", validate_expression(&self.available_expr));
        }
        if self.permissions.is_empty() {
            result.add_error("permissions: at least one permission is required");
        }
        if self.position < 1 {
            result.add_error("position: must be 1 or greater");
        }
        result.check("modal", validate_json(&self.modal));
        result
    }
}

/// Creation form for a new action: only category and id, the rest is
/// edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAction {
    pub category: String,
    pub id: String,
}

impl NewAction {
    /// The invariant of the creation form: the id must be legal and
    /// must not collide with an existing action in the category.
    pub fn validate_against(&self, registry: &ActionRegistry) -> Result<(), ConstraintError> {
        if self.id.is_empty()
            || !self
                .id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(ConstraintError::InvalidActionId {
                action_id: self.id.clone(),
            });
        }
        if registry.contains(&self.category, &self.id) {
            return Err(ConstraintError::DuplicateActionId {
                action_id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Actions registered per category. The explicit collaborator standing
/// in for the host's action tool.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    categories: BTreeMap<String, BTreeMap<String, Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action under a category and id. Last write wins.
    pub fn register(&mut self, id: impl Into<String>, action: Action) {
        self.categories
            .entry(action.category.clone())
            .or_default()
            .insert(id.into(), action);
    }

    /// Remove an action; true when something was removed.
    pub fn unregister(&mut self, category: &str, id: &str) -> bool {
        self.categories
            .get_mut(category)
            .map(|actions| actions.remove(id).is_some())
            .unwrap_or(false)
    }

    pub fn contains(&self, category: &str, id: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|actions| actions.contains_key(id))
    }

    pub fn get(&self, category: &str, id: &str) -> Option<&Action> {
        self.categories.get(category)?.get(id)
    }

    /// Category names with at least one action.
    pub fn category_names(&self) -> BTreeSet<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Actions of a category ordered by position, then id.
    pub fn actions_in(&self, category: &str) -> Vec<(&str, &Action)> {
        let mut actions: Vec<(&str, &Action)> = self
            .categories
            .get(category)
            .map(|actions| {
                actions
                    .iter()
                    .map(|(id, action)| (id.as_str(), action))
                    .collect()
            })
            .unwrap_or_default();
        actions.sort_by_key(|(id, action)| (action.position, *id));
        actions
    }
}
