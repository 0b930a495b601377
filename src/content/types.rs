//! The content type registry.
//!
//! Explicit stand-in for the host's types tool: type information is
//! registered up front and queried by name. Method aliases matter for
//! id validation, since a child may not shadow an alias of its
//! container's type.

use std::collections::BTreeMap;

use crate::content::{ContentId, ContentNode, ContentTree};
use crate::error::{BaseError, BaseResult};

/// Information about one registered content type.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    pub title: String,

    /// Method aliases of the type, e.g. `view` or `(Default)`, mapped
    /// to their target. Children may not reuse these names.
    pub method_aliases: BTreeMap<String, String>,

    /// Whether instances may be added anywhere (`true`) or only where
    /// explicitly allowed.
    pub global_allow: bool,
}

impl TypeInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            method_aliases: BTreeMap::new(),
            global_allow: true,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.method_aliases.insert(alias.into(), target.into());
        self
    }
}

/// Registry of content types by name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeInfo>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, info: TypeInfo) {
        self.types.insert(name.into(), info);
    }

    pub fn get(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    /// Type info for a node, through its portal type.
    pub fn type_of<'a>(&'a self, node: &ContentNode) -> Option<&'a TypeInfo> {
        self.get(node.portal_type.as_deref()?)
    }

    /// Registered type names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Create an instance of a registered type inside a container,
    /// without permission checks. Callers wanting id validation run
    /// [`crate::utils::check_id`] first.
    pub fn construct_instance(
        &self,
        tree: &mut ContentTree,
        container: ContentId,
        type_name: &str,
        id: &str,
    ) -> BaseResult<ContentId> {
        if self.get(type_name).is_none() {
            return Err(BaseError::UnknownType {
                type_name: type_name.to_string(),
            });
        }
        if tree.child_by_id(container, id).is_some() {
            return Err(BaseError::Validation {
                message: format!("id {id} already in use"),
            });
        }
        Ok(tree.add_child(container, ContentNode::new(id, type_name)))
    }
}
