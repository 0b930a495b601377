//! The content tree and its markers.
//!
//! The host framework resolves containment through ambient acquisition;
//! here the tree is explicit: an arena of nodes with parent pointers
//! and ordered children, addressed by [`ContentId`]. Everything in this
//! crate that needs "the object graph" takes a `&ContentTree` plus ids,
//! so there is no process-wide state.

pub mod types;

pub use types::{TypeInfo, TypeRegistry};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::l10n::Translator;

/// Handle to a node in a [`ContentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(usize);

/// Role of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular content, addressable and publishable.
    Content,
    /// Infrastructure attached to the tree (a tool); its id shadows
    /// content ids.
    Tool,
}

/// Marker applied to a node, the explicit form of the framework's
/// marker interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Marker {
    /// Base for building navigation trees and relative URLs.
    NavigationRoot,
    /// A self-contained traversable root; sites may be nested.
    Site,
    /// The root of a whole Quill site. Implies both `Site` and
    /// `NavigationRoot`.
    SiteRoot,
}

/// One node of the content tree.
#[derive(Debug, Clone)]
pub struct ContentNode {
    pub id: String,
    pub title: String,
    /// Content type name; `None` for half-constructed placeholders.
    pub portal_type: Option<String>,
    pub kind: NodeKind,
    markers: BTreeSet<Marker>,
    /// Field/attribute names of the container that shadow child ids.
    pub attributes: BTreeSet<String>,
    /// Ids this container refuses beyond the global rules.
    pub restricted_ids: BTreeSet<String>,
    /// When the content expires, if ever.
    pub expires: Option<DateTime<Utc>>,
    parent: Option<ContentId>,
    children: Vec<ContentId>,
}

impl ContentNode {
    /// A content node with the id doubling as title placeholder.
    pub fn new(id: impl Into<String>, portal_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            portal_type: Some(portal_type.into()),
            kind: NodeKind::Content,
            markers: BTreeSet::new(),
            attributes: BTreeSet::new(),
            restricted_ids: BTreeSet::new(),
            expires: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn tool(mut self) -> Self {
        self.kind = NodeKind::Tool;
        self
    }

    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    /// Whether a marker applies, honoring `SiteRoot` implying the
    /// other two.
    pub fn is_marked(&self, marker: Marker) -> bool {
        if self.markers.contains(&marker) {
            return true;
        }
        matches!(marker, Marker::Site | Marker::NavigationRoot)
            && self.markers.contains(&Marker::SiteRoot)
    }
}

/// Arena-backed content tree.
#[derive(Debug, Clone)]
pub struct ContentTree {
    nodes: Vec<ContentNode>,
}

impl ContentTree {
    /// Create a tree from its root node; the root is usually the
    /// application object holding one or more sites.
    pub fn new(root: ContentNode) -> (Self, ContentId) {
        let tree = Self { nodes: vec![root] };
        (tree, ContentId(0))
    }

    /// The tree root.
    pub fn root(&self) -> ContentId {
        ContentId(0)
    }

    pub fn node(&self, id: ContentId) -> &ContentNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: ContentId) -> &mut ContentNode {
        &mut self.nodes[id.0]
    }

    /// Attach a node under a parent. The child id must be unique
    /// within the parent.
    pub fn add_child(&mut self, parent: ContentId, mut node: ContentNode) -> ContentId {
        debug_assert!(
            self.child_by_id(parent, &node.id).is_none(),
            "duplicate child id {:?}",
            node.id
        );
        node.parent = Some(parent);
        let id = ContentId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn parent(&self, id: ContentId) -> Option<ContentId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: ContentId) -> &[ContentId] {
        &self.nodes[id.0].children
    }

    /// Child with the given short name, regardless of kind.
    pub fn child_by_id(&self, parent: ContentId, name: &str) -> Option<ContentId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.node(child).id == name)
    }

    /// Short names of content children (tools excluded).
    pub fn content_ids(&self, parent: ContentId) -> Vec<&str> {
        self.children(parent)
            .iter()
            .filter(|&&child| self.node(child).kind == NodeKind::Content)
            .map(|&child| self.node(child).id.as_str())
            .collect()
    }

    /// Walk up from `start` (inclusive) to the root.
    pub fn ancestors(&self, start: ContentId) -> impl Iterator<Item = ContentId> + '_ {
        std::iter::successors(Some(start), move |&id| self.parent(id))
    }

    /// Absolute path of a node, `/`-separated, root segment included.
    pub fn physical_path(&self, id: ContentId) -> String {
        let mut segments: Vec<&str> = self
            .ancestors(id)
            .map(|node| self.node(node).id.as_str())
            .collect();
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// Resolve an absolute `/`-separated path against the tree root.
    /// The first segment must match the root id.
    pub fn traverse(&self, path: &str) -> Option<ContentId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let root = self.root();
        match segments.next() {
            Some(first) if first == self.node(root).id => {}
            Some(_) => return None,
            None => return Some(root),
        }
        let mut current = root;
        for segment in segments {
            current = self.child_by_id(current, segment)?;
        }
        Some(current)
    }

    /// Resolve a path relative to a node (`..` not supported).
    pub fn traverse_from(&self, base: ContentId, path: &str) -> Option<ContentId> {
        let mut current = base;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = self.child_by_id(current, segment)?;
        }
        Some(current)
    }
}

/// Placeholder shown for objects with an auto-generated or missing
/// title, a bracketed ellipsis by default.
pub fn empty_title(translator: &dyn Translator) -> String {
    translator.translate("title_unset", "[\u{b7}\u{b7}\u{b7}]")
}

/// Best human-readable label for an item: its title, else its id, else
/// the translated empty-title placeholder.
pub fn pretty_title_or_id(
    tree: &ContentTree,
    id: ContentId,
    translator: &dyn Translator,
) -> String {
    let node = tree.node(id);
    if !node.title.is_empty() {
        return node.title.clone();
    }
    if !node.id.is_empty() {
        return node.id.clone();
    }
    empty_title(translator)
}

/// Whether the content is expired at the given instant.
pub fn is_expired(node: &ContentNode, now: DateTime<Utc>) -> bool {
    match node.expires {
        Some(expires) => expires <= now,
        None => false,
    }
}
