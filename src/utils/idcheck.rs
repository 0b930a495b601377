//! Id validation for new and renamed content.
//!
//! [`check_id`] answers one question: can this short name be used here?
//! It returns a descriptive message when the name is unusable and
//! `None` when it is fine; the caller decides how to surface the
//! rejection. The checks run in cheap-to-expensive order and stop at
//! the first problem.

use std::collections::BTreeSet;

use crate::content::{ContentId, ContentTree, NodeKind, TypeRegistry};

/// Names reserved by the application itself, never usable for content.
pub const RESERVED_IDS: &[&str] = &["login", "layout", "quill", "zip", "properties"];

/// Characters legal in a content id.
fn is_legal_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '~' | ',' | '.' | '$' | '(' | ')' | '#' | '@' | ' ')
}

/// What the catalog reserves: index and metadata column names clash
/// with ids in query results.
#[derive(Debug, Clone, Default)]
pub struct CatalogInfo {
    pub indexes: BTreeSet<String>,
    pub metadata: BTreeSet<String>,
}

impl CatalogInfo {
    fn reserves(&self, id: &str) -> bool {
        self.indexes.contains(id) || self.metadata.contains(id)
    }
}

/// The collaborators id validation needs, threaded explicitly.
#[derive(Debug, Clone, Copy)]
pub struct IdCheckContext<'a> {
    pub tree: &'a ContentTree,
    /// The site root; ids acquired from above it are off limits.
    pub portal: ContentId,
    pub types: &'a TypeRegistry,
    pub catalog: &'a CatalogInfo,
}

/// Test an id to make sure it is valid.
///
/// Returns an error message if the id is bad or `None` if the id is
/// good. `alternative_id` stands in when `id` is empty or
/// auto-generated (files and images supply their upload filename this
/// way, so error messages talk about the name that actually caused the
/// problem). With `contained_by` given, collisions are checked against
/// that container; otherwise against the context's parent, and only
/// when the id actually changes.
pub fn check_id(
    ctx: &IdCheckContext<'_>,
    context: ContentId,
    id: Option<&str>,
    required: bool,
    alternative_id: Option<&str>,
    contained_by: Option<ContentId>,
) -> Option<String> {
    let mut id = match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => alternative_id.unwrap_or("").to_string(),
    };

    if id.is_empty() {
        if required {
            return Some("Please enter a name.".to_string());
        }
        // No name given and none required: the object keeps its
        // current id, which still must not collide (ids handed out by
        // the factory may already exist in the target container).
        id = ctx.tree.node(context).id.clone();
    }

    if RESERVED_IDS.contains(&id.as_str()) {
        return Some(format!("{id} is reserved."));
    }

    let mut bad_chars: Vec<char> = Vec::new();
    for c in id.chars() {
        if !is_legal_id_char(c) && !bad_chars.contains(&c) {
            bad_chars.push(c);
        }
    }
    if !bad_chars.is_empty() {
        let bad_chars: String = bad_chars.into_iter().collect();
        return Some(format!(
            "{id} is not a legal name. The following characters are invalid: {bad_chars}"
        ));
    }

    if ctx.catalog.reserves(&id) {
        return Some(format!("{id} is reserved."));
    }

    // Decide whether to check for collisions: always when a container
    // was passed explicitly, otherwise only when the id changes.
    let container = match contained_by {
        Some(container) => container,
        None => {
            if ctx.tree.node(context).id == id {
                return None;
            }
            match ctx.tree.parent(context) {
                Some(parent) => parent,
                None => return None,
            }
        }
    };

    check_for_collision(ctx, container, &id)
}

fn check_for_collision(ctx: &IdCheckContext<'_>, container: ContentId, id: &str) -> Option<String> {
    let tree = ctx.tree;

    // An existing content object of that name.
    if let Some(existing) = tree.child_by_id(container, id) {
        if tree.node(existing).portal_type.is_some() {
            return Some(format!(
                "There is already an item named {id} in this folder."
            ));
        }
    }

    // Containers may have a field or attribute of the same name.
    if tree.node(container).attributes.contains(id) {
        return Some(format!("{id} is reserved."));
    }

    // Containers may restrict ids beyond the global rules.
    if tree.node(container).restricted_ids.contains(id) {
        return Some(format!("{id} is reserved."));
    }

    // Method aliases of the container's type shadow children.
    if let Some(info) = ctx.types.type_of(tree.node(container)) {
        if info.method_aliases.contains_key(id) {
            return Some(format!("{id} is reserved."));
        }
    }

    // Ids living on the portal or acquired from above it are off
    // limits, except for overridable content.
    if id == "index_html" {
        // Always allowed as a default page.
        return None;
    }
    let portal = ctx.portal;
    if tree.content_ids(portal).contains(&id) {
        // Fine to use the same id as a *content* item from the root.
        return None;
    }
    if tree
        .children(portal)
        .iter()
        .any(|&child| tree.node(child).id == id && tree.node(child).kind == NodeKind::Tool)
    {
        return Some(format!("{id} is reserved."));
    }
    // Anything resolvable above the portal would be shadowed.
    for ancestor in tree.ancestors(portal).skip(1) {
        if tree.child_by_id(ancestor, id).is_some()
            || tree.node(ancestor).attributes.contains(id)
        {
            return Some(format!("{id} is reserved."));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentNode, Marker, TypeInfo};

    struct Fixture {
        tree: ContentTree,
        portal: ContentId,
        folder: ContentId,
        document: ContentId,
        types: TypeRegistry,
        catalog: CatalogInfo,
    }

    impl Fixture {
        fn new() -> Self {
            let (mut tree, root) = ContentTree::new(ContentNode::new("app", "Application"));
            tree.node_mut(root).attributes.insert("acl_users".to_string());

            let portal = tree.add_child(
                root,
                ContentNode::new("site", "Site").marked(Marker::SiteRoot),
            );
            tree.add_child(portal, ContentNode::new("portal_skins", "Tool").tool());
            tree.add_child(portal, ContentNode::new("about-us", "Document"));

            let mut folder_node = ContentNode::new("news", "Folder");
            folder_node.restricted_ids.insert("syndication".to_string());
            let folder = tree.add_child(portal, folder_node);
            let document = tree.add_child(folder, ContentNode::new("launch", "News Item"));

            let mut types = TypeRegistry::new();
            types.register(
                "Folder",
                TypeInfo::new("Folder").with_alias("view", "@@listing"),
            );
            types.register("News Item", TypeInfo::new("News Item"));

            let mut catalog = CatalogInfo::default();
            catalog.indexes.insert("Subject".to_string());
            catalog.metadata.insert("review_state".to_string());

            Self {
                tree,
                portal,
                folder,
                document,
                types,
                catalog,
            }
        }

        fn ctx(&self) -> IdCheckContext<'_> {
            IdCheckContext {
                tree: &self.tree,
                portal: self.portal,
                types: &self.types,
                catalog: &self.catalog,
            }
        }
    }

    fn check(fixture: &Fixture, id: &str) -> Option<String> {
        check_id(
            &fixture.ctx(),
            fixture.document,
            Some(id),
            true,
            None,
            Some(fixture.folder),
        )
    }

    #[test]
    fn test_clean_id_is_accepted() {
        let fixture = Fixture::new();
        assert_eq!(check(&fixture, "spring-launch"), None);
    }

    #[test]
    fn test_reserved_names_always_rejected() {
        let fixture = Fixture::new();
        for name in RESERVED_IDS {
            let message = check(&fixture, name).unwrap();
            assert!(message.contains("reserved"), "{name}: {message}");
        }
    }

    #[test]
    fn test_required_empty_id() {
        let fixture = Fixture::new();
        let message = check_id(
            &fixture.ctx(),
            fixture.document,
            None,
            true,
            None,
            Some(fixture.folder),
        );
        assert_eq!(message.as_deref(), Some("Please enter a name."));
    }

    #[test]
    fn test_alternative_id_stands_in() {
        let fixture = Fixture::new();
        let message = check_id(
            &fixture.ctx(),
            fixture.document,
            None,
            true,
            Some("written\u{2013}draft.png"),
            Some(fixture.folder),
        );
        // The alternative id is what gets validated (and blamed).
        assert!(message
            .unwrap()
            .contains("written\u{2013}draft.png is not a legal name"));
    }

    #[test]
    fn test_bad_characters_are_listed_once() {
        let fixture = Fixture::new();
        let message = check(&fixture, "a/b/c?x?").unwrap();
        assert!(message.contains("not a legal name"));
        assert!(message.ends_with("/?"), "{message}");
    }

    #[test]
    fn test_catalog_names_rejected() {
        let fixture = Fixture::new();
        assert!(check(&fixture, "Subject").unwrap().contains("reserved"));
        assert!(check(&fixture, "review_state").unwrap().contains("reserved"));
    }

    #[test]
    fn test_sibling_collision() {
        let fixture = Fixture::new();
        let message = check(&fixture, "launch").unwrap();
        assert_eq!(message, "There is already an item named launch in this folder.");
    }

    #[test]
    fn test_container_attribute_and_hook() {
        let fixture = Fixture::new();
        // The container refuses "syndication" through its own hook.
        assert!(check(&fixture, "syndication").unwrap().contains("reserved"));
        // Method alias of the container's type.
        assert!(check(&fixture, "view").unwrap().contains("reserved"));
    }

    #[test]
    fn test_portal_rules() {
        let fixture = Fixture::new();
        // index_html is always allowed.
        assert_eq!(check(&fixture, "index_html"), None);
        // Shadowing root *content* is fine.
        assert_eq!(check(&fixture, "about-us"), None);
        // Tools on the portal are not.
        assert!(check(&fixture, "portal_skins").unwrap().contains("reserved"));
        // Names acquired from above the portal are not.
        assert!(check(&fixture, "acl_users").unwrap().contains("reserved"));
    }

    #[test]
    fn test_unchanged_id_skips_collision_checks() {
        let fixture = Fixture::new();
        // Renaming "launch" to itself with no explicit container: no
        // collision check, hence no complaint.
        let message = check_id(
            &fixture.ctx(),
            fixture.document,
            Some("launch"),
            false,
            None,
            None,
        );
        assert_eq!(message, None);
    }

    #[test]
    fn test_changed_id_checks_against_parent() {
        let mut fixture = Fixture::new();
        let second = fixture
            .tree
            .add_child(fixture.folder, ContentNode::new("archive", "Folder"));
        let message = check_id(&fixture.ctx(), second, Some("launch"), false, None, None);
        assert!(message.unwrap().contains("already an item named launch"));
    }
}
