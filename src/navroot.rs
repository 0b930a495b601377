//! Navigation root and top-site resolution.
//!
//! The navigation root is the ancestor navigation trees and relative
//! URLs are built against. It is found either through an explicitly
//! configured portal-relative path or by walking up the content tree
//! to the nearest [`Marker::NavigationRoot`].
//!
//! [`top_site_from_url`] is the browser-facing variant: it resolves
//! prefixes of the virtual-hosting URL path to find the rootmost
//! *visible* site, which may differ from the server-side navigation
//! root when virtual hosting points into a subsite. Never use it for
//! server-side code.

use crate::content::{ContentId, ContentTree, Marker};
use crate::settings::navigation::NavigationSettings;
use crate::settings::registry::SettingsRegistry;
use crate::settings::SettingsSchema;

/// A web request, reduced to what resolution needs: the
/// virtual-hosting root and the sub-request chain.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Physical path of the virtual-hosting root; empty when no
    /// virtual hosting applies.
    pub virtual_root: String,
    parent: Option<Box<Request>>,
}

impl Request {
    pub fn new(virtual_root: impl Into<String>) -> Self {
        Self {
            virtual_root: virtual_root.into(),
            parent: None,
        }
    }

    /// A sub-request spawned from this request.
    pub fn subrequest(self) -> Self {
        Self {
            virtual_root: self.virtual_root.clone(),
            parent: Some(Box::new(self)),
        }
    }

    /// Map a URL path to a physical path by applying the
    /// virtual-hosting root. The outer right `/` is not part of the
    /// path.
    pub fn physical_path_from_url(&self, url_path: &str) -> String {
        format!("{}{}", self.virtual_root, url_path.trim_end_matches('/'))
    }

    /// URL path of an object under this request's virtual hosting.
    pub fn url_path(&self, tree: &ContentTree, context: ContentId) -> String {
        let physical = tree.physical_path(context);
        match physical.strip_prefix(self.virtual_root.as_str()) {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => "/".to_string(),
        }
    }
}

/// Get highest request from a sub-request chain.
pub fn top_request(request: &Request) -> &Request {
    match &request.parent {
        Some(parent) => top_request(parent),
        None => request,
    }
}

/// Walk up from `context` to the nearest ancestor marked as a
/// navigation root, stopping at the portal. Returns the starting
/// object when the top of the tree is reached without a match, and
/// `None` for a `None` context.
pub fn navigation_root_object(
    tree: &ContentTree,
    context: Option<ContentId>,
    portal: ContentId,
) -> Option<ContentId> {
    let mut obj = context?;
    while !tree.node(obj).is_marked(Marker::NavigationRoot) && obj != portal {
        match tree.parent(obj) {
            Some(parent) => obj = parent,
            None => return Some(obj),
        }
    }
    Some(obj)
}

/// Get the path to the root of the navigation tree.
///
/// An explicit `relative_root` wins; otherwise the configured
/// `quill.navigation` root applies (both are portal-relative). With
/// neither set to a meaningful value, the root is computed by walking
/// up from `context`.
pub fn navigation_root_path(
    tree: &ContentTree,
    context: ContentId,
    relative_root: Option<&str>,
    registry: &SettingsRegistry,
    portal: ContentId,
) -> String {
    let configured = match relative_root {
        Some(root) => Some(root.to_string()),
        None => registry
            .get(NavigationSettings::RECORD, "root")
            .and_then(|value| value.as_str())
            .map(str::to_string),
    };

    if let Some(root) = configured {
        if !root.is_empty() && root != "/" {
            let root = if root.starts_with('/') {
                root
            } else {
                format!("/{root}")
            };
            return format!("{}{root}", tree.physical_path(portal));
        }
    }

    let root = navigation_root_object(tree, Some(context), portal).unwrap_or(portal);
    tree.physical_path(root)
}

/// Find the first site object visible in the pre-virtual-hosting URL
/// path, falling back to the topmost object the URL can reach at all.
///
/// Use this to build URLs for browser code (JavaScript, XML HTTP
/// requests) after virtual hosting has been applied: with a virtual
/// host rooted at a subsite the subsite is returned instead of the
/// site root, and with the host rooted at a *child* of a subsite that
/// child is returned, since the callees need an object with a visible
/// URL. On resolution failure the fallback (normally the current
/// site) is returned.
pub fn top_site_from_url(
    tree: &ContentTree,
    context: ContentId,
    request: &Request,
    fallback: ContentId,
) -> ContentId {
    let url_path = request.url_path(tree, context);
    let segments: Vec<&str> = url_path.split('/').collect();

    // Sites seen while resolving URL prefixes, and the topmost
    // reachable objects as fallback when no site is visible at all.
    let mut subsites: Vec<ContentId> = Vec::new();
    let mut topmosts: Vec<ContentId> = Vec::new();

    for idx in 0..segments.len() {
        let prefix = segments[..=idx].join("/");
        let prefix = if prefix.is_empty() { "/".to_string() } else { prefix };
        let physical = request.physical_path_from_url(&prefix);
        let physical = if physical.is_empty() { "/".to_string() } else { physical };
        let Some(obj) = tree.traverse(&physical) else {
            // This prefix is not findable, so it cannot stand in for
            // a site.
            continue;
        };
        if tree.node(obj).is_marked(Marker::Site) {
            subsites.push(obj);
        } else {
            topmosts.push(obj);
        }
    }

    subsites
        .first()
        .or_else(|| topmosts.first())
        .copied()
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentNode;

    /// /approot/mainsite/folder/SubSite/en/archives, with mainsite
    /// and SubSite marked as sites.
    struct Fixture {
        tree: ContentTree,
        portal: ContentId,
        folder: ContentId,
        subsite: ContentId,
        en: ContentId,
        archives: ContentId,
    }

    impl Fixture {
        fn new() -> Self {
            let (mut tree, root) = ContentTree::new(ContentNode::new("approot", "Application"));
            let portal = tree.add_child(
                root,
                ContentNode::new("mainsite", "Site").marked(Marker::SiteRoot),
            );
            let folder = tree.add_child(portal, ContentNode::new("folder", "Folder"));
            let subsite = tree.add_child(
                folder,
                ContentNode::new("SubSite", "Site")
                    .marked(Marker::Site)
                    .marked(Marker::NavigationRoot),
            );
            let en = tree.add_child(subsite, ContentNode::new("en", "Folder"));
            let archives = tree.add_child(en, ContentNode::new("archives", "Folder"));
            Self {
                tree,
                portal,
                folder,
                subsite,
                en,
                archives,
            }
        }
    }

    #[test]
    fn test_navigation_root_object() {
        let f = Fixture::new();
        // Inside the subsite the subsite wins.
        assert_eq!(
            navigation_root_object(&f.tree, Some(f.archives), f.portal),
            Some(f.subsite)
        );
        // Outside it the walk stops at the portal.
        assert_eq!(
            navigation_root_object(&f.tree, Some(f.folder), f.portal),
            Some(f.portal)
        );
        // Without a context there is no navigation root either.
        assert_eq!(navigation_root_object(&f.tree, None, f.portal), None);
    }

    #[test]
    fn test_navigation_root_path_from_markers() {
        let f = Fixture::new();
        let registry = SettingsRegistry::new();
        assert_eq!(
            navigation_root_path(&f.tree, f.archives, None, &registry, f.portal),
            "/approot/mainsite/folder/SubSite"
        );
        assert_eq!(
            navigation_root_path(&f.tree, f.folder, None, &registry, f.portal),
            "/approot/mainsite"
        );
    }

    #[test]
    fn test_navigation_root_path_configured() {
        let f = Fixture::new();
        let mut registry = SettingsRegistry::new();
        registry
            .set(NavigationSettings::RECORD, "root", "/folder".into())
            .unwrap();
        assert_eq!(
            navigation_root_path(&f.tree, f.archives, None, &registry, f.portal),
            "/approot/mainsite/folder"
        );

        // An explicit argument wins over the registry, and a missing
        // slash is tolerated.
        assert_eq!(
            navigation_root_path(&f.tree, f.archives, Some("folder/SubSite"), &registry, f.portal),
            "/approot/mainsite/folder/SubSite"
        );

        // "/" means no configured root.
        assert_eq!(
            navigation_root_path(&f.tree, f.folder, Some("/"), &registry, f.portal),
            "/approot/mainsite"
        );
    }

    #[test]
    fn test_top_site_no_virtual_hosting() {
        let f = Fixture::new();
        let request = Request::default();
        for context in [f.portal, f.folder, f.archives] {
            assert_eq!(
                top_site_from_url(&f.tree, context, &request, f.portal),
                f.portal
            );
        }
    }

    #[test]
    fn test_top_site_virtual_root_at_subsite() {
        let f = Fixture::new();
        let request = Request::new("/approot/mainsite/folder/SubSite");
        assert_eq!(
            top_site_from_url(&f.tree, f.subsite, &request, f.portal),
            f.subsite
        );
        assert_eq!(
            top_site_from_url(&f.tree, f.archives, &request, f.portal),
            f.subsite
        );
    }

    #[test]
    fn test_top_site_virtual_root_below_subsite() {
        // Virtual host points at a child of the subsite: no site is
        // visible, the topmost visible container stands in.
        let f = Fixture::new();
        let request = Request::new("/approot/mainsite/folder/SubSite/en");
        assert_eq!(
            top_site_from_url(&f.tree, f.archives, &request, f.portal),
            f.en
        );
    }

    #[test]
    fn test_top_site_falls_back_on_unresolvable_path() {
        let f = Fixture::new();
        // A virtual root pointing nowhere resolves nothing.
        let request = Request::new("/elsewhere/entirely");
        assert_eq!(
            top_site_from_url(&f.tree, f.archives, &request, f.portal),
            f.portal
        );
    }

    #[test]
    fn test_top_request() {
        let outer = Request::new("/approot/mainsite");
        let inner = outer.subrequest().subrequest();
        assert!(top_request(&inner).parent.is_none());
        assert_eq!(top_request(&inner).virtual_root, "/approot/mainsite");

        let lone = Request::default();
        assert!(std::ptr::eq(top_request(&lone), &lone));
    }
}
