//! The declarative route tree.
//!
//! Routes form a finite, acyclic tree of tagged nodes. Segment keys are
//! explicit [`SegmentMatcher`] values rather than overloaded dictionary keys,
//! so "this key is a path" and "this key is data" can never collide. All
//! structural rules are enforced once, at [`RouteTree::new`]; both the runtime
//! matcher and the static expander consume an already-validated tree.

use std::{fmt, sync::Arc};

use crate::{
    assets::{AssetBundle, AssetDecl},
    error::{CoreError, Result},
    render::{Meta, Provider, Renderer},
};

/// How one path segment is matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentMatcher {
    /// Exact path segment, stored with its leading slash (`"/about"`, `"/"`).
    Literal(String),

    /// Matches any single segment and binds it under the given name.
    Param(String),

    /// Catch-all fallback. Only valid at the tree root.
    Wildcard,
}

impl SegmentMatcher {
    /// Parse a route key: `"*"` is the wildcard, `"/:name"` a parameter,
    /// anything else a literal. Total; structural validity is checked at
    /// tree construction.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        if key == "*" {
            Self::Wildcard
        } else if let Some(name) = key.strip_prefix("/:") {
            Self::Param(name.to_string())
        } else {
            Self::Literal(key.to_string())
        }
    }
}

impl fmt::Display for SegmentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(segment) => f.write_str(segment),
            Self::Param(name) => write!(f, "/:{name}"),
            Self::Wildcard => f.write_str("*"),
        }
    }
}

/// A node in the route tree.
///
/// Built fluently, then frozen inside a [`RouteTree`]:
///
/// ```
/// use pagecraft_core::route::RouteNode;
///
/// let node = RouteNode::new()
///     .with_meta("title", "Projects")
///     .child("/", RouteNode::new())
///     .child("/:id", RouteNode::new());
/// assert_eq!(node.children().count(), 2);
/// ```
#[derive(Default)]
pub struct RouteNode {
    component: Option<Arc<dyn Renderer>>,
    meta: Meta,
    assets: AssetBundle,
    provider: Option<Arc<dyn Provider>>,
    outlet: bool,
    children: Vec<(SegmentMatcher, RouteNode)>,
}

impl RouteNode {
    /// Create an empty grouping node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the component that renders this node.
    #[must_use]
    pub fn with_component(mut self, renderer: impl Renderer + 'static) -> Self {
        self.component = Some(Arc::new(renderer));
        self
    }

    /// Add one metadata entry (title, description, canonical override, ...).
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Declare a route-level script.
    #[must_use]
    pub fn with_script(mut self, decl: impl Into<AssetDecl>) -> Self {
        self.assets.scripts.push(decl.into());
        self
    }

    /// Declare a route-level stylesheet.
    #[must_use]
    pub fn with_style(mut self, decl: impl Into<AssetDecl>) -> Self {
        self.assets.styles.push(decl.into());
        self
    }

    /// Declare a route-level font.
    #[must_use]
    pub fn with_font(mut self, decl: impl Into<AssetDecl>) -> Self {
        self.assets.fonts.push(decl.into());
        self
    }

    /// Attach the async provider that supplies this dynamic segment's items.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Provider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Mark this node as an outlet rendered inside its parent's layout slot.
    #[must_use]
    pub fn with_outlet(mut self) -> Self {
        self.outlet = true;
        self
    }

    /// Append a child under the given route key, preserving declaration order.
    #[must_use]
    pub fn child(mut self, key: &str, node: RouteNode) -> Self {
        self.children.push((SegmentMatcher::parse(key), node));
        self
    }

    /// The render component, if any. Absence marks a pure grouping node.
    #[must_use]
    pub fn component(&self) -> Option<&Arc<dyn Renderer>> {
        self.component.as_ref()
    }

    /// Route metadata, opaque to the core.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Route-level asset declarations.
    #[must_use]
    pub fn assets(&self) -> &AssetBundle {
        &self.assets
    }

    /// The dynamic provider, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&Arc<dyn Provider>> {
        self.provider.as_ref()
    }

    /// Whether this node renders into its parent's slot.
    #[must_use]
    pub fn is_outlet(&self) -> bool {
        self.outlet
    }

    /// Children in declaration order.
    pub fn children(&self) -> impl Iterator<Item = (&SegmentMatcher, &RouteNode)> {
        self.children.iter().map(|(matcher, node)| (matcher, node))
    }

    /// Find the child literally matching `segment` (leading slash included).
    #[must_use]
    pub fn find_literal(&self, segment: &str) -> Option<&RouteNode> {
        self.children.iter().find_map(|(matcher, node)| match matcher {
            SegmentMatcher::Literal(key) if key == segment => Some(node),
            _ => None,
        })
    }

    /// The parameter child of this node, if one exists. Validation guarantees
    /// there is at most one per level.
    #[must_use]
    pub fn param_child(&self) -> Option<(&str, &RouteNode)> {
        self.children.iter().find_map(|(matcher, node)| match matcher {
            SegmentMatcher::Param(name) => Some((name.as_str(), node)),
            _ => None,
        })
    }

    /// Whether a `"/"` literal child with a component exists under this node.
    #[must_use]
    pub fn has_default_child(&self) -> bool {
        self.find_literal("/")
            .is_some_and(|node| node.component().is_some())
    }
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("component", &self.component.is_some())
            .field("provider", &self.provider.is_some())
            .field("outlet", &self.outlet)
            .field("meta", &self.meta)
            .field(
                "children",
                &self
                    .children
                    .iter()
                    .map(|(matcher, _)| matcher.to_string())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A validated route tree.
#[derive(Debug)]
pub struct RouteTree {
    root: RouteNode,
}

impl RouteTree {
    /// Validate and freeze a route tree.
    ///
    /// Rejected configurations:
    /// - no wildcard at the root, or a wildcard without a component
    /// - a wildcard anywhere below the root, or more than one at the root
    /// - more than one parameter sibling at one level
    /// - literal keys without a leading slash or spanning several segments
    /// - empty parameter names
    /// - a provider or outlet flag on a non-parameter node
    pub fn new(root: RouteNode) -> Result<Self> {
        let wildcards = root
            .children
            .iter()
            .filter(|(matcher, _)| *matcher == SegmentMatcher::Wildcard)
            .count();
        if wildcards == 0 {
            return Err(CoreError::tree(
                "missing mandatory wildcard route \"*\" at the tree root",
            ));
        }

        Self::validate_level(&root, true, "/")?;
        Ok(Self { root })
    }

    fn validate_level(node: &RouteNode, is_root: bool, at: &str) -> Result<()> {
        let mut params = 0usize;
        let mut wildcards = 0usize;

        for (matcher, child) in &node.children {
            match matcher {
                SegmentMatcher::Literal(key) => {
                    if !key.starts_with('/') {
                        return Err(CoreError::tree(format!(
                            "literal route key {key:?} under {at:?} must start with '/'"
                        )));
                    }
                    if key.len() > 1 && key[1..].contains('/') {
                        return Err(CoreError::tree(format!(
                            "literal route key {key:?} under {at:?} spans several segments; nest children instead"
                        )));
                    }
                    if child.provider.is_some() {
                        return Err(CoreError::tree(format!(
                            "literal route {key:?} under {at:?} carries a provider; providers belong on \"/:param\" routes"
                        )));
                    }
                    if child.outlet {
                        return Err(CoreError::tree(format!(
                            "literal route {key:?} under {at:?} is flagged as an outlet; outlets belong on \"/:param\" routes"
                        )));
                    }
                }
                SegmentMatcher::Param(name) => {
                    if name.is_empty() {
                        return Err(CoreError::tree(format!(
                            "dynamic route under {at:?} has an empty parameter name"
                        )));
                    }
                    params += 1;
                    if params > 1 {
                        return Err(CoreError::tree(format!(
                            "more than one dynamic route under {at:?}; parameter matching would be ambiguous"
                        )));
                    }
                }
                SegmentMatcher::Wildcard => {
                    if !is_root {
                        return Err(CoreError::tree(format!(
                            "wildcard route under {at:?}; the wildcard is only valid at the tree root"
                        )));
                    }
                    wildcards += 1;
                    if wildcards > 1 {
                        return Err(CoreError::tree("more than one wildcard route at the tree root"));
                    }
                    if child.component.is_none() {
                        return Err(CoreError::tree(
                            "the wildcard route has no component to render",
                        ));
                    }
                }
            }

            let key = matcher.to_string();
            let below = crate::path::join(at, key.trim_start_matches('/'));
            Self::validate_level(child, false, &below)?;
        }

        Ok(())
    }

    /// The tree root.
    #[must_use]
    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    /// The mandatory root wildcard node.
    #[must_use]
    pub fn wildcard(&self) -> &RouteNode {
        self.root
            .children
            .iter()
            .find_map(|(matcher, node)| {
                (*matcher == SegmentMatcher::Wildcard).then_some(node)
            })
            .expect("validated tree always has a root wildcard")
    }
}
