//! Pure segment matching against a route tree.
//!
//! Resolution never fails: any path that the tree cannot account for lands on
//! the mandatory root wildcard. The caller renders the result and owns all
//! state changes.

use std::{collections::HashMap, sync::Arc};

use pagecraft_core::{
    render::Renderer,
    route::{RouteNode, RouteTree},
};

/// The outcome of resolving one location against the tree.
pub struct MatchResult<'t> {
    /// The node responsible for rendering.
    pub node: &'t RouteNode,

    /// Parameters bound while walking, keyed by parameter name. Values carry
    /// no leading slash.
    pub params: HashMap<String, String>,

    /// When an outlet-flagged dynamic child was crossed, its renderer; the
    /// render target stays the enclosing node. Best-effort feature, isolated
    /// here so its absence never affects plain resolution.
    pub outlet: Option<Arc<dyn Renderer>>,
}

/// Resolve parsed segments (leading slashes included) to a render target.
///
/// Precedence at each level: literal match first, then the single parameter
/// child. A dead end, or a final node without a component, falls back to the
/// root wildcard.
#[must_use]
pub fn match_segments<'t>(tree: &'t RouteTree, segments: &[String]) -> MatchResult<'t> {
    if segments.is_empty() {
        let node = tree.root().find_literal("/").unwrap_or_else(|| tree.wildcard());
        return MatchResult {
            node: if node.component().is_some() {
                node
            } else {
                tree.wildcard()
            },
            params: HashMap::new(),
            outlet: None,
        };
    }

    let mut current = tree.root();
    let mut params = HashMap::new();
    let mut outlet: Option<Arc<dyn Renderer>> = None;

    for segment in segments {
        if let Some(child) = current.find_literal(segment) {
            current = child;
        } else if let Some((name, child)) = current.param_child() {
            let value = segment.trim_start_matches('/');
            params.insert(name.to_string(), value.to_string());
            if child.is_outlet() {
                outlet = child.component().cloned();
            } else {
                current = child;
            }
        } else {
            return MatchResult {
                node: tree.wildcard(),
                params: HashMap::new(),
                outlet: None,
            };
        }
    }

    if current.component().is_none() {
        return MatchResult {
            node: tree.wildcard(),
            params,
            outlet,
        };
    }

    MatchResult {
        node: current,
        params,
        outlet,
    }
}
