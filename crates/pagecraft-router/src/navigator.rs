//! Stateful navigation with an explicit lifecycle.
//!
//! All runtime-mutable routing state (current route info, listeners, scroll
//! cache, previous URL) is owned by one [`Navigator`] instance instead of
//! module-level globals. The environment behind it (a browser-like host or a
//! headless one) is abstracted by [`Host`], so the tree and matcher behave
//! identically whether or not a browser exists.

use std::{collections::HashMap, sync::Arc};

use pagecraft_core::{
    path,
    render::{Meta, Props, RenderError, RenderResult},
    route::RouteTree,
};
use tracing::warn;

use crate::matcher::match_segments;

/// The environment the navigator renders into.
///
/// A browser-backed implementation swaps document content and reads the real
/// scroll offset; a headless one can accept the defaults.
pub trait Host {
    /// Replace the rendered content and apply page metadata (title, ...).
    fn apply(&mut self, html: &str, meta: &Meta);

    /// Current scroll offset of the viewport.
    fn scroll_position(&self) -> f64 {
        0.0
    }

    /// Scroll the viewport to the given offset.
    fn scroll_to(&mut self, _y: f64) {}
}

/// Information about the currently active route.
#[derive(Debug, Clone)]
pub struct RouteInfo {
    /// The full location as navigated to, hash included.
    pub path: String,

    /// The hash-free canonical form.
    pub canonical: String,

    /// Parsed path segments, leading slashes retained.
    pub segments: Vec<String>,

    /// Parameters bound by the match.
    pub params: HashMap<String, String>,

    /// Metadata of the matched route.
    pub meta: Meta,

    /// The base (first) segment, `"/"` at the root.
    pub base: String,
}

type Listener = Box<dyn Fn(&RouteInfo) + Send>;

/// Owns runtime routing state and drives renders through a [`Host`].
///
/// Navigations are not queued: a navigation triggered before a prior one
/// settles is last-write-wins. `&mut self` serializes calls within a thread.
pub struct Navigator<H: Host> {
    tree: Arc<RouteTree>,
    host: H,
    current: Option<RouteInfo>,
    previous_url: String,
    listeners: Vec<Listener>,
    scroll_positions: HashMap<String, f64>,
}

impl<H: Host> Navigator<H> {
    /// Create a navigator over a validated tree. Tree validation already
    /// guarantees the wildcard fallback exists.
    pub fn new(tree: Arc<RouteTree>, host: H) -> Self {
        Self {
            tree,
            host,
            current: None,
            previous_url: String::new(),
            listeners: Vec::new(),
            scroll_positions: HashMap::new(),
        }
    }

    /// Navigate to a location: resolve, render, update state, notify.
    ///
    /// A failing component render falls back to the wildcard with the error
    /// message passed under the `"error"` prop; only a wildcard that itself
    /// fails propagates an error.
    pub async fn navigate(&mut self, location: &str) -> RenderResult<()> {
        if self.current.is_some() && location == self.previous_url {
            return Ok(());
        }

        // Scroll positions are keyed by canonical path, so returning to a
        // page through a different hash still restores its offset.
        let leaving = self
            .current
            .as_ref()
            .map_or_else(String::new, |info| info.canonical.clone());
        self.scroll_positions
            .insert(leaving, self.host.scroll_position());

        let parsed = path::parse(location);
        let tree = Arc::clone(&self.tree);
        let result = match_segments(&tree, &parsed.segments);

        let mut props = Props::new();
        for (name, value) in &result.params {
            props.insert(name.clone(), value.clone().into());
        }

        let (html, meta) = match self.render_component(result.node, &props).await {
            Ok(html) => (html, result.node.meta().clone()),
            Err(err) => {
                warn!(path = %parsed.canonical, error = %err, "render failed, falling back to wildcard");
                let wildcard = tree.wildcard();
                let mut fallback_props = Props::new();
                fallback_props.insert("error".to_string(), err.to_string().into());
                let html = self.render_component(wildcard, &fallback_props).await?;
                (html, wildcard.meta().clone())
            }
        };

        self.host.apply(&html, &meta);

        let info = RouteInfo {
            path: location.to_string(),
            base: path::base(&parsed.segments).to_string(),
            canonical: parsed.canonical,
            segments: parsed.segments,
            params: result.params,
            meta,
        };
        for listener in &self.listeners {
            listener(&info);
        }
        let canonical = info.canonical.clone();
        self.current = Some(info);
        self.previous_url = location.to_string();

        let offset = self.scroll_positions.get(&canonical).copied().unwrap_or(0.0);
        self.host.scroll_to(offset);

        Ok(())
    }

    async fn render_component(
        &self,
        node: &pagecraft_core::route::RouteNode,
        props: &Props,
    ) -> RenderResult<String> {
        let component = node
            .component()
            .ok_or_else(|| RenderError::component("matched node has no component"))?;
        Ok(component.render(props).await?.finalize())
    }

    /// Information about the currently active route, if a navigation happened.
    #[must_use]
    pub fn info(&self) -> Option<&RouteInfo> {
        self.current.as_ref()
    }

    /// Pre-set the current route information without rendering. Used when an
    /// outer context (such as the static expander) establishes route state.
    pub fn set_info(&mut self, location: &str, params: HashMap<String, String>) {
        let parsed = path::parse(location);
        self.current = Some(RouteInfo {
            path: location.to_string(),
            base: path::base(&parsed.segments).to_string(),
            canonical: parsed.canonical,
            segments: parsed.segments,
            params,
            meta: Meta::new(),
        });
    }

    /// The URL navigated from, or `"/"` before any navigation.
    #[must_use]
    pub fn previous_url(&self) -> &str {
        if self.previous_url.is_empty() {
            "/"
        } else {
            &self.previous_url
        }
    }

    /// The base segment of the current path, `"/"` when unknown.
    #[must_use]
    pub fn base(&self) -> &str {
        self.current.as_ref().map_or("/", |info| info.base.as_str())
    }

    /// Register a listener invoked after every completed navigation.
    pub fn listen(&mut self, listener: impl Fn(&RouteInfo) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Borrow the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Tear down: drop listeners, caches, and current-route state.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        self.scroll_positions.clear();
        self.current = None;
        self.previous_url.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;
    use pagecraft_core::{
        render::{RenderResult, Renderable, Renderer},
        route::RouteNode,
    };

    use super::*;

    #[derive(Default)]
    struct TestHost {
        html: String,
        title: Option<String>,
        scroll: f64,
        restored: Vec<f64>,
    }

    impl Host for TestHost {
        fn apply(&mut self, html: &str, meta: &Meta) {
            self.html = html.to_string();
            self.title = meta
                .get("title")
                .and_then(|v| v.as_str())
                .map(String::from);
        }

        fn scroll_position(&self) -> f64 {
            self.scroll
        }

        fn scroll_to(&mut self, y: f64) {
            self.restored.push(y);
        }
    }

    struct Page(&'static str);

    #[async_trait]
    impl Renderer for Page {
        async fn render(&self, props: &Props) -> RenderResult<Renderable> {
            let suffix = props
                .get("error")
                .and_then(|v| v.as_str())
                .map(|e| format!(" ({e})"))
                .unwrap_or_default();
            Ok(Renderable::html(format!("{}{suffix}", self.0)))
        }
    }

    struct Failing;

    #[async_trait]
    impl Renderer for Failing {
        async fn render(&self, _props: &Props) -> RenderResult<Renderable> {
            Err(pagecraft_core::render::RenderError::component("boom"))
        }
    }

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Renderer for Counting {
        async fn render(&self, _props: &Props) -> RenderResult<Renderable> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Renderable::html("counted"))
        }
    }

    fn tree() -> Arc<RouteTree> {
        Arc::new(
            RouteTree::new(
                RouteNode::new()
                    .child(
                        "/",
                        RouteNode::new()
                            .with_component(Page("home"))
                            .with_meta("title", "Home"),
                    )
                    .child("/broken", RouteNode::new().with_component(Failing))
                    .child(
                        "/users",
                        RouteNode::new()
                            .child("/:id", RouteNode::new().with_component(Page("user"))),
                    )
                    .child(
                        "*",
                        RouteNode::new()
                            .with_component(Page("404"))
                            .with_meta("title", "Not found"),
                    ),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_navigate_renders_and_updates_info() {
        let mut nav = Navigator::new(tree(), TestHost::default());
        nav.navigate("/#intro").await.unwrap();

        assert_eq!(nav.host().html, "home");
        assert_eq!(nav.host().title.as_deref(), Some("Home"));

        let info = nav.info().unwrap();
        assert_eq!(info.path, "/#intro");
        assert_eq!(info.canonical, "/");
        assert_eq!(info.base, "/");
        assert_eq!(nav.previous_url(), "/#intro");
    }

    #[tokio::test]
    async fn test_navigate_binds_params() {
        let mut nav = Navigator::new(tree(), TestHost::default());
        nav.navigate("/users/42").await.unwrap();

        assert_eq!(nav.host().html, "user");
        assert_eq!(nav.info().unwrap().params["id"], "42");
        assert_eq!(nav.base(), "/users");
    }

    #[tokio::test]
    async fn test_render_failure_falls_back_to_wildcard_with_error_prop() {
        let mut nav = Navigator::new(tree(), TestHost::default());
        nav.navigate("/broken").await.unwrap();

        assert_eq!(nav.host().html, "404 (component error: boom)");
        assert_eq!(nav.host().title.as_deref(), Some("Not found"));
    }

    #[tokio::test]
    async fn test_listener_notified() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut nav = Navigator::new(tree(), TestHost::default());
        let sink = Arc::clone(&seen);
        nav.listen(move |info| sink.lock().unwrap().push(info.canonical.clone()));

        nav.navigate("/").await.unwrap();
        nav.navigate("/users/7").await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["/", "/users/7"]);
    }

    #[tokio::test]
    async fn test_repeat_navigation_is_skipped() {
        let count = Arc::new(AtomicUsize::new(0));
        let tree = Arc::new(
            RouteTree::new(
                RouteNode::new()
                    .child(
                        "/",
                        RouteNode::new().with_component(Counting(Arc::clone(&count))),
                    )
                    .child("*", RouteNode::new().with_component(Page("404"))),
            )
            .unwrap(),
        );

        let mut nav = Navigator::new(tree, TestHost::default());
        nav.navigate("/").await.unwrap();
        nav.navigate("/").await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scroll_saved_and_restored() {
        let mut nav = Navigator::new(tree(), TestHost::default());
        nav.navigate("/").await.unwrap();

        // Leaving "/" at offset 120, then coming back, restores it.
        nav.host.scroll = 120.0;
        nav.navigate("/users/1").await.unwrap();
        nav.navigate("/").await.unwrap();

        assert_eq!(nav.host().restored.last().copied(), Some(120.0));
    }

    #[tokio::test]
    async fn test_set_info_without_render() {
        let mut nav = Navigator::new(tree(), TestHost::default());
        let mut params = HashMap::new();
        params.insert("id".to_string(), "9".to_string());
        nav.set_info("/users/9", params);

        let info = nav.info().unwrap();
        assert_eq!(info.segments, vec!["/users", "/9"]);
        assert_eq!(info.params["id"], "9");
        assert!(nav.host().html.is_empty());
    }

    #[tokio::test]
    async fn test_dispose_clears_state() {
        let mut nav = Navigator::new(tree(), TestHost::default());
        nav.listen(|_| {});
        nav.navigate("/").await.unwrap();
        nav.dispose();

        assert!(nav.info().is_none());
        assert_eq!(nav.previous_url(), "/");
    }
}
