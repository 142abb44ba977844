//! Capability traits at the rendering seam.
//!
//! Components, dynamic-list providers, and layouts enter the engine as trait
//! objects rather than bare function values: the core depends only on these
//! shapes and never knows how content is actually produced.

use async_trait::async_trait;
use thiserror::Error;

use crate::{assets::ResolvedAssets, config::SiteConfig};

/// Opaque key/value metadata attached to routes and pages.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Accumulated properties handed to a component render.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// One item returned by a [`Provider`], keyed by field name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Key under which a page's full provider record lands in its props.
pub const ITEM_KEY: &str = "item";

/// Component or layout render failure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A component failed to produce content.
    #[error("component error: {0}")]
    Component(String),

    /// A layout failed to produce the final document.
    #[error("layout error: {0}")]
    Layout(String),
}

impl RenderError {
    /// Create a component render error.
    pub fn component(message: impl Into<String>) -> Self {
        Self::Component(message.into())
    }

    /// Create a layout render error.
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout(message.into())
    }
}

/// Dynamic provider failure. Caught per node; the subtree is skipped.
#[derive(Debug, Error)]
#[error("provider error: {0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result type for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Result type for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// The finalized output of a component render.
///
/// Carries the content markup plus, optionally, an opaque client script the
/// output writer emits next to the page as a separate artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    html: String,
    script: Option<String>,
}

impl Renderable {
    /// Wrap rendered markup.
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            script: None,
        }
    }

    /// Attach an opaque client script to be emitted alongside the page.
    #[must_use]
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// The attached client script, if any.
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Finalize into the content string.
    #[must_use]
    pub fn finalize(self) -> String {
        self.html
    }
}

/// Renders a page's props into content.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, props: &Props) -> RenderResult<Renderable>;
}

/// Supplies the concrete items for a dynamic segment at build time.
///
/// `parent` is the last segment value of the parent path, not the full
/// ancestor chain.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn fetch(&self, parent: Option<&str>) -> ProviderResult<Vec<Record>>;
}

/// Context handed to the layout for one concrete page.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    /// Merged route and per-item metadata.
    pub meta: Meta,

    /// Ordered, normalized asset lists for the page.
    pub assets: ResolvedAssets,

    /// Global site settings (base URL, language, author, theme).
    pub site: SiteConfig,

    /// Site favicon path, if configured.
    pub favicon: Option<String>,
}

/// Combines rendered content with a [`LayoutContext`] into a final document.
#[async_trait]
pub trait Layout: Send + Sync {
    async fn render(&self, content: &str, ctx: &LayoutContext) -> RenderResult<String>;
}

// Shared trait objects compose wherever an owned implementation is expected.

#[async_trait]
impl<T: Renderer + ?Sized> Renderer for std::sync::Arc<T> {
    async fn render(&self, props: &Props) -> RenderResult<Renderable> {
        (**self).render(props).await
    }
}

#[async_trait]
impl<T: Provider + ?Sized> Provider for std::sync::Arc<T> {
    async fn fetch(&self, parent: Option<&str>) -> ProviderResult<Vec<Record>> {
        (**self).fetch(parent).await
    }
}

#[async_trait]
impl<T: Layout + ?Sized> Layout for std::sync::Arc<T> {
    async fn render(&self, content: &str, ctx: &LayoutContext) -> RenderResult<String> {
        (**self).render(content, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{assets::ResolvedAssets, config::SiteConfig};

    struct StaticPage;

    #[async_trait]
    impl Renderer for StaticPage {
        async fn render(&self, _props: &Props) -> RenderResult<Renderable> {
            Ok(Renderable::html("<p>static</p>"))
        }
    }

    struct OneRecord;

    #[async_trait]
    impl Provider for OneRecord {
        async fn fetch(&self, parent: Option<&str>) -> ProviderResult<Vec<Record>> {
            let mut record = Record::new();
            record.insert("parent".to_string(), parent.unwrap_or_default().into());
            Ok(vec![record])
        }
    }

    struct Bare;

    #[async_trait]
    impl Layout for Bare {
        async fn render(&self, content: &str, _ctx: &LayoutContext) -> RenderResult<String> {
            Ok(content.to_string())
        }
    }

    #[test]
    fn test_renderable_without_script() {
        let renderable = Renderable::html("<h1>Hi</h1>");
        assert!(renderable.script().is_none());
        assert_eq!(renderable.finalize(), "<h1>Hi</h1>");
    }

    #[test]
    fn test_renderable_with_script() {
        let renderable = Renderable::html("<div></div>").with_script("console.log(1);");
        assert_eq!(renderable.script(), Some("console.log(1);"));
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::component("boom");
        assert!(err.to_string().contains("component error: boom"));
        let err = RenderError::layout("boom");
        assert!(err.to_string().contains("layout error"));
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::new("fetch failed");
        assert!(err.to_string().contains("provider error: fetch failed"));
    }

    // Shared trait objects must render through the blanket Arc impls.

    #[tokio::test]
    async fn test_arc_renderer_delegates() {
        let renderer: Arc<dyn Renderer> = Arc::new(StaticPage);
        let renderable = renderer.render(&Props::new()).await.unwrap();
        assert_eq!(renderable.finalize(), "<p>static</p>");
    }

    #[tokio::test]
    async fn test_arc_provider_delegates() {
        let provider: Arc<dyn Provider> = Arc::new(OneRecord);
        let records = provider.fetch(Some("projects")).await.unwrap();
        assert_eq!(records[0]["parent"], "projects");
    }

    #[tokio::test]
    async fn test_arc_layout_delegates() {
        let layout: Arc<dyn Layout> = Arc::new(Bare);
        let ctx = LayoutContext {
            meta: Meta::new(),
            assets: ResolvedAssets::default(),
            site: SiteConfig::default(),
            favicon: None,
        };
        let html = layout.render("<p>body</p>", &ctx).await.unwrap();
        assert_eq!(html, "<p>body</p>");
    }
}
