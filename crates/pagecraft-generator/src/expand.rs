//! Static expansion and build orchestration.
//!
//! Walks the route tree depth-first in canonical declaration order, resolving
//! dynamic segments against their providers, and emits one document per
//! concrete page. The walk is strictly sequential: output writes share one
//! target directory, so there is no fan-out across sibling nodes or sibling
//! dynamic items. Failures below the structural level are isolated: a failing
//! provider skips its subtree, an invalid item skips that item, a failing
//! render or write skips that page, and the run continues.

use std::{future::Future, pin::Pin, sync::Arc, time::Instant};

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use pagecraft_core::{
    config::Config,
    path,
    render::{Layout, LayoutContext, Meta, Props, RenderError, ITEM_KEY},
    route::{RouteNode, RouteTree, SegmentMatcher},
};

use crate::{
    assets,
    output::{OutputError, OutputWriter, NOT_FOUND_PATH},
    sitemap::SitemapGenerator,
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Structural configuration error. Fatal, aborts the run.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output error.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// Component or layout render error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of pages emitted (not-found document included).
    pub pages: usize,

    /// Number of pages skipped after a render or write failure.
    pub skipped: usize,

    /// Number of warnings logged (skipped subtrees, invalid items).
    pub warnings: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Walk-local accumulation.
#[derive(Default)]
struct Walk {
    emitted: Vec<String>,
    pages: usize,
    skipped: usize,
    warnings: usize,
}

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Expands a route tree into the full set of concrete pages.
pub struct Expander {
    tree: Arc<RouteTree>,
    layout: Arc<dyn Layout>,
    config: Config,
    writer: OutputWriter,
    build_time: DateTime<Utc>,
}

impl Expander {
    /// Create an expander. The output directory comes from the configuration.
    #[must_use]
    pub fn new(tree: Arc<RouteTree>, layout: impl Layout + 'static, config: Config) -> Self {
        let writer = OutputWriter::new(&config.build.output_dir);
        Self {
            tree,
            layout: Arc::new(layout),
            config,
            writer,
            build_time: Utc::now(),
        }
    }

    /// Pin the build timestamp. Re-running with identical inputs and the same
    /// timestamp produces a byte-identical file set.
    #[must_use]
    pub fn with_build_time(mut self, build_time: DateTime<Utc>) -> Self {
        self.build_time = build_time;
        self
    }

    /// Execute the full expansion pass.
    pub async fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();

        info!(output = %self.writer.out_dir().display(), "starting static expansion");

        self.writer.clean(&self.config.build.exclude)?;

        let mut walk = Walk::default();
        self.walk(self.tree.root(), String::new(), Props::new(), &mut walk)
            .await?;

        self.emit_not_found(&mut walk).await;

        let sitemap = SitemapGenerator::new(self.config.site.base_url.clone(), self.build_time);
        self.writer.write_sitemap(&sitemap.generate(&walk.emitted))?;

        let stats = BuildStats {
            pages: walk.pages,
            skipped: walk.skipped,
            warnings: walk.warnings,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            pages = stats.pages,
            skipped = stats.skipped,
            warnings = stats.warnings,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Visit one node's children in declaration order.
    fn walk<'a>(
        &'a self,
        node: &'a RouteNode,
        parent_path: String,
        parent_props: Props,
        state: &'a mut Walk,
    ) -> WalkFuture<'a> {
        Box::pin(async move {
            for (matcher, child) in node.children() {
                match matcher {
                    SegmentMatcher::Literal(segment) => {
                        let current = path::join(&parent_path, segment);
                        if child.component().is_some()
                            && !self
                                .emit_page(child, &current, &parent_props, child.meta().clone(), state)
                                .await
                        {
                            // A failed page abandons its subtree, not the run.
                            continue;
                        }
                        // A grouping node may hold only children.
                        self.walk(child, current, parent_props.clone(), state).await?;
                    }
                    SegmentMatcher::Param(name) => {
                        self.expand_dynamic(name, child, &parent_path, &parent_props, state)
                            .await?;
                    }
                    // Reserved for the runtime fallback and the physical
                    // not-found document; it has no concrete path.
                    SegmentMatcher::Wildcard => {}
                }
            }
            Ok(())
        })
    }

    /// Expand one dynamic segment against its provider.
    async fn expand_dynamic(
        &self,
        name: &str,
        node: &RouteNode,
        parent_path: &str,
        parent_props: &Props,
        state: &mut Walk,
    ) -> Result<()> {
        let route = path::join(parent_path, &format!(":{name}"));

        let Some(provider) = node.provider() else {
            warn!(route = %route, "dynamic route has no provider, skipping subtree");
            state.warnings += 1;
            return Ok(());
        };

        if node.component().is_none() && !node.has_default_child() {
            warn!(route = %route, "dynamic route has a provider but nothing to render, skipping subtree");
            state.warnings += 1;
            return Ok(());
        }

        // Providers receive only the immediate parent's segment value, not
        // the full ancestor chain.
        let parent_value = parent_path.rsplit('/').find(|s| !s.is_empty());

        let records = match provider.fetch(parent_value).await {
            Ok(records) => records,
            Err(err) => {
                warn!(route = %route, error = %err, "provider failed, skipping subtree");
                state.warnings += 1;
                return Ok(());
            }
        };

        if records.is_empty() {
            warn!(route = %route, "provider returned no items, skipping subtree");
            state.warnings += 1;
            return Ok(());
        }

        for record in records {
            let Some(value) = segment_value(record.get(name)) else {
                warn!(route = %route, param = name, "item is missing the bound parameter, skipping item");
                state.warnings += 1;
                continue;
            };

            let current = path::join(parent_path, &value);

            // Record fields override node meta on key collision.
            let mut meta = node.meta().clone();
            for (key, val) in &record {
                meta.insert(key.clone(), val.clone());
            }

            let mut props = parent_props.clone();
            props.insert(name.to_string(), Value::String(value.clone()));
            props.insert(ITEM_KEY.to_string(), Value::Object(record));

            if node.component().is_some() && !self.emit_page(node, &current, &props, meta, state).await
            {
                continue;
            }
            self.walk(node, current, props, state).await?;
        }

        Ok(())
    }

    /// Emit one page, isolating render and write failures to that page.
    /// Returns whether the page was actually written.
    async fn emit_page(
        &self,
        node: &RouteNode,
        route_path: &str,
        props: &Props,
        meta: Meta,
        state: &mut Walk,
    ) -> bool {
        match self.render_page(node, route_path, props, meta).await {
            Ok(()) => {
                state.pages += 1;
                state.emitted.push(route_path.to_string());
                debug!(path = %route_path, "emitted page");
                true
            }
            Err(err) => {
                warn!(path = %route_path, error = %err, "skipping page");
                state.skipped += 1;
                false
            }
        }
    }

    async fn render_page(
        &self,
        node: &RouteNode,
        route_path: &str,
        props: &Props,
        meta: Meta,
    ) -> Result<()> {
        let component = node
            .component()
            .ok_or_else(|| BuildError::Config(format!("page {route_path} has no component")))?;

        let renderable = component.render(props).await?;

        let generated_script = match renderable.script() {
            Some(source) => Some(self.writer.write_script(route_path, source)?),
            None => None,
        };

        let resolved = assets::resolve(
            node.assets(),
            &self.config.assets.bundle,
            generated_script.as_deref(),
        );

        let ctx = LayoutContext {
            meta,
            assets: resolved,
            site: self.config.site.clone(),
            favicon: self.config.assets.favicon.clone(),
        };

        let html = self.layout.render(&renderable.finalize(), &ctx).await?;
        self.writer.write_page(route_path, &html)?;

        Ok(())
    }

    /// Emit the physical not-found document from the wildcard node.
    async fn emit_not_found(&self, state: &mut Walk) {
        let wildcard = self.tree.wildcard();
        match self
            .render_page(wildcard, NOT_FOUND_PATH, &Props::new(), wildcard.meta().clone())
            .await
        {
            Ok(()) => {
                state.pages += 1;
                debug!(path = NOT_FOUND_PATH, "emitted not-found document");
            }
            Err(err) => {
                warn!(path = NOT_FOUND_PATH, error = %err, "skipping not-found document");
                state.skipped += 1;
            }
        }
    }
}

/// Extract a usable path segment from a provider record field.
fn segment_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_value() {
        assert_eq!(
            segment_value(Some(&Value::String("alpha".to_string()))),
            Some("alpha".to_string())
        );
        assert_eq!(segment_value(Some(&Value::from(7))), Some("7".to_string()));
        assert_eq!(segment_value(Some(&Value::String(String::new()))), None);
        assert_eq!(segment_value(Some(&Value::Null)), None);
        assert_eq!(segment_value(None), None);
    }

    #[test]
    fn test_build_stats_default() {
        let stats = BuildStats::default();
        assert_eq!(stats.pages, 0);
        assert_eq!(stats.duration_ms, 0);
    }
}
