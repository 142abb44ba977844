//! Pagecraft Generator Library
//!
//! Build-time half of the route engine: walks a validated route tree,
//! resolves dynamic segments against their providers, and emits one document
//! per concrete page plus a sitemap.
//!
//! # Modules
//!
//! - [`expand`] - Recursive static expansion and build orchestration
//! - [`assets`] - Per-page asset resolution and ordering
//! - [`output`] - Path-derived file writing and output-directory cleaning
//! - [`sitemap`] - XML sitemap generation

pub mod assets;
pub mod expand;
pub mod output;
pub mod sitemap;

pub use assets::resolve;
pub use expand::{BuildError, BuildStats, Expander};
pub use output::OutputWriter;
pub use sitemap::SitemapGenerator;
