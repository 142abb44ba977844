//! Pagecraft Core Library
//!
//! Core types, configuration, and error handling for the Pagecraft route
//! resolution and static expansion engine.
//!
//! # Modules
//!
//! - [`route`] - The declarative route tree and its construction-time validation
//! - [`path`] - Location parsing and path joining utilities
//! - [`render`] - Capability traits for components, providers, and layouts
//! - [`assets`] - Script/style/font declarations and their resolved form
//! - [`config`] - Site and build configuration

pub mod assets;
pub mod config;
pub mod error;
pub mod path;
pub mod render;
pub mod route;

pub use assets::{Asset, AssetBundle, AssetDecl, ResolvedAssets};
pub use config::Config;
pub use error::{CoreError, Result};
pub use path::Location;
pub use render::{
    Layout, LayoutContext, Meta, Props, Provider, ProviderError, Record, RenderError, Renderable,
    Renderer,
};
pub use route::{RouteNode, RouteTree, SegmentMatcher};
