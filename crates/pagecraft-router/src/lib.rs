//! Pagecraft Router Library
//!
//! Runtime half of the route engine: pure segment matching plus a stateful
//! navigator with an explicit lifecycle.
//!
//! # Modules
//!
//! - [`matcher`] - Pure resolution of parsed segments against a route tree
//! - [`navigator`] - Current-route state, listeners, and scroll cache

pub mod matcher;
pub mod navigator;

pub use matcher::{match_segments, MatchResult};
pub use navigator::{Host, Navigator, RouteInfo};
