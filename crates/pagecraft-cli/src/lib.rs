//! Pagecraft CLI Library
//!
//! Thin command layer over the route engine. Route trees are ordinary Rust
//! values, so the embedding application defines its site in code and hands it
//! to [`run`] together with the parsed [`Cli`]:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use clap::Parser;
//! use pagecraft_core::{
//!     render::{Layout, LayoutContext, Props, RenderResult, Renderable, Renderer},
//!     route::{RouteNode, RouteTree},
//!     Config,
//! };
//! use pagecraft_cli::{Cli, Site};
//!
//! struct Page(&'static str);
//!
//! #[async_trait]
//! impl Renderer for Page {
//!     async fn render(&self, _props: &Props) -> RenderResult<Renderable> {
//!         Ok(Renderable::html(format!("<h1>{}</h1>", self.0)))
//!     }
//! }
//!
//! struct Shell;
//!
//! #[async_trait]
//! impl Layout for Shell {
//!     async fn render(&self, content: &str, _ctx: &LayoutContext) -> RenderResult<String> {
//!         Ok(format!("<html><body>{content}</body></html>"))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     color_eyre::install()?;
//!     let cli = Cli::parse();
//!     pagecraft_cli::init_tracing(cli.verbose);
//!
//!     let tree = RouteTree::new(
//!         RouteNode::new()
//!             .child("/", RouteNode::new().with_component(Page("Welcome")))
//!             .child("*", RouteNode::new().with_component(Page("Not found"))),
//!     )?;
//!
//!     let site = Site {
//!         tree: Arc::new(tree),
//!         layout: Arc::new(Shell),
//!         config: Config::default(),
//!     };
//!
//!     pagecraft_cli::run(cli, site).await
//! }
//! ```

use std::sync::Arc;

use clap::Parser;
use pagecraft_core::{render::Layout, route::RouteTree, Config};

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use pagecraft_core::{route::RouteNode, CoreError};
pub use pagecraft_generator::{BuildStats, Expander};
pub use pagecraft_router::Navigator;

/// A complete site definition: validated routes, a layout, and configuration.
pub struct Site {
    /// The validated route tree.
    pub tree: Arc<RouteTree>,

    /// The layout combining rendered content into final documents.
    pub layout: Arc<dyn Layout>,

    /// Site and build configuration.
    pub config: Config,
}

/// Command-line interface for a Pagecraft site binary.
#[derive(Parser)]
#[command(name = "pagecraft", version, about = "Route-driven static site engine")]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the full static expansion
    Build {
        /// Output directory (overrides configuration)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Override the site base URL (e.g., https://example.com)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Serve the output directory statically
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Directory to serve (defaults to the configured output directory)
        #[arg(short, long)]
        dir: Option<std::path::PathBuf>,
    },
}

/// Dispatch a parsed command against a site definition.
pub async fn run(cli: Cli, site: Site) -> color_eyre::Result<()> {
    match cli.command {
        Commands::Build { output, base_url } => {
            cmd::build::run(&site, output.as_deref(), base_url.as_deref()).await?;
        }
        Commands::Serve { port, dir } => {
            let dir = dir.unwrap_or_else(|| site.config.build.output_dir.clone().into());
            cmd::serve::run(&dir, port).await?;
        }
    }
    Ok(())
}

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["site", "build", "--output", "public"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Build { output, base_url } => {
                assert_eq!(output, Some(std::path::PathBuf::from("public")));
                assert!(base_url.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_base_url() {
        let args = ["site", "build", "--base-url", "https://example.com"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build { base_url, .. } => {
                assert_eq!(base_url.as_deref(), Some("https://example.com"));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_serve_command_parsing() {
        let args = ["site", "serve", "--port", "8080", "--dir", "dist"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Serve { port, dir } => {
                assert_eq!(port, 8080);
                assert_eq!(dir, Some(std::path::PathBuf::from("dist")));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_serve_default_port() {
        let args = ["site", "serve"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Serve { port, dir } => {
                assert_eq!(port, 3000);
                assert!(dir.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["site", "-vvv", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }
}
