//! Site and build configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    assets::AssetBundle,
    error::{CoreError, Result},
};

/// Main configuration structure for Pagecraft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Global asset defaults appended to every page.
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Site-wide configuration, passed through to layouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL for the site (e.g., "https://example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Document language code.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Color scheme hint ("auto", "light", "dark").
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            lang: default_lang(),
            author: None,
            theme: default_theme(),
        }
    }
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Entries preserved when cleaning the output directory.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            exclude: default_exclude(),
        }
    }
}

/// Global asset declarations plus the favicon path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Script/style/font defaults.
    #[serde(flatten)]
    pub bundle: AssetBundle,

    /// Favicon path, passed through to layouts.
    #[serde(default)]
    pub favicon: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            CoreError::config_with_source(format!("failed to read {}", path.display()), err)
        })?;
        let config: Self = toml::from_str(&raw).map_err(|err| {
            CoreError::config_with_source(format!("failed to parse {}", path.display()), err)
        })?;
        Ok(config)
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_theme() -> String {
    "auto".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_exclude() -> Vec<String> {
    ["css", "js", "assets", "robots.txt"]
        .map(String::from)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.site.base_url, "http://localhost:3000");
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.site.theme, "auto");
        assert_eq!(config.build.output_dir, "dist");
        assert!(config.build.exclude.contains(&"assets".to_string()));
        assert!(config.assets.bundle.is_empty());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[site]
base_url = "https://example.com"
author = "Jo"

[build]
output_dir = "public"
exclude = ["data"]

[assets]
scripts = ["global.js"]
styles = [{{ href = "main.css", preload = true }}]
favicon = "favicon.ico"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.site.author.as_deref(), Some("Jo"));
        assert_eq!(config.build.output_dir, "public");
        assert_eq!(config.build.exclude, vec!["data".to_string()]);
        assert_eq!(config.assets.bundle.scripts.len(), 1);
        assert!(config.assets.bundle.styles[0].preload());
        assert_eq!(config.assets.favicon.as_deref(), Some("favicon.ico"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/pagecraft.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read /nonexistent/pagecraft.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[site\nbase_url = 3").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
