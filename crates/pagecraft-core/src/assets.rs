//! Script, style, and font asset declarations.
//!
//! Route nodes and the site configuration declare assets either as bare
//! filenames or as `{ href, preload }` tables. Resolution into the uniform
//! [`Asset`] form (and the ordering rules) lives in the generator crate.

use serde::{Deserialize, Serialize};

/// A declared asset: either a bare path or an explicit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetDecl {
    /// Bare filename, e.g. `"main.css"`.
    Path(String),

    /// Explicit record with an optional preload hint.
    Full {
        href: String,
        #[serde(default)]
        preload: bool,
    },
}

impl AssetDecl {
    /// Create a declaration with the preload hint set.
    pub fn preloaded(href: impl Into<String>) -> Self {
        Self::Full {
            href: href.into(),
            preload: true,
        }
    }

    /// The asset location.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Path(href) => href,
            Self::Full { href, .. } => href,
        }
    }

    /// Whether the asset should be preloaded. Defaults to `false`.
    #[must_use]
    pub fn preload(&self) -> bool {
        match self {
            Self::Path(_) => false,
            Self::Full { preload, .. } => *preload,
        }
    }
}

impl From<&str> for AssetDecl {
    fn from(href: &str) -> Self {
        Self::Path(href.to_string())
    }
}

impl From<String> for AssetDecl {
    fn from(href: String) -> Self {
        Self::Path(href)
    }
}

/// Asset declarations grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBundle {
    /// Script declarations.
    #[serde(default)]
    pub scripts: Vec<AssetDecl>,

    /// Stylesheet declarations.
    #[serde(default)]
    pub styles: Vec<AssetDecl>,

    /// Font declarations.
    #[serde(default)]
    pub fonts: Vec<AssetDecl>,
}

impl AssetBundle {
    /// Whether the bundle declares nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.styles.is_empty() && self.fonts.is_empty()
    }
}

/// A normalized asset reference as emitted into a page `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Asset location.
    pub href: String,

    /// Preload hint.
    pub preload: bool,
}

impl From<&AssetDecl> for Asset {
    fn from(decl: &AssetDecl) -> Self {
        Self {
            href: decl.href().to_string(),
            preload: decl.preload(),
        }
    }
}

/// The ordered, normalized asset lists for one concrete page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedAssets {
    /// Scripts in emission order.
    pub scripts: Vec<Asset>,

    /// Stylesheets in emission order.
    pub styles: Vec<Asset>,

    /// Fonts in emission order.
    pub fonts: Vec<Asset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_path_defaults() {
        let decl = AssetDecl::from("main.css");
        assert_eq!(decl.href(), "main.css");
        assert!(!decl.preload());
    }

    #[test]
    fn test_preloaded() {
        let decl = AssetDecl::preloaded("font.woff2");
        assert_eq!(decl.href(), "font.woff2");
        assert!(decl.preload());
    }

    #[test]
    fn test_deserialize_mixed_forms() {
        let toml = r#"
            scripts = ["global.js", { href = "theme-toggle.js", preload = true }]
        "#;
        let bundle: AssetBundle = toml::from_str(toml).unwrap();
        assert_eq!(bundle.scripts.len(), 2);
        assert_eq!(bundle.scripts[0], AssetDecl::Path("global.js".to_string()));
        assert!(bundle.scripts[1].preload());
        assert!(bundle.styles.is_empty());
    }

    #[test]
    fn test_normalize_to_asset() {
        let asset = Asset::from(&AssetDecl::from("x.js"));
        assert_eq!(asset.href, "x.js");
        assert!(!asset.preload);
    }
}
