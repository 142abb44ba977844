//! Sitemap generation.
//!
//! One `<url>` entry per emitted page; the reserved not-found document never
//! appears here. Priority and change frequency are heuristically derived from
//! path depth.

use chrono::{DateTime, Utc};

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone)]
pub struct SitemapUrl {
    /// Absolute URL.
    pub loc: String,

    /// Last modification date.
    pub lastmod: DateTime<Utc>,

    /// Change frequency.
    pub changefreq: ChangeFreq,

    /// Priority (0.0 to 1.0).
    pub priority: f32,
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    base_url: String,
    lastmod: DateTime<Utc>,
}

impl SitemapGenerator {
    /// Create a generator. `lastmod` is the build timestamp; injecting it
    /// keeps repeated runs byte-identical.
    #[must_use]
    pub fn new(base_url: impl Into<String>, lastmod: DateTime<Utc>) -> Self {
        Self {
            base_url: base_url.into(),
            lastmod,
        }
    }

    /// Generate sitemap XML from emitted page paths.
    #[must_use]
    pub fn generate(&self, paths: &[String]) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for path in paths {
            xml.push_str(&self.url_to_xml(&self.entry(path)));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Derive a sitemap entry from a route path.
    fn entry(&self, path: &str) -> SitemapUrl {
        let depth = path.trim_matches('/').split('/').filter(|s| !s.is_empty()).count();

        let (changefreq, priority) = match depth {
            0 => (ChangeFreq::Daily, 1.0),
            1 => (ChangeFreq::Weekly, 0.8),
            2 => (ChangeFreq::Monthly, 0.6),
            _ => (ChangeFreq::Yearly, 0.5),
        };

        SitemapUrl {
            loc: format!("{}{}", self.base_url.trim_end_matches('/'), path),
            lastmod: self.lastmod,
            changefreq,
            priority,
        }
    }

    fn url_to_xml(&self, url: &SitemapUrl) -> String {
        let mut xml = String::from("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            url.lastmod.format("%Y-%m-%d")
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            url.changefreq.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));
        xml.push_str("  </url>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
