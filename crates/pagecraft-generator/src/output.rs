//! Path-derived file output.
//!
//! Maps route paths onto the `<out>/<path>/index.html` layout, emits per-page
//! script artifacts, and cleans the output area before an expansion pass so
//! stale pages from removed or renamed dynamic items never linger.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Output errors.
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Reserved route path of the physical not-found document. Kept out of the
/// sitemap-eligible tree.
pub const NOT_FOUND_PATH: &str = "/404";

/// File name of a page's emitted client-script artifact.
pub const PAGE_SCRIPT_NAME: &str = "page.js";

/// Writes documents into a path-derived directory layout.
#[derive(Debug)]
pub struct OutputWriter {
    out_dir: PathBuf,
}

impl OutputWriter {
    /// Create a writer rooted at the given output directory.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// The output directory root.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Remove all prior generated content except the excluded entries, so a
    /// re-run with unchanged inputs produces a byte-identical file set.
    pub fn clean(&self, exclude: &[String]) -> Result<()> {
        if !self.out_dir.exists() {
            fs::create_dir_all(&self.out_dir)?;
            info!(dir = %self.out_dir.display(), "created output directory");
            return Ok(());
        }

        for entry in fs::read_dir(&self.out_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if exclude.iter().any(|kept| kept.as_str() == name) {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }

        info!(dir = %self.out_dir.display(), "cleaned output directory");
        Ok(())
    }

    /// The file a route path maps to: `<out>/<path>/index.html`, with the
    /// root mapping to `<out>/index.html`.
    #[must_use]
    pub fn page_path(&self, route_path: &str) -> PathBuf {
        let trimmed = route_path.trim_matches('/');
        if trimmed.is_empty() {
            self.out_dir.join("index.html")
        } else {
            self.out_dir.join(trimmed).join("index.html")
        }
    }

    /// Write one page document.
    pub fn write_page(&self, route_path: &str, html: &str) -> Result<PathBuf> {
        let path = self.page_path(route_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        debug!(path = %path.display(), "wrote page");
        Ok(path)
    }

    /// Write a page's opaque client-script artifact and return the absolute
    /// href it is served under.
    pub fn write_script(&self, route_path: &str, source: &str) -> Result<String> {
        let trimmed = route_path.trim_matches('/');
        let (path, href) = if trimmed.is_empty() {
            (
                self.out_dir.join(PAGE_SCRIPT_NAME),
                format!("/{PAGE_SCRIPT_NAME}"),
            )
        } else {
            (
                self.out_dir.join(trimmed).join(PAGE_SCRIPT_NAME),
                format!("/{trimmed}/{PAGE_SCRIPT_NAME}"),
            )
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, source)?;
        debug!(path = %path.display(), "wrote page script");
        Ok(href)
    }

    /// Write the sitemap document at the output root.
    pub fn write_sitemap(&self, xml: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join("sitemap.xml");
        fs::write(&path, xml)?;
        info!(path = %path.display(), "wrote sitemap");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_page_path_mapping() {
        let writer = OutputWriter::new("/out");
        assert_eq!(writer.page_path("/"), PathBuf::from("/out/index.html"));
        assert_eq!(
            writer.page_path("/blog/post-1"),
            PathBuf::from("/out/blog/post-1/index.html")
        );
        assert_eq!(
            writer.page_path(NOT_FOUND_PATH),
            PathBuf::from("/out/404/index.html")
        );
    }

    #[test]
    fn test_write_page_creates_directories() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path());

        let path = writer.write_page("/a/b", "<html></html>").unwrap();

        assert_eq!(path, dir.path().join("a/b/index.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_script_href() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path());

        let href = writer.write_script("/projects/alpha", "init();").unwrap();

        assert_eq!(href, "/projects/alpha/page.js");
        assert!(dir.path().join("projects/alpha/page.js").exists());

        let href = writer.write_script("/", "init();").unwrap();
        assert_eq!(href, "/page.js");
    }

    #[test]
    fn test_clean_preserves_excluded_entries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/logo.png"), "png").unwrap();
        fs::write(dir.path().join("robots.txt"), "ok").unwrap();
        fs::create_dir(dir.path().join("old-page")).unwrap();
        fs::write(dir.path().join("old-page/index.html"), "stale").unwrap();

        let writer = OutputWriter::new(dir.path());
        writer
            .clean(&["assets".to_string(), "robots.txt".to_string()])
            .unwrap();

        assert!(dir.path().join("assets/logo.png").exists());
        assert!(dir.path().join("robots.txt").exists());
        assert!(!dir.path().join("old-page").exists());
    }

    #[test]
    fn test_clean_creates_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");

        let writer = OutputWriter::new(&out);
        writer.clean(&[]).unwrap();

        assert!(out.is_dir());
    }
}
