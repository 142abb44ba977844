//! Location parsing and path joining utilities.
//!
//! Pure functions over strings: no I/O, deterministic, total over any input.
//! Segments retain their leading slash delimiter, so `"/about"` is distinct
//! from a bare `"about"` token that never had one.

/// A parsed browser-style location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Ordered path segments, each keeping its leading slash (`["/blog", "/post-1"]`).
    pub segments: Vec<String>,

    /// The location with everything from the first `#` stripped.
    pub canonical: String,
}

/// Parse a location string into ordered segments and a hash-free canonical form.
///
/// The empty string yields zero segments; `"/"` yields a single `"/"` segment.
///
/// # Examples
///
/// ```
/// let loc = pagecraft_core::path::parse("/blog/post-1#comments");
/// assert_eq!(loc.canonical, "/blog/post-1");
/// assert_eq!(loc.segments, vec!["/blog", "/post-1"]);
/// ```
#[must_use]
pub fn parse(location: &str) -> Location {
    let canonical = location
        .split('#')
        .next()
        .unwrap_or_default()
        .to_string();

    // A new segment starts at every '/' and at index 0 for a bare first token.
    let mut starts = Vec::new();
    if !canonical.is_empty() && !canonical.starts_with('/') {
        starts.push(0);
    }
    for (idx, ch) in canonical.char_indices() {
        if ch == '/' {
            starts.push(idx);
        }
    }

    let mut segments = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(canonical.len());
        if end > start {
            segments.push(canonical[start..end].to_string());
        }
    }

    Location {
        segments,
        canonical,
    }
}

/// Join two path pieces into a normalized absolute path.
///
/// Leading and trailing slashes on each piece are irrelevant; the result is
/// always absolute, slash-joined, and free of duplicate slashes. Joining two
/// empty pieces yields `"/"`.
#[must_use]
pub fn join(parent: &str, segment: &str) -> String {
    let joined = [parent, segment]
        .iter()
        .map(|piece| piece.trim_matches('/'))
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    format!("/{joined}")
}

/// Return the base (first) segment of a parsed path, or `"/"` when there is none.
#[must_use]
pub fn base(segments: &[String]) -> &str {
    segments.first().map_or("/", String::as_str)
}
