//! Per-page asset resolution.
//!
//! Merges the generated per-page script, route-level declarations, and global
//! defaults into one ordered, normalized list per kind. Ordering is fixed and
//! significant: it determines `<head>` emission order and therefore load
//! priority. Duplicates are not removed; callers avoid collisions.

use pagecraft_core::assets::{Asset, AssetBundle, ResolvedAssets};

/// Resolve the asset lists for one concrete page.
///
/// Script order: generated per-page script first, then route declarations,
/// then global defaults. Styles and fonts: route declarations, then global
/// defaults.
#[must_use]
pub fn resolve(
    route: &AssetBundle,
    global: &AssetBundle,
    generated_script: Option<&str>,
) -> ResolvedAssets {
    let mut scripts = Vec::with_capacity(
        usize::from(generated_script.is_some()) + route.scripts.len() + global.scripts.len(),
    );
    if let Some(href) = generated_script {
        scripts.push(Asset {
            href: href.to_string(),
            preload: false,
        });
    }
    scripts.extend(route.scripts.iter().map(Asset::from));
    scripts.extend(global.scripts.iter().map(Asset::from));

    ResolvedAssets {
        scripts,
        styles: route
            .styles
            .iter()
            .chain(&global.styles)
            .map(Asset::from)
            .collect(),
        fonts: route
            .fonts
            .iter()
            .chain(&global.fonts)
            .map(Asset::from)
            .collect(),
    }
}
