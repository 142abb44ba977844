//! Build command - runs the full static expansion.

use std::{path::Path, sync::Arc, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use pagecraft_generator::Expander;

use crate::Site;

/// Run the build command.
///
/// Expands the site's route tree into the output directory. CLI flags
/// override the configured output directory and base URL.
pub async fn run(site: &Site, output: Option<&Path>, base_url: Option<&str>) -> Result<()> {
    let start = Instant::now();

    let mut config = site.config.clone();

    if let Some(output) = output {
        tracing::info!(output = %output.display(), "Overriding output directory from CLI");
        config.build.output_dir = output.to_string_lossy().to_string();
    }

    if let Some(base_url) = base_url {
        tracing::info!(base_url, "Overriding site base URL from CLI");
        config.site.base_url = base_url.to_string();
    }

    let output_dir = config.build.output_dir.clone();
    let expander = Expander::new(Arc::clone(&site.tree), Arc::clone(&site.layout), config);

    let stats = expander.build().await.wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:    {}", stats.pages);
    println!("  Skipped:  {}", stats.skipped);
    println!("  Warnings: {}", stats.warnings);
    println!();
    println!("  Duration: {:.2}s", duration.as_secs_f64());
    println!("  Output:   {output_dir}");
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}
