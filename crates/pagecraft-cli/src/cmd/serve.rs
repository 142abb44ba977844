//! Serve command - static file server over the build output.

use std::{net::SocketAddr, path::Path};

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::server;

/// Run the serve command.
///
/// Serves the output directory with a directory-to-`index.html` fallback and
/// the generated 404 document on miss.
pub async fn run(dir: &Path, port: u16) -> Result<()> {
    if !dir.is_dir() {
        return Err(eyre!(
            "output directory {} does not exist; run `build` first",
            dir.display()
        ));
    }

    let router = server::create_router(dir);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;

    println!("  Serving {} at http://{addr}", dir.display());
    tracing::info!(dir = %dir.display(), %addr, "serving static output");

    axum::serve(listener, router).await?;

    Ok(())
}
