//! Serve command - run the redirect resolver and static file server

use std::{net::SocketAddr, path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use waypost_core::Config;

use super::site_path;
use crate::server::{ServerState, create_router};

/// Command-line overrides for the `[serve]` section.
#[derive(Debug, Default, Clone)]
pub struct ServeOverrides<'a> {
    /// Interface to bind.
    pub host: Option<&'a str>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Directory of pre-rendered pages.
    pub root: Option<&'a Path>,
}

/// Run the serve command.
///
/// Loads the redirect table once and serves until interrupted.
pub async fn run(config_path: &Path, overrides: ServeOverrides<'_>) -> Result<()> {
    tracing::info!(?config_path, ?overrides, "Starting server");

    let mut config =
        Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(host) = overrides.host {
        config.serve.host = host.to_string();
    }
    if let Some(port) = overrides.port {
        config.serve.port = port;
    }

    let root = match overrides.root {
        Some(root) => root.to_path_buf(),
        None => site_path(config_path, &config.serve.root),
    };
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "site root does not exist, only redirects will be served");
    }

    let table = config
        .redirect_table()
        .wrap_err("Invalid redirect table")?;
    tracing::info!(rules = table.len(), root = %root.display(), "redirect table loaded");

    let app = create_router(&root, Arc::new(ServerState::new(table)));

    let addr = format!("{}:{}", config.serve.host, config.serve.port);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;
    let local: SocketAddr = listener.local_addr()?;

    println!();
    println!("  Serving {} at http://{local}", config.site.title);
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
