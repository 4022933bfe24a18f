//! Waypost CLI Library
//!
//! Command implementations and the HTTP adapter for the Waypost binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (serve, resolve, routes, check)
//! - [`server`] - Axum router that answers redirect sources and serves the site
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use waypost::cmd;
//!
//! // Print where the tutorial landing page forwards to
//! cmd::resolve::run(Path::new("waypost.toml"), "/docs/tutorials/nextjs").unwrap();
//! ```

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use waypost_content::{ContentCollector, SiteContent};
pub use waypost_core::{Config, RedirectTable, Signal};

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
