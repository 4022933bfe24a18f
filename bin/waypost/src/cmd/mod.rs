//! CLI command implementations.

pub mod check;
pub mod resolve;
pub mod routes;
pub mod serve;

use std::path::{Path, PathBuf};

/// Resolve a path from the configuration file against the file's directory.
///
/// Absolute paths are returned unchanged.
pub fn site_path(config_path: &Path, relative: impl AsRef<Path>) -> PathBuf {
    let relative = relative.as_ref();
    if relative.is_absolute() {
        return relative.to_path_buf();
    }
    config_path
        .parent()
        .unwrap_or(Path::new(""))
        .join(relative)
}
