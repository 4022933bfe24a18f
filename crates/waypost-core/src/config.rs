//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    redirect::{RedirectRule, RedirectTable, builtin_rules},
};

/// Main configuration structure for Waypost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content document settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub serve: ServeConfig,

    /// Static redirect rules. Falls back to the built-in rules when omitted.
    #[serde(default = "builtin_rules")]
    pub redirects: Vec<RedirectRule>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Default author identifier for documents that omit one.
    #[serde(default)]
    pub author: Option<String>,
}

/// Content configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding content documents.
    #[serde(default = "default_content_dir")]
    pub dir: String,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Directory of pre-rendered pages served for non-redirect routes.
    #[serde(default = "default_serve_root")]
    pub root: String,

    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_content_dir() -> String {
    "content".to_string()
}

fn default_serve_root() -> String {
    "public".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            root: default_serve_root(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, letting `WAYPOST__SECTION__KEY` variables override the file.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("WAYPOST").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the redirect table described by this configuration.
    pub fn redirect_table(&self) -> Result<RedirectTable> {
        Ok(RedirectTable::new(self.redirects.iter().cloned())?)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        let table = self.redirect_table()?;
        tracing::debug!(rules = table.len(), "validated redirect table");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::redirect::{RedirectStatus, TUTORIAL_FIRST_STEP_ROUTE, TUTORIAL_INDEX_ROUTE};

    fn create_test_config() -> String {
        r#"
[site]
title = "Test Docs"
base_url = "https://example.com"
description = "Docs and blog"

[content]
dir = "posts"

[serve]
root = "dist"
port = 8080

[[redirects]]
from = "/docs/start"
to = "/docs/start/intro"

[[redirects]]
from = "/blog/old-post"
to = "/blog/new-post"
status = "permanent"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("waypost.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Test Docs");
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.content.dir, "posts");
        assert_eq!(config.serve.root, "dist");
        assert_eq!(config.serve.host, "127.0.0.1");
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.redirects.len(), 2);
        assert_eq!(config.redirects[0].status, RedirectStatus::Temporary);
        assert_eq!(config.redirects[1].status, RedirectStatus::Permanent);

        let table = config.redirect_table().expect("table");
        assert!(table.contains("/docs/start"));
        assert!(!table.contains(TUTORIAL_INDEX_ROUTE));
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("waypost.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.content.dir, "content");
        assert_eq!(config.serve.root, "public");
        assert_eq!(config.serve.port, 3000);

        let table = config.redirect_table().expect("table");
        assert_eq!(table.len(), 1);
        let signal = table.resolve(TUTORIAL_INDEX_ROUTE).expect("resolve");
        assert_eq!(signal.location, TUTORIAL_FIRST_STEP_ROUTE);
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("waypost.toml");
        let config_content = r#"
[site]
title = ""
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_rejects_self_redirect() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("waypost.toml");
        let config_content = r#"
[site]
title = "Test"
base_url = "https://example.com"

[[redirects]]
from = "/loop"
to = "/loop/"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let err = Config::load(&config_path).unwrap_err();
        assert!(matches!(err, CoreError::Redirect(_)));
        assert!(err.to_string().contains("points at itself"));
    }

    #[test]
    fn test_load_with_env() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("waypost.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        // Only this test touches WAYPOST__* variables.
        unsafe { std::env::remove_var("WAYPOST__SERVE__PORT") };
        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "Test Docs");
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.redirects.len(), 2);

        unsafe { std::env::set_var("WAYPOST__SERVE__PORT", "8081") };
        let result = Config::load_with_env(&config_path);
        unsafe { std::env::remove_var("WAYPOST__SERVE__PORT") };

        let config = result.expect("load config with env override");
        assert_eq!(config.serve.port, 8081);
        assert_eq!(config.serve.root, "dist");
        assert_eq!(config.site.title, "Test Docs");
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/waypost.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
