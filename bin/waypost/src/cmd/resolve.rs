//! Resolve command - show what a route redirects to

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use waypost_core::{Config, RedirectTable, Signal};

/// Run the resolve command.
///
/// Prints the signal for `route`, or fails when no rule covers it. Without a
/// configuration file the built-in rules are used.
pub fn run(config_path: &Path, route: &str) -> Result<()> {
    let table = load_table(config_path)?;
    let signal = table.resolve(route)?;

    tracing::info!(route, location = %signal.location, "resolved");
    println!("{}", describe(&signal));

    Ok(())
}

fn load_table(config_path: &Path) -> Result<RedirectTable> {
    if !config_path.exists() {
        tracing::warn!(?config_path, "configuration not found, using built-in redirects");
        return Ok(RedirectTable::builtin());
    }

    let config = Config::load(config_path).wrap_err("Failed to load configuration")?;
    config
        .redirect_table()
        .wrap_err("Invalid redirect table")
}

/// Render a signal as `303 See Other -> /target`.
pub fn describe(signal: &Signal) -> String {
    let code = signal.status_code();
    format!(
        "{} {} -> {}",
        code.as_u16(),
        code.canonical_reason().unwrap_or_default(),
        signal.location
    )
}

#[cfg(test)]
mod tests {
    use waypost_core::{RedirectError, RedirectStatus};

    use super::*;

    #[test]
    fn test_describe_temporary() {
        let signal = Signal {
            location: "/docs/tutorials/nextjs/step-1".to_string(),
            status: RedirectStatus::Temporary,
        };
        assert_eq!(
            describe(&signal),
            "303 See Other -> /docs/tutorials/nextjs/step-1"
        );
    }

    #[test]
    fn test_describe_permanent() {
        let signal = Signal {
            location: "/new".to_string(),
            status: RedirectStatus::Permanent,
        };
        assert_eq!(describe(&signal), "301 Moved Permanently -> /new");
    }

    #[test]
    fn test_run_without_config_uses_builtin() {
        let missing = Path::new("/nonexistent/waypost.toml");
        assert!(run(missing, "/docs/tutorials/nextjs").is_ok());

        let err = run(missing, "/docs/tutorials/remix").unwrap_err();
        let err = err.downcast_ref::<RedirectError>().expect("redirect error");
        assert!(err.is_unmapped());
    }

    #[test]
    fn test_run_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("waypost.toml");
        std::fs::write(
            &config_path,
            r#"
[site]
title = "Test"
base_url = "https://example.com"

[[redirects]]
from = "/start"
to = "/start/one"
"#,
        )
        .unwrap();

        assert!(run(&config_path, "/start").is_ok());
        assert!(run(&config_path, "/docs/tutorials/nextjs").is_err());
    }
}
