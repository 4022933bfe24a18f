//! Check command - validate configuration, redirects and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use waypost_content::{ContentCollector, SiteContent};
use waypost_core::{Config, RedirectTable};

use super::site_path;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Collected errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Collected warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration, the redirect table and all content documents.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Run every check and collect the findings.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            return result;
        }
    };

    let table = match config.redirect_table() {
        Ok(table) => {
            println!("  ✓ {} redirect rule(s)", table.len());
            table
        }
        Err(e) => {
            result.add_error(format!("Redirect table invalid: {e}"));
            return result;
        }
    };

    println!("\nChecking content files...");
    let content_dir = site_path(config_path, &config.content.dir);
    let content = collect_content(&content_dir, config.site.author.clone(), &mut result);

    println!("\nChecking redirects against content...");
    let root = site_path(config_path, &config.serve.root);
    if !root.is_dir() {
        result.add_warning(format!("Site root missing: {}", root.display()));
    }
    check_redirects(&table, &content, &root, &mut result);

    println!("\nChecking configuration values...");
    check_config_values(&config, &mut result);

    result
}

fn collect_content(
    content_dir: &Path,
    default_author: Option<String>,
    result: &mut ValidationResult,
) -> SiteContent {
    if !content_dir.is_dir() {
        result.add_warning(format!(
            "Content directory does not exist: {}",
            content_dir.display()
        ));
        return SiteContent::default();
    }

    match ContentCollector::new(content_dir)
        .with_default_author(default_author)
        .collect()
    {
        Ok(content) => {
            for skipped in &content.skipped {
                result.add_error(skipped.to_string());
            }
            if content.skipped.is_empty() {
                println!("  ✓ All {} content files valid", content.len());
            } else {
                println!(
                    "  ✗ {} content file(s) have errors",
                    content.skipped.len()
                );
            }
            content
        }
        Err(e) => {
            result.add_error(format!("Failed to collect content: {e}"));
            SiteContent::default()
        }
    }
}

/// Warn about redirects that hide documents or point nowhere.
fn check_redirects(
    table: &RedirectTable,
    content: &SiteContent,
    root: &Path,
    result: &mut ValidationResult,
) {
    let before = result.warnings.len();

    for rule in table.rules() {
        if let Some(doc) = content.get(&rule.source) {
            result.add_warning(format!(
                "Redirect source {} shadows document {}",
                rule.source,
                doc.source_path.display()
            ));
        }

        let Some(target) = rule.target_route() else {
            continue;
        };
        if !content.contains(&target) && !root_has_page(root, &target) {
            result.add_warning(format!(
                "Redirect target {} (from {}) matches no document or file",
                rule.target, rule.source
            ));
        }
    }

    if result.warnings.len() == before {
        println!("  ✓ All redirect targets exist");
    }
}

/// Whether the pre-rendered site has a page for `route`.
fn root_has_page(root: &Path, route: &str) -> bool {
    let relative = route.trim_start_matches('/');
    let base = root.join(relative);
    base.join("index.html").is_file() || base.with_extension("html").is_file() || base.is_file()
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.serve.port == 0 {
        result.add_warning("serve.port is 0, an ephemeral port will be used");
    }

    println!("  ✓ Configuration values checked");
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(dir: &Path, relative: &str, text: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    const CONFIG: &str = r#"
[site]
title = "Test"
base_url = "https://example.com"
"#;

    #[test]
    fn test_clean_site_passes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "waypost.toml", CONFIG);
        write(
            dir.path(),
            "content/docs/tutorials/nextjs/step-1.md",
            "---\ntitle: Step 1\n---\nBody",
        );
        fs::create_dir_all(dir.path().join("public")).unwrap();

        let config_path = dir.path().join("waypost.toml");
        let result = validate(&config_path);
        assert!(result.errors().is_empty(), "{:?}", result.errors());
        assert!(result.warnings().is_empty(), "{:?}", result.warnings());
        assert!(run(&config_path, true).is_ok());
    }

    #[test]
    fn test_target_found_in_site_root() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "waypost.toml", CONFIG);
        write(dir.path(), "content/index.md", "---\ntitle: Home\n---\n");
        write(
            dir.path(),
            "public/docs/tutorials/nextjs/step-1/index.html",
            "<h1>Step 1</h1>",
        );

        let result = validate(&dir.path().join("waypost.toml"));
        assert!(result.warnings().is_empty(), "{:?}", result.warnings());
    }

    #[test]
    fn test_target_with_fragment_matches_document() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "waypost.toml",
            r#"
[site]
title = "Test"
base_url = "https://example.com"

[[redirects]]
from = "/setup"
to = "/docs/install/#linux"
"#,
        );
        write(
            dir.path(),
            "content/docs/install.md",
            "---\ntitle: Install\n---\nBody",
        );
        fs::create_dir_all(dir.path().join("public")).unwrap();

        let result = validate(&dir.path().join("waypost.toml"));
        assert!(result.warnings().is_empty(), "{:?}", result.warnings());
    }

    #[test]
    fn test_missing_target_and_shadowed_document() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "waypost.toml", CONFIG);
        write(
            dir.path(),
            "content/docs/tutorials/nextjs/index.md",
            "---\ntitle: Tutorial\n---\nBody",
        );
        fs::create_dir_all(dir.path().join("public")).unwrap();

        let config_path = dir.path().join("waypost.toml");
        let result = validate(&config_path);

        assert!(result.errors().is_empty());
        assert_eq!(result.warnings().len(), 2, "{:?}", result.warnings());
        assert!(result.warnings()[0].contains("shadows document"));
        assert!(result.warnings()[1].contains("matches no document or file"));

        assert!(run(&config_path, false).is_ok());
        assert!(run(&config_path, true).is_err());
    }

    #[test]
    fn test_broken_content_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "waypost.toml", CONFIG);
        write(dir.path(), "content/blog/untitled.md", "---\nauthor: x\n---\n");
        fs::create_dir_all(dir.path().join("public")).unwrap();

        let config_path = dir.path().join("waypost.toml");
        let result = validate(&config_path);
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("title is required"));
        assert!(run(&config_path, false).is_err());
    }

    #[test]
    fn test_invalid_redirects_fail() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "waypost.toml",
            r#"
[site]
title = "Test"
base_url = "https://example.com"

[[redirects]]
from = "/a"
to = "/b"

[[redirects]]
from = "/b"
to = "/a"
"#,
        );

        let result = validate(&dir.path().join("waypost.toml"));
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("loops back"));
    }

    #[test]
    fn test_missing_config() {
        let result = validate(Path::new("/nonexistent/waypost.toml"));
        assert!(result.has_errors());
    }
}
