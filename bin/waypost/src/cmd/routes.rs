//! Routes command - list redirect rules and published documents

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use waypost_content::{ContentCollector, SiteContent};
use waypost_core::{Config, RedirectTable};

use super::site_path;

/// Run the routes command.
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path).wrap_err("Failed to load configuration")?;
    let table = config
        .redirect_table()
        .wrap_err("Invalid redirect table")?;

    let content_dir = site_path(config_path, &config.content.dir);
    let content = if content_dir.is_dir() {
        ContentCollector::new(&content_dir)
            .with_default_author(config.site.author.clone())
            .collect()
            .wrap_err("Failed to collect content")?
    } else {
        tracing::warn!(dir = %content_dir.display(), "content directory missing");
        SiteContent::default()
    };

    for line in redirect_lines(&table) {
        println!("{line}");
    }
    println!();
    for line in document_lines(&content) {
        println!("{line}");
    }

    Ok(())
}

fn redirect_lines(table: &RedirectTable) -> Vec<String> {
    let mut lines = vec![format!("Redirects ({}):", table.len())];
    lines.extend(table.rules().map(|rule| {
        format!(
            "  {} -> {}  [{} {}]",
            rule.source,
            rule.target,
            rule.status.status_code().as_u16(),
            rule.status.as_str()
        )
    }));
    lines
}

fn document_lines(content: &SiteContent) -> Vec<String> {
    let mut lines = vec![format!("Documents ({}):", content.len())];
    lines.extend(content.by_date().into_iter().map(|doc| {
        let date = doc
            .date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let marker = if doc.frontmatter.featured { "*" } else { " " };
        let mut line = format!(
            "  {marker} {date}  {}  {} ({} min)",
            doc.url,
            doc.title(),
            doc.reading_time()
        );
        if let Some(author) = &doc.frontmatter.author {
            line.push_str(&format!(" by {author}"));
        }
        line
    }));
    if !content.skipped.is_empty() {
        lines.push(format!("  ({} file(s) skipped)", content.skipped.len()));
    }
    lines
}
