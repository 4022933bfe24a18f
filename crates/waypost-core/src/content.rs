//! Content documents and their routes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::Result,
    frontmatter::{Frontmatter, parse_frontmatter},
};

/// Words per minute used when a document does not state its reading time.
const WORDS_PER_MINUTE: usize = 200;

/// Type of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Markdown content (.md files).
    Markdown,
}

impl ContentType {
    /// Determine content type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Content file path mapped to the route it is served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    /// Path relative to the content directory.
    pub path: PathBuf,

    /// Route slug without leading slash (empty for the site root).
    pub slug: String,

    /// Content type based on extension.
    pub content_type: ContentType,
}

impl ContentPath {
    /// Map a content-relative path to its route.
    ///
    /// - `blog/hello.md` → `/blog/hello`
    /// - `blog/hello/index.md` → `/blog/hello`
    /// - `index.md` → `/`
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let content_type = ContentType::from_extension(extension)?;
        let stem = path.file_stem()?.to_str()?;

        let parent = path.parent().unwrap_or(Path::new(""));
        let parent = parent
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");

        let slug = if stem == "index" {
            parent
        } else if parent.is_empty() {
            stem.to_string()
        } else {
            format!("{parent}/{stem}")
        };

        Some(Self {
            path: path.to_path_buf(),
            slug: slug.trim_matches('/').to_string(),
            content_type,
        })
    }

    /// Get the URL path for this content.
    pub fn url_path(&self) -> String {
        format!("/{}", self.slug)
    }
}

/// A parsed content document: metadata header plus opaque body.
#[derive(Debug, Clone, Serialize)]
pub struct ContentDocument {
    /// Route the document is published under.
    pub url: String,

    /// Parsed metadata header.
    #[serde(flatten)]
    pub frontmatter: Frontmatter,

    /// Body text after the header, untouched.
    #[serde(skip)]
    pub body: String,

    /// Source file path.
    pub source_path: PathBuf,
}

impl ContentDocument {
    /// Parse a document from its text.
    ///
    /// `path` is relative to the content directory and decides the route.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let (frontmatter, body) = parse_frontmatter(text, path)?;
        frontmatter.validate(path)?;

        let url = ContentPath::from_path(path)
            .map(|cp| cp.url_path())
            .unwrap_or_else(|| "/".to_string());

        Ok(Self {
            url,
            frontmatter,
            body,
            source_path: path.to_path_buf(),
        })
    }

    /// Read and parse a document from disk.
    pub fn load(content_dir: &Path, relative: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(content_dir.join(relative))?;
        let mut doc = Self::parse(&text, relative)?;
        doc.source_path = content_dir.join(relative);
        Ok(doc)
    }

    /// Document title.
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    /// Publication date, if any.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.frontmatter.date
    }

    /// Number of whitespace-separated words in the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Reading time in minutes: the stated `timeToRead`, otherwise an estimate.
    pub fn reading_time(&self) -> u32 {
        self.frontmatter.time_to_read.unwrap_or_else(|| {
            let minutes = (self.word_count() / WORDS_PER_MINUTE).max(1);
            u32::try_from(minutes).unwrap_or(u32::MAX)
        })
    }
}
