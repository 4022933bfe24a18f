//! Content collection and organization.
//!
//! Walks the content directory and collects every document, indexed by route.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use waypost_core::{ContentDocument, ContentType};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Parse error.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Two files publish to the same route.
    #[error("{path} publishes {url}, already taken by {existing}")]
    DuplicateRoute {
        url: String,
        path: PathBuf,
        existing: PathBuf,
    },

    /// Content directory is missing or not a directory.
    #[error("invalid content path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Collected site content.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// All documents indexed by route.
    pub documents: BTreeMap<String, ContentDocument>,

    /// Category -> document routes.
    pub categories: BTreeMap<String, Vec<String>>,

    /// Routes of featured documents.
    pub featured: Vec<String>,

    /// Files that were skipped, with the reason.
    pub skipped: Vec<CollectorError>,
}

impl SiteContent {
    /// Look up a document by route.
    pub fn get(&self, url: &str) -> Option<&ContentDocument> {
        self.documents.get(url)
    }

    /// Whether a document is published at this route.
    pub fn contains(&self, url: &str) -> bool {
        self.documents.contains_key(url)
    }

    /// Number of collected documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents were collected.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents sorted by date (newest first); undated ones last, by title.
    pub fn by_date(&self) -> Vec<&ContentDocument> {
        let mut docs: Vec<_> = self.documents.values().collect();
        docs.sort_by(|a, b| match (b.date(), a.date()) {
            (Some(b_date), Some(a_date)) => b_date.cmp(&a_date),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.title().cmp(b.title()),
        });
        docs
    }
}

/// Content collector that walks directories and parses files.
#[derive(Debug)]
pub struct ContentCollector {
    content_dir: PathBuf,
    default_author: Option<String>,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            default_author: None,
        }
    }

    /// Author assigned to documents whose front matter names none.
    #[must_use]
    pub fn with_default_author(mut self, author: Option<String>) -> Self {
        self.default_author = author;
        self
    }

    /// Collect all content from the content directory.
    ///
    /// Files that fail to parse are logged and recorded in [`SiteContent::skipped`].
    pub fn collect(&self) -> Result<SiteContent> {
        info!(dir = %self.content_dir.display(), "collecting content");

        if !self.content_dir.is_dir() {
            return Err(CollectorError::InvalidPath(self.content_dir.clone()));
        }

        let files = self.find_content_files()?;
        info!(count = files.len(), "found content files");

        let parsed: Vec<_> = files
            .par_iter()
            .map(|relative| -> Result<ContentDocument> {
                let mut doc = self.parse_file(relative)?;
                if doc.frontmatter.author.is_none() {
                    doc.frontmatter.author.clone_from(&self.default_author);
                }
                Ok(doc)
            })
            .collect();

        let mut content = SiteContent::default();

        for result in parsed {
            let doc = match result {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(error = %e, "skipping content file");
                    content.skipped.push(e);
                    continue;
                }
            };

            if let Some(existing) = content.documents.get(&doc.url) {
                let err = CollectorError::DuplicateRoute {
                    url: doc.url.clone(),
                    path: doc.source_path.clone(),
                    existing: existing.source_path.clone(),
                };
                warn!(error = %err, "skipping content file");
                content.skipped.push(err);
                continue;
            }

            let url = doc.url.clone();

            if let Some(category) = &doc.frontmatter.category {
                content
                    .categories
                    .entry(category.clone())
                    .or_default()
                    .push(url.clone());
            }
            if doc.frontmatter.featured {
                content.featured.push(url.clone());
            }

            content.documents.insert(url, doc);
        }

        info!(
            documents = content.documents.len(),
            categories = content.categories.len(),
            featured = content.featured.len(),
            skipped = content.skipped.len(),
            "content collection complete"
        );

        Ok(content)
    }

    /// Find all content files, relative to the content directory, in path order.
    fn find_content_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = walkdir::WalkDir::new(&self.content_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if let Some(ext) = path.extension()
                && ContentType::from_extension(&ext.to_string_lossy()).is_some()
            {
                let relative = path
                    .strip_prefix(&self.content_dir)
                    .unwrap_or(path)
                    .to_path_buf();
                files.push(relative);
            }
        }

        Ok(files)
    }

    /// Parse a single content file.
    fn parse_file(&self, relative: &Path) -> Result<ContentDocument> {
        debug!(path = %relative.display(), "parsing file");

        ContentDocument::load(&self.content_dir, relative).map_err(|e| CollectorError::Parse {
            path: self.content_dir.join(relative),
            message: e.to_string(),
        })
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}
