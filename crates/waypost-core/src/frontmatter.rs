//! Frontmatter parsing for content documents.

use std::{collections::HashMap, path::Path};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// Frontmatter metadata for content documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Layout name the renderer should use.
    #[serde(default)]
    pub layout: Option<String>,

    /// Document title (required).
    #[serde(default)]
    pub title: String,

    /// Summary used for meta tags and listings.
    #[serde(default)]
    pub description: Option<String>,

    /// Publication date.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<Utc>>,

    /// Cover image reference.
    #[serde(default)]
    pub cover: Option<String>,

    /// Author-provided reading time in minutes.
    #[serde(
        default,
        rename = "timeToRead",
        deserialize_with = "deserialize_minutes"
    )]
    pub time_to_read: Option<u32>,

    /// Author identifier.
    #[serde(default)]
    pub author: Option<String>,

    /// Category tag.
    #[serde(default)]
    pub category: Option<String>,

    /// Whether the document is featured in listings.
    #[serde(default)]
    pub featured: bool,

    /// Unrecognized keys, kept as-is.
    #[serde(default, flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(&format!("\n{delimiter}"))?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + 1 + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter from a string.
///
/// Documents without a header get default metadata and keep their full text as body.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((Frontmatter::default(), content.to_string()));
    };

    if fm_str.is_empty() {
        return Ok((Frontmatter::default(), body.to_string()));
    }

    let frontmatter: Frontmatter = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    Ok((frontmatter, body.to_string()))
}

impl Frontmatter {
    /// Validate required fields.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::frontmatter(path, "title is required"));
        }
        Ok(())
    }
}

/// Raw date value: YAML yields plain strings, TOML has a native datetime type.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Toml(toml::value::Datetime),
}

/// Raw reading time: `5` or `"5 min"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMinutes {
    Count(u32),
    Text(String),
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<RawDate>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawDate::Text(text)) => text,
        Some(RawDate::Toml(datetime)) => datetime.to_string(),
    };

    parse_date(&text)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {text:?}")))
}

fn deserialize_minutes<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawMinutes>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawMinutes::Count(minutes)) => Ok(Some(minutes)),
        Some(RawMinutes::Text(text)) => {
            let digits: String = text
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid timeToRead: {text:?}")))
        }
    }
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` timestamp or a bare date.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}
