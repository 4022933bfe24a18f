//! Static redirect table and resolver.
//!
//! A [`RedirectTable`] is built once from configuration and never mutated
//! afterwards. [`RedirectTable::resolve`] is a pure lookup: it performs no I/O
//! and may be called from any number of request handlers at once.

use std::collections::{BTreeMap, HashSet};

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::RedirectError;

/// Landing route of the Next.js tutorial.
pub const TUTORIAL_INDEX_ROUTE: &str = "/docs/tutorials/nextjs";

/// First concrete step of the Next.js tutorial.
pub const TUTORIAL_FIRST_STEP_ROUTE: &str = "/docs/tutorials/nextjs/step-1";

/// How clients should treat a redirect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectStatus {
    /// See other; the destination may change, clients should revisit the source.
    #[default]
    Temporary,
    /// Moved permanently; clients may rebind to the destination.
    Permanent,
}

impl RedirectStatus {
    /// HTTP status code carried by the redirect response.
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Temporary => StatusCode::SEE_OTHER,
            Self::Permanent => StatusCode::MOVED_PERMANENTLY,
        }
    }

    /// Lowercase name, as written in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temporary => "temporary",
            Self::Permanent => "permanent",
        }
    }
}

/// A single `source -> target` association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    /// Route being loaded.
    #[serde(rename = "from")]
    pub source: String,

    /// Route (or absolute URL) to send the client to.
    #[serde(rename = "to")]
    pub target: String,

    /// Status classification.
    #[serde(default)]
    pub status: RedirectStatus,
}

impl RedirectRule {
    /// Create a rule with an explicit status.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        status: RedirectStatus,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            status,
        }
    }

    /// Create a temporary (303) rule.
    pub fn temporary(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, RedirectStatus::Temporary)
    }

    /// Create a permanent (301) rule.
    pub fn permanent(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, RedirectStatus::Permanent)
    }

    /// Route the target lands on, as a source lookup would see it.
    ///
    /// `None` for absolute `http(s)://` targets and malformed ones.
    pub fn target_route(&self) -> Option<String> {
        if is_external(&self.target) {
            return None;
        }
        normalize_route(&self.target).ok()
    }
}

/// Instruction to the hosting pipeline: redirect instead of rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    /// Value for the `Location` header.
    pub location: String,

    /// Status classification.
    pub status: RedirectStatus,
}

impl Signal {
    /// HTTP status code for this signal.
    pub fn status_code(&self) -> StatusCode {
        self.status.status_code()
    }
}

/// Rules shipped with the site when configuration defines none.
pub fn builtin_rules() -> Vec<RedirectRule> {
    vec![RedirectRule::temporary(
        TUTORIAL_INDEX_ROUTE,
        TUTORIAL_FIRST_STEP_ROUTE,
    )]
}

/// Normalize a route for lookup.
///
/// Query strings and fragments are dropped and trailing slashes are removed,
/// except for the root route `/`.
pub fn normalize_route(route: &str) -> Result<String, RedirectError> {
    let invalid = |reason: &'static str| RedirectError::InvalidRoute {
        route: route.to_string(),
        reason,
    };

    let path = route
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("must not contain whitespace"));
    }
    if path.split('/').any(|segment| segment == "..") {
        return Err(invalid("must not contain '..' segments"));
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn is_external(target: &str) -> bool {
    target.starts_with("https://") || target.starts_with("http://")
}

/// Check a target as written in configuration.
///
/// Targets end up verbatim in the `Location` header, query and fragment
/// included, so the whole string must be header-safe.
fn validate_target(target: &str) -> Result<(), RedirectError> {
    if target.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(RedirectError::InvalidRoute {
            route: target.to_string(),
            reason: "must not contain whitespace",
        });
    }
    if is_external(target) {
        return Ok(());
    }
    normalize_route(target).map(|_| ())
}

/// Immutable mapping from source route to redirect rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectTable {
    rules: BTreeMap<String, RedirectRule>,
}

impl RedirectTable {
    /// Build a table, rejecting self-redirects, duplicate sources and cycles.
    ///
    /// Source routes are normalized. Targets are validated and kept exactly as
    /// configured, query string and fragment included.
    pub fn new(rules: impl IntoIterator<Item = RedirectRule>) -> Result<Self, RedirectError> {
        let mut table = BTreeMap::new();

        for rule in rules {
            let source = normalize_route(&rule.source)?;
            validate_target(&rule.target)?;

            if rule.target_route().as_deref() == Some(source.as_str()) {
                return Err(RedirectError::SelfRedirect { route: source });
            }
            if table.contains_key(&source) {
                return Err(RedirectError::DuplicateSource { route: source });
            }

            table.insert(
                source.clone(),
                RedirectRule {
                    source,
                    target: rule.target,
                    status: rule.status,
                },
            );
        }

        let table = Self { rules: table };
        table.check_cycles()?;
        Ok(table)
    }

    /// Table holding the built-in rules only.
    pub fn builtin() -> Self {
        let rules = builtin_rules()
            .into_iter()
            .map(|rule| (rule.source.clone(), rule))
            .collect();
        Self { rules }
    }

    /// Resolve a source route to its redirect signal.
    ///
    /// Unknown or malformed routes yield [`RedirectError::UnmappedRoute`].
    pub fn resolve(&self, source: &str) -> Result<Signal, RedirectError> {
        let unmapped = || RedirectError::UnmappedRoute {
            route: source.to_string(),
        };

        let route = normalize_route(source).map_err(|_| unmapped())?;
        let rule = self.rules.get(&route).ok_or_else(unmapped)?;

        Ok(Signal {
            location: rule.target.clone(),
            status: rule.status,
        })
    }

    /// Whether a rule exists for this route.
    pub fn contains(&self, source: &str) -> bool {
        normalize_route(source).is_ok_and(|route| self.rules.contains_key(&route))
    }

    /// All rules, ordered by source route.
    pub fn rules(&self) -> impl Iterator<Item = &RedirectRule> {
        self.rules.values()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn check_cycles(&self) -> Result<(), RedirectError> {
        for start in self.rules.keys() {
            let mut seen = HashSet::new();
            let mut current = start.clone();

            while let Some(rule) = self.rules.get(&current) {
                if !seen.insert(current.clone()) {
                    break;
                }
                let Some(next) = rule.target_route() else {
                    break;
                };
                if next == *start {
                    return Err(RedirectError::Cycle {
                        route: start.clone(),
                    });
                }
                current = next;
            }
        }
        Ok(())
    }
}
