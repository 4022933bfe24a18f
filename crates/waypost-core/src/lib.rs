//! Waypost Core Library
//!
//! Core types, configuration, content documents and the static redirect resolver.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod redirect;

pub use config::Config;
pub use content::{ContentDocument, ContentPath, ContentType};
pub use error::{CoreError, RedirectError, Result};
pub use frontmatter::Frontmatter;
pub use redirect::{RedirectRule, RedirectStatus, RedirectTable, Signal};
