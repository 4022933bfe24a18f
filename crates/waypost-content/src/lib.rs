//! Waypost Content Library
//!
//! Collects the site's content documents so they can be listed, checked
//! against the redirect table and handed to the external renderer.

pub mod collector;

pub use collector::{CollectorError, ContentCollector, SiteContent};
