//! URL handling module for Mailhost-Harvest
//!
//! This module provides the admission checks the frontier relies on:
//! fragment stripping and link resolution, the same-origin filter, and the
//! static-resource classifier.

mod normalize;
mod origin;
mod static_resource;

// Re-export main functions
pub use normalize::{normalize_url, resolve_link, strip_fragment};
pub use origin::{is_same_origin, BaseOrigin};
pub use static_resource::{is_static_resource, STATIC_EXTENSIONS};
