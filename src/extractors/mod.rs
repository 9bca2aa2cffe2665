//! Request extractors and the existence-gate middleware.

pub mod found;
pub mod json;
pub use found::{require_existing, Found, Lookup};
pub use json::JsonObject;
