//! HTTP handlers, one module per resource.

pub mod articles;
pub mod comments;
pub mod users;
