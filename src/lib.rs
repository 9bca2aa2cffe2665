//! Blogful: REST backend for articles, users, and comments.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod sanitize;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use app::build_app;
pub use config::{AppConfig, RuntimeMode};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::{ensure_database_exists, ensure_tables};
pub use sanitize::sanitize;
pub use service::{ArticlesService, CommentsService, UsersService};
pub use state::AppState;
pub use store::{MemoryRowStore, PgRowStore, Record, RowStore};
