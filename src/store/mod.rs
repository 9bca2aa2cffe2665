//! Row store: table-oriented access to the blogful tables.
//!
//! Services talk to a `dyn RowStore`; `PgRowStore` is the PostgreSQL backend and
//! `MemoryRowStore` keeps tables in process with the same constraint behavior.

mod memory;
mod postgres;

pub use memory::MemoryRowStore;
pub use postgres::PgRowStore;

use crate::error::StoreError;
use crate::schema::TableDef;
use async_trait::async_trait;

/// One row: column name to JSON value. Timestamps are RFC 3339 strings.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait RowStore: Send + Sync {
    /// Insert a row; returns it with generated id and defaults filled in.
    async fn insert_into(&self, table: &TableDef, record: Record) -> Result<Record, StoreError>;

    /// All rows in primary key order.
    async fn select_all(&self, table: &TableDef) -> Result<Vec<Record>, StoreError>;

    async fn select_by_id(&self, table: &TableDef, id: i32) -> Result<Option<Record>, StoreError>;

    /// Set the given columns on the matching row. Returns affected rows (0 or 1).
    async fn update_by_id(&self, table: &TableDef, id: i32, partial: Record) -> Result<u64, StoreError>;

    /// Returns affected rows (0 or 1).
    async fn delete_by_id(&self, table: &TableDef, id: i32) -> Result<u64, StoreError>;

    /// Empty every table and restart id generation at 1.
    async fn truncate_all(&self) -> Result<(), StoreError>;

    /// Connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
