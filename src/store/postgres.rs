//! PostgreSQL row store over a sqlx pool.

use super::{Record, RowStore};
use crate::error::StoreError;
use crate::schema::{ColumnType, TableDef};
use crate::sql::{self, PgBindValue, QueryBuf};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgRow};

#[derive(Clone)]
pub struct PgRowStore {
    pool: PgPool,
}

impl PgRowStore {
    pub fn new(pool: PgPool) -> Self {
        PgRowStore { pool }
    }

    async fn query_many(&self, table: &TableDef, q: &QueryBuf) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(|r| row_to_record(table, r)).collect()
    }

    async fn query_optional(&self, table: &TableDef, q: &QueryBuf) -> Result<Option<Record>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.map(|r| row_to_record(table, &r)).transpose()
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RowStore for PgRowStore {
    async fn insert_into(&self, table: &TableDef, record: Record) -> Result<Record, StoreError> {
        let q = sql::insert(table, &record);
        self.query_optional(table, &q)
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))
    }

    async fn select_all(&self, table: &TableDef) -> Result<Vec<Record>, StoreError> {
        self.query_many(table, &sql::select_all(table)).await
    }

    async fn select_by_id(&self, table: &TableDef, id: i32) -> Result<Option<Record>, StoreError> {
        self.query_optional(table, &sql::select_by_id(table, id)).await
    }

    async fn update_by_id(&self, table: &TableDef, id: i32, partial: Record) -> Result<u64, StoreError> {
        self.execute(&sql::update(table, id, &partial)).await
    }

    async fn delete_by_id(&self, table: &TableDef, id: i32) -> Result<u64, StoreError> {
        self.execute(&sql::delete(table, id)).await
    }

    async fn truncate_all(&self) -> Result<(), StoreError> {
        let stmt = sql::truncate_all();
        tracing::debug!(sql = %stmt, "execute");
        sqlx::query(&stmt).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Decode a row by the table's declared column types.
fn row_to_record(table: &TableDef, row: &PgRow) -> Result<Record, StoreError> {
    use sqlx::Row;
    let mut map = Record::new();
    for c in table.columns {
        let v = match c.column_type {
            ColumnType::Identity | ColumnType::Integer => {
                row.try_get::<Option<i32>, _>(c.name)?.map(Value::from)
            }
            ColumnType::Text => row.try_get::<Option<String>, _>(c.name)?.map(Value::String),
            ColumnType::Timestamp => row
                .try_get::<Option<DateTime<Utc>>, _>(c.name)?
                .map(|d| Value::String(d.to_rfc3339_opts(SecondsFormat::Micros, true))),
        };
        map.insert(c.name.to_string(), v.unwrap_or(Value::Null));
    }
    Ok(map)
}
