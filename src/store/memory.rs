//! In-process row store. Enforces the same not-null, unique, foreign key and
//! ON DELETE rules that the PostgreSQL DDL declares.

use super::{Record, RowStore};
use crate::error::StoreError;
use crate::schema::{referencing, ColumnDef, ColumnDefault, ColumnType, OnDelete, TableDef};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemTable {
    rows: BTreeMap<i32, Record>,
    last_id: i32,
}

type Tables = HashMap<&'static str, MemTable>;

#[derive(Default)]
pub struct MemoryRowStore {
    tables: Mutex<Tables>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Check a value against the column type and normalize it (timestamps to UTC, microseconds).
fn coerce(table: &TableDef, column: &ColumnDef, v: Value) -> Result<Value, StoreError> {
    let invalid = |reason: &str| StoreError::InvalidValue {
        table: table.name,
        column: column.name,
        reason: reason.to_string(),
    };
    if v.is_null() {
        if column.nullable {
            return Ok(Value::Null);
        }
        return Err(StoreError::NotNull {
            table: table.name,
            column: column.name,
        });
    }
    match column.column_type {
        ColumnType::Identity | ColumnType::Integer => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Value::from)
            .ok_or_else(|| invalid("expected integer")),
        ColumnType::Text => match v {
            Value::String(_) => Ok(v),
            _ => Err(invalid("expected text")),
        },
        ColumnType::Timestamp => v
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| {
                Value::String(
                    d.with_timezone(&Utc)
                        .to_rfc3339_opts(SecondsFormat::Micros, true),
                )
            })
            .ok_or_else(|| invalid("expected RFC 3339 timestamp")),
    }
}

/// Foreign key and unique checks for a candidate row (`own_id` excludes the row itself).
fn check_constraints(
    tables: &Tables,
    table: &TableDef,
    row: &Record,
    own_id: Option<i32>,
) -> Result<(), StoreError> {
    for c in table.columns {
        let Some(v) = row.get(c.name).filter(|v| !v.is_null()) else { continue };
        if let Some(fk) = c.references {
            let exists = v
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .and_then(|id| tables.get(fk.table).map(|t| t.rows.contains_key(&id)))
                .unwrap_or(false);
            if !exists {
                return Err(StoreError::ForeignKey {
                    table: table.name,
                    column: c.name,
                });
            }
        }
        if c.unique {
            let taken = tables
                .get(table.name)
                .map(|t| {
                    t.rows
                        .iter()
                        .any(|(id, other)| Some(*id) != own_id && other.get(c.name) == Some(v))
                })
                .unwrap_or(false);
            if taken {
                return Err(StoreError::Unique {
                    table: table.name,
                    column: c.name,
                });
            }
        }
    }
    Ok(())
}

/// Remove a row, then apply ON DELETE actions of every referencing column.
fn delete_cascading(tables: &mut Tables, table: &str, id: i32) -> u64 {
    let removed = tables
        .get_mut(table)
        .and_then(|t| t.rows.remove(&id))
        .is_some();
    if !removed {
        return 0;
    }
    for (child, column) in referencing(table) {
        let Some(fk) = column.references else { continue };
        let matching: Vec<i32> = tables
            .get(child.name)
            .map(|t| {
                t.rows
                    .iter()
                    .filter(|(_, row)| row.get(column.name).and_then(Value::as_i64) == Some(i64::from(id)))
                    .map(|(child_id, _)| *child_id)
                    .collect()
            })
            .unwrap_or_default();
        for child_id in matching {
            match fk.on_delete {
                OnDelete::Cascade => {
                    delete_cascading(tables, child.name, child_id);
                }
                OnDelete::SetNull => {
                    if let Some(row) = tables
                        .get_mut(child.name)
                        .and_then(|t| t.rows.get_mut(&child_id))
                    {
                        row.insert(column.name.to_string(), Value::Null);
                    }
                }
            }
        }
    }
    1
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn insert_into(&self, table: &TableDef, mut record: Record) -> Result<Record, StoreError> {
        let mut tables = self.lock()?;
        let last_id = tables.get(table.name).map(|t| t.last_id).unwrap_or(0);
        let mut row = Record::new();
        let mut id = last_id + 1;
        for c in table.columns {
            let provided = record.remove(c.name).filter(|v| !v.is_null());
            let value = match (provided, c.is_primary_key(), c.default) {
                (Some(v), _, _) => coerce(table, c, v)?,
                (None, true, _) => Value::from(id),
                (None, false, Some(ColumnDefault::Now)) => now(),
                (None, false, None) => coerce(table, c, Value::Null)?,
            };
            if c.is_primary_key() {
                id = value.as_i64().and_then(|n| i32::try_from(n).ok()).unwrap_or(id);
            }
            row.insert(c.name.to_string(), value);
        }
        if tables
            .get(table.name)
            .map(|t| t.rows.contains_key(&id))
            .unwrap_or(false)
        {
            return Err(StoreError::Unique {
                table: table.name,
                column: table.primary_key,
            });
        }
        check_constraints(&tables, table, &row, None)?;
        let entry = tables.entry(table.name).or_default();
        entry.last_id = entry.last_id.max(id);
        entry.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn select_all(&self, table: &TableDef) -> Result<Vec<Record>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .get(table.name)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn select_by_id(&self, table: &TableDef, id: i32) -> Result<Option<Record>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.get(table.name).and_then(|t| t.rows.get(&id).cloned()))
    }

    async fn update_by_id(&self, table: &TableDef, id: i32, partial: Record) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        let Some(mut row) = tables.get(table.name).and_then(|t| t.rows.get(&id).cloned()) else {
            return Ok(0);
        };
        for (k, v) in partial {
            let Some(c) = table.column(&k).filter(|c| !c.is_primary_key()) else { continue };
            row.insert(k, coerce(table, c, v)?);
        }
        check_constraints(&tables, table, &row, Some(id))?;
        if let Some(t) = tables.get_mut(table.name) {
            t.rows.insert(id, row);
        }
        Ok(1)
    }

    async fn delete_by_id(&self, table: &TableDef, id: i32) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        Ok(delete_cascading(&mut tables, table.name, id))
    }

    async fn truncate_all(&self) -> Result<(), StoreError> {
        self.lock()?.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
