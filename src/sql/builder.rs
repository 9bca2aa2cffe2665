//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and DDL from table definitions.

use crate::schema::{ColumnDef, ColumnType, OnDelete, TableDef, TABLES};
use crate::store::Record;
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from static table definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }

    /// Placeholder with the column's cast, e.g. `$2::timestamptz`.
    fn placeholder(&mut self, column: &ColumnDef, v: Value) -> String {
        let n = self.push_param(v);
        format!("${}::{}", n, column.column_type.pg_cast())
    }
}

fn select_column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row, ordered by primary key.
pub fn select_all(table: &TableDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(table.primary_key)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(table: &TableDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(Value::from(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(table),
        quoted(table.name),
        quoted(table.primary_key)
    );
    q
}

/// INSERT with RETURNING every column.
/// Keys that are not columns of the table are ignored. Columns with a store-side
/// default (including the primary key) are omitted when the record has no value,
/// so the database fills them in.
pub fn insert(table: &TableDef, record: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in table.columns {
        let val = record.get(c.name).filter(|v| !v.is_null()).cloned();
        if val.is_none() && c.has_default() {
            continue;
        }
        let ph = q.placeholder(c, val.unwrap_or(Value::Null));
        cols.push(quoted(c.name));
        placeholders.push(ph);
    }
    q.sql = if cols.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            quoted(table.name),
            select_column_list(table)
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(table.name),
            cols.join(", "),
            placeholders.join(", "),
            select_column_list(table)
        )
    };
    q
}

/// UPDATE by id: SET only keys present in the record that are non-key columns.
/// With nothing to set, selects the row instead so the affected count still
/// reports whether it exists.
pub fn update(table: &TableDef, id: i32, record: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in table.columns.iter().filter(|c| !c.is_primary_key()) {
        let Some(v) = record.get(c.name) else { continue };
        let rhs = q.placeholder(c, v.clone());
        sets.push(format!("{} = {}", quoted(c.name), rhs));
    }
    let id_param = q.push_param(Value::from(id));
    q.sql = if sets.is_empty() {
        format!(
            "SELECT 1 FROM {} WHERE {} = ${}",
            quoted(table.name),
            quoted(table.primary_key),
            id_param
        )
    } else {
        format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            quoted(table.name),
            sets.join(", "),
            quoted(table.primary_key),
            id_param
        )
    };
    q
}

/// DELETE by id.
pub fn delete(table: &TableDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(Value::from(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = $1",
        quoted(table.name),
        quoted(table.primary_key)
    );
    q
}

/// TRUNCATE every table and restart identity sequences.
pub fn truncate_all() -> String {
    let names: Vec<String> = TABLES.iter().rev().map(|t| quoted(t.name)).collect();
    format!("TRUNCATE {} RESTART IDENTITY CASCADE", names.join(", "))
}

fn column_ddl(c: &ColumnDef) -> String {
    let mut parts = vec![quoted(c.name)];
    match c.column_type {
        ColumnType::Identity => {
            parts.push("INTEGER PRIMARY KEY GENERATED BY DEFAULT AS IDENTITY".into());
            return parts.join(" ");
        }
        ColumnType::Integer => parts.push("INTEGER".into()),
        ColumnType::Text => parts.push("TEXT".into()),
        ColumnType::Timestamp => parts.push("TIMESTAMPTZ".into()),
    }
    if !c.nullable {
        parts.push("NOT NULL".into());
    }
    if c.unique {
        parts.push("UNIQUE".into());
    }
    if c.default.is_some() {
        parts.push("DEFAULT NOW()".into());
    }
    if let Some(fk) = c.references {
        let action = match fk.on_delete {
            OnDelete::Cascade => "CASCADE",
            OnDelete::SetNull => "SET NULL",
        };
        parts.push(format!(
            "REFERENCES {} ({}) ON DELETE {}",
            quoted(fk.table),
            quoted(fk.column),
            action
        ));
    }
    parts.join(" ")
}

/// CREATE TABLE IF NOT EXISTS for one table.
pub fn create_table(table: &TableDef) -> String {
    let cols: Vec<String> = table.columns.iter().map(column_ddl).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(table.name),
        cols.join(", ")
    )
}
