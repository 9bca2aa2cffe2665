//! Typed records for the blogful tables and their conversions to row-store records.

mod article;
mod comment;
mod user;

pub use article::{Article, ArticlePatch, NewArticle};
pub use comment::{Comment, CommentPatch, NewComment};
pub use user::{NewUser, User, UserPatch};

use crate::error::StoreError;
use crate::store::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a row-store record into a typed model.
pub fn decode<T: DeserializeOwned>(record: Record) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

/// Timestamp as stored in records.
pub(crate) fn timestamp_value(t: &DateTime<Utc>) -> Value {
    Value::String(t.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Collects `Some` fields into a record; used by inserts and patches.
#[derive(Default)]
pub(crate) struct RecordBuilder(Record);

impl RecordBuilder {
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn set_opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    pub fn build(self) -> Record {
        self.0
    }
}
