use super::{timestamp_value, RecordBuilder};
use crate::sanitize::sanitize;
use crate::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub date_commented: DateTime<Utc>,
    pub article_id: i32,
    pub user_id: i32,
}

impl Comment {
    pub fn sanitized(self) -> Self {
        Comment {
            text: sanitize(&self.text),
            ..self
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewComment {
    pub text: String,
    pub article_id: i32,
    pub user_id: i32,
}

impl NewComment {
    pub fn into_record(self) -> Record {
        RecordBuilder::default()
            .set("text", self.text)
            .set("article_id", self.article_id)
            .set("user_id", self.user_id)
            .build()
    }
}

#[derive(Clone, Debug, Default)]
pub struct CommentPatch {
    pub text: Option<String>,
    pub date_commented: Option<DateTime<Utc>>,
}

impl CommentPatch {
    pub const FIELDS: &'static [&'static str] = &["text", "date_commented"];

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.date_commented.is_none()
    }

    pub fn into_record(self) -> Record {
        RecordBuilder::default()
            .set_opt("text", self.text)
            .set_opt("date_commented", self.date_commented.as_ref().map(timestamp_value))
            .build()
    }
}
