use super::RecordBuilder;
use crate::sanitize::sanitize;
use crate::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub style: String,
    pub content: String,
    pub date_published: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<i32>,
}

impl Article {
    /// Copy safe to render: `title` and `content` filtered, everything else as stored.
    pub fn sanitized(self) -> Self {
        Article {
            title: sanitize(&self.title),
            content: sanitize(&self.content),
            ..self
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewArticle {
    pub title: String,
    pub style: String,
    pub content: String,
    pub author: Option<i32>,
}

impl NewArticle {
    pub fn into_record(self) -> Record {
        RecordBuilder::default()
            .set("title", self.title)
            .set("style", self.style)
            .set("content", self.content)
            .set_opt("author", self.author)
            .build()
    }
}

/// Fields an update may change. `None` leaves the column untouched.
#[derive(Clone, Debug, Default)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub style: Option<String>,
    pub content: Option<String>,
}

impl ArticlePatch {
    pub const FIELDS: &'static [&'static str] = &["title", "style", "content"];

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.style.is_none() && self.content.is_none()
    }

    pub fn into_record(self) -> Record {
        RecordBuilder::default()
            .set_opt("title", self.title)
            .set_opt("style", self.style)
            .set_opt("content", self.content)
            .build()
    }
}
