use super::RecordBuilder;
use crate::sanitize::sanitize;
use crate::store::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub fullname: String,
    pub username: String,
    /// Never serialized into responses.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub nickname: Option<String>,
    pub date_created: DateTime<Utc>,
}

impl User {
    pub fn sanitized(self) -> Self {
        User {
            fullname: sanitize(&self.fullname),
            username: sanitize(&self.username),
            nickname: self.nickname.as_deref().map(sanitize),
            ..self
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub fullname: String,
    pub username: String,
    pub password: Option<String>,
    pub nickname: Option<String>,
}

impl NewUser {
    pub fn into_record(self) -> Record {
        RecordBuilder::default()
            .set("fullname", self.fullname)
            .set("username", self.username)
            .set_opt("password", self.password)
            .set_opt("nickname", self.nickname)
            .build()
    }
}

#[derive(Clone, Debug, Default)]
pub struct UserPatch {
    pub fullname: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
}

impl UserPatch {
    pub const FIELDS: &'static [&'static str] = &["fullname", "username", "password", "nickname"];

    pub fn is_empty(&self) -> bool {
        self.fullname.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.nickname.is_none()
    }

    pub fn into_record(self) -> Record {
        RecordBuilder::default()
            .set_opt("fullname", self.fullname)
            .set_opt("username", self.username)
            .set_opt("password", self.password)
            .set_opt("nickname", self.nickname)
            .build()
    }
}
