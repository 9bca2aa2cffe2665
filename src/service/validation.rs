//! Request body validation for create and update.

use crate::error::AppError;
use crate::store::Record;
use chrono::{DateTime, Utc};
use serde_json::Value;

pub struct RequestValidator;

/// Null and empty strings count as absent.
fn present<'a>(body: &'a Record, field: &str) -> Option<&'a Value> {
    body.get(field).filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

impl RequestValidator {
    /// A required text field: must be present, non-empty, and a string.
    pub fn required_text(body: &Record, field: &str) -> Result<String, AppError> {
        match present(body, field) {
            None => Err(Self::missing(field)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(AppError::BadRequest(format!("'{}' must be a string", field))),
        }
    }

    /// A required integer field (foreign key ids).
    pub fn required_int(body: &Record, field: &str) -> Result<i32, AppError> {
        match Self::optional_int(body, field)? {
            Some(n) => Ok(n),
            None => Err(Self::missing(field)),
        }
    }

    /// An optional text field; absent, null, and "" all yield `None`.
    pub fn optional_text(body: &Record, field: &str) -> Result<Option<String>, AppError> {
        match present(body, field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(AppError::BadRequest(format!("'{}' must be a string", field))),
        }
    }

    pub fn optional_int(body: &Record, field: &str) -> Result<Option<i32>, AppError> {
        match present(body, field) {
            None => Ok(None),
            Some(v) => v
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| AppError::BadRequest(format!("'{}' must be an integer", field))),
        }
    }

    pub fn optional_timestamp(body: &Record, field: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        match Self::optional_text(body, field)? {
            None => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(&s)
                .map(|d| Some(d.with_timezone(&Utc)))
                .map_err(|_| AppError::BadRequest(format!("'{}' must be an RFC 3339 timestamp", field))),
        }
    }

    pub fn missing(field: &str) -> AppError {
        AppError::BadRequest(format!("Missing {} in the request body", field))
    }

    /// Error for an update body that names none of the updatable fields.
    pub fn none_of(fields: &[&str]) -> AppError {
        AppError::BadRequest(format!(
            "Request body must contain either {}",
            describe_choices(fields)
        ))
    }
}

/// `'a', 'b' or 'c'`
fn describe_choices(fields: &[&str]) -> String {
    let quoted: Vec<String> = fields.iter().map(|f| format!("'{}'", f)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> Record {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn message(e: AppError) -> String {
        e.to_string()
    }

    #[test]
    fn required_text_rejects_missing_null_and_empty() {
        let b = body(json!({"title": null, "style": "", "content": 3}));
        assert_eq!(
            message(RequestValidator::required_text(&b, "title").unwrap_err()),
            "Missing title in the request body"
        );
        assert_eq!(
            message(RequestValidator::required_text(&b, "style").unwrap_err()),
            "Missing style in the request body"
        );
        assert_eq!(
            message(RequestValidator::required_text(&b, "content").unwrap_err()),
            "'content' must be a string"
        );
        assert_eq!(
            message(RequestValidator::required_text(&b, "author").unwrap_err()),
            "Missing author in the request body"
        );
    }

    #[test]
    fn integers_must_fit() {
        let b = body(json!({"a": 5, "b": "5", "c": 1.5, "d": 4_000_000_000i64}));
        assert_eq!(RequestValidator::required_int(&b, "a").unwrap(), 5);
        assert!(RequestValidator::optional_int(&b, "b").is_err());
        assert!(RequestValidator::optional_int(&b, "c").is_err());
        assert!(RequestValidator::optional_int(&b, "d").is_err());
        assert_eq!(RequestValidator::optional_int(&b, "e").unwrap(), None);
    }

    #[test]
    fn parses_timestamps() {
        let b = body(json!({"at": "2029-01-22T16:28:32.615Z", "bad": "yesterday"}));
        let at = RequestValidator::optional_timestamp(&b, "at").unwrap().unwrap();
        assert_eq!(at.timestamp(), 1863793712);
        assert!(RequestValidator::optional_timestamp(&b, "bad").is_err());
    }

    #[test]
    fn describes_choices() {
        assert_eq!(
            message(RequestValidator::none_of(&["title", "style", "content"])),
            "Request body must contain either 'title', 'style' or 'content'"
        );
        assert_eq!(
            message(RequestValidator::none_of(&["text", "date_commented"])),
            "Request body must contain either 'text' or 'date_commented'"
        );
    }
}
