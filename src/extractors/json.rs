//! JSON object body extractor with rejections in the API's error shape.

use crate::error::AppError;
use crate::store::Record;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::Value;

/// Request body parsed as a JSON object.
#[derive(Clone, Debug)]
pub struct JsonObject(pub Record);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(AppError::BadRequest("Request body must be a JSON object".into())),
        }
    }
}
