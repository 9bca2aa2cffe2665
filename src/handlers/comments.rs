//! Comment handlers.

use crate::error::AppError;
use crate::extractors::{Found, JsonObject};
use crate::model::{Comment, CommentPatch, NewComment};
use crate::routes::COMMENTS_PATH;
use crate::service::{CommentsService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = CommentsService::list_all(state.store()).await?;
    Ok(Json(comments.into_iter().map(Comment::sanitized).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let new_comment = NewComment {
        text: RequestValidator::required_text(&body, "text")?,
        article_id: RequestValidator::required_int(&body, "article_id")?,
        user_id: RequestValidator::required_int(&body, "user_id")?,
    };
    let comment = CommentsService::insert(state.store(), new_comment).await?;
    tracing::info!(id = comment.id, article_id = comment.article_id, "comment created");
    let location = format!("{}/{}", COMMENTS_PATH, comment.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(comment.sanitized()),
    ))
}

pub async fn read(Extension(Found(comment)): Extension<Found<Comment>>) -> Json<Comment> {
    Json(comment.sanitized())
}

pub async fn update(
    State(state): State<AppState>,
    Extension(Found(comment)): Extension<Found<Comment>>,
    JsonObject(body): JsonObject,
) -> Result<StatusCode, AppError> {
    let patch = CommentPatch {
        text: RequestValidator::optional_text(&body, "text")?,
        date_commented: RequestValidator::optional_timestamp(&body, "date_commented")?,
    };
    if patch.is_empty() {
        return Err(RequestValidator::none_of(CommentPatch::FIELDS));
    }
    CommentsService::update(state.store(), comment.id, patch).await?;
    tracing::info!(id = comment.id, "comment updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(Found(comment)): Extension<Found<Comment>>,
) -> Result<StatusCode, AppError> {
    CommentsService::delete(state.store(), comment.id).await?;
    tracing::info!(id = comment.id, "comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
