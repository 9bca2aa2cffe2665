//! User handlers. Passwords are accepted on write and never returned.

use crate::error::AppError;
use crate::extractors::{Found, JsonObject};
use crate::model::{NewUser, User, UserPatch};
use crate::routes::USERS_PATH;
use crate::service::{RequestValidator, UsersService};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = UsersService::list_all(state.store()).await?;
    Ok(Json(users.into_iter().map(User::sanitized).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let new_user = NewUser {
        fullname: RequestValidator::required_text(&body, "fullname")?,
        username: RequestValidator::required_text(&body, "username")?,
        password: RequestValidator::optional_text(&body, "password")?,
        nickname: RequestValidator::optional_text(&body, "nickname")?,
    };
    let user = UsersService::insert(state.store(), new_user).await?;
    tracing::info!(id = user.id, "user created");
    let location = format!("{}/{}", USERS_PATH, user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user.sanitized()),
    ))
}

pub async fn read(Extension(Found(user)): Extension<Found<User>>) -> Json<User> {
    Json(user.sanitized())
}

pub async fn update(
    State(state): State<AppState>,
    Extension(Found(user)): Extension<Found<User>>,
    JsonObject(body): JsonObject,
) -> Result<StatusCode, AppError> {
    let patch = UserPatch {
        fullname: RequestValidator::optional_text(&body, "fullname")?,
        username: RequestValidator::optional_text(&body, "username")?,
        password: RequestValidator::optional_text(&body, "password")?,
        nickname: RequestValidator::optional_text(&body, "nickname")?,
    };
    if patch.is_empty() {
        return Err(RequestValidator::none_of(UserPatch::FIELDS));
    }
    UsersService::update(state.store(), user.id, patch).await?;
    tracing::info!(id = user.id, "user updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(Found(user)): Extension<Found<User>>,
) -> Result<StatusCode, AppError> {
    UsersService::delete(state.store(), user.id).await?;
    tracing::info!(id = user.id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
