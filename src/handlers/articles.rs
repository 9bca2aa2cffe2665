//! Article handlers: list, create, read, update, delete.
//! Id-scoped handlers receive the article already loaded by the existence gate.

use crate::error::AppError;
use crate::extractors::{Found, JsonObject};
use crate::model::{Article, ArticlePatch, NewArticle};
use crate::routes::ARTICLES_PATH;
use crate::service::{ArticlesService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Article>>, AppError> {
    let articles = ArticlesService::list_all(state.store()).await?;
    Ok(Json(articles.into_iter().map(Article::sanitized).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let new_article = NewArticle {
        title: RequestValidator::required_text(&body, "title")?,
        style: RequestValidator::required_text(&body, "style")?,
        content: RequestValidator::required_text(&body, "content")?,
        author: RequestValidator::optional_int(&body, "author")?,
    };
    let article = ArticlesService::insert(state.store(), new_article).await?;
    tracing::info!(id = article.id, "article created");
    let location = format!("{}/{}", ARTICLES_PATH, article.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(article.sanitized()),
    ))
}

pub async fn read(Extension(Found(article)): Extension<Found<Article>>) -> Json<Article> {
    Json(article.sanitized())
}

pub async fn update(
    State(state): State<AppState>,
    Extension(Found(article)): Extension<Found<Article>>,
    JsonObject(body): JsonObject,
) -> Result<StatusCode, AppError> {
    let patch = ArticlePatch {
        title: RequestValidator::optional_text(&body, "title")?,
        style: RequestValidator::optional_text(&body, "style")?,
        content: RequestValidator::optional_text(&body, "content")?,
    };
    if patch.is_empty() {
        return Err(RequestValidator::none_of(ArticlePatch::FIELDS));
    }
    ArticlesService::update(state.store(), article.id, patch).await?;
    tracing::info!(id = article.id, "article updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(Found(article)): Extension<Found<Article>>,
) -> Result<StatusCode, AppError> {
    ArticlesService::delete(state.store(), article.id).await?;
    tracing::info!(id = article.id, "article deleted");
    Ok(StatusCode::NO_CONTENT)
}
