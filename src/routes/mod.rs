//! Routers: one per resource, plus health/readiness/version.
//!
//! Each resource router has a collection route (`/`) and an item route (`/:id`);
//! the item route sits behind the existence gate for its record type.

mod common;

pub use common::common_routes;

use crate::extractors::{require_existing, Lookup};
use crate::handlers::{articles, comments, users};
use crate::model::{Article, Comment, User};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, MethodRouter},
    Router,
};

pub const ARTICLES_PATH: &str = "/api/articles";
pub const USERS_PATH: &str = "/api/users";
pub const COMMENTS_PATH: &str = "/api/comments";

fn resource_routes<T: Lookup>(
    state: AppState,
    collection: MethodRouter<AppState>,
    item: MethodRouter<AppState>,
) -> Router {
    let item = Router::new()
        .route("/:id", item)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_existing::<T>,
        ));
    Router::new()
        .route("/", collection)
        .merge(item)
        .with_state(state)
}

pub fn articles_routes(state: AppState) -> Router {
    resource_routes::<Article>(
        state,
        get(articles::list).post(articles::create),
        get(articles::read)
            .patch(articles::update)
            .delete(articles::delete),
    )
}

pub fn users_routes(state: AppState) -> Router {
    resource_routes::<User>(
        state,
        get(users::list).post(users::create),
        get(users::read).patch(users::update).delete(users::delete),
    )
}

pub fn comments_routes(state: AppState) -> Router {
    resource_routes::<Comment>(
        state,
        get(comments::list).post(comments::create),
        get(comments::read)
            .patch(comments::update)
            .delete(comments::delete),
    )
}
