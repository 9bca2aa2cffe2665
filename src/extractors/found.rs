//! Existence gate for `/:id` routes.
//!
//! `require_existing::<T>` runs as route middleware: it loads the record named by
//! the path id and either answers 404 or stores `Found<T>` in the request
//! extensions, where the handler picks it up with `Extension<Found<T>>`.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::RowStore;
use async_trait::async_trait;
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};

/// A record type that can be looked up by id for the existence gate.
#[async_trait]
pub trait Lookup: Clone + Send + Sync + Sized + 'static {
    /// Name used in not-found messages, e.g. "Article".
    const LABEL: &'static str;

    async fn lookup(store: &dyn RowStore, id: i32) -> Result<Option<Self>, AppError>;
}

/// The record the existence gate found for this request.
#[derive(Clone, Debug)]
pub struct Found<T>(pub T);

pub fn not_found<T: Lookup>(id: &str) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", T::LABEL, id))
}

pub async fn require_existing<T: Lookup>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // A non-integer id can never match a row.
    let found = match id.parse::<i32>() {
        Ok(n) => T::lookup(state.store(), n).await?,
        Err(_) => None,
    };
    let Some(record) = found else {
        return Err(not_found::<T>(&id));
    };
    req.extensions_mut().insert(Found(record));
    Ok(next.run(req).await)
}
