//! Application shell: mounts the resource routers and applies cross-cutting layers.
//!
//! Layers, outermost first: request tracing, permissive CORS, security headers,
//! server error redaction (production only), panic catching, body size limit.

use crate::config::AppConfig;
use crate::error::server_error_response;
use crate::response::{server_error_body, REDACTED_SERVER_ERROR};
use crate::routes::{
    articles_routes, comments_routes, common_routes, users_routes, ARTICLES_PATH, COMMENTS_PATH,
    USERS_PATH,
};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

fn security_headers() -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (header::X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off")),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        ),
        (
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
        (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            HeaderValue::from_static("none"),
        ),
    ]
}

/// In production, replace the detail of any 500 with a fixed message.
async fn redact_server_errors(
    State(config): State<Arc<AppConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    if config.mode.is_production() && response.status() == StatusCode::INTERNAL_SERVER_ERROR {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(server_error_body(REDACTED_SERVER_ERROR)),
        )
            .into_response();
    }
    response
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    server_error_response(&detail)
}

/// Full application router for the given state.
pub fn build_app(state: AppState) -> Router {
    let config = state.config.clone();
    let mut app = Router::new()
        .merge(common_routes(state.clone()))
        .nest(ARTICLES_PATH, articles_routes(state.clone()))
        .nest(USERS_PATH, users_routes(state.clone()))
        .nest(COMMENTS_PATH, comments_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(config, redact_server_errors));
    for (name, value) in security_headers() {
        app = app.layer(SetResponseHeaderLayer::if_not_present(name, value));
    }
    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
