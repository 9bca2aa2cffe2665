//! Shared helpers for API integration tests.

// Each test binary compiles this module separately; not every helper is used in each.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use blogful::model::{decode, Article};
use blogful::schema::{ARTICLES, USERS};
use blogful::{build_app, AppConfig, AppState, MemoryRowStore, Record, RowStore, RuntimeMode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn RowStore>,
}

impl TestApp {
    pub fn with_store(store: Arc<dyn RowStore>, mode: RuntimeMode) -> Self {
        let state = AppState::new(store.clone(), AppConfig::for_mode(mode));
        TestApp {
            router: build_app(state),
            store,
        }
    }

    pub fn memory() -> Self {
        Self::memory_in(RuntimeMode::Test)
    }

    pub fn memory_in(mode: RuntimeMode) -> Self {
        Self::with_store(Arc::new(MemoryRowStore::new()), mode)
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn insert(&self, table: &blogful::schema::TableDef, v: Value) -> Record {
        self.store.insert_into(table, record(v)).await.unwrap()
    }

    /// Seeds `make_users_array` and `make_articles_array`; returns the articles as
    /// the API serializes them.
    pub async fn seed_articles(&self) -> Vec<Value> {
        for user in make_users_array() {
            self.insert(&USERS, user).await;
        }
        let mut out = Vec::new();
        for article in make_articles_array() {
            let row = self.insert(&ARTICLES, article).await;
            out.push(article_json(row));
        }
        out
    }
}

pub fn record(v: Value) -> Record {
    match v {
        Value::Object(m) => m,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// A stored row as the API renders it (typed, unsanitized).
pub fn article_json(row: Record) -> Value {
    let article: Article = decode(row).unwrap();
    serde_json::to_value(article).unwrap()
}

pub fn make_users_array() -> Vec<Value> {
    vec![
        json!({"fullname": "Sam Gamgee", "username": "sam.gamgee", "password": "secret", "nickname": "Sam"}),
        json!({"fullname": "Peregrin Took", "username": "peregrin.took", "password": "secret", "nickname": "Pippin"}),
    ]
}

pub fn make_articles_array() -> Vec<Value> {
    vec![
        json!({
            "title": "First test post!",
            "style": "How-to",
            "content": "Lorem ipsum dolor sit amet, consectetur adipisicing elit.",
            "author": 1
        }),
        json!({
            "title": "Second test post!",
            "style": "News",
            "content": "Natus consequuntur deserunt commodi, nobis qui inventore corrupti iusto aliquid.",
            "author": 2
        }),
        json!({
            "title": "Third test post!",
            "style": "Listicle",
            "content": "Possimus, voluptate? Necessitatibus dolores ea nesciunt.",
        }),
        json!({
            "title": "Fourth test post!",
            "style": "Story",
            "content": "Cum, exercitationem cupiditate dignissimos est perspiciatis.",
            "author": 1
        }),
    ]
}

pub const MALICIOUS_TITLE: &str = r#"Naughty naughty very naughty <script>alert("xss");</script>"#;
pub const SAFE_TITLE: &str = r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#;
pub const MALICIOUS_CONTENT: &str = r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#;
pub const SAFE_CONTENT: &str = r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#;

pub fn make_malicious_article() -> Value {
    json!({
        "title": MALICIOUS_TITLE,
        "style": "How-to",
        "content": MALICIOUS_CONTENT,
    })
}
