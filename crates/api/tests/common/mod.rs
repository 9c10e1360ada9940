#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use tankobon_api::config::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
use tankobon_api::router::build_app_router;
use tankobon_api::state::AppState;

const BOUNDARY: &str = "tankobon-test-boundary";

pub const TSV_HEADER: &str =
    "Name\tQuantity\tTotalVolumes\tPending\tCompleted\tPriority\tFormat\tPublisher";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        import_timeout_secs: 300,
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
    }
}

/// Build the application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, CancellationToken::new(), test_config())
}

pub fn build_test_app_with_shutdown(pool: PgPool, shutdown: CancellationToken) -> Router {
    build_test_app_with(pool, shutdown, test_config())
}

pub fn build_test_app_with(pool: PgPool, shutdown: CancellationToken, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        shutdown,
    };
    build_app_router(state, &config)
}

/// A pool that never connects, for requests rejected before any query runs.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://tankobon@localhost/unreachable")
        .unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body)).await
}

/// Encode a single file as a `multipart/form-data` body under the field
/// `file`. Pair with [`multipart_content_type`].
pub fn multipart_body(file_name: &str, contents: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/tab-separated-values\r\n\
         \r\n\
         {contents}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// POST a single file as `multipart/form-data` under the field `file`.
pub async fn post_file(app: Router, uri: &str, file_name: &str, contents: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body(file_name, contents)))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a TSV document: header row followed by `rows`.
pub fn tsv(rows: &[&str]) -> String {
    std::iter::once(TSV_HEADER)
        .chain(rows.iter().copied())
        .collect::<Vec<_>>()
        .join("\n")
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}
