//! Demo backend: accepts only traffic that came through the gateway.
//!
//! Listens on :34890 and rejects any request missing `X-Kyber-Proxy: true`
//! with 401; otherwise echoes the payload back in a success wrapper.

use axum::{
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};

async fn echo(uri: Uri, headers: HeaderMap, body: Option<Json<Value>>) -> axum::response::Response {
    let proxied = headers
        .get("X-Kyber-Proxy")
        .and_then(|v| v.to_str().ok())
        == Some("true");
    if !proxied {
        tracing::warn!(path = %uri.path(), "rejected direct request");
        return (
            StatusCode::UNAUTHORIZED,
            "Unauthorized: must go through KyberLink Gateway",
        )
            .into_response();
    }

    let received = body.map(|Json(v)| v);
    tracing::info!(path = %uri.path(), "request");

    Json(json!({
        "status": "success",
        "endpoint": uri.path(),
        "msg": "Payload processed by Final Server",
        "received": received,
    }))
    .into_response()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let app = Router::new()
        .route("/test1", any(echo))
        .route("/test2", any(echo))
        .route("/test3", any(echo));

    tracing::info!("mock backend on :34890 (requires X-Kyber-Proxy)");

    let listener = tokio::net::TcpListener::bind("0.0.0.0:34890")
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server failed");
}
