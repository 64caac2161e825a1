#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::Multipart,
    http::Request,
    response::Response,
    routing::post,
    Json, Router,
};
use quiz_creator::{config::Config, routes, AppState};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use url::Url;

pub const BOUNDARY: &str = "quiz-creator-test-boundary";

/// Serves `generator` on a loopback port and returns its base URL.
pub async fn spawn_generator(generator: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, generator).await.expect("stub server");
    });
    Url::parse(&format!("http://{}", addr)).expect("stub url")
}

/// A generator that answers every upload carrying a `pdf` part with `reply`.
pub fn json_generator(reply: JsonValue) -> Router {
    Router::new().route(
        "/generate-questions",
        post(move |mut multipart: Multipart| {
            let reply = reply.clone();
            async move {
                let mut saw_pdf = false;
                while let Ok(Some(field)) = multipart.next_field().await {
                    if field.name() == Some("pdf") {
                        saw_pdf = true;
                    }
                }
                if saw_pdf {
                    Json(reply)
                } else {
                    Json(json!({ "error": "No PDF uploaded" }))
                }
            }
        }),
    )
}

pub async fn setup_app(generator: Router) -> (Router, AppState) {
    let base = spawn_generator(generator).await;
    let state = AppState::with_config(Config::for_generator(base)).expect("app state");
    (routes::router(state.clone()), state)
}

pub fn pdf_upload(field: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"lecture.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         %PDF-1.4 test document\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        field = field,
    );
    Request::builder()
        .method("POST")
        .uri("/api/generate-questions")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(resp: Response) -> JsonValue {
    serde_json::from_str(&body_text(resp).await).unwrap()
}
