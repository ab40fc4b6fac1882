use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use recipe_reformat::{
    api::models::Recipe,
    app::{App, Notice},
    client::ParseClient,
    error::ClientError,
    view,
};

async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    addr
}

fn endpoint(addr: SocketAddr) -> String {
    format!("http://{addr}/api/v1/parse")
}

/// Parse endpoint that always answers with `body`.
async fn respond_with(body: Value) -> SocketAddr {
    let router = Router::new().route(
        "/api/v1/parse",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    spawn(router).await
}

#[tokio::test]
async fn posts_url_as_json() {
    let captured: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();
    let router = Router::new().route(
        "/api/v1/parse",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                *sink.lock().unwrap() = Some((content_type, body));
                Json(json!({
                    "ingredients": ["1 cup flour"],
                    "steps": ["Mix", "Bake"],
                    "author": "Jane"
                }))
            }
        }),
    );
    let addr = spawn(router).await;

    let client = ParseClient::new(endpoint(addr));
    let recipe = client.parse_website("https://example.com/recipe").await.unwrap();

    assert_eq!(
        recipe,
        Recipe {
            ingredients: vec!["1 cup flour".into()],
            steps: vec!["Mix".into(), "Bake".into()],
            author: "Jane".into(),
        }
    );

    let (content_type, body) = captured.lock().unwrap().clone().unwrap();
    assert_eq!(content_type, "application/json");
    assert_eq!(body, json!({ "url": "https://example.com/recipe" }));
}

#[tokio::test]
async fn error_status_is_generic_failure() {
    let router = Router::new().route(
        "/api/v1/parse",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))) }),
    );
    let addr = spawn(router).await;

    let err = ParseClient::new(endpoint(addr))
        .parse_website("https://example.com/recipe")
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::ParseFailed);
    assert_eq!(err.to_string(), "Failed to parse recipe");
}

#[tokio::test]
async fn non_json_body_is_failure() {
    let router = Router::new().route("/api/v1/parse", post(|| async { "<html>oops</html>" }));
    let addr = spawn(router).await;

    let result = ParseClient::new(endpoint(addr))
        .parse_website("https://example.com/recipe")
        .await;
    assert_eq!(result, Err(ClientError::ParseFailed));
}

#[tokio::test]
async fn unreachable_service_is_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = ParseClient::new(endpoint(addr))
        .parse_website("https://example.com/recipe")
        .await;
    assert_eq!(result, Err(ClientError::ParseFailed));
}

#[tokio::test]
async fn example_flows_into_panels() {
    let addr = respond_with(json!({
        "ingredients": ["1 cup flour"],
        "steps": ["Mix", "Bake"],
        "author": "Jane"
    }))
    .await;
    let client = ParseClient::new(endpoint(addr));
    let mut app = App::new();
    app.set_url("https://example.com/recipe");

    app.handle_parse(&client).await.unwrap();

    assert_eq!(view::ingredients_panel(&app).lines, vec!["[ ] 1 cup flour"]);
    assert_eq!(view::steps_panel(&app).lines, vec!["1. Mix", "2. Bake"]);
    assert_eq!(view::author_panel(&app).lines, vec!["Jane"]);
    assert!(!app.is_loading());
}

#[tokio::test]
async fn missing_fields_render_placeholders() {
    let addr = respond_with(json!({ "ingredients": ["Salt"] })).await;
    let client = ParseClient::new(endpoint(addr));
    let mut app = App::new();
    app.set_url("https://example.com/recipe");

    app.handle_parse(&client).await.unwrap();

    assert_eq!(view::ingredients_panel(&app).lines, vec!["[ ] Salt"]);
    assert_eq!(view::steps_panel(&app).lines, vec![view::NO_STEPS]);
    assert_eq!(view::author_panel(&app).lines, vec![view::UNKNOWN_AUTHOR]);
}

#[tokio::test]
async fn failed_request_keeps_displayed_results() {
    let good = respond_with(json!({ "ingredients": ["Salt"], "steps": ["Season"], "author": "Ann" })).await;
    let bad = spawn(Router::new().route(
        "/api/v1/parse",
        post(|| async { StatusCode::BAD_GATEWAY }),
    ))
    .await;

    let mut app = App::new();
    app.set_url("https://example.com/recipe");
    app.handle_parse(&ParseClient::new(endpoint(good))).await.unwrap();
    let before = view::render(&app);

    let notice = app.handle_parse(&ParseClient::new(endpoint(bad))).await.unwrap_err();

    assert_eq!(notice, Notice::Failed("Failed to parse recipe".into()));
    assert_eq!(view::render(&app), before);
    assert!(app.trigger_enabled());
}
