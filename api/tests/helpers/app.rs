use api::{auth::generate_jwt, routes::routes, state::AppState};
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use common::config::AppConfig;
use serde_json::Value;
use services::auth_service::Role;
use tower::ServiceExt;

/// Fresh state on a fresh in-memory store, with a deterministic JWT secret.
pub fn test_state() -> AppState {
    dotenvy::dotenv().ok();
    AppConfig::set_jwt_secret("test-secret");
    AppState::in_memory(None)
}

pub fn make_test_app(state: AppState) -> Router {
    Router::new().nest("/api", routes(state))
}

pub fn teacher_token(email: &str) -> String {
    generate_jwt(email, Role::Teacher).0
}

pub fn student_token(email: &str) -> String {
    generate_jwt(email, Role::Student).0
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
