//! End-to-end API tests over the in-memory database engine.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use firmdesk_auth::{AuthConfig, Mailer, RecordingMailer};
use firmdesk_server::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tower::ServiceExt;

async fn test_app() -> (Router, Arc<RecordingMailer>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    firmdesk_db::run_migrations(&db).await.unwrap();

    let mailer = Arc::new(RecordingMailer::new());
    let state = Arc::new(AppState::new(
        db,
        mailer.clone() as Arc<dyn Mailer>,
        AuthConfig {
            reset_secret: "test-secret".into(),
            ..AuthConfig::default()
        },
    ));
    (firmdesk_server::router(state), mailer)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed(request: Request<Body>, token: &str) -> Request<Body> {
    let (mut parts, body) = request.into_parts();
    parts.headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    Request::from_parts(parts, body)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user through the API and return a session token.
async fn register_and_login(app: &Router, username: &str, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({
                "username": username,
                "surname": "Иванов",
                "name": "Иван",
                "patronymic": "Иванович",
                "email": email,
                "password": "Sup3rSecret!",
                "password_confirm": "Sup3rSecret!",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "username": username, "password": "Sup3rSecret!" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _mailer) = test_app().await;

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn records_require_a_token() {
    let (app, _mailer) = test_app().await;

    let response = app
        .oneshot(Request::get("/api/clients").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_create_client() {
    let (app, _mailer) = test_app().await;
    let token = register_and_login(&app, "ivanov", "ivanov@example.com").await;

    let response = app
        .clone()
        .oneshot(authed(
            post_json(
                "/api/clients",
                json!({
                    "surname": "Петров",
                    "name": "Пётр",
                    "email": "petrov@example.com",
                }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let client = body_json(response).await;
    assert_eq!(client["surname"], "Петров");

    let response = app
        .oneshot(authed(
            Request::get("/api/clients").body(Body::empty()).unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_client_is_a_422_with_field_errors() {
    let (app, _mailer) = test_app().await;
    let token = register_and_login(&app, "ivanov", "ivanov@example.com").await;

    let response = app
        .oneshot(authed(
            post_json(
                "/api/clients",
                json!({
                    "surname": "petrov",
                    "name": "Пётр",
                    "email": "not-an-email",
                }),
            ),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"surname"));
    assert!(fields.contains(&"email"));
}

#[tokio::test]
async fn users_cannot_see_each_others_records() {
    let (app, _mailer) = test_app().await;
    let token_a = register_and_login(&app, "ivanov", "ivanov@example.com").await;
    let token_b = register_and_login(&app, "petrov", "petrov@example.com").await;

    let response = app
        .clone()
        .oneshot(authed(
            post_json(
                "/api/clients",
                json!({
                    "surname": "Сидоров",
                    "name": "Семён",
                    "email": "sidorov@example.com",
                }),
            ),
            &token_a,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let client = body_json(response).await;
    let id = client["id"].as_str().unwrap().to_string();

    // The other user's list is empty and direct access is forbidden.
    let response = app
        .clone()
        .oneshot(authed(
            Request::get("/api/clients").body(Body::empty()).unwrap(),
            &token_b,
        ))
        .await
        .unwrap();
    let list = body_json(response).await;
    assert_eq!(list["total"], 0);

    let response = app
        .oneshot(authed(
            Request::get(format!("/api/clients/{id}"))
                .body(Body::empty())
                .unwrap(),
            &token_b,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn export_returns_an_attachment() {
    let (app, _mailer) = test_app().await;
    let token = register_and_login(&app, "ivanov", "ivanov@example.com").await;

    let response = app
        .clone()
        .oneshot(authed(
            post_json(
                "/api/clients",
                json!({
                    "surname": "Петров",
                    "name": "Пётр",
                    "email": "petrov@example.com",
                }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(authed(
            Request::get("/api/clients/export/pdf")
                .body(Body::empty())
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert!(
        response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("clients.pdf")
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..5], b"%PDF-");
}

#[tokio::test]
async fn unknown_export_format_is_404() {
    let (app, _mailer) = test_app().await;
    let token = register_and_login(&app, "ivanov", "ivanov@example.com").await;

    let response = app
        .oneshot(authed(
            Request::get("/api/clients/export/csv")
                .body(Body::empty())
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn password_recovery_round_trip() {
    let (app, mailer) = test_app().await;
    register_and_login(&app, "ivanov", "ivanov@example.com").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/password-recovery",
            json!({ "email": "ivanov@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    let token = sent[0]
        .body
        .lines()
        .find(|l| l.starts_with("http"))
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/password-reset",
            json!({
                "token": token,
                "password": "N3wSecret!",
                "password_confirm": "N3wSecret!",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The new password is live.
    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "username": "ivanov", "password": "N3wSecret!" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn recovery_for_unknown_email_looks_identical() {
    let (app, mailer) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/auth/password-recovery",
            json!({ "email": "nobody@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn logout_ends_the_session() {
    let (app, _mailer) = test_app().await;
    let token = register_and_login(&app, "ivanov", "ivanov@example.com").await;

    let response = app
        .clone()
        .oneshot(authed(
            Request::post("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(authed(
            Request::get("/api/clients").body(Body::empty()).unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
