use accounts_backend::config::app_conf::{AppConfig, Environment};
use accounts_backend::config::JwtConfig;
use accounts_backend::handler::auth_handler::AuthState;
use accounts_backend::middlewares::auth_middleware::SessionAuthState;
use accounts_backend::repository::user_repo::{SqliteUserRepository, UserRepository};
use accounts_backend::router::auth_router::auth_router;
use accounts_backend::router::user_router::user_router;
use accounts_backend::service::auth_service::{AuthService, AuthServiceImpl};
use accounts_backend::service::user_service::{UserService, UserServiceImpl};
use accounts_backend::util::jwt::SessionTokenUtilsImpl;
use axum::body::{to_bytes, Body};
use axum::http::{header::SET_COOKIE, Request, StatusCode};
use axum::Router;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt; // for .oneshot()

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    SqliteUserRepository::migrate(&pool).await.expect("migrate");

    let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool));
    let token_utils = Arc::new(SessionTokenUtilsImpl::new(JwtConfig::default()));
    let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(user_repo.clone()));
    let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(user_repo));

    let auth_state = Arc::new(AuthState {
        auth_service,
        token_utils: token_utils.clone(),
        config: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: Environment::Development,
        },
    });
    let session_auth_state = Arc::new(SessionAuthState { token_utils });

    Router::new().nest(
        "/api",
        auth_router(auth_state).merge(user_router(user_service, session_auth_state)),
    )
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_sign_up_creates_user_and_sets_cookie() {
    let app = test_app().await;

    let resp = app
        .oneshot(json_request(
            "/api/auth/sign-up",
            json!({"name": "Ann", "email": "a@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);

    let cookie = resp
        .headers()
        .get(SET_COOKIE)
        .expect("session cookie missing")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let body = response_json(resp).await;
    assert_eq!(body["user"]["name"], "Ann");
    assert_eq!(body["user"]["email"], "a@x.com");
    // Role defaults to user when absent from the payload
    assert_eq!(body["user"]["role"], "user");
    // The DTO never carries the password in any form
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_sign_up_normalizes_email() {
    let app = test_app().await;

    let resp = app
        .oneshot(json_request(
            "/api/auth/sign-up",
            json!({"name": "Ann", "email": "  Ann@Example.COM ", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = response_json(resp).await;
    assert_eq!(body["user"]["email"], "ann@example.com");
}

#[tokio::test]
async fn test_sign_up_with_explicit_role() {
    let app = test_app().await;

    let resp = app
        .oneshot(json_request(
            "/api/auth/sign-up",
            json!({"name": "Root", "email": "root@x.com", "password": "secret1", "role": "admin"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = response_json(resp).await;
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn test_sign_up_invalid_payload_returns_field_errors() {
    let app = test_app().await;

    let resp = app
        .oneshot(json_request(
            "/api/auth/sign-up",
            json!({"name": "A", "email": "nope", "password": "x"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = response_json(resp).await;
    let details = body["details"].as_array().expect("details list");
    assert!(details.len() >= 3);
}

#[tokio::test]
async fn test_sign_up_unknown_role_rejected() {
    let app = test_app().await;

    let resp = app
        .oneshot(json_request(
            "/api/auth/sign-up",
            json!({"name": "Ann", "email": "a@x.com", "password": "secret1", "role": "superuser"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_up_duplicate_email_conflicts() {
    let app = test_app().await;

    let payload = json!({"name": "Ann", "email": "dup@x.com", "password": "secret1"});
    let first = app
        .clone()
        .oneshot(json_request("/api/auth/sign-up", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("/api/auth/sign-up", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_sign_in_success_sets_cookie() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request(
            "/api/auth/sign-up",
            json!({"name": "Ann", "email": "a@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    let resp = app
        .oneshot(json_request(
            "/api/auth/sign-in",
            json!({"email": "a@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("token="));

    let body = response_json(resp).await;
    assert_eq!(body["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request(
            "/api/auth/sign-up",
            json!({"name": "Ann", "email": "a@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    // Wrong password for an existing account
    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "/api/auth/sign-in",
            json!({"email": "a@x.com", "password": "wrong-password"}),
        ))
        .await
        .unwrap();
    // Account that does not exist at all
    let unknown_email = app
        .oneshot(json_request(
            "/api/auth/sign-in",
            json!({"email": "ghost@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let body_wrong = response_json(wrong_password).await;
    let body_unknown = response_json(unknown_email).await;
    assert_eq!(body_wrong, body_unknown);
}

#[tokio::test]
async fn test_sign_out_clears_cookie() {
    let app = test_app().await;

    let resp = app
        .oneshot(json_request("/api/auth/sign-out", json!({})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("Max-Age=0"));

    let body = response_json(resp).await;
    assert!(body["message"].is_string());
}
