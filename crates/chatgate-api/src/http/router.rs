//! Axum router configuration with middleware.
//!
//! API routes live under `/api/v1/`; the page is served at `/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::{handlers, page};
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/session", get(handlers::session::get_session))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/messages", get(handlers::chat::list_messages))
        .route("/chat", post(handlers::chat::send_message));

    Router::new()
        .route("/", get(page::index))
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use axum::Json;
    use axum::http::{HeaderMap, StatusCode};
    use chrono::{Duration, Utc};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use chatgate_infra::secret::ServiceCredentials;
    use chatgate_types::config::AppConfig;
    use chatgate_types::session::SessionRecord;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Identity service and webhook in one fake upstream.
    async fn spawn_upstream() -> String {
        async fn token(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
            if body["password"] == "correct horse" {
                (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": "acc-1",
                        "refresh_token": "ref-1",
                        "expires_in": 3600,
                        "user": {"id": "user-1", "email": body["email"]}
                    })),
                )
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
                )
            }
        }

        async fn webhook(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, String) {
            let authorized = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == "Bearer acc-1");
            if !authorized {
                return (StatusCode::UNAUTHORIZED, "bad token".to_string());
            }
            match body["chatInput"].as_str() {
                Some("slow") => {
                    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                    (StatusCode::OK, json!({ "output": "finally" }).to_string())
                }
                Some("fail") => (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
                Some(text) => (StatusCode::OK, json!({ "output": format!("echo: {text}") }).to_string()),
                None => (StatusCode::BAD_REQUEST, "no input".to_string()),
            }
        }

        spawn(
            Router::new()
                .route("/auth/v1/token", post(token))
                .route("/webhook", post(webhook)),
        )
        .await
    }

    fn app_state(upstream: &str, data_dir: &Path) -> AppState {
        let credentials = ServiceCredentials {
            identity_url: upstream.to_string(),
            identity_key: SecretString::from("anon-key"),
            webhook_url: format!("{upstream}/webhook"),
        };
        AppState::from_parts(
            AppConfig::default(),
            data_dir.to_path_buf(),
            credentials,
            Some("Welcome to AI Chat".to_string()),
        )
        .unwrap()
    }

    async fn get(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
        let res = client.get(url).send().await.unwrap();
        let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
        (status, res.json().await.unwrap())
    }

    async fn post_json(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
        let res = client.post(url).json(&body).send().await.unwrap();
        let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
        (status, res.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_login_chat_logout_flow() {
        let tmp = TempDir::new().unwrap();
        let upstream = spawn_upstream().await;
        let state = app_state(&upstream, tmp.path());
        let session_file = state.session_path.clone();
        let base = spawn(build_router(state)).await;
        let client = reqwest::Client::new();

        let (status, body) = get(&client, format!("{base}/api/v1/session")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["view"], "auth");
        assert_eq!(body["data"]["title"], "Welcome to AI Chat");

        // Wrong password: stays in auth view, nothing persisted.
        let (status, body) = post_json(
            &client,
            format!("{base}/api/v1/auth/login"),
            json!({"email": "an@example.com", "password": "nope"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"][0]["code"], "INVALID_CREDENTIALS");
        assert!(!session_file.exists());

        let (status, body) = post_json(
            &client,
            format!("{base}/api/v1/auth/login"),
            json!({"email": "an@example.com", "password": "correct horse"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["session"]["view"], "chat");
        assert_eq!(body["data"]["session"]["email"], "an@example.com");
        assert!(body["data"]["session"]["chat_session_id"].is_string());
        assert!(session_file.exists());

        let (status, body) =
            post_json(&client, format!("{base}/api/v1/chat"), json!({"message": " hello "})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["reply"], "echo: hello");
        assert_eq!(body["data"]["messages"][0]["role"], "user");
        assert_eq!(body["data"]["messages"][1]["role"], "assistant");

        let (status, body) =
            post_json(&client, format!("{base}/api/v1/chat"), json!({"message": "fail"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["reply"].is_null());
        assert_eq!(body["data"]["error"]["code"], "WEBHOOK_STATUS");
        assert_eq!(body["data"]["messages"][1]["kind"], "error");

        let (_, body) = get(&client, format!("{base}/api/v1/messages")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 4);

        let (status, body) =
            post_json(&client, format!("{base}/api/v1/auth/logout"), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["session"]["view"], "auth");
        assert!(!session_file.exists());

        let (status, body) =
            post_json(&client, format!("{base}/api/v1/chat"), json!({"message": "hello"})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"][0]["code"], "NOT_LOGGED_IN");
    }

    #[tokio::test]
    async fn test_restored_session_opens_chat_view() {
        let tmp = TempDir::new().unwrap();
        let upstream = spawn_upstream().await;
        let state = app_state(&upstream, tmp.path());

        let record = SessionRecord {
            user_id: Some("user-1".to_string()),
            email: Some("an@example.com".to_string()),
            access_token: Some("acc-1".to_string()),
            refresh_token: Some("ref-1".to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            saved_at: Some(Utc::now()),
        };
        tokio::fs::write(&state.session_path, serde_json::to_vec(&record).unwrap())
            .await
            .unwrap();
        state.controller.lock().await.restore().await;

        let base = spawn(build_router(state)).await;
        let client = reqwest::Client::new();

        let (_, body) = get(&client, format!("{base}/api/v1/session")).await;
        assert_eq!(body["data"]["view"], "chat");

        let (_, body) =
            post_json(&client, format!("{base}/api/v1/chat"), json!({"message": "hi"})).await;
        assert_eq!(body["data"]["reply"], "echo: hi");
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let upstream = spawn_upstream().await;
        let base = spawn(build_router(app_state(&upstream, tmp.path()))).await;
        let client = reqwest::Client::new();

        post_json(
            &client,
            format!("{base}/api/v1/auth/login"),
            json!({"email": "an@example.com", "password": "correct horse"}),
        )
        .await;

        let (status, body) =
            post_json(&client, format!("{base}/api/v1/chat"), json!({"message": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");

        let (_, body) = get(&client, format!("{base}/api/v1/messages")).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_chat_request_still_completes() {
        let tmp = TempDir::new().unwrap();
        let upstream = spawn_upstream().await;
        let base = spawn(build_router(app_state(&upstream, tmp.path()))).await;
        let client = reqwest::Client::new();

        post_json(
            &client,
            format!("{base}/api/v1/auth/login"),
            json!({"email": "an@example.com", "password": "correct horse"}),
        )
        .await;

        let abandoned = client
            .post(format!("{base}/api/v1/chat"))
            .json(&json!({"message": "slow"}))
            .timeout(std::time::Duration::from_millis(100))
            .send()
            .await;
        assert!(abandoned.is_err());

        // Waits on the controller lock until the detached send finishes.
        let (_, body) = get(&client, format!("{base}/api/v1/messages")).await;
        let messages = body["data"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "slow");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"], "finally");
    }

    #[tokio::test]
    async fn test_malformed_bodies_use_envelope() {
        let tmp = TempDir::new().unwrap();
        let upstream = spawn_upstream().await;
        let base = spawn(build_router(app_state(&upstream, tmp.path()))).await;
        let client = reqwest::Client::new();

        let (status, body) = post_json(
            &client,
            format!("{base}/api/v1/auth/login"),
            json!({"email": "an@example.com"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");

        let res = client
            .post(format!("{base}/api/v1/auth/signup"))
            .body("email=new@example.com")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 415);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");

        let res = client
            .post(format!("{base}/api/v1/chat"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400);
        let body: Value = res.json().await.unwrap();
        assert!(body["errors"][0]["message"].is_string());
    }

    #[tokio::test]
    async fn test_signup_mismatch_is_validation_error() {
        let tmp = TempDir::new().unwrap();
        let upstream = spawn_upstream().await;
        let base = spawn(build_router(app_state(&upstream, tmp.path()))).await;

        let (status, body) = post_json(
            &reqwest::Client::new(),
            format!("{base}/api/v1/auth/signup"),
            json!({"email": "new@example.com", "password": "abc123", "confirm_password": "abc124"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["message"], "passwords do not match");
    }

    #[tokio::test]
    async fn test_page_and_health() {
        let tmp = TempDir::new().unwrap();
        let upstream = spawn_upstream().await;
        let base = spawn(build_router(app_state(&upstream, tmp.path()))).await;
        let client = reqwest::Client::new();

        let page = client.get(format!("{base}/")).send().await.unwrap();
        assert!(page.status().is_success());
        assert!(page.text().await.unwrap().contains("<title>chatgate</title>"));

        let (status, body) = get(&client, format!("{base}/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
