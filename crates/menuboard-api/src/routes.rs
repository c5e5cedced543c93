// ============================================================================
// Menu Board API - Router
// File: crates/menuboard-api/src/routes.rs
// ============================================================================

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{info, warn};

use menuboard_shared::constants::{
    AI_DESCRIPTION_PATH, AI_IMAGE_PATH, LOGIN_PATH, MENU_PATH, UPLOADS_PATH, UPLOADS_URL_PREFIX,
};

use crate::handlers::{ai, auth, health, menu, uploads};
use crate::middleware::require_auth;
use crate::state::AppState;

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(e) => {
            warn!("Invalid CORS origin {:?} ({}), allowing any", origin, e);
            layer.allow_origin(Any)
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route(MENU_PATH, get(menu::get_menu))
        .route(LOGIN_PATH, post(auth::login));

    // Admin routes
    let protected_routes = Router::new()
        .route(MENU_PATH, post(menu::publish_menu).put(menu::publish_menu))
        .route(UPLOADS_PATH, post(uploads::upload_image))
        .route(AI_IMAGE_PATH, post(ai::generate_image))
        .route(AI_DESCRIPTION_PATH, post(ai::improve_description))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let mut router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&state.config.storage.uploads_dir));

    if let Some(static_dir) = state.config.app.static_dir.as_ref().filter(|d| d.is_dir()) {
        info!("Serving front-end from {:?}", static_dir);
        let index = ServeFile::new(static_dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(static_dir).fallback(index));
    }

    let body_limit = state.config.app.body_limit_bytes;
    let cors = cors_layer(&state.config.app.cors_origin);

    router
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(DefaultBodyLimit::max(body_limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use menuboard_core::repositories::{ContentGenerator, GeneratedImage};
    use menuboard_core::{DomainError, MenuDocument};
    use menuboard_infrastructure::{FsImageRepository, InMemoryMenuRepository};
    use menuboard_shared::config::{AiSettings, AppConfig, AppSettings, AuthSettings, StorageSettings};

    const PASSWORD: &str = "letmein";

    struct FixedGenerator;

    #[async_trait]
    impl ContentGenerator for FixedGenerator {
        async fn generate_image(
            &self,
            _request_id: &str,
            _prompt: &str,
        ) -> Result<Option<GeneratedImage>, DomainError> {
            Ok(Some(GeneratedImage::Url("https://cdn.example/dish.png".to_string())))
        }

        async fn generate_text(&self, _request_id: &str, _prompt: &str) -> Result<String, DomainError> {
            Ok("Сочное и ароматное блюдо".to_string())
        }
    }

    fn config(uploads: &Path, jwt_secret: &str) -> AppConfig {
        AppConfig {
            app: AppSettings {
                env: "test".to_string(),
                host: "127.0.0.1".to_string(),
                port: 0,
                name: "menuboard-test".to_string(),
                cors_origin: "*".to_string(),
                static_dir: None,
                body_limit_bytes: 1024 * 1024,
            },
            storage: StorageSettings {
                data_path: uploads.join("menu.json"),
                uploads_dir: uploads.to_path_buf(),
                max_upload_bytes: 64,
            },
            auth: AuthSettings {
                admin_password: PASSWORD.to_string(),
                jwt_secret: jwt_secret.to_string(),
                token_expiry_days: 30,
            },
            ai: AiSettings {
                api_key: String::new(),
                base_url: "http://localhost".to_string(),
                openai_base_url: None,
                image_model: "img".to_string(),
                text_model: "txt".to_string(),
                description_language: "Russian".to_string(),
                timeout_seconds: 5,
            },
        }
    }

    fn app_with(uploads: &Path, jwt_secret: &str, generator: Option<Arc<dyn ContentGenerator>>) -> Router {
        let state = AppState::new(
            config(uploads, jwt_secret),
            Arc::new(InMemoryMenuRepository::new()),
            Arc::new(FsImageRepository::new(uploads)),
            generator,
        );
        build_router(state)
    }

    fn app(uploads: &Path) -> Router {
        app_with(uploads, "secret", None)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn login(app: &Router) -> String {
        let (status, body) =
            send(app, json_request("POST", "/api/login", None, json!({ "password": PASSWORD }))).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&app(dir.path()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_empty_store_returns_no_content() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder().uri("/api/menu").body(Body::empty()).unwrap();
        let (status, body) = send(&app(dir.path()), request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let (status, body) =
            send(&app, json_request("POST", "/api/login", None, json!({ "password": "nope" }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid_password");

        let (status, _) = send(&app, json_request("POST", "/api/login", None, json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_publish_requires_token() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let doc = serde_json::to_value(MenuDocument::seed()).unwrap();

        let (status, body) = send(&app, json_request("POST", "/api/menu", None, doc.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "missing_token");

        let (status, body) = send(&app, json_request("POST", "/api/menu", Some("forged"), doc)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid_token");
    }

    #[tokio::test]
    async fn test_missing_secret_is_server_not_configured() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(dir.path(), "", None);
        let doc = serde_json::to_value(MenuDocument::seed()).unwrap();

        let (status, body) = send(&app, json_request("PUT", "/api/menu", Some("x"), doc)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "server_not_configured");

        let (status, body) =
            send(&app, json_request("POST", "/api/login", None, json!({ "password": PASSWORD }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "server_not_configured");
    }

    #[tokio::test]
    async fn test_publish_then_read_back_with_increasing_stamp() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let token = login(&app).await;
        let doc = serde_json::to_value(MenuDocument::seed()).unwrap();

        let (status, first) =
            send(&app, json_request("POST", "/api/menu", Some(&token), doc.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let first_stamp = first["lastUpdated"].as_i64().unwrap();

        let (status, second) = send(&app, json_request("PUT", "/api/menu", Some(&token), doc)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(second["lastUpdated"].as_i64().unwrap() > first_stamp);

        let request = Request::builder().uri("/api/menu").body(Body::empty()).unwrap();
        let (status, stored) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored, second);
    }

    #[tokio::test]
    async fn test_publish_rejects_bad_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            json_request("POST", "/api/menu", Some(&token), json!({ "categories": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_payload");

        let mut doc = serde_json::to_value(MenuDocument::seed()).unwrap();
        let dup = doc["promotions"][0].clone();
        doc["promotions"].as_array_mut().unwrap().push(dup);
        let (status, body) = send(&app, json_request("POST", "/api/menu", Some(&token), doc)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "duplicate_id");
    }

    #[tokio::test]
    async fn test_upload_stores_and_serves_image() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let token = login(&app).await;

        // "hello" in base64
        let body = json!({ "dataUrl": "data:image/png;base64,aGVsbG8=" });
        let (status, body) = send(&app, json_request("POST", "/api/uploads", Some(&token), body)).await;
        assert_eq!(status, StatusCode::OK);
        let url = body["imageUrl"].as_str().unwrap().to_string();
        assert!(url.starts_with("/uploads/"));

        let response = app
            .clone()
            .oneshot(Request::builder().uri(&url).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_upload_errors() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let token = login(&app).await;

        let cases = [
            ("not a data url", StatusCode::BAD_REQUEST, "invalid_data_url"),
            ("data:image/gif;base64,aGVsbG8=", StatusCode::BAD_REQUEST, "unsupported_image_type"),
        ];
        for (data_url, status, code) in cases {
            let body = json!({ "dataUrl": data_url });
            let (got, body) = send(&app, json_request("POST", "/api/uploads", Some(&token), body)).await;
            assert_eq!(got, status);
            assert_eq!(body["error"], code);
        }

        let big = format!("data:image/png;base64,{}", "A".repeat(200));
        let (status, body) = send(
            &app,
            json_request("POST", "/api/uploads", Some(&token), json!({ "dataUrl": big })),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "image_too_large");
    }

    #[tokio::test]
    async fn test_ai_not_configured() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let token = login(&app).await;

        let body = json!({ "name": "Плов", "description": "" });
        let (status, body) =
            send(&app, json_request("POST", "/api/ai/description", Some(&token), body)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "ai_not_configured");
    }

    #[tokio::test]
    async fn test_ai_routes_with_generator() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(dir.path(), "secret", Some(Arc::new(FixedGenerator)));
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            json_request("POST", "/api/ai/description", Some(&token), json!({ "name": "Плов" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], "Сочное и ароматное блюдо");

        let (status, body) = send(
            &app,
            json_request("POST", "/api/ai/image", Some(&token), json!({ "name": "Плов" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["imageUrl"], "https://cdn.example/dish.png");

        let (status, body) = send(
            &app,
            json_request("POST", "/api/ai/image", Some(&token), json!({ "description": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing_name");
    }
}
