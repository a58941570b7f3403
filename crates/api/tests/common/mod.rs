#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use panotour_api::auth::jwt::{generate_access_token, JwtConfig};
use panotour_api::auth::password::hash_password;
use panotour_api::config::ServerConfig;
use panotour_api::router::build_app_router;
use panotour_api::state::AppState;
use panotour_api::storage::UploadStore;
use panotour_db::models::user::{CreateUser, User};
use panotour_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "correct-horse-battery";
const BOUNDARY: &str = "panotour-test-boundary";

/// Build a test `ServerConfig` with safe defaults, storing uploads in
/// `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
        },
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 10 * 1024 * 1024,
        public_base_url: "http://localhost:3000".to_string(),
        bootstrap_admin: None,
    }
}

/// The application router plus the temporary upload directory it writes to.
///
/// The directory is removed when this value is dropped.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub uploads: TempDir,
}

impl TestApp {
    /// A fresh handle on the router; `oneshot` consumes it.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Number of files currently in the upload directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.uploads.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub fn token_for(&self, user: &User) -> String {
        generate_access_token(user.id, &user.email, &self.config.jwt).unwrap()
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let config = test_config(uploads.path());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploads: UploadStore::new(uploads.path()),
        mailer: None,
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        uploads,
    }
}

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@test.com"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn with_auth(builder: axum::http::request::Builder, token: &str) -> axum::http::request::Builder {
    builder.header(AUTHORIZATION, format!("Bearer {token}"))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_auth(Request::builder().uri(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = with_auth(Request::builder().method(Method::POST).uri(uri), token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = with_auth(Request::builder().method(Method::PUT).uri(uri), token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_auth(Request::builder().method(Method::DELETE).uri(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a body verbatim with the given content type.
pub async fn raw_auth(
    app: Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: &str,
    token: &str,
) -> Response<Body> {
    let request = with_auth(Request::builder().method(method).uri(uri), token)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    form: MultipartForm,
    token: &str,
) -> Response<Body> {
    let request = with_auth(Request::builder().method(method).uri(uri), token)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(form.finish()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Shorthand for a small JPEG panorama field.
    pub fn image(self, file_name: &str) -> Self {
        self.file("images", file_name, "image/jpeg", b"\xff\xd8\xff\xe0fake-jpeg")
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
