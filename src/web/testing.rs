//! Helpers for driving the router against the in-memory store.
use crate::config::Config;
use crate::crypto::Crypto;
use crate::db::memory::MemoryStore;
use crate::domain::models::{Employee, UserRole};
use crate::services::photo_upload::{PhotoFile, PhotoUploader, UploadError};
use crate::state::AppState;
use crate::web::session::{sign_session, SessionClaims};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "portal-test-boundary";

struct StubUploader {
    fail: bool,
}

#[async_trait]
impl PhotoUploader for StubUploader {
    async fn upload(&self, _cpf: &str, photo: PhotoFile) -> Result<String, UploadError> {
        if self.fail {
            return Err(UploadError::Rejected("offline".into()));
        }
        Ok(format!("uploaded-{}", photo.file_name))
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub set_cookie: Option<String>,
}

async fn build_app(fail_uploads: bool) -> (Router, MemoryStore) {
    let config = Config::for_tests();
    let crypto = Crypto::from_base64_key(&config.enc_key_b64).unwrap();
    let store = MemoryStore::new();
    let state = AppState::new(
        config,
        crypto,
        store.clone(),
        Arc::new(StubUploader { fail: fail_uploads }),
    );
    (crate::web::routes(Arc::new(state)), store)
}

pub async fn test_app() -> (Router, MemoryStore) {
    build_app(false).await
}

pub async fn test_app_with_failing_uploader() -> (Router, MemoryStore) {
    build_app(true).await
}

fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Active-looking employee whose chapa is `{local}-chapa` and cpf 111.222.333-44.
pub fn employee(email: &str, tipo: &str) -> Employee {
    let local = email.split('@').next().unwrap_or_default();
    Employee {
        id: 1,
        nome: display_name(email),
        email: email.to_string(),
        cargo: Some("Pesquisador".into()),
        telefone: Some(" (31)  3489-5000".into()),
        chapa: Some(format!("{local}-chapa")),
        cpf: Some("111.222.333-44".into()),
        tipo: Some(tipo.to_string()),
        regional_id: Some(1),
        regional_nome: Some("Sul de Minas".into()),
        ..Default::default()
    }
}

pub fn token_for(email: &str, tipo: &str) -> String {
    let claims = SessionClaims {
        email: email.to_string(),
        nome: display_name(email),
        chapa: None,
        cpf: None,
        cargo: None,
        tipo: UserRole::from_tipo(Some(tipo)),
        exp: Utc::now().timestamp() + 3600,
    };
    sign_session(&claims, &Config::for_tests().session_key).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse {
        status,
        body,
        set_cookie,
    }
}

pub async fn request_json(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let auth = token.map(|t| format!("Bearer {t}"));
    let headers: Vec<(&str, &str)> = auth
        .as_deref()
        .map(|value| vec![("authorization", value)])
        .unwrap_or_default();
    request_json_with_headers(app, method, path, &headers, body).await
}

pub async fn request_json_with_headers(
    app: &Router,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(path);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    send(app, builder.body(body).unwrap()).await
}

pub async fn request_multipart(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> TestResponse {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"foto\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}
