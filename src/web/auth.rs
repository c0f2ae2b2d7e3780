use crate::domain::contact::digits_only;
use crate::domain::models::UserRole;
use crate::error::{ApiError, ApiResult};
use crate::middleware::client_ip;
use crate::state::SharedState;
use crate::web::session::{self, SessionClaims, UserSession};
use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub chapa: String,
    pub cpf: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub email: String,
    pub nome: String,
    pub cargo: Option<String>,
    pub tipo: UserRole,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(current_session))
        .with_state(state)
}

fn cookie_headers(cookie: String) -> ApiResult<HeaderMap> {
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| anyhow::anyhow!("invalid session cookie: {e}"))?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, value);
    Ok(headers)
}

async fn login(
    peer: Option<ConnectInfo<SocketAddr>>,
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let ip = client_ip(&headers, peer.as_ref(), state.config.trust_proxy);
    if !state.login_limiter.check(&ip).await {
        tracing::warn!("Login rate limit exceeded for {}", ip);
        return Err(ApiError::TooManyRequests);
    }

    let chapa = payload.chapa.trim();
    let cpf = digits_only(&payload.cpf);
    if chapa.is_empty() || cpf.is_empty() {
        return Err(ApiError::bad_request("Chapa e CPF são obrigatórios"));
    }

    let Some(employee) = state.directory.find_active_by_credentials(chapa, &cpf).await? else {
        tracing::info!("Rejected login for chapa {}", chapa);
        return Err(ApiError::Unauthorized);
    };

    let claims = SessionClaims::for_employee(&employee);
    let token = session::sign_session(&claims, state.session_key())
        .map_err(|e| anyhow::anyhow!("session signing failed: {e}"))?;
    tracing::info!("Employee {} signed in", employee.email);

    let headers = cookie_headers(session::session_cookie(&token, state.config.production))?;
    Ok((
        headers,
        Json(LoginResponse {
            success: true,
            email: claims.email,
            nome: claims.nome,
            cargo: claims.cargo,
            tipo: claims.tipo,
        }),
    ))
}

async fn logout(State(state): State<SharedState>) -> ApiResult<impl IntoResponse> {
    let headers = cookie_headers(session::clear_cookie(state.config.production))?;
    Ok((headers, Json(json!({ "success": true }))))
}

async fn current_session(UserSession(claims): UserSession) -> Json<SessionClaims> {
    Json(claims)
}
