use crate::domain::models::{Employee, UserRole};
use crate::error::ApiError;
use crate::state::SharedState;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_TTL_HOURS: i64 = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub email: String,
    pub nome: String,
    pub chapa: Option<String>,
    pub cpf: Option<String>,
    pub cargo: Option<String>,
    pub tipo: UserRole,
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_employee(employee: &Employee) -> Self {
        Self {
            email: employee.email.clone(),
            nome: employee.nome.clone(),
            chapa: employee.chapa.clone(),
            cpf: employee.cpf.clone(),
            cargo: employee.cargo.clone(),
            tipo: employee.role(),
            exp: (Utc::now() + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid token format")]
    Invalid,
    #[error("signature mismatch")]
    Signature,
    #[error("expired")]
    Expired,
}

pub fn sign_session(claims: &SessionClaims, key: &[u8]) -> Result<String, SessionError> {
    let payload = serde_json::to_vec(claims).map_err(|_| SessionError::Invalid)?;
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SessionError::Invalid)?;
    mac.update(&payload);
    let sig = mac.finalize().into_bytes();
    Ok(format!(
        "{}.{}",
        general_purpose::URL_SAFE_NO_PAD.encode(&payload),
        general_purpose::URL_SAFE_NO_PAD.encode(sig)
    ))
}

pub fn verify_session(token: &str, key: &[u8]) -> Result<SessionClaims, SessionError> {
    let (payload_b64, sig_b64) = token.split_once('.').ok_or(SessionError::Invalid)?;
    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| SessionError::Invalid)?;
    let sig = general_purpose::URL_SAFE_NO_PAD
        .decode(sig_b64)
        .map_err(|_| SessionError::Invalid)?;

    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SessionError::Invalid)?;
    mac.update(&payload);
    mac.verify_slice(&sig).map_err(|_| SessionError::Signature)?;

    let claims: SessionClaims =
        serde_json::from_slice(&payload).map_err(|_| SessionError::Invalid)?;
    if Utc::now().timestamp() > claims.exp {
        return Err(SessionError::Expired);
    }
    Ok(claims)
}

/// Bearer header first, then the `session` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(bearer) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(bearer.trim().to_string());
    }

    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            pair.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_string)
        })
}

pub fn session_cookie(token: &str, production: bool) -> String {
    let secure = if production { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{secure}",
        SESSION_TTL_HOURS * 3600
    )
}

pub fn clear_cookie(production: bool) -> String {
    let secure = if production { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{secure}")
}

/// Authenticated employee. The account must still be active.
pub struct UserSession(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for UserSession
where
    S: Send + Sync,
    SharedState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shared = SharedState::from_ref(state);

        let token = extract_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let claims = verify_session(&token, shared.session_key()).map_err(|e| {
            tracing::warn!("Session verification failed: {}", e);
            ApiError::Unauthorized
        })?;

        let active = shared.directory.find_active_by_email(&claims.email).await?;
        if active.is_none() {
            tracing::warn!("Session for inactive or unknown employee {}", claims.email);
            return Err(ApiError::Unauthorized);
        }

        Ok(UserSession(claims))
    }
}

/// Authenticated employee whose `tipo` is admin.
pub struct AdminSession(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    SharedState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let UserSession(claims) = UserSession::from_request_parts(parts, state).await?;
        if claims.tipo != UserRole::Admin {
            return Err(ApiError::Forbidden);
        }
        Ok(AdminSession(claims))
    }
}
