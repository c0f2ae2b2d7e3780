use crate::error::{ApiError, ApiResult};
use crate::services::handoff::{self, PanelSystem};
use crate::state::SharedState;
use crate::web::session::UserSession;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct PanelResponse {
    pub sistemas: Vec<PanelSystem>,
}

#[derive(Deserialize)]
pub struct TargetSystem {
    pub url: String,
    pub permissao: Option<String>,
}

#[derive(Deserialize)]
pub struct TokenRequest {
    pub sistema: Option<TargetSystem>,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub url: String,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/painel", get(panel))
        .route("/token", post(issue_token))
        .with_state(state)
}

async fn systems_for(state: &SharedState, email: &str) -> ApiResult<Vec<PanelSystem>> {
    let grants = state.access.grants_for(email).await?;
    Ok(handoff::panel_systems(&state.config.systems_base_url, &grants))
}

async fn panel(
    UserSession(claims): UserSession,
    State(state): State<SharedState>,
) -> ApiResult<Json<PanelResponse>> {
    let sistemas = systems_for(&state, &claims.email).await?;
    Ok(Json(PanelResponse { sistemas }))
}

/// Signs a hand-off URL for one of the caller's own systems. The permission
/// must be one the caller actually holds there.
async fn issue_token(
    UserSession(claims): UserSession,
    State(state): State<SharedState>,
    Json(body): Json<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let target = body
        .sistema
        .filter(|s| !s.url.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Dados incompletos"))?;

    let systems = systems_for(&state, &claims.email).await?;
    let granted = systems
        .iter()
        .filter(|s| s.url == target.url)
        .find(|s| match target.permissao.as_deref() {
            Some(wanted) => s.permissao == wanted,
            None => true,
        })
        .ok_or_else(|| {
            tracing::warn!("{} requested a hand-off to {} without a grant", claims.email, target.url);
            ApiError::Forbidden
        })?;

    let url = handoff::handoff_url(
        &granted.url,
        &state.config.handoff_secret,
        &claims.email,
        &granted.permissao,
        Utc::now().timestamp_millis(),
    )
    .map_err(|e| anyhow::anyhow!("hand-off url: {e}"))?;

    tracing::info!("Hand-off issued for {} to {}", claims.email, granted.database);
    Ok(Json(TokenResponse { url }))
}
