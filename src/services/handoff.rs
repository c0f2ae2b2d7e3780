//! Single sign-on hand-off to the legacy systems listed on the panel.
use crate::domain::models::SystemGrant;
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_PERMISSION: &str = "Usuário Padrão";

/// Known systems: key in `usuario_sistemas.sistema`, display name.
const CATALOGUE: &[(&str, &str)] = &[
    ("sgi", "SGI WEB"),
    ("plataforma", "Plataforma de Pesquisa 2.0"),
    ("financeiro", "Financeiro - Gestão Financeira"),
];

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("invalid secret")]
    Secret,
    #[error("invalid system url: {0}")]
    Url(String),
    #[error("token serialization failed")]
    Encode(#[from] serde_json::Error),
}

/// One panel entry. A system appears once per permission the user holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelSystem {
    pub nome: String,
    pub url: String,
    pub database: String,
    pub permissao: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HandoffClaims {
    pub email: String,
    pub tipo: String,
    pub ts: i64,
    pub hash: String,
}

pub fn panel_systems(base_url: &str, grants: &[SystemGrant]) -> Vec<PanelSystem> {
    grants
        .iter()
        .map(|grant| {
            let key = grant.sistema.as_str();
            let nome = CATALOGUE
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, name)| name.to_string())
                .unwrap_or_else(|| format!("Sistema ({key})"));
            PanelSystem {
                nome,
                url: format!("{base_url}{key}/web/"),
                database: key.to_string(),
                permissao: grant
                    .tipo
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_PERMISSION.to_string()),
            }
        })
        .collect()
}

/// Lowercase hex HMAC-SHA256 of `email` followed by the decimal timestamp.
pub fn sign(secret: &str, email: &str, ts: i64) -> Result<String, HandoffError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| HandoffError::Secret)?;
    mac.update(email.as_bytes());
    mac.update(ts.to_string().as_bytes());
    Ok(mac
        .finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect())
}

pub fn encode_token(secret: &str, email: &str, tipo: &str, ts: i64) -> Result<String, HandoffError> {
    let claims = HandoffClaims {
        email: email.to_string(),
        tipo: tipo.to_string(),
        ts,
        hash: sign(secret, email, ts)?,
    };
    Ok(general_purpose::STANDARD.encode(serde_json::to_vec(&claims)?))
}

/// `{system_url}site/login-token?token=…` with the token query-encoded.
pub fn handoff_url(
    system_url: &str,
    secret: &str,
    email: &str,
    tipo: &str,
    ts: i64,
) -> Result<String, HandoffError> {
    let token = encode_token(secret, email, tipo, ts)?;
    let mut url = Url::parse(&format!("{system_url}site/login-token"))
        .map_err(|e| HandoffError::Url(e.to_string()))?;
    url.query_pairs_mut().append_pair("token", &token);
    Ok(url.to_string())
}
