use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use std::{env, fmt::Display, str::FromStr};
use tracing::{info, warn};

pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub session_key: Vec<u8>,
    pub enc_key_b64: String,
    pub handoff_secret: String,
    pub timezone: String,
    pub legacy_upload_url: String,
    pub photo_base_url: String,
    pub systems_base_url: String,
    pub bind_addr: String,
    pub production: bool,
    /// Honour `X-Forwarded-For` when keying the login limiter.
    pub trust_proxy: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let session_key_b64 = env::var("SESSION_KEY").context("SESSION_KEY missing")?;
        let session_key = general_purpose::STANDARD
            .decode(session_key_b64.trim())
            .context("SESSION_KEY must be base64")?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| {
            let port: u16 = try_load("PORT", "3000");
            format!("0.0.0.0:{port}")
        });

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL missing")?,
            database_max_connections: try_load("DATABASE_MAX_CONNECTIONS", "10"),
            session_key,
            enc_key_b64: env::var("APP_ENC_KEY").context("APP_ENC_KEY missing")?,
            handoff_secret: env::var("HANDOFF_SECRET").context("HANDOFF_SECRET missing")?,
            timezone: try_load("PORTAL_TIMEZONE", DEFAULT_TIMEZONE),
            legacy_upload_url: try_load(
                "LEGACY_UPLOAD_URL",
                "https://epamigsistema.com/quadro_funcionarios/web/upload.php",
            ),
            photo_base_url: try_load(
                "PHOTO_BASE_URL",
                "https://epamigsistema.com/quadro_funcionarios/web/fotos/",
            ),
            systems_base_url: try_load("SYSTEMS_BASE_URL", "http://localhost/"),
            bind_addr,
            production: is_production(),
            trust_proxy: try_load("TRUST_PROXY", "false"),
        })
    }

    /// Public URL of a stored card photo. Absolute URLs are returned as-is.
    pub fn photo_url(&self, foto: &str) -> String {
        if foto.starts_with("http://") || foto.starts_with("https://") {
            return foto.to_string();
        }
        format!("{}{}", self.photo_base_url, foto)
    }
}

fn is_production() -> bool {
    ["PRODUCTION", "RENDER", "FLY_APP_NAME", "RAILWAY_ENVIRONMENT"]
        .iter()
        .any(|key| env::var(key).is_ok())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let parsed = env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse::<T>();

    match parsed {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value ({e}), using default: {default}");
            default
                .parse()
                .unwrap_or_else(|_| unreachable!("default for {key} must parse"))
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/portal_test".into(),
            database_max_connections: 1,
            session_key: b"test-session-key-0123456789abcdef".to_vec(),
            enc_key_b64: general_purpose::STANDARD.encode([5u8; 32]),
            handoff_secret: "handoff-secret".into(),
            timezone: DEFAULT_TIMEZONE.into(),
            legacy_upload_url: "http://legacy.invalid/upload.php".into(),
            photo_base_url: "https://fotos.example/".into(),
            systems_base_url: "http://localhost/".into(),
            bind_addr: "127.0.0.1:0".into(),
            production: false,
            trust_proxy: false,
        }
    }
}
