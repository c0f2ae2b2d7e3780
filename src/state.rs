use crate::config::Config;
use crate::crypto::Crypto;
use crate::db::{AccessStore, AssessmentStore, CardStore, DirectoryStore};
use crate::middleware::RateLimiter;
use crate::services::photo_upload::PhotoUploader;
use std::sync::Arc;

/// Login attempts allowed per address within `LOGIN_WINDOW_SECS`.
pub const LOGIN_MAX_ATTEMPTS: usize = 5;
pub const LOGIN_WINDOW_SECS: u64 = 60;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub crypto: Arc<Crypto>,
    pub assessments: Arc<dyn AssessmentStore>,
    pub directory: Arc<dyn DirectoryStore>,
    pub cards: Arc<dyn CardStore>,
    pub access: Arc<dyn AccessStore>,
    pub uploader: Arc<dyn PhotoUploader>,
    pub login_limiter: RateLimiter,
}

impl AppState {
    /// Wires every port to the same store implementation.
    pub fn new<S>(config: Config, crypto: Crypto, store: S, uploader: Arc<dyn PhotoUploader>) -> Self
    where
        S: AssessmentStore + DirectoryStore + CardStore + AccessStore + Clone + 'static,
    {
        Self {
            config: Arc::new(config),
            crypto: Arc::new(crypto),
            assessments: Arc::new(store.clone()),
            directory: Arc::new(store.clone()),
            cards: Arc::new(store.clone()),
            access: Arc::new(store),
            uploader,
            login_limiter: RateLimiter::new(LOGIN_MAX_ATTEMPTS, LOGIN_WINDOW_SECS),
        }
    }

    pub fn session_key(&self) -> &[u8] {
        &self.config.session_key
    }
}

pub type SharedState = Arc<AppState>;
