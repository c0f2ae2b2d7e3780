pub mod assessment;
pub mod auth;
pub mod card;
pub mod directory;
pub mod portal;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

use crate::state::SharedState;
use axum::{routing::get, Router};

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", auth::router(state.clone()))
        .merge(assessment::router(state.clone()))
        .merge(directory::router(state.clone()))
        .merge(card::router(state.clone()))
        .merge(portal::router(state));

    Router::new().nest("/api", api)
}
