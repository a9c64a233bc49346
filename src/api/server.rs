use axum::{
    Router,
    routing::{get, post},
};
use ed25519_dalek::VerifyingKey;
use std::sync::Arc;

use crate::api::handler::{get_balance, run_command};
use crate::api::interactions::interactions;
use crate::validator::WalletValidator;

#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<WalletValidator>,
    pub command_prefix: String,
    /// `None` disables `/interactions`.
    pub discord_key: Option<VerifyingKey>,
}

impl AppState {
    pub fn new(
        validator: Arc<WalletValidator>,
        command_prefix: impl Into<String>,
        discord_key: Option<VerifyingKey>,
    ) -> Self {
        Self {
            validator,
            command_prefix: command_prefix.into(),
            discord_key,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/commands", post(run_command))
        .route("/interactions", post(interactions))
        .route("/api/balance/{address}", get(get_balance))
        .with_state(state)
}
