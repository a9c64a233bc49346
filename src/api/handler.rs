use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::commands::{dispatch, parse_command};
use crate::utils::format::validate_eth_address;

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandRequest {
    pub identifier: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandReply {
    pub reply: String,
}

/// Message-based command surface: the caller forwards a chat message and
/// the author's id, and relays `reply` back to the channel.
pub async fn run_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> ApiResult<Json<CommandReply>> {
    if request.identifier.trim().is_empty() {
        return Err(ApiError::BadRequest("identifier must not be empty".to_string()));
    }

    let command = parse_command(&state.command_prefix, &request.content)
        .ok_or_else(|| ApiError::BadRequest("Unknown command".to_string()))?;

    let reply = dispatch(
        &state.validator,
        &state.command_prefix,
        &request.identifier,
        command,
    )
    .await?;

    Ok(Json(CommandReply { reply }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

/// Dashboard read: the latest recorded balance for an address.
pub async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Json<BalanceResponse>> {
    validate_eth_address(&address).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let balance = state
        .validator
        .store()
        .latest_balance(&address)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No balance recorded for {address}")))?;

    Ok(Json(BalanceResponse { balance }))
}
