use axum::{Json, body::Bytes, extract::State};
use http::HeaderMap;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::commands::{Command, VALIDATE, dispatch};
use crate::discord::{
    INTERACTION_APPLICATION_COMMAND, INTERACTION_PING, Interaction, InteractionResponse,
    SIGNATURE_HEADER, TIMESTAMP_HEADER, verify_signature,
};

/// Slash commands always use `/`, whatever the message prefix is.
const SLASH_PREFIX: &str = "/";

pub async fn interactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<InteractionResponse>> {
    let key = state
        .discord_key
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Discord interactions are not configured".to_string()))?;

    let signature = header_str(&headers, SIGNATURE_HEADER)?;
    let timestamp = header_str(&headers, TIMESTAMP_HEADER)?;
    if !verify_signature(key, signature, timestamp, &body) {
        return Err(ApiError::Unauthorized("invalid request signature".to_string()));
    }

    let interaction: Interaction = serde_json::from_slice(&body)?;
    debug!(kind = interaction.kind, "interaction received");

    match interaction.kind {
        INTERACTION_PING => Ok(Json(InteractionResponse::pong())),
        INTERACTION_APPLICATION_COMMAND => {
            let name = interaction.data.as_ref().map(|d| d.name.as_str());
            if name != Some(VALIDATE) {
                return Ok(Json(InteractionResponse::message("Unknown command.")));
            }

            let identifier = interaction
                .user_id()
                .ok_or_else(|| ApiError::BadRequest("interaction has no user".to_string()))?;
            let command = Command::Validate {
                address: interaction.string_option("address").map(str::to_string),
            };

            let reply = dispatch(&state.validator, SLASH_PREFIX, identifier, command).await?;
            Ok(Json(InteractionResponse::message(reply)))
        }
        other => Err(ApiError::BadRequest(format!(
            "Unsupported interaction type {other}"
        ))),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> ApiResult<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {name} header")))
}
