use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::{ApiError, Credentials};
use crate::domains::messaging::actions::send_message;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub session_string: String,
    pub message: String,
    #[serde(default)]
    pub target_username: Option<String>,
    #[serde(default)]
    pub target_phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_id: i32,
}

/// POST /send_message
pub async fn send_message_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let message_id = send_message(
        &body.credentials,
        &body.session_string,
        &body.message,
        body.target_username.as_deref(),
        body.target_phone.as_deref(),
        &state.deps,
    )
    .await?;

    Ok(Json(SendMessageResponse {
        success: true,
        message_id,
    }))
}
