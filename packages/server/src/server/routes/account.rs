use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::{AccountInfo, Credentials};
use crate::domains::account::actions::get_status;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct GetStatusRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub session_string: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GetStatusResponse {
    Ok { success: bool, data: AccountInfo },
    Failed { success: bool, error: String },
}

/// POST /get_status
///
/// Failures are reported in the body with HTTP 200 (`success: false`),
/// unlike the other endpoints. Existing callers rely on this.
pub async fn get_status_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<GetStatusRequest>,
) -> Json<GetStatusResponse> {
    let response = match get_status(&body.credentials, &body.session_string, &state.deps).await {
        Ok(data) => GetStatusResponse::Ok {
            success: true,
            data,
        },
        Err(e) => GetStatusResponse::Failed {
            success: false,
            error: e.to_string(),
        },
    };

    Json(response)
}
