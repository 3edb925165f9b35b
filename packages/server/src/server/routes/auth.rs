use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::{AccountInfo, ApiError, Credentials};
use crate::domains::auth::actions::{request_code, verify_code};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestCodeRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct RequestCodeResponse {
    pub success: bool,
    pub phone_code_hash: String,
    pub message: &'static str,
}

/// POST /request_code
pub async fn request_code_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<RequestCodeRequest>,
) -> Result<Json<RequestCodeResponse>, ApiError> {
    let result = request_code(&body.credentials, &body.phone_number, &state.deps).await?;

    Ok(Json(RequestCodeResponse {
        success: true,
        phone_code_hash: result.phone_code_hash,
        message: "Verification code sent",
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub phone_number: String,
    pub code: String,
    pub phone_code_hash: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyCodeData {
    pub session_string: String,
    pub user_info: AccountInfo,
}

#[derive(Debug, Serialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub data: VerifyCodeData,
}

/// POST /verify_code
pub async fn verify_code_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<VerifyCodeRequest>,
) -> Result<Json<VerifyCodeResponse>, ApiError> {
    let result = verify_code(
        &body.credentials,
        &body.phone_number,
        &body.code,
        &body.phone_code_hash,
        &state.deps,
    )
    .await?;

    Ok(Json(VerifyCodeResponse {
        success: true,
        data: VerifyCodeData {
            session_string: result.session_string,
            user_info: result.user_info,
        },
    }))
}
