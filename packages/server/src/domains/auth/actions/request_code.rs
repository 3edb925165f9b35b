//! Request code action

use telegram::TelegramError;
use tracing::{error, info, warn};

use crate::common::{ApiError, Credentials};
use crate::domains::auth::models::PendingLogin;
use crate::kernel::ServerDeps;

/// Result of requesting a login code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCodeResult {
    pub phone_code_hash: String,
}

/// Ask Telegram to send a login code to `phone_number`.
///
/// The session that requested the code is kept in the pending-login store
/// so `verify_code` can sign in with it.
pub async fn request_code(
    credentials: &Credentials,
    phone_number: &str,
    deps: &ServerDeps,
) -> Result<RequestCodeResult, ApiError> {
    let phone_number = phone_number.trim();
    if phone_number.is_empty() {
        return Err(ApiError::InvalidPhoneNumber);
    }

    let sent = deps
        .telegram
        .send_code(credentials, phone_number)
        .await
        .map_err(|e| match e {
            TelegramError::PhoneNumberInvalid => {
                warn!(phone_number, "Phone number rejected by Telegram");
                ApiError::InvalidPhoneNumber
            }
            other => {
                error!(phone_number, error = %other, "Failed to request login code");
                ApiError::from(other)
            }
        })?;

    deps.pending_logins.insert(
        phone_number,
        PendingLogin {
            phone_code_hash: sent.phone_code_hash.clone(),
            session: sent.session,
            dc_id: sent.dc_id,
        },
    );

    info!(phone_number, "Login code sent");
    Ok(RequestCodeResult {
        phone_code_hash: sent.phone_code_hash,
    })
}
