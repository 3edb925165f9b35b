//! Send message action

use telegram::Recipient;
use tracing::{error, info};

use crate::common::{ApiError, Credentials};
use crate::kernel::ServerDeps;

/// Send `message` from the account behind `session_string`.
///
/// `target_username` takes precedence over `target_phone`. Returns the
/// message id Telegram assigned.
pub async fn send_message(
    credentials: &Credentials,
    session_string: &str,
    message: &str,
    target_username: Option<&str>,
    target_phone: Option<&str>,
    deps: &ServerDeps,
) -> Result<i32, ApiError> {
    let recipient =
        Recipient::from_parts(target_username, target_phone).ok_or(ApiError::MissingRecipient)?;

    let message_id = deps
        .telegram
        .send_message(credentials, session_string, &recipient, message)
        .await
        .map_err(|e| {
            error!(%recipient, error = %e, "Failed to send message");
            ApiError::from(e)
        })?;

    info!(%recipient, message_id, "Message sent");
    Ok(message_id)
}
