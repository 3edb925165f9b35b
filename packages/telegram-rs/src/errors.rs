use grammers_mtsender::{AuthorizationError, InvocationError};
use thiserror::Error;

/// Errors surfaced by [`crate::TelegramService`].
///
/// RPC failures that callers need to react to get their own variant; the rest
/// keep the raw RPC name so it can be reported back verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelegramError {
    #[error("The phone number is invalid")]
    PhoneNumberInvalid,

    #[error("The verification code is invalid or expired")]
    InvalidCode,

    #[error("Two-factor authentication password required")]
    PasswordRequired,

    #[error("The phone number is not registered")]
    SignUpRequired,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("RPC error {code}: {name}")]
    Rpc { code: i32, name: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unexpected response from Telegram: {0}")]
    UnexpectedResponse(String),
}

impl TelegramError {
    /// Classify an RPC error by its name (without the numeric suffix).
    pub fn from_rpc(code: i32, name: &str) -> Self {
        match name {
            "PHONE_NUMBER_INVALID" | "PHONE_NUMBER_BANNED" | "PHONE_NUMBER_FLOOD" => {
                TelegramError::PhoneNumberInvalid
            }
            "PHONE_NUMBER_UNOCCUPIED" => TelegramError::SignUpRequired,
            "PHONE_CODE_INVALID" | "PHONE_CODE_EXPIRED" | "PHONE_CODE_EMPTY" => {
                TelegramError::InvalidCode
            }
            "SESSION_PASSWORD_NEEDED" => TelegramError::PasswordRequired,
            "AUTH_KEY_UNREGISTERED" | "AUTH_KEY_INVALID" | "SESSION_REVOKED"
            | "SESSION_EXPIRED" | "USER_DEACTIVATED" => {
                TelegramError::InvalidSession(name.to_string())
            }
            "USERNAME_NOT_OCCUPIED" | "USERNAME_INVALID" | "PHONE_NOT_OCCUPIED" => {
                TelegramError::RecipientNotFound(name.to_string())
            }
            _ => TelegramError::Rpc {
                code,
                name: name.to_string(),
            },
        }
    }

    /// Data center an RPC error asks us to migrate to, if any.
    pub(crate) fn migrate_dc(error: &InvocationError) -> Option<i32> {
        match error {
            InvocationError::Rpc(rpc) => migrate_target(rpc.code, &rpc.name, rpc.value),
            _ => None,
        }
    }
}

/// `PHONE_MIGRATE_4` and friends arrive as code 303, name `PHONE_MIGRATE`, value 4.
fn migrate_target(code: i32, name: &str, value: Option<u32>) -> Option<i32> {
    if code == 303 && name.ends_with("_MIGRATE") {
        value.map(|dc| dc as i32)
    } else {
        None
    }
}

impl From<InvocationError> for TelegramError {
    fn from(error: InvocationError) -> Self {
        match error {
            InvocationError::Rpc(rpc) => TelegramError::from_rpc(rpc.code, &rpc.name),
            other => TelegramError::Connection(other.to_string()),
        }
    }
}

impl From<AuthorizationError> for TelegramError {
    fn from(error: AuthorizationError) -> Self {
        TelegramError::Connection(error.to_string())
    }
}
