use grammers_tl_types as tl;
use serde::{Deserialize, Serialize};

/// Profile of a Telegram account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<tl::types::User> for UserInfo {
    fn from(user: tl::types::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Result of asking Telegram to send a login code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    pub phone_code_hash: String,
    /// Serialized session that requested the code. The sign-in must reuse it.
    pub session: String,
    /// Data center that owns the phone number, when it differs from the default.
    pub dc_id: Option<i32>,
}

/// Everything needed to complete a login started with `send_code`.
#[derive(Debug, Clone)]
pub struct SignInRequest {
    pub phone_number: String,
    pub phone_code_hash: String,
    pub code: String,
    pub session: String,
    pub dc_id: Option<i32>,
}

/// A completed login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub session: String,
    pub user: UserInfo,
}

/// Who a message goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Username(String),
    Phone(String),
}

impl Recipient {
    /// Pick a recipient from optional username and phone, preferring the username.
    pub fn from_parts(username: Option<&str>, phone: Option<&str>) -> Option<Self> {
        let username = username
            .map(|u| u.trim().trim_start_matches('@'))
            .filter(|u| !u.is_empty());
        let phone = phone.map(str::trim).filter(|p| !p.is_empty());

        match (username, phone) {
            (Some(username), _) => Some(Recipient::Username(username.to_string())),
            (None, Some(phone)) => Some(Recipient::Phone(phone.to_string())),
            (None, None) => None,
        }
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recipient::Username(username) => write!(f, "@{}", username),
            Recipient::Phone(phone) => write!(f, "{}", phone),
        }
    }
}
