// Request/response shapes shared by the HTTP routes and the domain actions.

use serde::{Deserialize, Serialize};
use telegram::{TelegramOptions, UserInfo};

/// Platform credentials supplied by the caller on every request.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub api_id: i32,
    pub api_hash: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .field("api_hash", &"<redacted>")
            .finish()
    }
}

impl From<&Credentials> for TelegramOptions {
    fn from(credentials: &Credentials) -> Self {
        TelegramOptions {
            api_id: credentials.api_id,
            api_hash: credentials.api_hash.clone(),
        }
    }
}

/// Account profile as returned to callers: the id is a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<UserInfo> for AccountInfo {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}
