// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseTelegramService)

use async_trait::async_trait;
use telegram::{Recipient, SentCode, SignInRequest, SignedIn, TelegramError, UserInfo};

use crate::common::Credentials;

// =============================================================================
// Telegram Service Trait (Infrastructure - login, messaging, profile)
// =============================================================================

#[async_trait]
pub trait BaseTelegramService: Send + Sync {
    /// Request a login code for a phone number using a fresh session
    async fn send_code(
        &self,
        credentials: &Credentials,
        phone_number: &str,
    ) -> Result<SentCode, TelegramError>;

    /// Complete a login started with `send_code`
    async fn sign_in(
        &self,
        credentials: &Credentials,
        request: &SignInRequest,
    ) -> Result<SignedIn, TelegramError>;

    /// Fetch the profile of the account owning the session
    async fn get_me(&self, credentials: &Credentials, session: &str)
        -> Result<UserInfo, TelegramError>;

    /// Send a text message, returning the platform message id
    async fn send_message(
        &self,
        credentials: &Credentials,
        session: &str,
        recipient: &Recipient,
        text: &str,
    ) -> Result<i32, TelegramError>;
}
