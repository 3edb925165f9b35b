//! Server dependencies for domain actions (using traits for testability)
//!
//! All external services use trait abstractions to enable testing.

use async_trait::async_trait;
use std::sync::Arc;
use telegram::{
    Recipient, SentCode, SignInRequest, SignedIn, TelegramError, TelegramService, UserInfo,
};

use crate::common::Credentials;
use crate::domains::auth::models::PendingLoginStore;
use crate::kernel::BaseTelegramService;

// =============================================================================
// TelegramService Adapter (implements BaseTelegramService trait)
// =============================================================================

/// Builds a `TelegramService` for the caller's credentials on every call.
///
/// Credentials arrive with each request, so there is nothing to share
/// between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelegramAdapter;

impl TelegramAdapter {
    pub fn new() -> Self {
        Self
    }

    fn service(credentials: &Credentials) -> TelegramService {
        TelegramService::new(credentials.into())
    }
}

#[async_trait]
impl BaseTelegramService for TelegramAdapter {
    async fn send_code(
        &self,
        credentials: &Credentials,
        phone_number: &str,
    ) -> Result<SentCode, TelegramError> {
        Self::service(credentials).send_code(phone_number).await
    }

    async fn sign_in(
        &self,
        credentials: &Credentials,
        request: &SignInRequest,
    ) -> Result<SignedIn, TelegramError> {
        Self::service(credentials).sign_in(request).await
    }

    async fn get_me(
        &self,
        credentials: &Credentials,
        session: &str,
    ) -> Result<UserInfo, TelegramError> {
        Self::service(credentials).get_me(session).await
    }

    async fn send_message(
        &self,
        credentials: &Credentials,
        session: &str,
        recipient: &Recipient,
        text: &str,
    ) -> Result<i32, TelegramError> {
        Self::service(credentials)
            .send_message(session, recipient, text)
            .await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub telegram: Arc<dyn BaseTelegramService>,
    pub pending_logins: Arc<PendingLoginStore>,
}

impl ServerDeps {
    pub fn new(
        telegram: Arc<dyn BaseTelegramService>,
        pending_logins: Arc<PendingLoginStore>,
    ) -> Self {
        Self {
            telegram,
            pending_logins,
        }
    }
}
