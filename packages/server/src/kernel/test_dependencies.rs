// TestDependencies - mock implementations for testing
//
// Provides a mock Telegram client that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use telegram::{Recipient, SentCode, SignInRequest, SignedIn, TelegramError, UserInfo};

use super::{BaseTelegramService, ServerDeps};
use crate::common::Credentials;
use crate::domains::auth::models::PendingLoginStore;

pub const MOCK_PHONE_CODE_HASH: &str = "mock-phone-code-hash";
pub const MOCK_PENDING_SESSION: &str = "mock-pending-session";
pub const MOCK_SIGNED_IN_SESSION: &str = "mock-signed-in-session";

/// The user every mock call returns unless told otherwise
pub fn mock_user() -> UserInfo {
    UserInfo {
        id: 777000,
        username: Some("mock_user".to_string()),
        first_name: Some("Mock".to_string()),
        last_name: None,
    }
}

// =============================================================================
// Mock Telegram Service
// =============================================================================

/// A call made against the mock, with the arguments that matter for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegramCall {
    SendCode {
        api_id: i32,
        phone_number: String,
    },
    SignIn {
        phone_number: String,
        phone_code_hash: String,
        code: String,
        session: String,
        dc_id: Option<i32>,
    },
    GetMe {
        session: String,
    },
    SendMessage {
        session: String,
        recipient: Recipient,
        text: String,
    },
}

#[derive(Default)]
pub struct MockTelegramService {
    send_code_responses: Mutex<VecDeque<Result<SentCode, TelegramError>>>,
    sign_in_responses: Mutex<VecDeque<Result<SignedIn, TelegramError>>>,
    get_me_responses: Mutex<VecDeque<Result<UserInfo, TelegramError>>>,
    send_message_responses: Mutex<VecDeque<Result<i32, TelegramError>>>,
    before_sign_in: Mutex<Option<Box<dyn FnOnce() + Send>>>,
    calls: Mutex<Vec<TelegramCall>>,
}

impl MockTelegramService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the phone code hash the next `send_code` returns
    pub fn with_sent_code(self, phone_code_hash: &str) -> Self {
        self.send_code_responses.lock().unwrap().push_back(Ok(SentCode {
            phone_code_hash: phone_code_hash.to_string(),
            session: MOCK_PENDING_SESSION.to_string(),
            dc_id: None,
        }));
        self
    }

    pub fn with_send_code_error(self, error: TelegramError) -> Self {
        self.send_code_responses
            .lock()
            .unwrap()
            .push_back(Err(error));
        self
    }

    pub fn with_signed_in(self, session: &str, user: UserInfo) -> Self {
        self.sign_in_responses.lock().unwrap().push_back(Ok(SignedIn {
            session: session.to_string(),
            user,
        }));
        self
    }

    pub fn with_sign_in_error(self, error: TelegramError) -> Self {
        self.sign_in_responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Run `hook` inside the next `sign_in`, while the caller is awaiting it
    pub fn with_before_sign_in(self, hook: impl FnOnce() + Send + 'static) -> Self {
        *self.before_sign_in.lock().unwrap() = Some(Box::new(hook));
        self
    }

    pub fn with_user(self, user: UserInfo) -> Self {
        self.get_me_responses.lock().unwrap().push_back(Ok(user));
        self
    }

    pub fn with_get_me_error(self, error: TelegramError) -> Self {
        self.get_me_responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_message_id(self, message_id: i32) -> Self {
        self.send_message_responses
            .lock()
            .unwrap()
            .push_back(Ok(message_id));
        self
    }

    pub fn with_send_message_error(self, error: TelegramError) -> Self {
        self.send_message_responses
            .lock()
            .unwrap()
            .push_back(Err(error));
        self
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<TelegramCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: TelegramCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BaseTelegramService for MockTelegramService {
    async fn send_code(
        &self,
        credentials: &Credentials,
        phone_number: &str,
    ) -> Result<SentCode, TelegramError> {
        self.record(TelegramCall::SendCode {
            api_id: credentials.api_id,
            phone_number: phone_number.to_string(),
        });

        self.send_code_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(SentCode {
                    phone_code_hash: MOCK_PHONE_CODE_HASH.to_string(),
                    session: MOCK_PENDING_SESSION.to_string(),
                    dc_id: None,
                })
            })
    }

    async fn sign_in(
        &self,
        _credentials: &Credentials,
        request: &SignInRequest,
    ) -> Result<SignedIn, TelegramError> {
        self.record(TelegramCall::SignIn {
            phone_number: request.phone_number.clone(),
            phone_code_hash: request.phone_code_hash.clone(),
            code: request.code.clone(),
            session: request.session.clone(),
            dc_id: request.dc_id,
        });

        let before_sign_in = self.before_sign_in.lock().unwrap().take();
        if let Some(hook) = before_sign_in {
            hook();
        }

        self.sign_in_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(SignedIn {
                    session: MOCK_SIGNED_IN_SESSION.to_string(),
                    user: mock_user(),
                })
            })
    }

    async fn get_me(
        &self,
        _credentials: &Credentials,
        session: &str,
    ) -> Result<UserInfo, TelegramError> {
        self.record(TelegramCall::GetMe {
            session: session.to_string(),
        });

        self.get_me_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(mock_user()))
    }

    async fn send_message(
        &self,
        _credentials: &Credentials,
        session: &str,
        recipient: &Recipient,
        text: &str,
    ) -> Result<i32, TelegramError> {
        self.record(TelegramCall::SendMessage {
            session: session.to_string(),
            recipient: recipient.clone(),
            text: text.to_string(),
        });

        self.send_message_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(1))
    }
}

// =============================================================================
// Test Dependencies
// =============================================================================

/// Mock services bundled for building ServerDeps in tests
pub struct TestDependencies {
    pub telegram: Arc<MockTelegramService>,
    pub pending_logins: Arc<PendingLoginStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_telegram(MockTelegramService::new())
    }

    pub fn with_telegram(telegram: MockTelegramService) -> Self {
        Self {
            telegram: Arc::new(telegram),
            pending_logins: Arc::new(PendingLoginStore::new(Duration::from_secs(600))),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.telegram.clone(), self.pending_logins.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
