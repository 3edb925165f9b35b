//! Verify code action

use telegram::{SignInRequest, TelegramError};
use tracing::{debug, error, info, warn};

use crate::common::{AccountInfo, ApiError, Credentials};
use crate::kernel::ServerDeps;

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeResult {
    pub session_string: String,
    pub user_info: AccountInfo,
}

/// Sign in with the code sent by `request_code`.
///
/// Requires an unexpired pending login for the phone number. The entry is
/// removed only on success, so a mistyped code can be retried.
pub async fn verify_code(
    credentials: &Credentials,
    phone_number: &str,
    code: &str,
    phone_code_hash: &str,
    deps: &ServerDeps,
) -> Result<VerifyCodeResult, ApiError> {
    let phone_number = phone_number.trim();

    let pending = deps.pending_logins.get(phone_number).ok_or_else(|| {
        warn!(phone_number, "Verification attempted without a pending request");
        ApiError::NoPendingRequest
    })?;

    let request = SignInRequest {
        phone_number: phone_number.to_string(),
        phone_code_hash: phone_code_hash.to_string(),
        code: code.trim().to_string(),
        session: pending.session.clone(),
        dc_id: pending.dc_id,
    };

    let signed_in = deps
        .telegram
        .sign_in(credentials, &request)
        .await
        .map_err(|e| match e {
            TelegramError::InvalidCode => {
                warn!(phone_number, "Invalid verification code");
                ApiError::InvalidCode
            }
            TelegramError::PasswordRequired => {
                warn!(phone_number, "Account requires a two-factor password");
                ApiError::PasswordRequired
            }
            TelegramError::PhoneNumberInvalid => {
                warn!(phone_number, "Phone number rejected at sign-in");
                ApiError::InvalidPhoneNumber
            }
            TelegramError::SignUpRequired => {
                warn!(phone_number, "Phone number has no Telegram account");
                ApiError::NotRegistered
            }
            other => {
                error!(phone_number, error = %other, "Failed to verify login code");
                ApiError::from(other)
            }
        })?;

    // A request_code that landed while we were signing in owns the entry now
    if !deps.pending_logins.remove_if_matches(phone_number, &pending) {
        debug!(phone_number, "Pending login was replaced during sign-in");
    }

    info!(phone_number, user_id = signed_in.user.id, "Login verified");
    Ok(VerifyCodeResult {
        session_string: signed_in.session,
        user_info: signed_in.user.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::models::{PendingLogin, PendingLoginStore};
    use std::sync::Arc;
    use std::time::Duration;
    use crate::kernel::test_dependencies::{mock_user, MOCK_SIGNED_IN_SESSION};
    use crate::kernel::{MockTelegramService, TelegramCall, TestDependencies};

    const PHONE: &str = "+15551234567";

    fn credentials() -> Credentials {
        Credentials {
            api_id: 12345,
            api_hash: "0123456789abcdef".to_string(),
        }
    }

    fn with_pending(deps: &TestDependencies) {
        deps.pending_logins.insert(
            PHONE,
            PendingLogin {
                phone_code_hash: "h1".to_string(),
                session: "pending-session".to_string(),
                dc_id: Some(4),
            },
        );
    }

    #[tokio::test]
    async fn test_no_pending_request() {
        let deps = TestDependencies::new();

        let err = verify_code(&credentials(), PHONE, "12345", "h1", &deps.server_deps())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::NoPendingRequest);
        assert_eq!(deps.telegram.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_uses_pending_session_and_clears_entry() {
        let deps = TestDependencies::new();
        with_pending(&deps);

        let result = verify_code(&credentials(), PHONE, " 12345 ", "h1", &deps.server_deps())
            .await
            .unwrap();

        assert_eq!(result.session_string, MOCK_SIGNED_IN_SESSION);
        assert_eq!(result.user_info, AccountInfo::from(mock_user()));
        assert!(deps.pending_logins.get(PHONE).is_none());
        assert_eq!(
            deps.telegram.calls(),
            vec![TelegramCall::SignIn {
                phone_number: PHONE.to_string(),
                phone_code_hash: "h1".to_string(),
                code: "12345".to_string(),
                session: "pending-session".to_string(),
                dc_id: Some(4),
            }]
        );
    }

    #[tokio::test]
    async fn test_invalid_code_keeps_pending_entry() {
        let deps = TestDependencies::with_telegram(
            MockTelegramService::new().with_sign_in_error(TelegramError::InvalidCode),
        );
        with_pending(&deps);

        let err = verify_code(&credentials(), PHONE, "00000", "h1", &deps.server_deps())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::InvalidCode);
        assert!(deps.pending_logins.get(PHONE).is_some());
    }

    #[tokio::test]
    async fn test_password_required() {
        let deps = TestDependencies::with_telegram(
            MockTelegramService::new().with_sign_in_error(TelegramError::PasswordRequired),
        );
        with_pending(&deps);

        let err = verify_code(&credentials(), PHONE, "12345", "h1", &deps.server_deps())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::PasswordRequired);
    }

    #[tokio::test]
    async fn test_sign_up_required() {
        let deps = TestDependencies::with_telegram(
            MockTelegramService::new().with_sign_in_error(TelegramError::SignUpRequired),
        );
        with_pending(&deps);

        let err = verify_code(&credentials(), PHONE, "12345", "h1", &deps.server_deps())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::NotRegistered);
    }

    #[tokio::test]
    async fn test_unoccupied_number_is_not_registered() {
        let deps = TestDependencies::with_telegram(
            MockTelegramService::new()
                .with_sign_in_error(TelegramError::from_rpc(400, "PHONE_NUMBER_UNOCCUPIED")),
        );
        with_pending(&deps);

        let err = verify_code(&credentials(), PHONE, "12345", "h1", &deps.server_deps())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::NotRegistered);
    }

    #[tokio::test]
    async fn test_invalid_phone_at_sign_in() {
        let deps = TestDependencies::with_telegram(
            MockTelegramService::new().with_sign_in_error(TelegramError::PhoneNumberInvalid),
        );
        with_pending(&deps);

        let err = verify_code(&credentials(), PHONE, "12345", "h1", &deps.server_deps())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::InvalidPhoneNumber);
    }

    #[tokio::test]
    async fn test_success_keeps_login_requested_during_sign_in() {
        let store = Arc::new(PendingLoginStore::new(Duration::from_secs(600)));
        let newer = PendingLogin {
            phone_code_hash: "h2".to_string(),
            session: "newer-session".to_string(),
            dc_id: None,
        };

        let hook_store = store.clone();
        let hook_login = newer.clone();
        let telegram = MockTelegramService::new()
            .with_before_sign_in(move || hook_store.insert(PHONE, hook_login));
        let deps = TestDependencies {
            telegram: Arc::new(telegram),
            pending_logins: store,
        };
        with_pending(&deps);

        verify_code(&credentials(), PHONE, "12345", "h1", &deps.server_deps())
            .await
            .unwrap();

        assert_eq!(deps.pending_logins.get(PHONE), Some(newer));
    }
}
