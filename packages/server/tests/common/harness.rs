//! Test harness for integration testing.
//!
//! Builds the full router on top of the mock Telegram service, so tests
//! exercise the real middleware stack and JSON shapes.

use axum::Router;
use serde_json::{json, Value};
use server_core::kernel::{MockTelegramService, TestDependencies};
use server_core::server::build_app;
use std::time::Duration;
use test_context::AsyncTestContext;

use super::ApiClient;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_PHONE: &str = "+15551234567";

/// Test harness that owns the mocks and the router built on them.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let response = ctx.api().get("/health").await;
///     // ... assertions
/// }
/// ```
pub struct TestHarness {
    pub deps: TestDependencies,
    pub app: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {
        // Mocks and router are dropped with the harness
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_telegram(MockTelegramService::new())
    }

    /// Harness whose Telegram mock has queued responses.
    pub fn with_telegram(telegram: MockTelegramService) -> Self {
        let _ = tracing_subscriber_init();

        let deps = TestDependencies::with_telegram(telegram);
        let app = build_app(
            deps.server_deps(),
            TEST_API_KEY.to_string(),
            Duration::from_secs(5),
        );

        Self { deps, app }
    }

    /// Client carrying the correct bearer token.
    pub fn api(&self) -> ApiClient {
        self.api_with_header(Some(format!("Bearer {}", TEST_API_KEY)))
    }

    /// Client with an arbitrary (or no) Authorization header.
    pub fn api_with_header(&self, authorization: Option<String>) -> ApiClient {
        ApiClient::new(self.app.clone(), authorization)
    }
}

/// Request body fields every Telegram endpoint needs.
pub fn credentials() -> Value {
    json!({ "api_id": 12345, "api_hash": "0123456789abcdef" })
}

/// `credentials()` merged with `fields`.
pub fn body_with(fields: Value) -> Value {
    let mut body = credentials();
    if let (Some(target), Some(extra)) = (body.as_object_mut(), fields.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
    body
}

fn tracing_subscriber_init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
}
