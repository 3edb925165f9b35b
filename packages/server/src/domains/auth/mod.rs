//! Auth domain - two-step login against Telegram (phone number + code)
//!
//! Responsibilities:
//! - Requesting login codes and remembering the session that asked for them
//! - Verifying codes and handing back the signed-in session string

pub mod actions;
pub mod models;

pub use models::{PendingLogin, PendingLoginStore};
