//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, TelegramAdapter};
pub use test_dependencies::{MockTelegramService, TelegramCall, TestDependencies};
pub use traits::*;
