// Common test utilities

pub mod api;
pub mod harness;

pub use api::*;
pub use harness::*;
