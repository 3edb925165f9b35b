//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP routes.

mod request_code;
mod verify_code;

pub use request_code::{request_code, RequestCodeResult};
pub use verify_code::{verify_code, VerifyCodeResult};
