// Telegram API server - core library
//
// HTTP wrapper around a Telegram client: request a login code, verify it,
// send messages and read the account profile with the resulting session.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
