// HTTP routes
pub mod account;
pub mod auth;
pub mod health;
pub mod messages;

pub use account::*;
pub use auth::*;
pub use health::*;
pub use messages::*;
