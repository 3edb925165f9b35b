// Business domains
pub mod account;
pub mod auth;
pub mod messaging;
