//! Messaging domain - sending text messages from a signed-in session

pub mod actions;
