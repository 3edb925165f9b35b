//! Account domain - profile of the account behind a session

pub mod actions;
