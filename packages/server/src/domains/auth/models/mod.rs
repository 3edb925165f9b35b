mod pending_login;

pub use pending_login::{spawn_sweeper, PendingLogin, PendingLoginStore};
