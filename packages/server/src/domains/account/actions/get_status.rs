//! Get status action

use tracing::{debug, warn};

use crate::common::{AccountInfo, ApiError, Credentials};
use crate::kernel::ServerDeps;

/// Profile of the account behind `session_string`.
pub async fn get_status(
    credentials: &Credentials,
    session_string: &str,
    deps: &ServerDeps,
) -> Result<AccountInfo, ApiError> {
    let user = deps
        .telegram
        .get_me(credentials, session_string)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch account status");
            ApiError::from(e)
        })?;

    debug!(user_id = user.id, "Fetched account status");
    Ok(user.into())
}
