//! Authentication guard shared by protected HTTP handlers.
//!
//! Every protected operation resolves the acting user from the store on each
//! request (exercising the account service's bounded retry), so a deleted
//! account or wiped database invalidates live sessions immediately.

use crate::domain::{Error, User};

use super::session::SessionContext;
use super::state::HttpState;
use super::ApiResult;

/// Resolve the current user or reject the request.
///
/// A session naming a user that no longer resolves is purged and answered
/// with `401 Unauthorized`; store outages surface as `503`.
pub async fn require_current_user(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<User> {
    let user_id = session.require_user_id()?;
    match state.accounts.resolve(&user_id).await? {
        Some(user) => Ok(user),
        None => {
            tracing::warn!(user_id = %user_id, "session references unknown user, purging");
            session.purge();
            Err(Error::unauthorized("login required"))
        }
    }
}
