use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};

use common::user::User;

/// Header carrying the authenticated user as a JSON document.
///
/// Authentication itself happens upstream; this gateway trusts the
/// header and hands the user to every core operation as an explicit
/// parameter.
pub const USER_HEADER: &str = "x-access-user";

/// Authenticated user extracted from the [`USER_HEADER`] header.
///
/// Add this as a handler parameter to require a user on the request.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(USER_HEADER).ok_or((
            StatusCode::UNAUTHORIZED,
            format!("missing {} header", USER_HEADER),
        ))?;

        let user: User = serde_json::from_slice(header.as_bytes()).map_err(|e| {
            (
                StatusCode::UNAUTHORIZED,
                format!("malformed {} header: {}", USER_HEADER, e),
            )
        })?;

        Ok(CurrentUser(user))
    }
}
