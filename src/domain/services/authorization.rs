//! Authorization gate for write operations.
//!
//! The gate is stateless: it only looks at the identity the session provider
//! resolved for the request.

/// Identity of the caller, as carried by a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
    pub admin: bool,
}

/// The caller may not perform the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Request not authorized")]
pub struct RequestNotAuthorized;

/// Domain service deciding whether a caller may write.
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Require an authenticated session.
    pub fn authorize(session: Option<&SessionUser>) -> Result<&SessionUser, RequestNotAuthorized> {
        session.ok_or(RequestNotAuthorized)
    }

    /// Require an authenticated session belonging to an administrator.
    pub fn authorize_admin(
        session: Option<&SessionUser>,
    ) -> Result<&SessionUser, RequestNotAuthorized> {
        Self::authorize(session).and_then(|user| {
            if user.admin {
                Ok(user)
            } else {
                Err(RequestNotAuthorized)
            }
        })
    }
}
