use thiserror::Error;

use crate::{Principal, Role};

/// Access level a navigation target requires.
///
/// `Admin` implies `Authenticated`: an elevated target is always a
/// restricted one too.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Access {
    pub fn requires_auth(&self) -> bool {
        matches!(self, Access::Authenticated | Access::Admin)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Access::Admin)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("forbidden: requires role '{0}'")]
    Forbidden(Role),
}

/// Check an optional principal against an access level.
///
/// - No IO
/// - Authentication is checked before role
pub fn authorize(principal: Option<&Principal>, access: Access) -> Result<(), AuthzError> {
    if access.requires_auth() && principal.is_none() {
        return Err(AuthzError::Unauthenticated);
    }

    if access.requires_admin() && !principal.is_some_and(Principal::is_admin) {
        return Err(AuthzError::Forbidden(Role::Admin));
    }

    Ok(())
}
