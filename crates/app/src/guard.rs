//! Route guard: allow, or redirect, one navigation request.
//!
//! Rules run in a fixed order and the first hit wins:
//! 1. restricted path, no principal → `/login`
//! 2. elevated path, principal not admin → `/not-found`
//! 3. `/` or `/login` with a principal → `/dashboard`
//! 4. allow; unmapped paths render the not-found view

use crudops_auth::{AuthzError, Principal, authorize};

use crate::routes::{self, RouteEntry, ViewKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(ViewKind),
    Redirect(&'static str),
}

/// Decide a navigation request for `path` (query string already stripped).
pub fn evaluate(path: &str, principal: Option<&Principal>) -> GuardDecision {
    let entry: Option<&RouteEntry> = routes::lookup(path);

    if let Some(entry) = entry {
        match authorize(principal, entry.access) {
            Ok(()) => {}
            Err(AuthzError::Unauthenticated) => {
                tracing::debug!(path, "unauthenticated; redirecting to login");
                return GuardDecision::Redirect(routes::LOGIN);
            }
            Err(AuthzError::Forbidden(role)) => {
                tracing::debug!(path, %role, "insufficient role; redirecting to not-found");
                return GuardDecision::Redirect(routes::NOT_FOUND);
            }
        }
    }

    if principal.is_some() && (path == routes::ROOT || path == routes::LOGIN) {
        return GuardDecision::Redirect(routes::DASHBOARD);
    }

    GuardDecision::Allow(entry.map_or(ViewKind::NotFound, |e| e.view))
}
