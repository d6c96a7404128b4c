//! Application context shared by the dispatcher, views and actions.

use crudops_auth::{AuthGateway, Principal, SessionStore};
use crudops_client::RestApi;

/// Explicit context object: the gateway (which owns the session store) and,
/// through it, the API client. Passed by `&mut` into views and actions.
#[derive(Debug)]
pub struct AppContext<A> {
    pub auth: AuthGateway<A>,
}

impl<A: RestApi> AppContext<A> {
    pub fn new(api: A, session: SessionStore) -> Self {
        Self {
            auth: AuthGateway::new(api, session),
        }
    }

    pub fn api(&self) -> &A {
        self.auth.api()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.auth.principal()
    }

    pub fn is_admin(&self) -> bool {
        self.auth.has_admin_role()
    }
}
