//! Credential gateway: resolves credentials to a principal and owns the
//! session store.

use thiserror::Error;

use crudops_client::{RestApi, RestApiExt, query_path};
use crudops_core::error::same_email;
use crudops_core::DomainError;

use crate::{NewPrincipal, Principal, SessionError, SessionStore};

const USERS: &str = "/users";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No matching credentials, or the backend could not be asked.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("registration failed: {0}")]
    RegistrationFailed(String),

    #[error(transparent)]
    Validation(#[from] DomainError),
}

/// Authentication boundary between views and the backend's `/users`.
#[derive(Debug)]
pub struct AuthGateway<A> {
    api: A,
    session: SessionStore,
}

impl<A: RestApi> AuthGateway<A> {
    pub fn new(api: A, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.session.principal()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.principal().is_some()
    }

    pub fn has_admin_role(&self) -> bool {
        self.session.principal().is_some_and(Principal::is_admin)
    }

    /// Look up `email`/`password` and start a session on a match.
    ///
    /// A miss and a backend failure are reported identically.
    pub async fn authenticate(&mut self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let email = email.trim();
        let path = query_path(USERS, &[("email", email), ("password", password)]);

        let candidates: Vec<Principal> = match self.api.read_as(&path).await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(error = %e, "credential lookup failed");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let principal = candidates
            .into_iter()
            .find(|u| same_email(&u.email, email) && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(email = %principal.email, role = %principal.role, "authenticated");
        persisted(self.session.set_principal(principal.clone()));
        Ok(principal)
    }

    /// Create an account after an email-uniqueness check, then sign it in.
    pub async fn register(&mut self, new: NewPrincipal) -> Result<Principal, AuthError> {
        new.validate()?;

        let existing: Vec<Principal> = self
            .api
            .read_as(USERS)
            .await
            .map_err(|e| AuthError::RegistrationFailed(e.to_string()))?;
        if existing.iter().any(|u| same_email(&u.email, &new.email)) {
            return Err(AuthError::EmailTaken);
        }

        let principal: Principal = self
            .api
            .create_as(USERS, &new)
            .await
            .map_err(|e| AuthError::RegistrationFailed(e.to_string()))?;

        tracing::info!(email = %principal.email, "registered");
        persisted(self.session.set_principal(principal.clone()));
        Ok(principal)
    }

    /// Client-side logout; the backend is not told.
    pub fn end_session(&mut self) {
        if let Some(p) = self.session.principal() {
            tracing::info!(email = %p.email, "session ended");
        }
        persisted(self.session.clear_principal());
    }

    /// Re-check a restored session against the backend.
    ///
    /// Clears the session if the user record is gone or unreadable. Returns
    /// whether a session survives.
    pub async fn revalidate(&mut self) -> bool {
        let Some(current) = self.session.principal() else {
            return false;
        };
        let path = format!("{USERS}/{}", current.id);

        match self.api.read_as::<Principal>(&path).await {
            Ok(fresh) if same_email(&fresh.email, &current.email) => {
                if &fresh != current {
                    persisted(self.session.set_principal(fresh));
                }
                true
            }
            Ok(_) => {
                tracing::warn!(%path, "session user changed identity; signing out");
                persisted(self.session.clear_principal());
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "session re-validation failed; signing out");
                persisted(self.session.clear_principal());
                false
            }
        }
    }
}

/// The in-memory session stays authoritative when the slot cannot be written.
fn persisted(result: Result<(), SessionError>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "session slot not updated");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{MemorySlot, Role};
    use crudops_client::{InMemoryApi, Operation};
    use crudops_core::EntityId;
    use serde_json::json;

    fn backend() -> Arc<InMemoryApi> {
        let api = Arc::new(InMemoryApi::with_collections(&["users"]));
        api.seed(
            "users",
            vec![
                json!({
                    "id": 1,
                    "name": "Admin",
                    "email": "admin@crudops.com",
                    "password": "admin123",
                    "role": "admin"
                }),
                json!({
                    "id": 2,
                    "name": "Ravi",
                    "email": "ravi@example.com",
                    "password": "ravi123",
                    "role": "user"
                }),
            ],
        );
        api
    }

    fn gateway(api: Arc<InMemoryApi>) -> AuthGateway<Arc<InMemoryApi>> {
        AuthGateway::new(api, SessionStore::new(MemorySlot::new()))
    }

    #[tokio::test]
    async fn admin_login_succeeds_and_sets_session() {
        let mut gw = gateway(backend());

        let principal = gw.authenticate("admin@crudops.com", "admin123").await.unwrap();

        assert_eq!(principal.role, Role::Admin);
        assert_eq!(gw.principal(), Some(&principal));
        assert!(gw.is_authenticated());
        assert!(gw.has_admin_role());
    }

    #[tokio::test]
    async fn wrong_password_is_generic_failure() {
        let mut gw = gateway(backend());

        let err = gw.authenticate("admin@crudops.com", "nope").await.unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "invalid email or password");
        assert_eq!(gw.principal(), None);
    }

    #[tokio::test]
    async fn transport_failure_looks_like_bad_credentials() {
        let api = backend();
        api.set_unreachable(true);
        let mut gw = gateway(api);

        let err = gw.authenticate("admin@crudops.com", "admin123").await.unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!gw.is_authenticated());
    }

    #[tokio::test]
    async fn non_admin_has_no_admin_role() {
        let mut gw = gateway(backend());
        gw.authenticate("ravi@example.com", "ravi123").await.unwrap();
        assert!(gw.is_authenticated());
        assert!(!gw.has_admin_role());
    }

    #[tokio::test]
    async fn register_creates_and_signs_in() {
        let api = backend();
        let mut gw = gateway(api.clone());

        let p = gw
            .register(NewPrincipal::user("Meena", "meena@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(p.id, EntityId::from(3));
        assert_eq!(p.role, Role::User);
        assert_eq!(gw.principal(), Some(&p));
        assert_eq!(api.count("users"), 3);
    }

    #[tokio::test]
    async fn register_rejects_email_differing_only_in_case() {
        let api = backend();
        let mut gw = gateway(api.clone());

        gw.register(NewPrincipal::user("Meena", "meena@example.com", "pw"))
            .await
            .unwrap();
        gw.end_session();

        let err = gw
            .register(NewPrincipal::user("Meena 2", "MEENA@Example.com", "pw"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::EmailTaken);
        assert_eq!(api.count("users"), 3);
        assert!(!gw.is_authenticated());
    }

    #[tokio::test]
    async fn register_validates_before_any_request() {
        let api = backend();
        let mut gw = gateway(api.clone());

        let err = gw.register(NewPrincipal::user("", "x@y.z", "pw")).await.unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn end_session_clears_store() {
        let mut gw = gateway(backend());
        gw.authenticate("admin@crudops.com", "admin123").await.unwrap();
        gw.end_session();
        assert!(!gw.is_authenticated());
        assert!(!gw.has_admin_role());
    }

    #[tokio::test]
    async fn revalidate_drops_deleted_user() {
        let api = backend();
        let slot = MemorySlot::new();
        let mut gw = AuthGateway::new(api.clone(), SessionStore::new(slot.clone()));
        gw.authenticate("ravi@example.com", "ravi123").await.unwrap();

        api.remove("/users/2").await.unwrap();

        let mut restored = SessionStore::new(slot);
        restored.init();
        let mut gw = AuthGateway::new(api.clone(), restored);
        assert!(gw.is_authenticated());
        assert!(!gw.revalidate().await);
        assert!(!gw.is_authenticated());
        assert_eq!(api.requests().last(), Some(&(Operation::Read, "/users/2".to_string())));
    }

    #[tokio::test]
    async fn revalidate_keeps_existing_user() {
        let mut gw = gateway(backend());
        gw.authenticate("admin@crudops.com", "admin123").await.unwrap();
        assert!(gw.revalidate().await);
        assert!(gw.has_admin_role());
    }
}
