use serde::{Deserialize, Serialize};

use crudops_core::error::require;
use crudops_core::{DomainError, DomainResult, EntityId};

use crate::Role;

/// The authenticated user: identity plus role.
///
/// `password` is the clear-text marker stored by the mock backend and
/// compared verbatim at login. This is a placeholder, not a security model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Registration form: a principal the backend has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrincipal {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl NewPrincipal {
    /// A self-service registration (role `user`).
    pub fn user(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into().trim().to_string(),
            password: password.into(),
            role: Role::User,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        if !self.email.contains('@') {
            return Err(DomainError::validation("email must contain '@'"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_user_when_missing() {
        let p: Principal = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Ravi",
            "email": "ravi@example.com",
            "password": "pw"
        }))
        .unwrap();
        assert_eq!(p.role, Role::User);
        assert_eq!(p.id, EntityId::from(4));
        assert!(!p.is_admin());
    }

    #[test]
    fn registration_requires_every_field() {
        assert!(NewPrincipal::user("", "a@b.c", "pw").validate().is_err());
        assert!(NewPrincipal::user("A", "a@b.c", "").validate().is_err());
        assert!(NewPrincipal::user("A", "ab.c", "pw").validate().is_err());
        assert!(NewPrincipal::user("A", " a@b.c ", "pw").validate().is_ok());
    }
}
