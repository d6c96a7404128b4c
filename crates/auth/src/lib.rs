//! `crudops-auth` — principal, session slot and credential gateway.
//!
//! Authorization here is a pure check over an optional principal; storage
//! and transport are injected ([`SessionSlot`], [`crudops_client::RestApi`]).

pub mod authorize;
pub mod gateway;
pub mod principal;
pub mod roles;
pub mod session;

pub use authorize::{Access, AuthzError, authorize};
pub use gateway::{AuthError, AuthGateway};
pub use principal::{NewPrincipal, Principal};
pub use roles::Role;
pub use session::{FileSlot, MemorySlot, SESSION_KEY, SessionError, SessionSlot, SessionStore};
