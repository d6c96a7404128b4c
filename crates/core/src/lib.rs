//! `crudops-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no transport or storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod resource;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::EntityId;
pub use resource::{Payment, Student};
