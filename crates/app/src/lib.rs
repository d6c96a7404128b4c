//! `crudops-app`
//!
//! **Responsibility:** the client shell around the CrudOps backend.
//!
//! This crate provides:
//! - The route table and route guard
//! - Views rendering to a text [`Screen`](screen::Screen)
//! - A dispatcher that turns navigation events and actions into screens
//!
//! Session state and credentials live in `crudops-auth`; HTTP lives in
//! `crudops-client`.

pub mod actions;
pub mod context;
pub mod dispatcher;
pub mod guard;
pub mod location;
pub mod routes;
pub mod screen;
pub mod views;

pub use actions::{Action, ActionKind};
pub use context::AppContext;
pub use dispatcher::{DispatchError, Dispatcher, Navigation};
pub use guard::{GuardDecision, evaluate};
pub use location::Location;
pub use routes::ViewKind;
pub use screen::{Alert, FormError, Screen};
