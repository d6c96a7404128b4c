//! `crudops-client` — REST client for the CrudOps backend.
//!
//! Four verbs, one round trip each, no retries. Callers depend on the
//! [`RestApi`] trait; [`ApiClient`] is the HTTP implementation and
//! [`InMemoryApi`] a json-server lookalike for tests and local dev.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod memory;

pub use api::{RestApi, RestApiExt, query_path};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, Operation};
pub use memory::InMemoryApi;
