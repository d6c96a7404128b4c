//! The `RestApi` seam and its typed helpers.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ApiError, Operation};

/// Four CRUD verbs against `base_url + path`.
///
/// `path` is everything after the base URL, including any query string
/// (e.g. `/users?email=a%40b.c`). Implementations perform exactly one
/// attempt per call.
#[async_trait]
pub trait RestApi: Send + Sync {
    async fn read(&self, path: &str) -> Result<Value, ApiError>;

    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    async fn replace(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    /// Yields `true` once the backend acknowledged the delete.
    async fn remove(&self, path: &str) -> Result<bool, ApiError>;
}

#[async_trait]
impl<S> RestApi for Arc<S>
where
    S: RestApi + ?Sized,
{
    async fn read(&self, path: &str) -> Result<Value, ApiError> {
        (**self).read(path).await
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        (**self).create(path, body).await
    }

    async fn replace(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        (**self).replace(path, body).await
    }

    async fn remove(&self, path: &str) -> Result<bool, ApiError> {
        (**self).remove(path).await
    }
}

/// Typed wrappers over [`RestApi`] using `serde`.
#[async_trait]
pub trait RestApiExt: RestApi {
    async fn read_as<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.read(path).await?;
        decode(Operation::Read, path, value)
    }

    async fn create_as<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let body = encode(Operation::Create, path, body)?;
        let value = self.create(path, body).await?;
        decode(Operation::Create, path, value)
    }

    async fn replace_as<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let body = encode(Operation::Replace, path, body)?;
        let value = self.replace(path, body).await?;
        decode(Operation::Replace, path, value)
    }
}

impl<A: RestApi + ?Sized> RestApiExt for A {}

fn encode<B: Serialize>(op: Operation, path: &str, body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::decode(op, path, e.to_string()))
}

fn decode<T: DeserializeOwned>(op: Operation, path: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::decode(op, path, e.to_string()))
}

/// Append an url-encoded query string to `path`.
pub fn query_path(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}
