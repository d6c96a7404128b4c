//! HTTP implementation of [`RestApi`] over `reqwest`.

use async_trait::async_trait;
use serde_json::Value;

use crate::{ApiError, ClientConfig, Operation, RestApi};

/// Client for the CrudOps REST backend.
///
/// No caching, no retries, no timeout beyond `reqwest` defaults.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(
        &self,
        op: Operation,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        let req = match op {
            Operation::Read => self.http.get(&url),
            Operation::Create => self.http.post(&url),
            Operation::Replace => self.http.put(&url),
            Operation::Remove => self.http.delete(&url),
        };
        let req = match body {
            Some(body) => req.json(&body),
            None => req,
        };

        tracing::debug!(%op, path, "api request");
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%op, path, error = %e, "api transport failure");
            ApiError::transport(op, path, e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%op, path, status = status.as_u16(), "api request rejected");
            return Err(ApiError::status(op, path, status.as_u16()));
        }

        Ok(resp)
    }

    async fn json_body(op: Operation, path: &str, resp: reqwest::Response) -> Result<Value, ApiError> {
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::transport(op, path, e.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(op, path, e.to_string()))
    }
}

#[async_trait]
impl RestApi for ApiClient {
    async fn read(&self, path: &str) -> Result<Value, ApiError> {
        let resp = self.execute(Operation::Read, path, None).await?;
        Self::json_body(Operation::Read, path, resp).await
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let resp = self.execute(Operation::Create, path, Some(body)).await?;
        Self::json_body(Operation::Create, path, resp).await
    }

    async fn replace(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let resp = self.execute(Operation::Replace, path, Some(body)).await?;
        Self::json_body(Operation::Replace, path, resp).await
    }

    async fn remove(&self, path: &str) -> Result<bool, ApiError> {
        self.execute(Operation::Remove, path, None).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/students"), "http://localhost:3000/students");
    }
}
