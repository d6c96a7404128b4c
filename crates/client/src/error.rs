//! API client error model.

use thiserror::Error;

/// The CRUD verb a request was performing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Create,
    Replace,
    Remove,
}

impl Operation {
    pub fn method(&self) -> &'static str {
        match self {
            Operation::Read => "GET",
            Operation::Create => "POST",
            Operation::Replace => "PUT",
            Operation::Remove => "DELETE",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.method())
    }
}

/// A failed API round trip. Every variant names the operation and path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{op} {path}: network error: {message}")]
    Transport {
        op: Operation,
        path: String,
        message: String,
    },

    #[error("{op} {path}: backend returned status {status}")]
    Status {
        op: Operation,
        path: String,
        status: u16,
    },

    #[error("{op} {path}: invalid response body: {message}")]
    Decode {
        op: Operation,
        path: String,
        message: String,
    },
}

impl ApiError {
    pub fn transport(op: Operation, path: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            op,
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn status(op: Operation, path: &str, status: u16) -> Self {
        Self::Status {
            op,
            path: path.to_string(),
            status,
        }
    }

    pub fn decode(op: Operation, path: &str, message: impl Into<String>) -> Self {
        Self::Decode {
            op,
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ApiError::Transport { op, .. } | ApiError::Status { op, .. } | ApiError::Decode { op, .. } => *op,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ApiError::Transport { path, .. }
            | ApiError::Status { path, .. }
            | ApiError::Decode { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
