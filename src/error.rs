use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code attached to caller-facing failures (HTTP "bad request").
pub const BAD_REQUEST: u16 = 400;

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product with id: #{id} not found")]
    NotFound { id: i64 },
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Failures coming out of the persistence layer. Never retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Product database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No product row with id {0}")]
    RowNotFound(i64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown store backend: {0}")]
    UnknownBackend(String),
    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Structured failure handed back to an internal caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcPayload {
    pub message: String,
    pub status: u16,
}

impl CatalogError {
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// The structured payload for client errors. Store and transport
    /// failures have none and are forwarded as-is.
    pub fn rpc_payload(&self) -> Option<RpcPayload> {
        match self {
            Self::NotFound { .. } | Self::InvalidPagination(_) => Some(RpcPayload {
                message: self.to_string(),
                status: BAD_REQUEST,
            }),
            Self::Store(_) | Self::ActorCommunicationError(_) => None,
        }
    }
}
