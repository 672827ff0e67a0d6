// ABOUTME: Error kinds surfaced by the chat gateway.
// ABOUTME: Typed gateway failures plus a transparent wrapper for provider errors.

use thiserror::Error;

/// Errors returned by [`Gateway`](crate::gateway::Gateway) operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// `setup` was asked for a provider nobody registered.
    #[error(
        "Unknown chat service: {name:?}. Available services are {}",
        .available.join(", ")
    )]
    UnknownService {
        name: String,
        available: Vec<String>,
    },

    /// No adapter is active yet.
    #[error("Chat service not configured. Call setup or enable_mock first")]
    NotConfigured,

    /// The active adapter lacks an optional capability.
    #[error("Adapter {adapter:?} does not support {operation}")]
    UnsupportedOperation {
        adapter: &'static str,
        operation: &'static str,
    },

    /// Failure raised by the adapter or its constructor, passed through as-is.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
