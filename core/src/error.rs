//! Error types for the search cluster client.
//!
//! # Design
//! Argument and option errors are raised while the request descriptor is
//! built, so they never reach the transport. Transport failures are boxed
//! with their source intact; callers that need the concrete type can
//! `downcast_ref` it. `NotFound` and `HttpError` only come out of the
//! response helpers, because the dispatcher itself does not interpret status
//! codes.

use thiserror::Error;

/// Errors returned by request builders, clients, and response helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required path argument or body was missing or empty.
    #[error("empty value passed for a required argument '{0}'")]
    InvalidArgument(&'static str),

    /// An option outside the endpoint's allow-list under the `Reject` policy.
    #[error("unrecognized parameter '{param}' for {endpoint}")]
    UnknownParameter { endpoint: &'static str, param: String },

    /// No endpoint is registered under this name.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// The transport failed to perform the request.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// True for errors raised before any request reached the transport.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidArgument(_)
                | ApiError::UnknownParameter { .. }
                | ApiError::UnknownOperation(_)
                | ApiError::SerializationError(_)
        )
    }
}
