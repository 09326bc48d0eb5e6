//! Typed failures produced by HTTP adapters.
//!
//! A [`HandlerError`] pairs a client-safe message and status code with the
//! underlying cause. Only the message reaches the client, rendered as
//! `{"error": "<message>"}`; the cause is reserved for logs.

use std::error::Error as StdError;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Boxed underlying cause of a failure.
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Message returned when the path identifier is not a base-10 `i64`.
pub const INVALID_ID_MESSAGE: &str = "id should be an integer";
/// Message returned for every failed collaborator lookup.
pub const LOOKUP_FAILED_MESSAGE: &str = "failed to get all entities";
/// Message returned when a handler breaks its result contract.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";
/// Message returned when a result cannot be serialised to JSON.
pub const ENCODING_ERROR_MESSAGE: &str = "failed to encode response";
/// Message returned for unmatched routes.
pub const NOT_FOUND_MESSAGE: &str = "resource not found";
/// Message returned by failing health probes.
pub const UNAVAILABLE_MESSAGE: &str = "service unavailable";

/// Failure category. Each kind has a default status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request is malformed, e.g. a non-numeric identifier.
    InvalidRequest,
    /// No route or resource matches the request.
    NotFound,
    /// A bound collaborator reported an error.
    LookupFailed,
    /// A handler produced neither a result nor an error.
    Internal,
    /// The result could not be serialised.
    Encoding,
    /// The service is not ready or is draining.
    Unavailable,
}

impl ErrorKind {
    /// Status used when the failure does not carry an explicit one.
    pub fn default_status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::LookupFailed | Self::Internal | Self::Encoding => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// JSON body written for every failure.
///
/// # Examples
/// ```
/// use markbook::inbound::http::error::ErrorBody;
///
/// let body = serde_json::to_string(&ErrorBody::new("nope")).unwrap();
/// assert_eq!(body, r#"{"error":"nope"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Client-facing failure message.
    pub error: String,
}

impl ErrorBody {
    /// Wrap a client-facing message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Typed failure consumed exactly once by the response encoder.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    kind: ErrorKind,
    status: StatusCode,
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl HandlerError {
    fn new(kind: ErrorKind, message: impl Into<String>, cause: Option<BoxedCause>) -> Self {
        Self {
            kind,
            status: kind.default_status(),
            message: message.into(),
            cause,
        }
    }

    /// The identifier could not be parsed.
    pub fn invalid_id<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(
            ErrorKind::InvalidRequest,
            INVALID_ID_MESSAGE,
            Some(Box::new(cause)),
        )
    }

    /// A bound lookup failed. The client sees a generic message and `status`.
    pub fn lookup_failed<E>(cause: E, status: StatusCode) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(
            ErrorKind::LookupFailed,
            LOOKUP_FAILED_MESSAGE,
            Some(Box::new(cause)),
        )
        .with_status(status)
    }

    /// A handler yielded no result and no error.
    pub fn missing_result() -> Self {
        Self::new(ErrorKind::Internal, INTERNAL_ERROR_MESSAGE, None)
    }

    /// Serialising a result failed.
    pub fn encoding(cause: serde_json::Error) -> Self {
        Self::new(
            ErrorKind::Encoding,
            ENCODING_ERROR_MESSAGE,
            Some(Box::new(cause)),
        )
    }

    /// No resource matches the request.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound, NOT_FOUND_MESSAGE, None)
    }

    /// The service cannot take traffic.
    pub fn unavailable() -> Self {
        Self::new(ErrorKind::Unavailable, UNAVAILABLE_MESSAGE, None)
    }

    /// Override the status derived from the kind.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Status written to the client.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Underlying cause, if any. Never sent to clients.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Body written for this failure.
    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.message.as_str())
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.body())
    }
}
