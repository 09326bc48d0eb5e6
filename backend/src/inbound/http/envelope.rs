//! Response envelope encoder.
//!
//! [`encode`] owns every byte written back to the client for an adapter
//! invocation. It accepts the handler outcome and produces exactly one
//! response and exactly one log event:
//!
//! - failure: the failure's status with `{"error": "<message>"}`; the cause
//!   is logged, never sent.
//! - result serialising to JSON `null`: a broken handler contract, answered
//!   with 500.
//! - result that cannot be serialised: 500 with a generic body.
//! - otherwise: 200 with `Content-Type: application/json` and the serialised
//!   result.

use actix_web::http::Method;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::{error, info};

use super::error::HandlerError;

const NULL_JSON: &[u8] = b"null";

/// Request attributes recorded in access and error logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    method: Method,
    path: String,
    remote_addr: Option<String>,
}

impl RequestSummary {
    /// Capture method, path (with query) and peer address from a request.
    pub fn from_request(req: &HttpRequest) -> Self {
        Self {
            method: req.method().clone(),
            path: req.uri().to_string(),
            remote_addr: req.peer_addr().map(|addr| addr.to_string()),
        }
    }

    /// Request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path including any query string.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Peer address, when the transport exposes one.
    pub fn remote_addr(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }

    fn remote_addr_or_dash(&self) -> &str {
        self.remote_addr().unwrap_or("-")
    }
}

/// Turn a handler outcome into the response written to the client.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use actix_web::test::TestRequest;
/// use markbook::inbound::http::envelope::{RequestSummary, encode};
/// use markbook::inbound::http::error::HandlerError;
///
/// let summary = RequestSummary::from_request(&TestRequest::get().to_http_request());
/// let response = encode(&summary, Ok::<_, HandlerError>(vec![1, 2, 3]));
/// assert_eq!(response.status(), StatusCode::OK);
///
/// let response = encode(&summary, Ok::<Option<u8>, HandlerError>(None));
/// assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
/// ```
pub fn encode<T>(request: &RequestSummary, outcome: Result<T, HandlerError>) -> HttpResponse
where
    T: Serialize,
{
    let result = match outcome {
        Ok(result) => result,
        Err(failure) => return reject(request, &failure),
    };

    let bytes = match serde_json::to_vec(&result) {
        Ok(bytes) if bytes == NULL_JSON => {
            error!(
                method = %request.method(),
                path = request.path(),
                remote_addr = request.remote_addr_or_dash(),
                status = 500_u16,
                "handler produced neither a result nor an error"
            );
            return HandlerError::missing_result().error_response();
        }
        Ok(bytes) => bytes,
        Err(err) => {
            let failure = HandlerError::encoding(err);
            error!(
                method = %request.method(),
                path = request.path(),
                remote_addr = request.remote_addr_or_dash(),
                status = failure.status().as_u16(),
                cause = %failure.cause().map(ToString::to_string).unwrap_or_default(),
                "failed to serialise response body"
            );
            return failure.error_response();
        }
    };

    info!(
        remote_addr = request.remote_addr_or_dash(),
        method = %request.method(),
        path = request.path(),
        status = 200_u16,
        "request served"
    );
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(bytes)
}

fn reject(request: &RequestSummary, failure: &HandlerError) -> HttpResponse {
    let cause = failure
        .cause()
        .map(ToString::to_string)
        .unwrap_or_else(|| failure.message().to_owned());
    error!(
        method = %request.method(),
        path = request.path(),
        remote_addr = request.remote_addr_or_dash(),
        status = failure.status().as_u16(),
        kind = ?failure.kind(),
        %cause,
        "request failed"
    );
    failure.error_response()
}
