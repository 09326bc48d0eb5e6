//! ID-keyed lookup adapter.
//!
//! [`id_lookup`] turns a collaborator call of shape
//! `(LookupContext, i64) -> Result<T, E>` into an actix [`Route`]. Per request
//! it reads the `id` path variable, parses it as a base-10 `i64`, builds a
//! request-scoped [`LookupContext`], invokes the collaborator once and hands
//! the outcome to [`encode`]. A malformed identifier short-circuits with 400
//! before the collaborator is touched.
//!
//! ```text
//! GET /api/v1/students/42      -> lookup(ctx, 42)
//! GET /api/v1/students/forty   -> 400 {"error":"id should be an integer"}
//! ```

use std::error::Error as StdError;
use std::future::Future;
use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Route, web};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span};

use super::envelope::{RequestSummary, encode};
use super::error::HandlerError;
use crate::domain::LookupContext;
use crate::middleware::TraceId;

/// Name of the path variable holding the identifier.
pub const ID_PATH_VARIABLE: &str = "id";

/// Per-route adapter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupSettings {
    failure_status: StatusCode,
    deadline: Option<Duration>,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            failure_status: StatusCode::INTERNAL_SERVER_ERROR,
            deadline: None,
        }
    }
}

impl LookupSettings {
    /// Status reported when the collaborator fails.
    #[must_use]
    pub fn with_failure_status(mut self, status: StatusCode) -> Self {
        self.failure_status = status;
        self
    }

    /// Deadline forwarded to collaborators, measured from request arrival.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Status reported when the collaborator fails.
    pub fn failure_status(&self) -> StatusCode {
        self.failure_status
    }

    /// Deadline forwarded to collaborators, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

/// Parse a path identifier as a signed base-10 64-bit integer.
///
/// # Examples
/// ```
/// use markbook::inbound::http::lookup::parse_id;
///
/// assert_eq!(parse_id("42").ok(), Some(42));
/// assert_eq!(parse_id("-7").ok(), Some(-7));
/// assert!(parse_id("abc").is_err());
/// ```
///
/// # Errors
/// Returns a 400 [`HandlerError`] carrying the parse error as its cause.
pub fn parse_id(raw: &str) -> Result<i64, HandlerError> {
    raw.parse::<i64>().map_err(HandlerError::invalid_id)
}

/// Bind an identifier lookup to a `GET` route.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use markbook::domain::{LookupContext, LookupError, Student};
/// use markbook::inbound::http::lookup::{LookupSettings, id_lookup};
///
/// let route = id_lookup(LookupSettings::default(), |_ctx: LookupContext, id| async move {
///     Ok::<_, LookupError>(Student::new(id, "Ada Lovelace"))
/// });
/// let _app = App::new().service(web::resource("/students/{id}").route(route));
/// ```
pub fn id_lookup<F, Fut, T, E>(settings: LookupSettings, lookup: F) -> Route
where
    F: Fn(LookupContext, i64) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
    T: Serialize + 'static,
    E: StdError + Send + Sync + 'static,
{
    web::get().to(move |req: HttpRequest| {
        let lookup = lookup.clone();
        async move { serve_id_lookup(&req, settings, lookup).await }
    })
}

/// Serve one identifier lookup for `req`.
///
/// Exposed for handlers that need to do extra work around the lookup while
/// keeping the parsing, error mapping and encoding behaviour of
/// [`id_lookup`].
pub async fn serve_id_lookup<F, Fut, T, E>(
    req: &HttpRequest,
    settings: LookupSettings,
    lookup: F,
) -> HttpResponse
where
    F: FnOnce(LookupContext, i64) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    T: Serialize,
    E: StdError + Send + Sync + 'static,
{
    let arrived = Instant::now();
    let summary = RequestSummary::from_request(req);
    let raw_id = req.match_info().get(ID_PATH_VARIABLE).unwrap_or_default();
    let span = info_span!("id_lookup", id = raw_id, path = summary.path());
    let outcome = run_lookup(raw_id, arrived, settings, lookup).instrument(span).await;
    encode(&summary, outcome)
}

async fn run_lookup<F, Fut, T, E>(
    raw_id: &str,
    arrived: Instant,
    settings: LookupSettings,
    lookup: F,
) -> Result<T, HandlerError>
where
    F: FnOnce(LookupContext, i64) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: StdError + Send + Sync + 'static,
{
    let id = parse_id(raw_id)?;

    let cancellation = CancellationToken::new();
    // Dropping the request future drops the guard and cancels the token.
    let _cancel_on_drop = cancellation.clone().drop_guard();
    let ctx = request_context(raw_id, id, arrived, settings, cancellation);

    lookup(ctx, id)
        .await
        .map_err(|err| HandlerError::lookup_failed(err, settings.failure_status()))
}

fn request_context(
    raw_id: &str,
    id: i64,
    arrived: Instant,
    settings: LookupSettings,
    cancellation: CancellationToken,
) -> LookupContext {
    let mut ctx = LookupContext::new(raw_id, id).with_cancellation(cancellation);
    if let Some(trace_id) = TraceId::current() {
        ctx = ctx.with_trace_id(trace_id.to_string());
    }
    if let Some(deadline) = settings
        .deadline()
        .and_then(|budget| arrived.checked_add(budget))
    {
        ctx = ctx.with_deadline(deadline);
    }
    ctx
}
