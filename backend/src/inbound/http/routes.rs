//! Route table.
//!
//! ```text
//! GET /api/v1/students/{id}        -> StudentDirectory::student_by_id
//! GET /api/v1/students/{id}/marks  -> MarksQuery::marks_for_student
//! GET /health/ready, /health/live  -> probes
//! *                                -> 404 {"error":"resource not found"}
//! ```
//!
//! [`configure`] is called once per worker while the server is being built;
//! the resulting table is immutable for the lifetime of the process.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};

use super::envelope::{RequestSummary, encode};
use super::error::HandlerError;
use super::health::{live, ready};
use super::lookup::id_lookup;
use super::state::HttpState;
use crate::domain::LookupContext;

/// Prefix shared by every versioned API route.
pub const API_PREFIX: &str = "/api/v1";

/// Register every route backed by `state`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use markbook::inbound::http::lookup::LookupSettings;
/// use markbook::inbound::http::routes::configure;
/// use markbook::inbound::http::state::HttpState;
///
/// let state = HttpState::fixtures(LookupSettings::default());
/// let _app = App::new().configure(|cfg| configure(cfg, &state));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, state: &HttpState) {
    let students = Arc::clone(&state.students);
    let student_by_id = id_lookup(state.lookup, move |ctx: LookupContext, id| {
        let students = Arc::clone(&students);
        async move { students.student_by_id(&ctx, id).await }
    });

    let marks = Arc::clone(&state.marks);
    let marks_for_student = id_lookup(state.lookup, move |ctx: LookupContext, id| {
        let marks = Arc::clone(&marks);
        async move { marks.marks_for_student(&ctx, id).await }
    });

    cfg.service(
        web::scope(API_PREFIX)
            .service(web::resource("/students/{id}").route(student_by_id))
            .service(web::resource("/students/{id}/marks").route(marks_for_student)),
    )
    .service(ready)
    .service(live)
    .default_service(web::to(not_found));
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    encode::<()>(
        &RequestSummary::from_request(&req),
        Err(HandlerError::not_found()),
    )
}

#[cfg(test)]
mod tests;
