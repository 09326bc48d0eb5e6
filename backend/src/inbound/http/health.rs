//! Liveness and readiness probes.
//!
//! Both probes answer through the response encoder, so orchestrators see the
//! same JSON envelope as API clients: `{"status":"ok"}` on success and
//! `{"error":"service unavailable"}` with 503 otherwise. Responses are never
//! cached.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::Serialize;

use super::envelope::{RequestSummary, encode};
use super::error::HandlerError;

/// Readiness and liveness flags shared across workers.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Not ready, but alive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service ready to take traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes, e.g. while draining for shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether the service can accept traffic.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the process is still healthy.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

#[derive(Debug, Serialize)]
struct ProbeStatus {
    status: &'static str,
}

fn probe_response(req: &HttpRequest, probe_ok: bool) -> HttpResponse {
    let outcome = if probe_ok {
        Ok(ProbeStatus { status: "ok" })
    } else {
        Err(HandlerError::unavailable())
    };
    let mut response = encode(&RequestSummary::from_request(req), outcome);
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

/// Readiness probe: 200 once the server is initialised, 503 before.
#[get("/health/ready")]
pub async fn ready(req: HttpRequest, state: web::Data<HealthState>) -> HttpResponse {
    probe_response(&req, state.is_ready())
}

/// Liveness probe: 200 while alive, 503 once draining.
#[get("/health/live")]
pub async fn live(req: HttpRequest, state: web::Data<HealthState>) -> HttpResponse {
    probe_response(&req, state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn probe(state: HealthState, uri: &str) -> (StatusCode, Option<String>, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(ready)
                .service(live),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let body: Value = test::read_body_json(res).await;
        (status, cache, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_fails_until_marked_ready() {
        let (status, cache, body) = probe(HealthState::new(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body, json!({"error": "service unavailable"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_succeeds_once_marked_ready() {
        let state = HealthState::new();
        state.mark_ready();
        let (status, _, body) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[rstest]
    #[case(false, StatusCode::OK)]
    #[case(true, StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn liveness_follows_drain_flag(#[case] draining: bool, #[case] expected: StatusCode) {
        let state = HealthState::new();
        if draining {
            state.mark_unhealthy();
        }
        let (status, cache, _) = probe(state, "/health/live").await;
        assert_eq!(status, expected);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }
}
