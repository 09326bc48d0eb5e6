//! End-to-end behaviour of identifier lookups through the public API.
//!
//! Each scenario mounts a lookup on a throwaway route with the production
//! middleware and checks what a client would observe on the wire.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, Route, test, web};
use markbook::Trace;
use markbook::domain::{LookupContext, LookupError};
use markbook::inbound::http::lookup::{LookupSettings, id_lookup};
use rstest::rstest;
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<AtomicUsize>,
    last_id: Arc<AtomicI64>,
}

impl Recorder {
    fn observe(&self, id: i64) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_id.store(id, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_id(&self) -> i64 {
        self.last_id.load(Ordering::SeqCst)
    }
}

async fn call(route: Route, uri: &str) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .wrap(Trace)
            .service(web::resource("/entities/{id}").route(route)),
    )
    .await;
    test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await
}

fn alice_lookup(recorder: Recorder) -> Route {
    id_lookup(LookupSettings::default(), move |_ctx: LookupContext, id| {
        recorder.observe(id);
        async move {
            let mut entity = BTreeMap::new();
            entity.insert("name", "Alice");
            Ok::<_, LookupError>(entity)
        }
    })
}

#[rstest]
#[case("abc")]
#[case("12abc")]
#[case("1e3")]
#[case("--1")]
#[actix_web::test]
async fn non_numeric_ids_get_400_and_skip_the_lookup(#[case] raw: &str) {
    let recorder = Recorder::default();
    let res = call(alice_lookup(recorder.clone()), &format!("/entities/{raw}")).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "id should be an integer"}));
    assert_eq!(recorder.calls(), 0);
}

#[rstest]
#[actix_web::test]
async fn numeric_id_reaches_lookup_and_result_is_returned_verbatim() {
    let recorder = Recorder::default();
    let res = call(alice_lookup(recorder.clone()), "/entities/42").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let body = test::read_body(res).await;
    assert_eq!(&body[..], br#"{"name":"Alice"}"#);
    assert_eq!(recorder.calls(), 1);
    assert_eq!(recorder.last_id(), 42);
}

#[rstest]
#[case("boom")]
#[case("a completely different failure")]
#[actix_web::test]
async fn lookup_errors_share_one_generic_response(#[case] reason: &'static str) {
    let route = id_lookup(LookupSettings::default(), move |_ctx: LookupContext, _id| async move {
        Err::<Value, _>(LookupError::unavailable(reason))
    });
    let res = call(route, "/entities/1").await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "failed to get all entities"}));
}

#[rstest]
#[actix_web::test]
async fn nil_result_without_error_is_500() {
    let route = id_lookup(LookupSettings::default(), |_ctx: LookupContext, _id| async move {
        Ok::<Option<Value>, LookupError>(None)
    });
    let res = call(route, "/entities/1").await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "internal server error"}));
}

#[rstest]
#[actix_web::test]
async fn unserialisable_result_is_500_and_server_keeps_serving() {
    let route = id_lookup(LookupSettings::default(), |_ctx: LookupContext, id| async move {
        let mut by_pair = BTreeMap::new();
        by_pair.insert((id, id), "not representable as a JSON object key");
        Ok::<_, LookupError>(by_pair)
    });
    let app = test::init_service(
        App::new()
            .wrap(Trace)
            .service(web::resource("/entities/{id}").route(route)),
    )
    .await;

    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/entities/5").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"error": "failed to encode response"}));
    }
}
