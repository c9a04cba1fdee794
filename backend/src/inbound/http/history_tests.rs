//! Tests for history HTTP handlers.

use super::*;
use crate::domain::UserId;
use crate::inbound::http::test_utils::{fixture_state, session_cookie, test_session_middleware};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;

const ALICE: &str = "11111111-1111-4111-8111-111111111111";
const BOB: &str = "22222222-2222-4222-8222-222222222222";

async fn sign_in(session: SessionContext, id: web::Path<String>) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(id.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route("/sign-in/{id}", web::post().to(sign_in))
        .service(
            web::scope("/api/v1")
                .service(list_history)
                .service(save_history)
                .service(delete_history),
        )
}

fn result_json(topic: &str) -> Value {
    json!({
        "analogy": format!("{topic} is a dream within a dream."),
        "raw_mapping": {
            "concept": topic,
            "domain": "Inception",
            "mappings": [{
                "technical_term": "base case",
                "technical_definition": "the condition that stops recursion",
                "analogy_term": "the kick",
                "analogy_explanation": "wakes the dreamer up one level",
                "code_analogy_left": "if n == 0 { return }",
                "code_analogy_right": "if kick { wake_up() }"
            }]
        }
    })
}

macro_rules! sign_in {
    ($app:expr, $user:expr) => {{
        let res = actix_test::call_service(
            &$app,
            actix_test::TestRequest::post()
                .uri(&format!("/sign-in/{}", $user))
                .to_request(),
        )
        .await;
        session_cookie(&res).expect("session cookie")
    }};
}

fn save_request(cookie: &Cookie<'static>, topic: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/history")
        .cookie(cookie.clone())
        .set_json(json!({ "topic": topic, "interest": "Inception", "result": result_json(topic) }))
}

fn list_request(cookie: &Cookie<'static>) -> actix_test::TestRequest {
    actix_test::TestRequest::get()
        .uri("/api/v1/history")
        .cookie(cookie.clone())
}

fn delete_request(cookie: &Cookie<'static>, id: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/history?id={id}"))
        .cookie(cookie.clone())
}

fn topics(listing: &Value) -> Vec<String> {
    listing["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|entry| entry["topic"].as_str().expect("topic").to_owned())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn entries_are_listed_per_user_newest_first() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let alice = sign_in!(app, ALICE);
    let bob = sign_in!(app, BOB);

    for topic in ["Recursion", "Closures"] {
        let res = actix_test::call_service(&app, save_request(&alice, topic).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "History saved successfully");
        assert_eq!(body["data"]["userId"], ALICE);
    }
    let res = actix_test::call_service(&app, save_request(&bob, "Monads").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let alice_listing: Value =
        actix_test::call_and_read_body_json(&app, list_request(&alice).to_request()).await;
    assert_eq!(alice_listing["success"], true);
    assert_eq!(topics(&alice_listing), vec!["Closures", "Recursion"]);
    let bob_listing: Value =
        actix_test::call_and_read_body_json(&app, list_request(&bob).to_request()).await;
    assert_eq!(topics(&bob_listing), vec!["Monads"]);
}

#[rstest]
#[actix_web::test]
async fn cross_user_delete_is_not_found_and_keeps_the_entry() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let alice = sign_in!(app, ALICE);
    let bob = sign_in!(app, BOB);
    let saved: Value =
        actix_test::call_and_read_body_json(&app, save_request(&alice, "Recursion").to_request())
            .await;
    let id = saved["data"]["id"].as_str().expect("id").to_owned();

    let res = actix_test::call_service(&app, delete_request(&bob, &id).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "History entry not found");
    let listing: Value =
        actix_test::call_and_read_body_json(&app, list_request(&alice).to_request()).await;
    assert_eq!(topics(&listing), vec!["Recursion"]);

    let res = actix_test::call_service(&app, delete_request(&alice, &id).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let listing: Value =
        actix_test::call_and_read_body_json(&app, list_request(&alice).to_request()).await;
    assert!(topics(&listing).is_empty());

    let res = actix_test::call_service(&app, delete_request(&alice, &id).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case::missing("/api/v1/history")]
#[case::blank("/api/v1/history?id=")]
#[case::not_a_uuid("/api/v1/history?id=abc")]
#[actix_web::test]
async fn delete_requires_a_valid_id(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let alice = sign_in!(app, ALICE);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(uri)
            .cookie(alice)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::no_result(json!({ "topic": "Recursion", "interest": "Inception" }), "result")]
#[case::no_topic(json!({ "interest": "Inception", "result": result_json("Recursion") }), "topic")]
#[case::bad_shape(json!({ "topic": "Recursion", "interest": "Inception", "result": { "reply": "hi" } }), "result")]
#[case::foreign_topic(json!({ "topic": "Monads", "interest": "Inception", "result": result_json("Recursion") }), "result")]
#[case::foreign_interest(json!({ "topic": "Recursion", "interest": "Interstellar", "result": result_json("Recursion") }), "result")]
#[actix_web::test]
async fn save_rejects_incomplete_bodies(#[case] body: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let alice = sign_in!(app, ALICE);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/history")
            .cookie(alice)
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn saved_results_echo_their_request_ignoring_case() {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let alice = sign_in!(app, ALICE);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/history")
            .cookie(alice)
            .set_json(json!({
                "topic": "  recursion ",
                "interest": "INCEPTION",
                "result": result_json("Recursion"),
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[case::list(actix_test::TestRequest::get().uri("/api/v1/history"))]
#[case::save(actix_test::TestRequest::post().uri("/api/v1/history").set_json(json!({})))]
#[case::delete(actix_test::TestRequest::delete().uri("/api/v1/history?id=11111111-1111-4111-8111-111111111111"))]
#[actix_web::test]
async fn anonymous_callers_are_unauthorised(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(fixture_state())).await;
    let res = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
