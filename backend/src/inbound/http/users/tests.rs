//! Tests for users API handlers.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockUsersCommand, MockUsersQuery};
use crate::domain::{TRACE_ID_HEADER, TraceId};
use crate::inbound::http::api_scope;
use crate::outbound::persistence::InMemoryUserRepository;

async fn init_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::from(clock))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

fn in_memory_state() -> HttpState {
    HttpState::for_repository(Arc::new(InMemoryUserRepository::default()))
}

fn body(username: &str, email: &str, name: &str) -> Value {
    json!({ "username": username, "email": email, "name": name })
}

async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    payload: Value,
) -> ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(payload)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn error_body(response: ServiceResponse) -> Error {
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("error payload")
}

#[rstest]
#[actix_web::test]
async fn create_returns_201_with_assigned_id() {
    let app = init_app(in_memory_state()).await;

    let response = create(&app, body("alice", "a@x.com", "Alice")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let user: UserResponse = actix_test::read_body_json(response).await;
    assert_eq!(user.id, 1);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.name, "Alice");
    assert_eq!(user.created_at, user.updated_at);
}

#[rstest]
#[actix_web::test]
async fn create_ignores_client_supplied_id() {
    let app = init_app(in_memory_state()).await;
    let mut payload = body("alice", "a@x.com", "Alice");
    payload["id"] = json!(99);
    payload["createdAt"] = json!("2000-01-01T00:00:00Z");

    let response = create(&app, payload).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let user: UserResponse = actix_test::read_body_json(response).await;
    assert_eq!(user.id, 1);
    assert_ne!(user.created_at.to_rfc3339(), "2000-01-01T00:00:00+00:00");
}

#[rstest]
#[case(body("alice", "b@x.com", "Other"), "username", "duplicate_username")]
#[case(body("bob", "a@x.com", "Bob"), "email", "duplicate_email")]
#[actix_web::test]
async fn create_rejects_duplicates_with_400(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = init_app(in_memory_state()).await;
    create(&app, body("alice", "a@x.com", "Alice")).await;

    let response = create(&app, payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let trace_header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let error = error_body(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.trace_id().map(str::to_owned), trace_header);
    let details = error.details().expect("details");
    assert_eq!(details["field"], field);
    assert_eq!(details["code"], code);
}

#[rstest]
#[case(json!({ "email": "a@x.com", "name": "Alice" }), "username", "missing_field")]
#[case(json!({ "username": "alice", "name": "Alice" }), "email", "missing_field")]
#[case(body("alice", "a@x.com", "  "), "name", "empty_field")]
#[actix_web::test]
async fn create_rejects_missing_or_blank_fields(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = init_app(in_memory_state()).await;

    let response = create(&app, payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response).await;
    let details = error.details().expect("details");
    assert_eq!(details["field"], field);
    assert_eq!(details["code"], code);
}

#[rstest]
#[actix_web::test]
async fn create_rejects_malformed_json() {
    let app = init_app(in_memory_state()).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[actix_web::test]
async fn list_returns_users_in_id_order() {
    let app = init_app(in_memory_state()).await;
    create(&app, body("alice", "a@x.com", "Alice")).await;
    create(&app, body("bob", "b@x.com", "Bob")).await;

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let users: Vec<UserResponse> = actix_test::call_and_read_body_json(&app, request).await;

    let ids: Vec<i64> = users.iter().map(|user| user.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[rstest]
#[case("/api/users/1", StatusCode::OK)]
#[case("/api/users/2", StatusCode::NOT_FOUND)]
#[case("/api/users/username/alice", StatusCode::OK)]
#[case("/api/users/username/ghost", StatusCode::NOT_FOUND)]
#[case("/api/users/username/%20", StatusCode::NOT_FOUND)]
#[case("/api/users/abc", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn lookups_report_presence(#[case] uri: &str, #[case] expected: StatusCode) {
    let app = init_app(in_memory_state()).await;
    create(&app, body("alice", "a@x.com", "Alice")).await;

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn update_keeps_own_username_and_changes_name() {
    let app = init_app(in_memory_state()).await;
    create(&app, body("alice", "a@x.com", "Alice")).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/users/1")
        .set_json(body("alice", "a@x.com", "Alicia"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let user: UserResponse = actix_test::read_body_json(response).await;
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Alicia");
}

#[rstest]
#[actix_web::test]
async fn overlong_username_is_rejected_before_the_store() {
    let app = init_app(in_memory_state()).await;

    let response = create(&app, body(&"u".repeat(51), "a@x.com", "Alice")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], "username");
    assert_eq!(details["code"], "too_long");
    assert_eq!(details["maxLength"], 50);
}

#[rstest]
#[actix_web::test]
async fn blank_username_lookup_is_not_found() {
    let app = init_app(in_memory_state()).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/users/username/%20")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = error_body(response).await;
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(body("alice", "b@x.com", "Bob"), "username", "alice", "duplicate_username")]
#[case(body("bob", "a@x.com", "Bob"), "email", "a@x.com", "duplicate_email")]
#[actix_web::test]
async fn update_to_values_held_by_another_user_is_400(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] value: &str,
    #[case] code: &str,
) {
    let app = init_app(in_memory_state()).await;
    create(&app, body("alice", "a@x.com", "Alice")).await;
    create(&app, body("bob", "b@x.com", "Bob")).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/users/2")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], field);
    assert_eq!(details["value"], value);
    assert_eq!(details["code"], code);
}

#[rstest]
#[actix_web::test]
async fn update_unknown_user_is_404() {
    let app = init_app(in_memory_state()).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/users/7")
        .set_json(body("alice", "a@x.com", "Alice"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = error_body(response).await;
    assert_eq!(error.details(), Some(&json!({ "id": 7 })));
}

#[rstest]
#[actix_web::test]
async fn delete_returns_204_then_404() {
    let app = init_app(in_memory_state()).await;
    create(&app, body("alice", "a@x.com", "Alice")).await;

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri("/api/users/1").to_request(),
    )
    .await;
    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri("/api/users/1").to_request(),
    )
    .await;
    let lookup = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/users/1").to_request(),
    )
    .await;

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(Error::service_unavailable("user repository unavailable: refused"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("user repository error: boom"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn store_failures_map_to_5xx(#[case] failure: Error, #[case] expected: StatusCode) {
    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .times(1)
        .return_once(move || Err(failure));
    let state = HttpState::new(Arc::new(query), Arc::new(MockUsersCommand::new()));
    let app = init_app(state).await;

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted_and_traced() {
    let mut query = MockUsersQuery::new();
    query.expect_find_user().return_once(|_| {
        assert!(TraceId::current().is_some(), "handler runs inside trace scope");
        Err(Error::internal("user repository error: secret"))
    });
    let state = HttpState::new(Arc::new(query), Arc::new(MockUsersCommand::new()));
    let app = init_app(state).await;

    let request = actix_test::TestRequest::get().uri("/api/users/1").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let error = error_body(response).await;
    assert_eq!(error.message(), "Internal server error");
    assert_eq!(error.trace_id(), Some(header.as_str()));
}
