//! End-to-end flows through the `/v1` routes over the in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{test, web};
use authgate::domain::ports::TokenCodec;
use authgate::domain::{AuthService, MIN_PASSWORD_COST, PasswordHasher, UserId, UserService};
use authgate::inbound::http::encoder::JsonEncoder;
use authgate::inbound::http::state::{HttpState, HttpStatePorts};
use authgate::outbound::{InMemoryUserStore, JwtTokenCodec};
use authgate::test_support::clock::{FixtureClock, fixture_timestamp};
use authgate::test_support::keys::{
    FOREIGN_PRIVATE_PEM, FOREIGN_PUBLIC_PEM, SIGNING_PRIVATE_PEM, SIGNING_PUBLIC_PEM,
};
use authgate::server::build_app;
use chrono::TimeDelta;
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let res = test::call_service(&$app, $req.to_request()).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }};
}

struct Harness {
    store: Arc<InMemoryUserStore>,
    clock: Arc<FixtureClock>,
    state: web::Data<HttpState>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryUserStore::default());
    let clock = FixtureClock::at(fixture_timestamp());
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let codec = JwtTokenCodec::from_rsa_pem(
        SIGNING_PRIVATE_PEM.as_bytes(),
        SIGNING_PUBLIC_PEM.as_bytes(),
    )
    .expect("fixture keys");

    let auth = Arc::new(AuthService::new(
        store.clone(),
        store.clone(),
        Arc::new(codec),
        dyn_clock.clone(),
    )
    .with_hasher(PasswordHasher::new(MIN_PASSWORD_COST)));
    let users = Arc::new(UserService::new(
        store.clone(),
        store.clone(),
        dyn_clock,
        PasswordHasher::new(MIN_PASSWORD_COST),
    ));
    let state = web::Data::new(HttpState::new(
        HttpStatePorts {
            login: auth.clone(),
            tokens: auth,
            registration: users.clone(),
            profile: users.clone(),
            profile_updates: users,
        },
        JsonEncoder::default(),
    ));
    Harness {
        store,
        clock,
        state,
    }
}

fn register(fullname: &str, phone: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/v1/register")
        .set_json(json!({ "fullname": fullname, "phone": phone, "password": password }))
}

fn login(phone: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/v1/login")
        .set_json(json!({ "phone": phone, "password": password }))
}

fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

fn token_of(body: &Value) -> String {
    body["data"]["token"]
        .as_str()
        .expect("token in envelope")
        .to_owned()
}

#[rstest]
#[actix_web::test]
async fn register_login_and_manage_profile(harness: Harness) {
    let app = test::init_service(build_app(harness.state.clone())).await;

    let (status, body) = send!(app, register("Ada Lovelace", "0812", "123123"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": null, "error": null }));

    let (status, body) = send!(app, login("0812", "123123"));
    assert_eq!(status, StatusCode::OK);
    let token = token_of(&body);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/v1/me")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "fullname": "Ada Lovelace", "phone": "0812" }));

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri("/v1/me")
            .insert_header(bearer(&token))
            .set_json(json!({ "phone": "0813", "fullname": "" }))
    );
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/v1/me")
            .insert_header(bearer(&token))
    );
    assert_eq!(body["data"], json!({ "fullname": "Ada Lovelace", "phone": "0813" }));

    let (status, _) = send!(app, login("0813", "123123"));
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn every_login_is_recorded(harness: Harness) {
    let app = test::init_service(build_app(harness.state.clone())).await;
    let _ = send!(app, register("Ada", "0812", "123123"));

    for _ in 0..2 {
        let (status, _) = send!(app, login("0812", "123123"));
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send!(app, login("0812", "wrong"));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = UserId::new(1);
    let summary = harness.store.attendance_summary(id).expect("summary row");
    assert_eq!(summary.total_logged_in, 2);
    let log = harness.store.attendance_log();
    assert_eq!(log.len(), 2);
    assert!(log.iter().all(|entry| entry.user_id == id));
    assert!(log.iter().all(|entry| entry.logged_in_at == fixture_timestamp()));
}

#[rstest]
#[case("0812", "wrong")]
#[case("0999", "123123")]
#[actix_web::test]
async fn login_failures_are_indistinguishable(
    harness: Harness,
    #[case] phone: &str,
    #[case] password: &str,
) {
    let app = test::init_service(build_app(harness.state.clone())).await;
    let _ = send!(app, register("Ada", "0812", "123123"));

    let (status, body) = send!(app, login(phone, password));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!(100));
    assert_eq!(body["error"]["message"], json!("phone or password is wrong"));
    assert!(harness.store.attendance_log().is_empty());
}

#[rstest]
#[actix_web::test]
async fn duplicate_phone_is_conflicted(harness: Harness) {
    let app = test::init_service(build_app(harness.state.clone())).await;
    let _ = send!(app, register("Ada", "0812", "123123"));
    let _ = send!(app, register("Grace", "0900", "123123"));

    let (status, body) = send!(app, register("Eve", "0812", "x"));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], json!(400));
    assert_eq!(
        body["error"]["fields"],
        json!([{ "field": "phone", "message": "[0812] already registered" }])
    );

    let (_, body) = send!(app, login("0900", "123123"));
    let token = token_of(&body);
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/v1/me")
            .insert_header(bearer(&token))
            .set_json(json!({ "phone": "0812" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["fields"][0]["field"], json!("phone"));
}

#[rstest]
#[actix_web::test]
async fn tokens_expire_after_one_hour(harness: Harness) {
    let app = test::init_service(build_app(harness.state.clone())).await;
    let _ = send!(app, register("Ada", "0812", "123123"));
    let (_, body) = send!(app, login("0812", "123123"));
    let token = token_of(&body);

    harness.clock.advance(TimeDelta::minutes(59));
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/v1/me")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);

    harness.clock.advance(TimeDelta::minutes(1));
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/v1/me")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], json!(201));
    assert_eq!(body["error"]["message"], json!("token is not valid"));
}

#[rstest]
#[actix_web::test]
async fn tokens_from_other_keys_are_rejected(harness: Harness) {
    let app = test::init_service(build_app(harness.state.clone())).await;
    let _ = send!(app, register("Ada", "0812", "123123"));
    let user = harness.store.user(UserId::new(1)).expect("registered user");

    let forger = JwtTokenCodec::from_rsa_pem(
        FOREIGN_PRIVATE_PEM.as_bytes(),
        FOREIGN_PUBLIC_PEM.as_bytes(),
    )
    .expect("foreign keys");
    let forged = forger
        .issue(&user, fixture_timestamp())
        .expect("forged token");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/v1/me")
            .insert_header(bearer(&forged))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], json!(201));
}

#[rstest]
#[case(None)]
#[case(Some("Token abc"))]
#[case(Some("Bearer"))]
#[actix_web::test]
async fn malformed_authorization_is_forbidden(harness: Harness, #[case] header: Option<&str>) {
    let app = test::init_service(build_app(harness.state.clone())).await;
    let mut req = test::TestRequest::get().uri("/v1/me");
    if let Some(value) = header {
        req = req.insert_header((AUTHORIZATION, value));
    }

    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], json!(200));
    assert_eq!(body["error"]["message"], json!("access forbidden"));
}

#[rstest]
#[actix_web::test]
async fn empty_login_body_is_rejected(harness: Harness) {
    let app = test::init_service(build_app(harness.state.clone())).await;
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/v1/login")
            .insert_header(("content-type", "application/json"))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!(101));
    assert_eq!(body["error"]["message"], json!("request can not be empty"));
}
