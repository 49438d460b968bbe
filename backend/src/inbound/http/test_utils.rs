//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use super::configure;
use super::encoder::JsonEncoder;
use super::state::{HttpState, HttpStatePorts};
use crate::domain::ports::{
    MockLoginService, MockTokenValidator, MockUserProfileCommand, MockUserProfileQuery,
    MockUserRegistration,
};

/// Mock driving ports. Untouched mocks panic if a handler calls them.
#[derive(Default)]
pub(crate) struct PortDoubles {
    pub login: MockLoginService,
    pub tokens: MockTokenValidator,
    pub registration: MockUserRegistration,
    pub profile: MockUserProfileQuery,
    pub profile_updates: MockUserProfileCommand,
}

impl PortDoubles {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                tokens: Arc::new(self.tokens),
                registration: Arc::new(self.registration),
                profile: Arc::new(self.profile),
                profile_updates: Arc::new(self.profile_updates),
            },
            JsonEncoder::default(),
        ))
    }
}

/// Drive one request through the `/v1` routes and decode the envelope.
pub(crate) async fn call(ports: PortDoubles, request: TestRequest) -> (StatusCode, Value) {
    let state = ports.into_state();
    let encoder = state.encoder.clone();
    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(|cfg| configure(cfg, &encoder)),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}
