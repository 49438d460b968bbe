//! Bearer authentication and the login endpoint.
//!
//! ```text
//! POST /v1/login {"phone":"0812","password":"secret"}
//! ```

use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, HttpResponse, post, web};
use futures_util::future::{Ready, ready};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::state::HttpState;
use crate::domain::{Error, LoginCredentials, UserId};

/// Identity of a caller that presented a valid bearer token.
///
/// Extraction fails with a `Forbidden` envelope before any token parsing when
/// the `Authorization` header is absent or not exactly `Bearer <token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated(UserId);

impl Authenticated {
    /// Identifier of the authenticated caller.
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// # Errors
/// Returns [`Error::forbidden`] for a missing, non-UTF-8 or malformed header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(Error::forbidden)?;
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(Error::forbidden()),
    }
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, actix_web::Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("http state missing from app data");
        return Err(actix_web::error::ErrorInternalServerError(
            "internal server error",
        ));
    };
    bearer_token(req.headers())
        .and_then(|token| state.tokens.validate_token(token))
        .map(Authenticated)
        .map_err(|err| state.encoder.reject(err))
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Login request body. Missing fields decode as empty strings.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Exchange phone and password for a bearer token.
#[post("/login")]
pub async fn login(state: web::Data<HttpState>, payload: web::Json<LoginRequest>) -> HttpResponse {
    let LoginRequest { phone, password } = payload.into_inner();
    let credentials = LoginCredentials::new(phone, password);
    let result = state
        .login
        .login(&credentials)
        .await
        .map(|grant| Some(LoginResponse { token: grant.token }));
    state.encoder.encode(result)
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
