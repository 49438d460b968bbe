//! Registration and `me` profile handlers.
//!
//! ```text
//! POST /v1/register {"fullname":"Ada","password":"secret","phone":"0812"}
//! GET  /v1/me       (Authorization: Bearer <token>)
//! PUT  /v1/me       {"phone":"0813","fullname":"Ada L."}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;

use super::auth::Authenticated;
use super::state::HttpState;
use crate::domain::{Error, ProfileUpdate, Registration};

/// Registration request body. Missing fields decode as empty strings.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: String,
}

/// Partial profile update body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub phone: Option<String>,
    pub fullname: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(value: UpdateProfileRequest) -> Self {
        Self {
            phone: value.phone,
            fullname: value.fullname,
        }
    }
}

/// Create an account.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> HttpResponse {
    let request = payload.into_inner();
    let result = async {
        let registration =
            Registration::try_from_parts(&request.fullname, &request.password, &request.phone)?;
        state.registration.register(&registration).await?;
        Ok::<_, Error>(None::<()>)
    }
    .await;
    state.encoder.encode(result)
}

/// Profile of the authenticated caller.
#[get("/me")]
pub async fn current_profile(auth: Authenticated, state: web::Data<HttpState>) -> HttpResponse {
    let result = state.profile.get_profile(auth.user_id()).await.map(Some);
    state.encoder.encode(result)
}

/// Update the authenticated caller's profile.
#[put("/me")]
pub async fn update_profile(
    auth: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    let result = state
        .profile_updates
        .update_profile(auth.user_id(), payload.into_inner().into())
        .await
        .map(|()| None::<()>);
    state.encoder.encode(result)
}
