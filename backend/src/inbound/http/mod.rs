//! HTTP inbound adapter exposing the `/v1` endpoints.

pub mod auth;
pub mod encoder;
pub mod envelope;
pub mod state;
pub mod status;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;

use actix_web::web;

use self::encoder::JsonEncoder;

/// JSON body limits and error handling shared by every endpoint.
pub fn json_config(encoder: JsonEncoder) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, req| encoder.json_error(err, req))
}

/// Register the `/v1` scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use authgate::inbound::http::{configure, encoder::JsonEncoder};
///
/// let encoder = JsonEncoder::default();
/// let _app = App::new().configure(|cfg| configure(cfg, &encoder));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, encoder: &JsonEncoder) {
    cfg.service(
        web::scope("/v1")
            .app_data(json_config(encoder.clone()))
            .service(auth::login)
            .service(users::register)
            .service(users::current_profile)
            .service(users::update_profile),
    );
}
