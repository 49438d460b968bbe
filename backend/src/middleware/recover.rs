//! Panic recovery middleware.
//!
//! A panic inside a handler or extractor is converted into the standard
//! internal error envelope instead of tearing down the worker's connection.
//! Wrap it inside [`Trace`](super::Trace) so the recovered error carries the
//! request's trace id.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::Error as DomainError;
use crate::inbound::http::encoder::JsonEncoder;

/// Converts handler panics into masked `InternalServer` envelopes.
///
/// The recovered failure is returned as an [`actix_web::Error`] carrying the
/// rendered envelope, so the request itself is never retained.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use authgate::inbound::http::encoder::JsonEncoder;
/// use authgate::{Recover, Trace};
///
/// let _app = App::new()
///     .wrap(Recover::new(JsonEncoder::default()))
///     .wrap(Trace);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recover {
    encoder: JsonEncoder,
}

impl Recover {
    /// Recover panics, rendering them through `encoder`.
    pub fn new(encoder: JsonEncoder) -> Self {
        Self { encoder }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Recover
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RecoverMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RecoverMiddleware {
            service,
            encoder: self.encoder.clone(),
        }))
    }
}

/// Service wrapper produced by [`Recover`].
pub struct RecoverMiddleware<S> {
    service: S,
    encoder: JsonEncoder,
}

impl<S, B> Service<ServiceRequest> for RecoverMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let encoder = self.encoder.clone();
        let fut = match panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                let err = recovered(&encoder, payload.as_ref());
                return Box::pin(async move { Err::<Self::Response, _>(err) });
            }
        };
        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(recovered(&encoder, payload.as_ref())),
            }
        })
    }
}

fn recovered(encoder: &JsonEncoder, payload: &(dyn Any + Send)) -> Error {
    encoder.reject(DomainError::internal(format!(
        "handler panicked: {}",
        panic_message(payload)
    )))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use serde_json::{Value, json};

    use crate::domain::TRACE_ID_HEADER;
    use crate::middleware::Trace;

    async fn explode() -> HttpResponse {
        panic!("kaboom");
    }

    #[actix_web::test]
    async fn panics_become_masked_internal_errors() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Recover::default())
                .wrap(Trace)
                .route("/", web::get().to(explode)),
        )
        .await;
        let err = app
            .call(actix_test::TestRequest::get().uri("/").to_request())
            .await
            .err()
            .expect("panic surfaces as an error");
        let res = err.error_response();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace id header");
        let bytes = to_bytes(res.into_body()).await.expect("read body");
        let body: Value = serde_json::from_slice(&bytes).expect("json envelope");
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["error"]["code"], json!(600));
        assert_eq!(body["error"]["message"], json!("internal server error"));
        assert_eq!(body["error"]["traceId"], json!(header));
    }

    #[actix_web::test]
    async fn healthy_responses_pass_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Recover::default())
                .route("/", web::get().to(|| async { HttpResponse::Accepted().body("ok") })),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(actix_test::read_body(res).await, "ok");
    }

    #[actix_web::test]
    async fn scoped_routes_resolve_behind_recover() {
        let app = actix_test::init_service(
            App::new().wrap(Recover::default()).wrap(Trace).service(
                web::scope("/v1")
                    .route("/ping", web::get().to(|| async { HttpResponse::Ok().body("pong") })),
            ),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/v1/ping").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "pong");
    }

    #[test]
    fn panic_message_reads_string_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("static");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "static");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
