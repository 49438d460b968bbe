//! Envelope encoding and error-to-status resolution.
//!
//! Handlers and extractors hand every outcome to [`JsonEncoder`]. It looks the
//! error kind up in the configured [`StatusDictionary`], logs internal
//! failures with full detail, and redacts them before serialising.

use std::sync::Arc;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::{error, warn};

use super::envelope::Envelope;
use super::status::StatusDictionary;
use crate::domain::{Error, ErrorKind, TRACE_ID_HEADER};

/// Builds JSON envelope responses.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    statuses: Arc<StatusDictionary>,
}

impl JsonEncoder {
    /// Encoder resolving statuses through `statuses`.
    pub fn new(statuses: Arc<StatusDictionary>) -> Self {
        Self { statuses }
    }

    /// `200 OK` with `data` populated.
    pub fn success<T: Serialize>(&self, data: T) -> HttpResponse {
        HttpResponse::Ok().json(Envelope::data(data))
    }

    /// `200 OK` with both sides `null`.
    pub fn empty(&self) -> HttpResponse {
        HttpResponse::Ok().json(Envelope::empty())
    }

    /// Failure response with the status taken from the dictionary.
    pub fn failure(&self, err: &Error) -> HttpResponse {
        let status = self.statuses.status_for(err.kind());
        if err.kind() == ErrorKind::InternalServer {
            error!(
                code = %err.code(),
                trace_id = err.trace_id().unwrap_or_default(),
                message = err.message(),
                "internal error masked at http boundary"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = err.trace_id() {
            match HeaderValue::from_str(id) {
                Ok(value) => {
                    builder.insert_header((HeaderName::from_static(TRACE_ID_HEADER), value));
                }
                Err(header_err) => warn!(error = %header_err, "trace id is not a valid header"),
            }
        }
        builder.json(Envelope::<()>::error(err.redacted()))
    }

    /// Encode a handler outcome. `None` data becomes [`JsonEncoder::empty`].
    pub fn encode<T: Serialize>(&self, result: Result<Option<T>, Error>) -> HttpResponse {
        match result {
            Ok(Some(data)) => self.success(data),
            Ok(None) => self.empty(),
            Err(err) => self.failure(&err),
        }
    }

    /// Wrap `err` for early rejection from an extractor or middleware.
    pub fn reject(&self, err: Error) -> actix_web::Error {
        let response = self.failure(&err);
        InternalError::from_response(err, response).into()
    }

    /// `JsonConfig` error handler producing envelope responses.
    pub fn json_error(&self, err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
        self.reject(payload_error(err))
    }

    /// Status the dictionary assigns to `kind`.
    pub fn status_for(&self, kind: ErrorKind) -> StatusCode {
        self.statuses.status_for(kind)
    }
}

/// Classify a body decoding failure.
fn payload_error(err: JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => {
            Error::bad_request("content type must be application/json")
        }
        JsonPayloadError::Deserialize(source) if is_empty_body(&source) => {
            Error::empty_request()
        }
        other => Error::internal(format!("request body could not be decoded: {other}")),
    }
}

fn is_empty_body(err: &serde_json::Error) -> bool {
    err.is_eof() && err.line() == 1 && err.column() == 0
}
