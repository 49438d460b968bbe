//! Error kind to HTTP status lookup.
//!
//! The dictionary is built once at startup and shared immutably. Replacing the
//! mapping means constructing a different dictionary; nothing else changes.

use std::collections::HashMap;

use actix_web::http::StatusCode;

use crate::domain::ErrorKind;

/// Status returned for kinds missing from a dictionary.
pub const FALLBACK_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Immutable mapping from [`ErrorKind`] to [`StatusCode`].
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use authgate::domain::ErrorKind;
/// use authgate::inbound::http::status::StatusDictionary;
///
/// let custom = StatusDictionary::new([(ErrorKind::BadRequest, StatusCode::UNPROCESSABLE_ENTITY)]);
/// assert_eq!(custom.status_for(ErrorKind::BadRequest), StatusCode::UNPROCESSABLE_ENTITY);
/// assert_eq!(custom.status_for(ErrorKind::NotFound), StatusCode::INTERNAL_SERVER_ERROR);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDictionary {
    statuses: HashMap<ErrorKind, StatusCode>,
}

impl StatusDictionary {
    /// Build a dictionary from explicit entries. Later entries win.
    pub fn new(entries: impl IntoIterator<Item = (ErrorKind, StatusCode)>) -> Self {
        Self {
            statuses: entries.into_iter().collect(),
        }
    }

    /// Status for `kind`, or [`FALLBACK_STATUS`] when unmapped.
    pub fn status_for(&self, kind: ErrorKind) -> StatusCode {
        self.statuses.get(&kind).copied().unwrap_or(FALLBACK_STATUS)
    }
}

impl Default for StatusDictionary {
    fn default() -> Self {
        Self::new([
            (ErrorKind::BadRequest, StatusCode::BAD_REQUEST),
            (ErrorKind::Forbidden, StatusCode::FORBIDDEN),
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::Conflicted, StatusCode::CONFLICT),
            (ErrorKind::ApplicationLimit, StatusCode::TOO_MANY_REQUESTS),
            (ErrorKind::InternalServer, StatusCode::INTERNAL_SERVER_ERROR),
            (ErrorKind::Maintenance, StatusCode::SERVICE_UNAVAILABLE),
        ])
    }
}
