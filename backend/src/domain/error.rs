//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters resolve the
//! [`ErrorKind`] to a protocol status through their own lookup table and wrap
//! the payload in whatever envelope the protocol expects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::TraceId;

/// Closed set of failure categories.
///
/// Adapters branch on the kind to pick an outer status; clients branch on the
/// numeric [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request is malformed, fails validation, or carries bad credentials.
    BadRequest,
    /// Authentication is missing or the caller may not perform the action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state (e.g. a taken phone number).
    Conflicted,
    /// The caller exceeded an application limit.
    ApplicationLimit,
    /// An unexpected failure occurred inside the service.
    InternalServer,
    /// The service is temporarily unavailable.
    Maintenance,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::BadRequest,
        Self::Forbidden,
        Self::NotFound,
        Self::Conflicted,
        Self::ApplicationLimit,
        Self::InternalServer,
        Self::Maintenance,
    ];
}

/// Stable numeric identifier for client-side branching.
///
/// Codes are independent of message text; changing a message never changes
/// the code a client sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Generic validation failure.
    pub const BAD_REQUEST: Self = Self(100);
    /// Request body was empty.
    pub const EMPTY_REQUEST: Self = Self(101);
    /// Access denied or authentication header missing.
    pub const FORBIDDEN: Self = Self(200);
    /// Bearer token failed verification.
    pub const INVALID_TOKEN: Self = Self(201);
    /// Resource missing.
    pub const NOT_FOUND: Self = Self(300);
    /// Conflicting state.
    pub const CONFLICTED: Self = Self(400);
    /// Application limit reached.
    pub const APPLICATION_LIMIT: Self = Self(500);
    /// Masked internal failure.
    pub const INTERNAL_SERVER: Self = Self(600);
    /// Service under maintenance.
    pub const MAINTENANCE: Self = Self(700);

    /// Wrap a raw code value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field-level message attached to validation and conflict errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Message describing what is wrong with the field.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

pub(crate) const INTERNAL_MESSAGE: &str = "internal server error";

/// Domain error payload.
///
/// ## Invariants
/// - `kind` is always one of [`ErrorKind`]; unexpected failures are expressed
///   as [`ErrorKind::InternalServer`] and never carry raw detail past the
///   transport boundary (see [`Error::redacted`]).
/// - Field entries keep insertion order; [`Error::add_field`] appends and
///   never overwrites.
///
/// # Examples
/// ```
/// use authgate::domain::{Error, ErrorCode, ErrorKind};
///
/// let mut err = Error::conflicted("phone already taken");
/// err.add_field("phone", "[0812] already registered");
/// assert_eq!(err.kind(), ErrorKind::Conflicted);
/// assert_eq!(err.code(), ErrorCode::CONFLICTED);
/// assert_eq!(err.fields().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    kind: ErrorKind,
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(kind: ErrorKind, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            fields: Vec::new(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// [`ErrorKind::BadRequest`] with the generic validation code.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, ErrorCode::BAD_REQUEST, message)
    }

    /// [`ErrorKind::BadRequest`] raised when a request body is missing.
    pub fn empty_request() -> Self {
        Self::new(
            ErrorKind::BadRequest,
            ErrorCode::EMPTY_REQUEST,
            "request can not be empty",
        )
    }

    /// [`ErrorKind::Forbidden`] with the sentinel message.
    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden, ErrorCode::FORBIDDEN, "access forbidden")
    }

    /// Generic token rejection. Deliberately silent about which check failed.
    pub fn invalid_token() -> Self {
        Self::new(
            ErrorKind::Forbidden,
            ErrorCode::INVALID_TOKEN,
            "token is not valid",
        )
    }

    /// [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, ErrorCode::NOT_FOUND, message)
    }

    /// [`ErrorKind::Conflicted`]; pair with [`Error::add_field`].
    pub fn conflicted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflicted, ErrorCode::CONFLICTED, message)
    }

    /// [`ErrorKind::ApplicationLimit`].
    pub fn application_limit(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::ApplicationLimit,
            ErrorCode::APPLICATION_LIMIT,
            message,
        )
    }

    /// [`ErrorKind::InternalServer`].
    ///
    /// The message is for server logs; adapters replace it before responding.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InternalServer,
            ErrorCode::INTERNAL_SERVER,
            message,
        )
    }

    /// [`ErrorKind::Maintenance`].
    pub fn maintenance(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Maintenance, ErrorCode::MAINTENANCE, message)
    }

    /// Append a field-level message.
    pub fn add_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Builder form of [`Error::add_field`].
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_field(field, message);
        self
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Field-level messages in insertion order.
    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    /// Look up the first message recorded for `field`.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|entry| entry.field == field)
            .map(FieldError::message)
    }

    /// Correlation identifier captured at construction, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Client-safe copy of this error.
    ///
    /// Internal errors lose their message and field entries; everything else
    /// is returned unchanged. The trace id survives so clients can quote it.
    #[must_use]
    pub fn redacted(&self) -> Self {
        if self.kind != ErrorKind::InternalServer {
            return self.clone();
        }
        Self {
            kind: ErrorKind::InternalServer,
            code: ErrorCode::INTERNAL_SERVER,
            message: INTERNAL_MESSAGE.to_owned(),
            fields: Vec::new(),
            trace_id: self.trace_id.clone(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
