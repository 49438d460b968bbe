//! Driven port for signing and verifying bearer tokens.

use chrono::{DateTime, Utc};

use crate::domain::{Error, User, UserId};

use super::define_port_error;

/// Lifetime of every issued token, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 60 * 60;

define_port_error! {
    /// Failures raised by token codec adapters.
    pub enum TokenCodecError {
        /// Claims could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// Token failed a structural, cryptographic or temporal check.
        Rejected { reason: String } => "token rejected: {reason}",
    }
}

impl From<TokenCodecError> for Error {
    fn from(err: TokenCodecError) -> Self {
        match err {
            TokenCodecError::Signing { .. } => Error::internal(err.to_string()),
            TokenCodecError::Rejected { .. } => Error::invalid_token(),
        }
    }
}

/// Signs and verifies time-bounded bearer tokens.
///
/// Implementations are pure: output depends only on the inputs and the key
/// material fixed at construction.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign a token for `user` valid from `now` for [`TOKEN_LIFETIME_SECS`].
    fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenCodecError>;

    /// Verify `token` at instant `now` and return its subject.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenCodecError>;
}
