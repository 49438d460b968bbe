//! Driving port for bearer token validation.

use crate::domain::{Error, UserId};

/// Resolve a bearer token to the user it was issued for.
///
/// Validation is self-contained and never consults the credential store.
#[cfg_attr(test, mockall::automock)]
pub trait TokenValidator: Send + Sync {
    /// Return the token's subject or [`Error::invalid_token`].
    fn validate_token(&self, token: &str) -> Result<UserId, Error>;
}
