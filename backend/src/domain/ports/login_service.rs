//! Driving port for the login use-case.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing how users are stored or tokens are signed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginGrant};

pub(crate) const LOGIN_FAILED: &str = "phone or password is wrong";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials, record attendance and issue a token.
    ///
    /// Unknown phones and wrong passwords fail identically.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, Error>;
}
