//! Authentication engine: login with attendance bookkeeping, and token
//! validation.
//!
//! Login only touches the write port after the password has been verified,
//! and both bookkeeping writes must succeed before a token is signed. Token
//! validation never reaches the store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::ports::{
    LOGIN_FAILED, LoginService, TokenCodec, TokenValidator, UserReader, UserWriter,
};
use crate::domain::{
    Error, LoginAttendance, LoginCredentials, LoginGrant, PasswordHasher, UserId,
};

/// Login and token validation over the credential store ports.
#[derive(Clone)]
pub struct AuthService<R, W> {
    reader: Arc<R>,
    writer: Arc<W>,
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    hasher: PasswordHasher,
    decoy_hash: Arc<OnceCell<String>>,
}

/// Plaintext behind the hash compared against when no user owns the phone.
const DECOY_PASSWORD: &str = "authgate-decoy-password";

impl<R, W> AuthService<R, W> {
    /// Create the engine.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use authgate::domain::AuthService;
    /// # use authgate::outbound::{InMemoryUserStore, JwtTokenCodec};
    /// # use mockable::DefaultClock;
    /// # fn example(codec: JwtTokenCodec) {
    /// let store = Arc::new(InMemoryUserStore::default());
    /// let service = AuthService::new(store.clone(), store, Arc::new(codec), Arc::new(DefaultClock));
    /// # let _ = service;
    /// # }
    /// ```
    pub fn new(
        reader: Arc<R>,
        writer: Arc<W>,
        tokens: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reader,
            writer,
            tokens,
            clock,
            hasher: PasswordHasher::default(),
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Replace the hasher whose cost the decoy comparison matches.
    ///
    /// Use the same hasher that produced stored hashes so unknown phones take
    /// as long to reject as wrong passwords.
    #[must_use]
    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self.decoy_hash = Arc::new(OnceCell::new());
        self
    }

    async fn decoy(&self) -> Result<&str, Error> {
        self.decoy_hash
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await
            .map(String::as_str)
    }
}

#[async_trait]
impl<R, W> LoginService for AuthService<R, W>
where
    R: UserReader,
    W: UserWriter,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, Error> {
        let Some(user) = self.reader.find_by_phone(credentials.phone()).await? else {
            let decoy = self.decoy().await?;
            self.hasher.verify(credentials.password(), decoy).await?;
            debug!("login rejected: no user for phone");
            return Err(Error::bad_request(LOGIN_FAILED));
        };

        if !self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await?
        {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(Error::bad_request(LOGIN_FAILED));
        }

        let now = self.clock.utc();
        self.writer
            .create_attendance(&LoginAttendance {
                user_id: user.id,
                logged_in_at: now,
            })
            .await?;
        self.writer.save_attendance_summary(user.id).await?;

        let token = self.tokens.issue(&user, now)?;
        info!(user_id = %user.id, "user logged in");
        Ok(LoginGrant {
            user_id: user.id,
            token,
        })
    }
}

impl<R, W> TokenValidator for AuthService<R, W>
where
    R: UserReader,
    W: UserWriter,
{
    fn validate_token(&self, token: &str) -> Result<UserId, Error> {
        self.tokens.verify(token, self.clock.utc()).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            Error::from(err)
        })
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
