//! Salted password hashing.
//!
//! bcrypt is CPU bound, so both hashing and verification run on the blocking
//! pool with the request's trace id re-entered.

use tracing::{error, warn};
use zeroize::Zeroizing;

use crate::domain::{Error, TraceId};

/// Lowest cost bcrypt accepts.
pub const MIN_PASSWORD_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_PASSWORD_COST: u32 = 31;

/// bcrypt hasher with a fixed work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// Build a hasher, clamping `cost` into bcrypt's accepted range.
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_PASSWORD_COST, MAX_PASSWORD_COST),
        }
    }

    /// Configured work factor.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `password` with a fresh salt.
    ///
    /// # Errors
    /// Returns an internal error if bcrypt fails or the blocking task dies.
    pub async fn hash(&self, password: &str) -> Result<String, Error> {
        let cost = self.cost;
        let password = Zeroizing::new(password.to_owned());
        TraceId::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(|err| {
                error!(error = %err, "password hashing task failed");
                Error::internal(format!("password hashing task failed: {err}"))
            })?
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
    }

    /// Compare `password` against a stored bcrypt `hash`.
    ///
    /// A malformed hash is treated as a mismatch.
    ///
    /// # Errors
    /// Returns an internal error only if the blocking task dies.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, Error> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        let outcome = TraceId::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &hash))
            .await
            .map_err(|err| {
                error!(error = %err, "password verification task failed");
                Error::internal(format!("password verification task failed: {err}"))
            })?;
        match outcome {
            Ok(matched) => Ok(matched),
            Err(err) => {
                warn!(error = %err, "stored password hash is unreadable");
                Ok(false)
            }
        }
    }
}
