//! User identity records and login bookkeeping facts.
//!
//! These are plain data carriers shared between the services and the
//! credential store ports. The store owns them; services hold a transient copy
//! per operation.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned numeric user identifier.
///
/// Tokens carry the id as a decimal string in their `sub` claim; use
/// [`FromStr`] to recover it.
///
/// # Examples
/// ```
/// use authgate::domain::UserId;
///
/// let id: UserId = "42".parse().expect("numeric id");
/// assert_eq!(id, UserId::new(42));
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// Stored user record.
///
/// `password_hash` is a bcrypt hash; the plaintext never reaches the store.
/// The [`fmt::Debug`] output omits it so records can be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub fullname: String,
    pub password_hash: String,
    /// Unique business key.
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the record has been soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("fullname", &self.fullname)
            .field("password_hash", &"<redacted>")
            .field("phone", &self.phone)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("deleted_at", &self.deleted_at)
            .finish()
    }
}

/// User record awaiting an id from the store.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub fullname: String,
    pub password_hash: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Attach the store-assigned id.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            fullname: self.fullname,
            password_hash: self.password_hash,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: None,
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("fullname", &self.fullname)
            .field("password_hash", &"<redacted>")
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

/// Append-only record of one successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginAttendance {
    pub user_id: UserId,
    pub logged_in_at: DateTime<Utc>,
}

/// Running count of successful logins for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub user_id: UserId,
    pub total_logged_in: u64,
}

/// Public view of a user returned by the `me` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub fullname: String,
    pub phone: String,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            fullname: user.fullname.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// Partial profile update.
///
/// `None` leaves the stored value unchanged. An empty `fullname` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub fullname: Option<String>,
}
