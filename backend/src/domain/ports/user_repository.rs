//! Credential store ports.
//!
//! The store is split into a read port and a write port so services can be
//! handed only the capability they need. Adapters report failures through
//! [`UserPersistenceError`]; services translate those into domain errors.

use async_trait::async_trait;

use crate::domain::{Error, LoginAttendance, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by credential store adapters.
    pub enum UserPersistenceError {
        /// Store connection could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// Insert or update collided with the unique phone constraint.
        DuplicatePhone { phone: String } => "phone {phone} is already registered",
    }
}

pub(crate) const CONFLICT_MESSAGE: &str = "request conflicts with existing data";

/// Conflict error raised when `phone` belongs to another account.
pub(crate) fn phone_taken(phone: &str) -> Error {
    Error::conflicted(CONFLICT_MESSAGE).with_field("phone", format!("[{phone}] already registered"))
}

impl From<UserPersistenceError> for Error {
    fn from(err: UserPersistenceError) -> Self {
        match err {
            UserPersistenceError::DuplicatePhone { phone } => phone_taken(&phone),
            other => Error::internal(other.to_string()),
        }
    }
}

/// Read capability over stored users.
///
/// Lookups return `Ok(None)` when no live user matches. Soft-deleted records
/// are never returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Find a user by exact phone number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Find a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;
}

/// Write capability over stored users and login bookkeeping.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserWriter: Send + Sync {
    /// Insert a user and return the assigned id.
    ///
    /// Fails with [`UserPersistenceError::DuplicatePhone`] when the phone is
    /// already taken.
    async fn create_user(&self, user: &NewUser) -> Result<UserId, UserPersistenceError>;

    /// Persist changes to an existing user.
    async fn update_user(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Append a login attendance fact.
    async fn create_attendance(
        &self,
        attendance: &LoginAttendance,
    ) -> Result<(), UserPersistenceError>;

    /// Insert a summary with a count of one, or increment the existing one.
    ///
    /// Not idempotent; retries may count a login twice.
    async fn save_attendance_summary(&self, user_id: UserId) -> Result<(), UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ErrorKind};
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("refused"))]
    #[case(UserPersistenceError::query("syntax error"))]
    fn infrastructure_failures_become_internal(#[case] err: UserPersistenceError) {
        let domain: Error = err.into();
        assert_eq!(domain.kind(), ErrorKind::InternalServer);
        assert_eq!(domain.code(), ErrorCode::INTERNAL_SERVER);
    }

    #[rstest]
    fn duplicate_phone_becomes_conflict_with_field() {
        let domain: Error = UserPersistenceError::duplicate_phone("0812").into();
        assert_eq!(domain.kind(), ErrorKind::Conflicted);
        assert_eq!(domain.message(), CONFLICT_MESSAGE);
        assert_eq!(domain.field("phone"), Some("[0812] already registered"));
    }
}
