//! Driving ports for reading and editing the caller's own profile.

use async_trait::async_trait;

use crate::domain::{Error, Profile, ProfileUpdate, UserId};

pub(crate) const USER_NOT_FOUND: &str = "user not found";

/// Read side of the `me` resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the public profile of `user_id`.
    async fn get_profile(&self, user_id: UserId) -> Result<Profile, Error>;
}

/// Write side of the `me` resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply a partial update to `user_id`.
    async fn update_profile(&self, user_id: UserId, update: ProfileUpdate) -> Result<(), Error>;
}
