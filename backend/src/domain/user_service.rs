//! Account registration and self-service profile management.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    USER_NOT_FOUND, UserProfileCommand, UserProfileQuery, UserReader, UserRegistration,
    UserWriter, phone_taken,
};
use crate::domain::{
    Error, NewUser, PasswordHasher, Profile, ProfileUpdate, Registration, User, UserId,
};

/// Registration and profile use-cases over the credential store ports.
#[derive(Clone)]
pub struct UserService<R, W> {
    reader: Arc<R>,
    writer: Arc<W>,
    clock: Arc<dyn Clock>,
    hasher: PasswordHasher,
}

impl<R, W> UserService<R, W> {
    /// Create the service. New passwords are hashed with `hasher`.
    pub fn new(
        reader: Arc<R>,
        writer: Arc<W>,
        clock: Arc<dyn Clock>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            reader,
            writer,
            clock,
            hasher,
        }
    }
}

impl<R, W> UserService<R, W>
where
    R: UserReader,
    W: UserWriter,
{
    async fn require_user(&self, user_id: UserId) -> Result<User, Error> {
        self.reader
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::bad_request(USER_NOT_FOUND))
    }

    async fn ensure_phone_free(&self, phone: &str, owner: Option<UserId>) -> Result<(), Error> {
        match self.reader.find_by_phone(phone).await? {
            Some(existing) if Some(existing.id) != owner => Err(phone_taken(phone)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R, W> UserRegistration for UserService<R, W>
where
    R: UserReader,
    W: UserWriter,
{
    async fn register(&self, registration: &Registration) -> Result<UserId, Error> {
        self.ensure_phone_free(registration.phone(), None).await?;

        let password_hash = self.hasher.hash(registration.password()).await?;
        let now = self.clock.utc();
        // The store's unique constraint still decides concurrent registrations.
        let user_id = self
            .writer
            .create_user(&NewUser {
                fullname: registration.fullname().to_owned(),
                password_hash,
                phone: registration.phone().to_owned(),
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(%user_id, "user registered");
        Ok(user_id)
    }
}

#[async_trait]
impl<R, W> UserProfileQuery for UserService<R, W>
where
    R: UserReader,
    W: UserWriter,
{
    async fn get_profile(&self, user_id: UserId) -> Result<Profile, Error> {
        let user = self.require_user(user_id).await?;
        Ok(Profile::from(&user))
    }
}

#[async_trait]
impl<R, W> UserProfileCommand for UserService<R, W>
where
    R: UserReader,
    W: UserWriter,
{
    async fn update_profile(&self, user_id: UserId, update: ProfileUpdate) -> Result<(), Error> {
        let mut user = self.require_user(user_id).await?;

        if let Some(phone) = update.phone {
            let phone = phone.trim();
            if phone.is_empty() {
                return Err(Error::bad_request("profile update is invalid")
                    .with_field("phone", "phone must not be empty"));
            }
            if phone != user.phone {
                self.ensure_phone_free(phone, Some(user.id)).await?;
                user.phone = phone.to_owned();
            }
        }

        if let Some(fullname) = update.fullname.filter(|name| !name.trim().is_empty()) {
            user.fullname = fullname.trim().to_owned();
        }

        user.updated_at = self.clock.utc();
        self.writer.update_user(&user).await?;
        info!(%user_id, "profile updated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
