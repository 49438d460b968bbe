//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod token_codec;
mod token_validator;
mod user_profile;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
pub(crate) use login_service::LOGIN_FAILED;
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TOKEN_LIFETIME_SECS, TokenCodec, TokenCodecError};
#[cfg(test)]
pub use token_validator::MockTokenValidator;
pub use token_validator::TokenValidator;
pub(crate) use user_profile::USER_NOT_FOUND;
#[cfg(test)]
pub use user_profile::{MockUserProfileCommand, MockUserProfileQuery};
pub use user_profile::{UserProfileCommand, UserProfileQuery};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
pub(crate) use user_repository::phone_taken;
#[cfg(test)]
pub use user_repository::{MockUserReader, MockUserWriter};
pub use user_repository::{UserPersistenceError, UserReader, UserWriter};
