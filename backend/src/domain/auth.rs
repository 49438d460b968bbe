//! Authentication and registration inputs.
//!
//! Passwords are held in [`Zeroizing`] buffers so the plaintext is wiped when
//! the request value is dropped.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{Error, UserId};

/// Phone/password pair submitted to the login use-case.
///
/// Values are kept verbatim. Blank input simply fails the lookup and yields the
/// same error as any other mismatch.
///
/// # Examples
/// ```
/// use authgate::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("0812", "hunter2");
/// assert_eq!(creds.phone(), "0812");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    phone: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials from raw request values.
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Phone number used for the user lookup.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Plaintext password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub user_id: UserId,
    /// Signed bearer token.
    pub token: String,
}

pub(crate) const INVALID_REGISTRATION: &str = "registration request is invalid";

/// Validated registration request.
///
/// ## Invariants
/// - `fullname` and `phone` are trimmed and non-empty.
/// - `password` is non-empty; whitespace is preserved.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    fullname: String,
    phone: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration values.
    ///
    /// # Errors
    /// Returns [`Error::bad_request`] with one field entry per offending
    /// field.
    ///
    /// # Examples
    /// ```
    /// use authgate::domain::Registration;
    ///
    /// let err = Registration::try_from_parts(" ", "pw", "").expect_err("blank fields");
    /// assert_eq!(err.fields().len(), 2);
    /// ```
    pub fn try_from_parts(fullname: &str, password: &str, phone: &str) -> Result<Self, Error> {
        let fullname = fullname.trim();
        let phone = phone.trim();

        let mut error = Error::bad_request(INVALID_REGISTRATION);
        if fullname.is_empty() {
            error.add_field("fullname", "fullname must not be empty");
        }
        if password.is_empty() {
            error.add_field("password", "password must not be empty");
        }
        if phone.is_empty() {
            error.add_field("phone", "phone must not be empty");
        }
        if !error.fields().is_empty() {
            return Err(error);
        }

        Ok(Self {
            fullname: fullname.to_owned(),
            phone: phone.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed full name.
    pub fn fullname(&self) -> &str {
        self.fullname.as_str()
    }

    /// Trimmed phone number.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Plaintext password, untrimmed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("fullname", &self.fullname)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ErrorKind};
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", "0812", &["fullname"])]
    #[case("Ada", "", "0812", &["password"])]
    #[case("Ada", "pw", "   ", &["phone"])]
    #[case("  ", "", "", &["fullname", "password", "phone"])]
    fn registration_reports_every_blank_field(
        #[case] fullname: &str,
        #[case] password: &str,
        #[case] phone: &str,
        #[case] expected: &[&str],
    ) {
        let err = Registration::try_from_parts(fullname, password, phone)
            .expect_err("blank fields must fail");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.code(), ErrorCode::BAD_REQUEST);
        let fields: Vec<&str> = err.fields().iter().map(|entry| entry.field()).collect();
        assert_eq!(fields, expected);
    }

    #[rstest]
    fn registration_trims_names_but_not_passwords() {
        let registration = Registration::try_from_parts("  Ada  ", " pw ", " 0812 ")
            .expect("valid registration");
        assert_eq!(registration.fullname(), "Ada");
        assert_eq!(registration.phone(), "0812");
        assert_eq!(registration.password(), " pw ");
    }

    #[rstest]
    fn debug_output_hides_passwords() {
        let creds = LoginCredentials::new("0812", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));

        let registration =
            Registration::try_from_parts("Ada", "hunter2", "0812").expect("valid registration");
        assert!(!format!("{registration:?}").contains("hunter2"));
    }
}
