//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use crate::domain::PasswordHasher;
use crate::domain::ports::TokenCodec;
use crate::inbound::http::encoder::JsonEncoder;
use crate::inbound::http::status::StatusDictionary;
use crate::outbound::JwtTokenCodec;
use cap_std::{ambient_authority, fs::Dir};

use super::StartupError;
use super::settings::AppSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: Arc<dyn TokenCodec>,
    pub(crate) hasher: PasswordHasher,
    pub(crate) statuses: StatusDictionary,
}

impl ServerConfig {
    /// Construct a configuration with the default status dictionary and
    /// hashing cost.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: Arc<dyn TokenCodec>) -> Self {
        Self {
            bind_addr,
            tokens,
            hasher: PasswordHasher::default(),
            statuses: StatusDictionary::default(),
        }
    }

    /// Build a configuration from loaded settings, reading and checking the
    /// signing keys.
    ///
    /// # Errors
    /// Fails when a required setting is missing, a key file cannot be read,
    /// or the key pair is unusable.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, StartupError> {
        let bind_addr = settings.bind_addr()?;
        let private_pem = read_pem(settings.private_key_path()?)?;
        let public_pem = read_pem(settings.public_key_path()?)?;
        let codec = JwtTokenCodec::from_rsa_pem(&private_pem, &public_pem)?;
        Ok(Self::new(bind_addr, Arc::new(codec))
            .with_hasher(PasswordHasher::new(settings.password_cost())))
    }

    /// Replace the kind-to-status lookup used for error responses.
    ///
    /// Embedders call this before [`create_server`](super::create_server) or
    /// [`build_http_state`](super::build_http_state); the binary keeps the
    /// default dictionary.
    #[must_use]
    pub fn with_statuses(mut self, statuses: StatusDictionary) -> Self {
        self.statuses = statuses;
        self
    }

    /// Replace the hasher used for new passwords.
    #[must_use]
    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Response encoder sharing this configuration's status dictionary.
    pub(crate) fn encoder(&self) -> JsonEncoder {
        JsonEncoder::new(Arc::new(self.statuses.clone()))
    }
}

/// Read a PEM file through `cap_std`.
fn read_pem(path: &Path) -> Result<Vec<u8>, StartupError> {
    let key_read = |source| StartupError::KeyRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        key_read(io::Error::new(
            io::ErrorKind::InvalidInput,
            "key path has no file name",
        ))
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(key_read)?;
    directory.read(Path::new(file_name)).map_err(key_read)
}
