//! Process settings loaded via OrthoConfig.
//!
//! Values come from config files, `AUTHGATE_*` environment variables and CLI
//! flags. Later sources override earlier ones.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::domain::MIN_PASSWORD_COST;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::StartupError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings controlling the listener, signing keys and hashing cost.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AUTHGATE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PEM file holding the RSA private signing key.
    pub private_key_path: Option<PathBuf>,
    /// PEM file holding the matching RSA public key.
    pub public_key_path: Option<PathBuf>,
    /// bcrypt work factor for new password hashes.
    #[ortho_config(default = 12)]
    pub password_cost: u32,
}

impl AppSettings {
    /// Listener address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`StartupError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, StartupError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| StartupError::InvalidBindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Private key location.
    ///
    /// # Errors
    /// Returns [`StartupError::MissingSetting`] when unset.
    pub fn private_key_path(&self) -> Result<&Path, StartupError> {
        self.private_key_path
            .as_deref()
            .ok_or(StartupError::MissingSetting("private_key_path"))
    }

    /// Public key location.
    ///
    /// # Errors
    /// Returns [`StartupError::MissingSetting`] when unset.
    pub fn public_key_path(&self) -> Result<&Path, StartupError> {
        self.public_key_path
            .as_deref()
            .ok_or(StartupError::MissingSetting("public_key_path"))
    }

    /// Configured bcrypt cost, raised to the minimum bcrypt accepts.
    pub fn password_cost(&self) -> u32 {
        self.password_cost.max(MIN_PASSWORD_COST)
    }
}
