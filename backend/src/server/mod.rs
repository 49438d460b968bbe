//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;
pub use state_builders::build_http_state;

use std::io;
use std::net::AddrParseError;
use std::path::PathBuf;

use actix_web::body::BoxBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::JwtKeyError;
use crate::{Recover, Trace};
use ortho_config::OrthoConfig;
use thiserror::Error;
use tracing::info;

/// Failures that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Settings could not be loaded from flags, environment or files.
    #[error("failed to load settings: {0}")]
    Settings(String),
    /// A required setting has no value.
    #[error("missing required setting `{0}`")]
    MissingSetting(&'static str),
    /// The listener address does not parse.
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        /// Raw configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: AddrParseError,
    },
    /// A key file could not be read.
    #[error("failed to read key at {path}: {source}")]
    KeyRead {
        /// Path to the key file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The key pair could not back a token codec.
    #[error("unusable signing keys: {0}")]
    Keys(#[from] JwtKeyError),
}

/// Load settings from the process arguments and environment and build the
/// server configuration.
///
/// # Errors
/// Returns [`StartupError`] when settings or keys are unusable.
pub fn load_config() -> Result<ServerConfig, StartupError> {
    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| StartupError::Settings(err.to_string()))?;
    ServerConfig::from_settings(&settings)
}

/// Assemble the application: the `/v1` routes behind [`Recover`] and
/// [`Trace`], with `Trace` outermost so recovered panics carry the trace id.
pub fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let encoder = http_state.encoder.clone();
    App::new()
        .app_data(http_state)
        .wrap(Recover::new(encoder.clone()))
        .wrap(Trace)
        .configure(|cfg| configure(cfg, &encoder))
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener. Actix
/// stops it gracefully on SIGINT or SIGTERM.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> io::Result<Server> {
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "authgate listening");
    Ok(server)
}
