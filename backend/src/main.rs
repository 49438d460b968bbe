//! Backend entry-point: loads settings, checks the signing keys and serves the
//! `/v1` authentication endpoints.

use authgate::server;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = server::load_config().map_err(|err| {
        error!(error = %err, "startup failed");
        std::io::Error::other(err)
    })?;

    server::create_server(config)?.await
}
