//! Shared HTTP adapter state.
//!
//! Handlers and extractors read this through `web::Data` so they depend only
//! on driving ports and the response encoder.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, TokenValidator, UserProfileCommand, UserProfileQuery, UserRegistration,
};

use super::encoder::JsonEncoder;

/// Parameter object bundling the driving ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenValidator>,
    pub registration: Arc<dyn UserRegistration>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_updates: Arc<dyn UserProfileCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenValidator>,
    pub registration: Arc<dyn UserRegistration>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_updates: Arc<dyn UserProfileCommand>,
    pub encoder: JsonEncoder,
}

impl HttpState {
    /// Construct state from ports and the encoder used for every response.
    pub fn new(ports: HttpStatePorts, encoder: JsonEncoder) -> Self {
        let HttpStatePorts {
            login,
            tokens,
            registration,
            profile,
            profile_updates,
        } = ports;
        Self {
            login,
            tokens,
            registration,
            profile,
            profile_updates,
            encoder,
        }
    }
}
