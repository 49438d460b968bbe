//! Builders wiring the credential store and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use crate::domain::{AuthService, UserService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::InMemoryUserStore;
use mockable::{Clock, DefaultClock};

use super::ServerConfig;

/// Build handler state over a fresh in-memory credential store.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let store = Arc::new(InMemoryUserStore::default());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let auth = Arc::new(AuthService::new(
        store.clone(),
        store.clone(),
        config.tokens.clone(),
        clock.clone(),
    )
    .with_hasher(config.hasher));
    let users = Arc::new(UserService::new(
        store.clone(),
        store,
        clock,
        config.hasher,
    ));

    web::Data::new(HttpState::new(
        HttpStatePorts {
            login: auth.clone(),
            tokens: auth,
            registration: users.clone(),
            profile: users.clone(),
            profile_updates: users,
        },
        config.encoder(),
    ))
}
