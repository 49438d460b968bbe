//! Phone and password authentication service.
//!
//! Users register with a phone number, log in to receive a short-lived RS256
//! bearer token, and read or update their own profile with it. The crate is
//! laid out hexagonally: [`domain`] holds the services and ports, [`inbound`]
//! the actix-web adapter, [`outbound`] the token codec and credential
//! store, and [`server`] the settings and listener wiring.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::{Recover, Trace};
