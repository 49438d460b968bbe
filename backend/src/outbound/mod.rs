//! Outbound adapters implementing domain ports.
//!
//! - **jwt**: RS256 bearer token codec over a PEM key pair
//! - **memory**: process-local credential store
//!
//! Adapters translate between domain types and infrastructure formats. They
//! contain no business logic.

pub mod jwt;
pub mod memory;

pub use jwt::{JwtKeyError, JwtTokenCodec};
pub use memory::InMemoryUserStore;
