//! Domain primitives, services and ports.
//!
//! Purpose: hold the transport-agnostic core. Inbound adapters call the
//! services through the driving ports in [`ports`]; the services reach storage
//! and signing through the driven ports.
//!
//! Public surface:
//! - `Error`, `ErrorKind`, `ErrorCode`: the failure taxonomy.
//! - `AuthService`: login and bearer token validation.
//! - `UserService`: registration and profile management.
//! - `TraceId`: request correlation.

pub mod auth;
mod auth_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::auth::{LoginCredentials, LoginGrant, Registration};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorKind, FieldError};
pub use self::password::{MAX_PASSWORD_COST, MIN_PASSWORD_COST, PasswordHasher};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AttendanceSummary, LoginAttendance, NewUser, Profile, ProfileUpdate, User, UserId,
};
pub use self::user_service::UserService;
