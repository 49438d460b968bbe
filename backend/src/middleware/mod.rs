//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the handlers. [`Trace`]
//! scopes a correlation id around each request and [`Recover`] turns handler
//! panics into the standard internal error envelope.

pub mod recover;
pub mod trace;

pub use recover::Recover;
pub use trace::Trace;
