//! Shared domain types for the hackathon hub
//!
//! Holds the six record types, the collection catalogue used by every store
//! backend, validation errors, and the tracing setup shared by all binaries.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use logging::Component;
pub use types::*;
