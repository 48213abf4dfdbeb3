//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the state machine trait, and error types
//! that form the vocabulary of the gateway domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::OrderId;
pub use state_machine::StateMachine;
