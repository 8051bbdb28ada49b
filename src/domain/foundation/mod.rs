//! Foundation types shared across the domain.
//!
//! Identifier newtypes, timestamps, error taxonomy, and the state machine
//! trait that lifecycle status enums implement.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{JobId, ProblemId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
