//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, language handling and error types
//! that form the vocabulary of the sleep diary domain.

mod clock;
mod errors;
mod ids;
mod language;
mod percentage;
mod timestamp;

pub use clock::ClockTime;
pub use errors::{BilingualMessage, DomainError, ErrorCode, ValidationError};
pub use ids::{QuestionId, QuestionnaireId, ResponseId, UserId};
pub use language::{Language, LocalizedText};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
