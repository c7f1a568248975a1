//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `QuestionRepository` - Questions, with soft-delete aware queries
//! - `QuestionnaireRepository` - The morning and evening questionnaires
//! - `ResponseRepository` - Submitted diaries and date-range lookups

mod question_repository;
mod questionnaire_repository;
mod response_repository;

pub use question_repository::QuestionRepository;
pub use questionnaire_repository::QuestionnaireRepository;
pub use response_repository::ResponseRepository;
