//! In-memory store adapters for development and tests.
//!
//! Each store keeps its records behind a `tokio::sync::RwLock` and hands out
//! clones. Nothing is persisted across restarts.

mod question_store;
mod questionnaire_store;
mod response_store;

pub use question_store::InMemoryQuestionRepository;
pub use questionnaire_store::InMemoryQuestionnaireRepository;
pub use response_store::InMemoryResponseRepository;
