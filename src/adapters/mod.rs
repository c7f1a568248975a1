//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory stores for the questionnaire, question and response ports
//! - `seed` - Default morning and evening questionnaires
//! - `http` - axum REST API over the application handlers

pub mod http;
pub mod memory;
pub mod seed;

pub use http::{api_router, DiaryAppState, HttpLayers};
pub use memory::{
    InMemoryQuestionRepository, InMemoryQuestionnaireRepository, InMemoryResponseRepository,
};
pub use seed::{DiarySeeder, SeedReport};
