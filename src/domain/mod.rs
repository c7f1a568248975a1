//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `questionnaire` - Questions, options, conditional children and roles
//! - `response` - Submitted diaries, answer parsing and sleep parameters
//! - `flow` - Conditional visibility, navigation and answer validation

pub mod flow;
pub mod foundation;
pub mod questionnaire;
pub mod response;
