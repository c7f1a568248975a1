//! Flow domain module.
//!
//! Pure questionnaire flow: conditional visibility, navigation to the next
//! question, and validation of answer sets.

mod conditional;
mod navigator;
mod validator;

pub use conditional::{ConditionalEvaluator, ConditionalIndex, ParentLink};
pub use navigator::{FlowNavigator, NavigationError};
pub use validator::{RuleValidator, RuleViolation};
