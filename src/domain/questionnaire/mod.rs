//! Questionnaire domain module.
//!
//! Questions, their options and conditional children, the order allocator
//! that numbers those children, and the semantic roles diary rules use to
//! find specific questions.

mod order;
mod question;
#[allow(clippy::module_inception)]
mod questionnaire;
mod role;
mod translation;

pub use order::{child_order, is_root_order, OrderError, CHILD_ORDER_MULTIPLIER, MAX_CHILD_INDEX};
pub use question::{
    ConditionalChild, NewQuestion, Question, QuestionConstraints, QuestionError, QuestionOption,
    QuestionPatch, QuestionType,
};
pub use questionnaire::{Questionnaire, QuestionnaireRef, QuestionnaireType, ResolvedQuestionnaire};
pub use role::{QuestionRole, RoleBinding, RoleTable, WAKE_NO, WAKE_YES};
pub use translation::{OptionView, QuestionView};
