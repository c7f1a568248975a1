//! Question authoring command and query handlers.

mod add_conditional_child;
mod child_orders;
mod create_question;
mod delete_question;
mod get_question;
mod list_questions;
mod remove_conditional_child;
mod reorder_conditional_children;
mod update_question;

pub use add_conditional_child::{
    AddConditionalChildCommand, AddConditionalChildHandler, AddConditionalChildResult,
};
pub use create_question::{CreateQuestionCommand, CreateQuestionHandler};
pub use delete_question::{DeleteQuestionCommand, DeleteQuestionHandler};
pub use get_question::{GetQuestionHandler, GetQuestionQuery};
pub use list_questions::{ListQuestionsHandler, ListQuestionsQuery};
pub use remove_conditional_child::{
    RemoveConditionalChildCommand, RemoveConditionalChildHandler, RemoveConditionalChildResult,
};
pub use reorder_conditional_children::{
    ReorderConditionalChildrenCommand, ReorderConditionalChildrenHandler,
    ReorderConditionalChildrenResult,
};
pub use update_question::{UpdateQuestionCommand, UpdateQuestionHandler, UpdateQuestionResult};
