//! UpdateQuestionHandler - Command handler for editing a question.

use std::sync::Arc;

use super::child_orders::{ensure_order_free, plan_child_orders, save_moved_children};
use crate::application::DiaryError;
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::{Question, QuestionPatch};
use crate::ports::QuestionRepository;

#[derive(Debug, Clone)]
pub struct UpdateQuestionCommand {
    pub question_id: QuestionId,
    pub patch: QuestionPatch,
}

#[derive(Debug, Clone)]
pub struct UpdateQuestionResult {
    pub question: Question,
    /// Conditional children moved because the question's order changed.
    pub children_reordered: usize,
}

pub struct UpdateQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl UpdateQuestionHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(
        &self,
        cmd: UpdateQuestionCommand,
    ) -> Result<UpdateQuestionResult, DiaryError> {
        // 1. Load the question
        let mut question = self
            .questions
            .find_by_id(&cmd.question_id, false)
            .await?
            .ok_or(DiaryError::QuestionNotFound(cmd.question_id))?;
        let previous_order = question.order();

        // 2. Apply the patch (locks and invariants are checked here)
        question.update_from(cmd.patch)?;
        let order_changed = question.order() != previous_order;

        // 3. A new order must be unused, and so must the orders its children move to
        let siblings = self
            .questions
            .find_by_questionnaire(&question.questionnaire_id(), false)
            .await?;
        let moved = if order_changed {
            ensure_order_free(&siblings, question.order(), &[question.id()])?;
            plan_child_orders(&question, &siblings)?
        } else {
            Vec::new()
        };

        // 4. Persist the question, then move its children
        self.questions.save(&question).await?;
        let children_reordered =
            save_moved_children(self.questions.as_ref(), &question, &moved).await?;

        tracing::info!(
            question_id = %question.id(),
            order = question.order(),
            children_reordered,
            "Question updated"
        );
        Ok(UpdateQuestionResult {
            question,
            children_reordered,
        })
    }
}
