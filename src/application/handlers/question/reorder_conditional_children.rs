//! ReorderConditionalChildrenHandler - Command handler for reordering the
//! children one option reveals.

use std::sync::Arc;

use super::child_orders::{plan_child_orders, save_moved_children};
use crate::application::DiaryError;
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::Question;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone)]
pub struct ReorderConditionalChildrenCommand {
    pub parent_id: QuestionId,
    pub option_id: String,
    /// Every current child under the option, in the new order.
    pub ordered_child_ids: Vec<QuestionId>,
}

#[derive(Debug, Clone)]
pub struct ReorderConditionalChildrenResult {
    pub parent: Question,
    pub children_reordered: usize,
}

pub struct ReorderConditionalChildrenHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl ReorderConditionalChildrenHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(
        &self,
        cmd: ReorderConditionalChildrenCommand,
    ) -> Result<ReorderConditionalChildrenResult, DiaryError> {
        // 1. Load the parent
        let mut parent = self
            .questions
            .find_by_id(&cmd.parent_id, false)
            .await?
            .ok_or(DiaryError::QuestionNotFound(cmd.parent_id))?;

        // 2. Replace the option's child sequence
        parent.update_conditional_children_order(&cmd.option_id, &cmd.ordered_child_ids)?;

        // 3. Children take the orders of their new positions
        let siblings = self
            .questions
            .find_by_questionnaire(&parent.questionnaire_id(), false)
            .await?;
        let moved = plan_child_orders(&parent, &siblings)?;

        // 4. Persist
        self.questions.save(&parent).await?;
        let children_reordered =
            save_moved_children(self.questions.as_ref(), &parent, &moved).await?;

        tracing::info!(
            parent_id = %parent.id(),
            option_id = %cmd.option_id,
            children_reordered,
            "Conditional children reordered"
        );
        Ok(ReorderConditionalChildrenResult {
            parent,
            children_reordered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Stores;
    use crate::domain::questionnaire::WAKE_YES;

    #[tokio::test]
    async fn reading_back_yields_submitted_order() {
        let stores = Stores::seeded().await;
        let waking = stores.morning_id(6).await;
        let times = stores.morning_id(601).await;
        let minutes = stores.morning_id(602).await;
        let handler = ReorderConditionalChildrenHandler::new(stores.questions.clone());

        let result = handler
            .handle(ReorderConditionalChildrenCommand {
                parent_id: waking,
                option_id: WAKE_YES.to_string(),
                ordered_child_ids: vec![minutes, times],
            })
            .await
            .unwrap();
        assert_eq!(result.children_reordered, 2);

        let parent = stores
            .questions
            .find_by_id(&waking, false)
            .await
            .unwrap()
            .unwrap();
        let read_back: Vec<QuestionId> = parent.children_for_option(WAKE_YES).collect();
        assert_eq!(read_back, vec![minutes, times]);
        assert_eq!(stores.morning_question(601).await.id(), minutes);
        assert_eq!(stores.morning_question(602).await.id(), times);
    }

    #[tokio::test]
    async fn order_must_list_current_children_only() {
        let stores = Stores::seeded().await;
        let waking = stores.morning_id(6).await;
        let times = stores.morning_id(601).await;
        let handler = ReorderConditionalChildrenHandler::new(stores.questions.clone());

        let stranger = handler
            .handle(ReorderConditionalChildrenCommand {
                parent_id: waking,
                option_id: WAKE_YES.to_string(),
                ordered_child_ids: vec![times, QuestionId::new()],
            })
            .await;
        assert!(matches!(stranger, Err(DiaryError::Validation(_))));

        let incomplete = handler
            .handle(ReorderConditionalChildrenCommand {
                parent_id: waking,
                option_id: WAKE_YES.to_string(),
                ordered_child_ids: vec![times],
            })
            .await;
        assert!(matches!(incomplete, Err(DiaryError::Validation(_))));
    }
}
