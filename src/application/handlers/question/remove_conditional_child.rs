//! RemoveConditionalChildHandler - Command handler for detaching a conditional child.

use std::sync::Arc;

use crate::application::DiaryError;
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::Question;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone)]
pub struct RemoveConditionalChildCommand {
    pub parent_id: QuestionId,
    pub option_id: String,
    pub child_id: QuestionId,
}

#[derive(Debug, Clone)]
pub struct RemoveConditionalChildResult {
    pub parent: Question,
    /// False when the pair was not attached.
    pub removed: bool,
}

/// Detaches a child. Every question keeps its order; the detached question
/// becomes a root and its former siblings keep their slots.
pub struct RemoveConditionalChildHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl RemoveConditionalChildHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(
        &self,
        cmd: RemoveConditionalChildCommand,
    ) -> Result<RemoveConditionalChildResult, DiaryError> {
        let mut parent = self
            .questions
            .find_by_id(&cmd.parent_id, false)
            .await?
            .ok_or(DiaryError::QuestionNotFound(cmd.parent_id))?;

        let removed = parent.remove_conditional_child(&cmd.option_id, cmd.child_id);
        if !removed {
            return Ok(RemoveConditionalChildResult { parent, removed });
        }

        self.questions.save(&parent).await?;

        tracing::info!(
            parent_id = %parent.id(),
            child_id = %cmd.child_id,
            option_id = %cmd.option_id,
            "Conditional child removed"
        );
        Ok(RemoveConditionalChildResult { parent, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Stores;
    use crate::domain::flow::FlowNavigator;
    use crate::domain::questionnaire::WAKE_YES;

    #[tokio::test]
    async fn detached_child_becomes_root_and_siblings_stay() {
        let stores = Stores::seeded().await;
        let waking = stores.morning_id(6).await;
        let times = stores.morning_id(601).await;
        let minutes = stores.morning_id(602).await;
        let handler = RemoveConditionalChildHandler::new(stores.questions.clone());

        let result = handler
            .handle(RemoveConditionalChildCommand {
                parent_id: waking,
                option_id: WAKE_YES.to_string(),
                child_id: times,
            })
            .await
            .unwrap();

        assert!(result.removed);
        assert_eq!(result.parent.conditional_children().len(), 1);
        let stored = stores
            .questions
            .find_by_id(&minutes, false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.order(), 602);

        let questions = stores.morning_questions().await;
        let roots: Vec<QuestionId> = FlowNavigator::root_questions(&questions)
            .iter()
            .map(|q| q.id())
            .collect();
        assert!(roots.contains(&times));
    }

    #[tokio::test]
    async fn removing_absent_pair_is_a_no_op() {
        let stores = Stores::seeded().await;
        let waking = stores.morning_id(6).await;
        let handler = RemoveConditionalChildHandler::new(stores.questions.clone());

        let result = handler
            .handle(RemoveConditionalChildCommand {
                parent_id: waking,
                option_id: WAKE_YES.to_string(),
                child_id: QuestionId::new(),
            })
            .await
            .unwrap();

        assert!(!result.removed);
        assert_eq!(result.parent.conditional_children().len(), 2);
    }
}
