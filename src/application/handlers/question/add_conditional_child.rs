//! AddConditionalChildHandler - Command handler for attaching a conditional child.

use std::sync::Arc;

use super::child_orders::{plan_child_orders, save_moved_children};
use crate::application::DiaryError;
use crate::domain::flow::ConditionalIndex;
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::Question;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone)]
pub struct AddConditionalChildCommand {
    pub parent_id: QuestionId,
    pub option_id: String,
    pub child_id: QuestionId,
}

#[derive(Debug, Clone)]
pub struct AddConditionalChildResult {
    pub parent: Question,
    /// False when the child was already attached under this option.
    pub added: bool,
    pub children_reordered: usize,
}

pub struct AddConditionalChildHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl AddConditionalChildHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(
        &self,
        cmd: AddConditionalChildCommand,
    ) -> Result<AddConditionalChildResult, DiaryError> {
        // 1. Load parent and child
        let mut parent = self.load(cmd.parent_id).await?;
        let child = self.load(cmd.child_id).await?;
        if child.questionnaire_id() != parent.questionnaire_id() {
            return Err(DiaryError::validation(
                "Det betingede spørgsmål skal høre til samme skema.",
                "A conditional child must belong to the same questionnaire.",
            ));
        }

        // 2. The child hangs under one parent option and never above its parent
        let siblings = self
            .questions
            .find_by_questionnaire(&parent.questionnaire_id(), false)
            .await?;
        ensure_single_parent(&siblings, &cmd)?;
        ensure_not_ancestor(&siblings, &cmd)?;

        // 3. Attach
        let added = parent.add_conditional_child(&cmd.option_id, cmd.child_id)?;
        if !added {
            return Ok(AddConditionalChildResult {
                parent,
                added,
                children_reordered: 0,
            });
        }

        // 4. Allocate the child's order, then persist
        let moved = plan_child_orders(&parent, &siblings)?;
        self.questions.save(&parent).await?;
        let children_reordered =
            save_moved_children(self.questions.as_ref(), &parent, &moved).await?;

        tracing::info!(
            parent_id = %parent.id(),
            child_id = %cmd.child_id,
            option_id = %cmd.option_id,
            "Conditional child added"
        );
        Ok(AddConditionalChildResult {
            parent,
            added,
            children_reordered,
        })
    }

    async fn load(&self, id: QuestionId) -> Result<Question, DiaryError> {
        self.questions
            .find_by_id(&id, false)
            .await?
            .ok_or(DiaryError::QuestionNotFound(id))
    }
}

fn ensure_single_parent(
    siblings: &[Question],
    cmd: &AddConditionalChildCommand,
) -> Result<(), DiaryError> {
    let elsewhere = siblings.iter().any(|q| {
        q.conditional_children().iter().any(|c| {
            c.child_question_id == cmd.child_id
                && (q.id() != cmd.parent_id || c.option_id != cmd.option_id)
        })
    });
    if elsewhere {
        return Err(DiaryError::validation(
            "Spørgsmålet vises allerede betinget af et andet svar.",
            "The question is already revealed by another answer.",
        ));
    }
    Ok(())
}

fn ensure_not_ancestor(
    siblings: &[Question],
    cmd: &AddConditionalChildCommand,
) -> Result<(), DiaryError> {
    let index = ConditionalIndex::build(siblings);
    let mut current = cmd.parent_id;
    for _ in 0..siblings.len() {
        let Some(link) = index.parent_of(current) else {
            return Ok(());
        };
        if link.parent.id() == cmd.child_id {
            return Err(DiaryError::validation(
                "Et spørgsmål kan ikke være betinget af sit eget betingede spørgsmål.",
                "A question cannot be revealed by one of its own conditional children.",
            ));
        }
        current = link.parent.id();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Stores;
    use crate::domain::foundation::LocalizedText;
    use crate::domain::questionnaire::{NewQuestion, QuestionType, QuestionnaireType, WAKE_YES};

    async fn new_morning_question(stores: &Stores, order: u32) -> Question {
        let morning = stores.questionnaire_id(QuestionnaireType::Morning).await;
        let question = Question::create(
            QuestionId::new(),
            NewQuestion::new(
                morning,
                order,
                QuestionType::Text,
                LocalizedText::new("Hvad vækkede dig?", "What woke you?"),
            ),
        )
        .unwrap();
        stores.questions.save(&question).await.unwrap();
        question
    }

    #[tokio::test]
    async fn new_child_gets_next_order_under_option() {
        let stores = Stores::seeded().await;
        let waking = stores.morning_id(6).await;
        let reason = new_morning_question(&stores, 10).await;
        let handler = AddConditionalChildHandler::new(stores.questions.clone());

        let result = handler
            .handle(AddConditionalChildCommand {
                parent_id: waking,
                option_id: WAKE_YES.to_string(),
                child_id: reason.id(),
            })
            .await
            .unwrap();

        assert!(result.added);
        assert_eq!(result.children_reordered, 1);
        let stored = stores
            .questions
            .find_by_id(&reason.id(), false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.order(), 603);
    }

    #[tokio::test]
    async fn adding_same_pair_twice_is_a_no_op() {
        let stores = Stores::seeded().await;
        let waking = stores.morning_id(6).await;
        let times = stores.morning_id(601).await;
        let handler = AddConditionalChildHandler::new(stores.questions.clone());

        let result = handler
            .handle(AddConditionalChildCommand {
                parent_id: waking,
                option_id: WAKE_YES.to_string(),
                child_id: times,
            })
            .await
            .unwrap();

        assert!(!result.added);
        assert_eq!(result.parent.conditional_children().len(), 2);
    }

    #[tokio::test]
    async fn child_of_another_parent_is_rejected() {
        let stores = Stores::seeded().await;
        let medicine = stores.morning_id(1).await;
        let times = stores.morning_id(601).await;
        let handler = AddConditionalChildHandler::new(stores.questions.clone());

        let result = handler
            .handle(AddConditionalChildCommand {
                parent_id: medicine,
                option_id: "med_yes".to_string(),
                child_id: times,
            })
            .await;

        assert!(matches!(result, Err(DiaryError::Validation(_))));
    }

    #[tokio::test]
    async fn parent_cannot_hang_under_its_own_child() {
        let stores = Stores::seeded().await;
        let medicine = stores.morning_id(1).await;
        let medicine_type = stores.morning_id(101).await;
        let handler = AddConditionalChildHandler::new(stores.questions.clone());

        let result = handler
            .handle(AddConditionalChildCommand {
                parent_id: medicine_type,
                option_id: "med_other".to_string(),
                child_id: medicine,
            })
            .await;

        assert!(matches!(result, Err(DiaryError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_option_is_rejected() {
        let stores = Stores::seeded().await;
        let waking = stores.morning_id(6).await;
        let reason = new_morning_question(&stores, 10).await;
        let handler = AddConditionalChildHandler::new(stores.questions.clone());

        let result = handler
            .handle(AddConditionalChildCommand {
                parent_id: waking,
                option_id: "wake_sometimes".to_string(),
                child_id: reason.id(),
            })
            .await;

        assert!(matches!(result, Err(DiaryError::Validation(_))));
    }
}
