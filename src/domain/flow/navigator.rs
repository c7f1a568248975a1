//! Flow navigation through a questionnaire.
//!
//! The navigator walks root questions in ascending order. Conditional
//! children are never returned on their own; clients render them under the
//! root that reveals them (see [`ConditionalEvaluator::revealed_children`]).

use thiserror::Error;

use super::{ConditionalEvaluator, ConditionalIndex};
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::Question;
use crate::domain::response::AnswerSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("question {0} is not part of this questionnaire")]
    UnknownCurrentQuestion(QuestionId),
}

pub struct FlowNavigator;

impl FlowNavigator {
    /// Active questions that are nobody's conditional child, by ascending order.
    pub fn root_questions(questions: &[Question]) -> Vec<&Question> {
        let index = ConditionalIndex::build(questions);
        let mut roots: Vec<&Question> = questions
            .iter()
            .filter(|q| !q.is_deleted() && !index.is_child(q.id()))
            .collect();
        roots.sort_by_key(|q| q.order());
        roots
    }

    /// The first eligible root after `current`, or the first root when
    /// `current` is `None`.
    ///
    /// If `current` is a conditional child, navigation continues after the
    /// root it hangs under. Returns `Ok(None)` at the end of the questionnaire.
    pub fn next_question<'a>(
        questions: &'a [Question],
        answers: &AnswerSet,
        current: Option<QuestionId>,
    ) -> Result<Option<&'a Question>, NavigationError> {
        let after_order = match current {
            Some(id) => Some(Self::anchor_order(questions, id)?),
            None => None,
        };

        let next = Self::root_questions(questions)
            .into_iter()
            .filter(|q| after_order.map_or(true, |order| q.order() > order))
            .find_map(|q| ConditionalEvaluator::should_show(q, answers, questions));
        Ok(next)
    }

    fn anchor_order(questions: &[Question], id: QuestionId) -> Result<u32, NavigationError> {
        let index = ConditionalIndex::build(questions);
        let mut question = questions
            .iter()
            .find(|q| q.id() == id)
            .ok_or(NavigationError::UnknownCurrentQuestion(id))?;
        for _ in 0..questions.len() {
            match index.parent_of(question.id()) {
                Some(link) => question = link.parent,
                None => break,
            }
        }
        Ok(question.order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{LocalizedText, QuestionnaireId, Timestamp};
    use crate::domain::questionnaire::{NewQuestion, QuestionOption, QuestionType};

    /// Nine roots 1..=9; question 6 reveals 601 and 602 on `wake_yes`.
    fn morning() -> Vec<Question> {
        let questionnaire = QuestionnaireId::new();
        let mut questions: Vec<Question> = (1..=9)
            .map(|order| {
                let new = if order == 6 {
                    NewQuestion::new(
                        questionnaire,
                        6,
                        QuestionType::MultipleChoice,
                        LocalizedText::danish("Vågnede du?"),
                    )
                    .with_options(vec![
                        QuestionOption::new("wake_yes", LocalizedText::danish("Ja")),
                        QuestionOption::new("wake_no", LocalizedText::danish("Nej")),
                    ])
                } else {
                    NewQuestion::new(
                        questionnaire,
                        order,
                        QuestionType::Text,
                        LocalizedText::danish("Spørgsmål"),
                    )
                };
                Question::create(QuestionId::new(), new).unwrap()
            })
            .collect();

        for order in [601, 602] {
            let child = Question::create(
                QuestionId::new(),
                NewQuestion::new(
                    questionnaire,
                    order,
                    QuestionType::Numeric,
                    LocalizedText::danish("Antal"),
                ),
            )
            .unwrap();
            questions[5]
                .add_conditional_child("wake_yes", child.id())
                .unwrap();
            questions.push(child);
        }
        questions
    }

    fn at(questions: &[Question], order: u32) -> QuestionId {
        questions.iter().find(|q| q.order() == order).unwrap().id()
    }

    #[test]
    fn roots_exclude_conditional_children() {
        let questions = morning();
        let orders: Vec<u32> = FlowNavigator::root_questions(&questions)
            .iter()
            .map(|q| q.order())
            .collect();
        assert_eq!(orders, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn skips_hidden_children_after_wake_no() {
        let questions = morning();
        let answers = AnswerSet::new().with(at(&questions, 6), "wake_no");

        let next = FlowNavigator::next_question(&questions, &answers, Some(at(&questions, 6)))
            .unwrap()
            .unwrap();
        assert_eq!(next.order(), 7);
    }

    #[test]
    fn starts_at_first_root_without_current() {
        let questions = morning();
        let first = FlowNavigator::next_question(&questions, &AnswerSet::new(), None)
            .unwrap()
            .unwrap();
        assert_eq!(first.order(), 1);
    }

    #[test]
    fn continues_after_the_root_of_a_child() {
        let questions = morning();
        let answers = AnswerSet::new().with(at(&questions, 6), "wake_yes");
        let next = FlowNavigator::next_question(&questions, &answers, Some(at(&questions, 602)))
            .unwrap()
            .unwrap();
        assert_eq!(next.order(), 7);
    }

    #[test]
    fn returns_none_after_last_root() {
        let questions = morning();
        let next =
            FlowNavigator::next_question(&questions, &AnswerSet::new(), Some(at(&questions, 9)))
                .unwrap();
        assert!(next.is_none());
    }

    #[test]
    fn deleted_roots_are_skipped() {
        let mut questions = morning();
        questions[6].soft_delete(Timestamp::now()).unwrap();
        let next = FlowNavigator::next_question(&questions, &AnswerSet::new(), Some(at(&questions, 6)))
            .unwrap()
            .unwrap();
        assert_eq!(next.order(), 8);
    }

    #[test]
    fn unknown_current_question_is_an_error() {
        let questions = morning();
        let stranger = QuestionId::new();
        assert_eq!(
            FlowNavigator::next_question(&questions, &AnswerSet::new(), Some(stranger)),
            Err(NavigationError::UnknownCurrentQuestion(stranger))
        );
    }
}
