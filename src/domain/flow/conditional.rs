//! Conditional visibility of questions.
//!
//! A conditional child is shown only while its parent's answer selects the
//! option that reveals it. Visibility is transitive: a child of a hidden
//! child stays hidden even if a stale answer for its parent exists.

use std::collections::HashMap;

use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::Question;
use crate::domain::response::AnswerSet;

/// Where a conditional child hangs in the tree.
#[derive(Debug, Clone, Copy)]
pub struct ParentLink<'a> {
    pub parent: &'a Question,
    pub option_id: &'a str,
}

/// Child → parent lookup built once per question list.
#[derive(Debug, Clone, Default)]
pub struct ConditionalIndex<'a> {
    parents: HashMap<QuestionId, ParentLink<'a>>,
}

impl<'a> ConditionalIndex<'a> {
    pub fn build(questions: &'a [Question]) -> Self {
        let mut parents = HashMap::new();
        for parent in questions {
            for child in parent.conditional_children() {
                parents.entry(child.child_question_id).or_insert(ParentLink {
                    parent,
                    option_id: child.option_id.as_str(),
                });
            }
        }
        Self { parents }
    }

    pub fn parent_of(&self, question_id: QuestionId) -> Option<ParentLink<'a>> {
        self.parents.get(&question_id).copied()
    }

    /// True if some question lists `question_id` as a conditional child.
    pub fn is_child(&self, question_id: QuestionId) -> bool {
        self.parents.contains_key(&question_id)
    }

    /// Decides whether `question_id` is currently shown given `answers`.
    pub fn is_visible(&self, question_id: QuestionId, answers: &AnswerSet) -> bool {
        let mut current = question_id;
        // Each step climbs one level; more steps than links means a cycle.
        for _ in 0..=self.parents.len() {
            let Some(link) = self.parent_of(current) else {
                return true;
            };
            if !selects(answers, link.parent, link.option_id) {
                return false;
            }
            current = link.parent.id();
        }
        false
    }
}

fn selects(answers: &AnswerSet, parent: &Question, option_id: &str) -> bool {
    let Some(answer) = answers.get(&parent.id()) else {
        return false;
    };
    match answer.option_ids() {
        Ok(ids) => ids.contains(&option_id),
        Err(_) => false,
    }
}

/// Stateless visibility check for a single question.
pub struct ConditionalEvaluator;

impl ConditionalEvaluator {
    /// Returns `question` if it should be shown, `None` if it must be skipped.
    ///
    /// Root questions are always eligible.
    pub fn should_show<'q>(
        question: &'q Question,
        answers: &AnswerSet,
        all_questions: &[Question],
    ) -> Option<&'q Question> {
        ConditionalIndex::build(all_questions)
            .is_visible(question.id(), answers)
            .then_some(question)
    }

    /// Children of `parent` currently revealed by `answers`, in presentation order.
    pub fn revealed_children<'a>(
        parent: &Question,
        answers: &AnswerSet,
        all_questions: &'a [Question],
    ) -> Vec<&'a Question> {
        let index = ConditionalIndex::build(all_questions);
        if !index.is_visible(parent.id(), answers) {
            return Vec::new();
        }
        parent
            .conditional_children()
            .iter()
            .filter(|c| selects(answers, parent, &c.option_id))
            .filter_map(|c| {
                all_questions
                    .iter()
                    .find(|q| q.id() == c.child_question_id && !q.is_deleted())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{LocalizedText, QuestionnaireId};
    use crate::domain::questionnaire::{NewQuestion, QuestionOption, QuestionType};
    use crate::domain::response::AnswerValue;

    struct Tree {
        questions: Vec<Question>,
    }

    impl Tree {
        /// 6 (wake_yes → 601, 602), 601 (many → 60101)
        fn new() -> Self {
            let questionnaire = QuestionnaireId::new();
            let choice = |order, options: &[&str]| {
                Question::create(
                    QuestionId::new(),
                    NewQuestion::new(
                        questionnaire,
                        order,
                        QuestionType::MultipleChoice,
                        LocalizedText::danish("Valg"),
                    )
                    .with_options(
                        options
                            .iter()
                            .map(|id| QuestionOption::new(*id, LocalizedText::danish(*id)))
                            .collect(),
                    ),
                )
                .unwrap()
            };
            let numeric = |order| {
                Question::create(
                    QuestionId::new(),
                    NewQuestion::new(
                        questionnaire,
                        order,
                        QuestionType::Numeric,
                        LocalizedText::danish("Tal"),
                    ),
                )
                .unwrap()
            };

            let mut wake = choice(6, &["wake_yes", "wake_no"]);
            let mut times = choice(601, &["few", "many"]);
            let minutes = numeric(602);
            let detail = numeric(60101);
            wake.add_conditional_child("wake_yes", times.id()).unwrap();
            wake.add_conditional_child("wake_yes", minutes.id()).unwrap();
            times.add_conditional_child("many", detail.id()).unwrap();

            Self {
                questions: vec![wake, times, minutes, detail],
            }
        }

        fn at(&self, order: u32) -> &Question {
            self.questions.iter().find(|q| q.order() == order).unwrap()
        }
    }

    #[test]
    fn root_question_is_always_shown() {
        let tree = Tree::new();
        let root = tree.at(6);
        let shown = ConditionalEvaluator::should_show(root, &AnswerSet::new(), &tree.questions);
        assert_eq!(shown.map(Question::id), Some(root.id()));
    }

    #[test]
    fn child_needs_triggering_option() {
        let tree = Tree::new();
        let child = tree.at(602);

        let unanswered = AnswerSet::new();
        assert!(ConditionalEvaluator::should_show(child, &unanswered, &tree.questions).is_none());

        let no = AnswerSet::new().with(tree.at(6).id(), "wake_no");
        assert!(ConditionalEvaluator::should_show(child, &no, &tree.questions).is_none());

        let yes = AnswerSet::new().with(tree.at(6).id(), AnswerValue::choice("wake_yes"));
        assert!(ConditionalEvaluator::should_show(child, &yes, &tree.questions).is_some());
    }

    #[test]
    fn grandchild_is_hidden_when_its_parent_is_hidden() {
        let tree = Tree::new();
        let grandchild = tree.at(60101);
        let stale = AnswerSet::new()
            .with(tree.at(6).id(), "wake_no")
            .with(tree.at(601).id(), "many");

        assert!(ConditionalEvaluator::should_show(grandchild, &stale, &tree.questions).is_none());

        let live = AnswerSet::new()
            .with(tree.at(6).id(), "wake_yes")
            .with(tree.at(601).id(), "many");
        assert!(ConditionalEvaluator::should_show(grandchild, &live, &tree.questions).is_some());
    }

    #[test]
    fn revealed_children_follow_presentation_order() {
        let tree = Tree::new();
        let answers = AnswerSet::new().with(tree.at(6).id(), "wake_yes");

        let revealed: Vec<u32> =
            ConditionalEvaluator::revealed_children(tree.at(6), &answers, &tree.questions)
                .iter()
                .map(|q| q.order())
                .collect();
        assert_eq!(revealed, vec![601, 602]);

        let none = AnswerSet::new().with(tree.at(6).id(), "wake_no");
        assert!(
            ConditionalEvaluator::revealed_children(tree.at(6), &none, &tree.questions).is_empty()
        );
    }

    #[test]
    fn index_knows_children_and_parents() {
        let tree = Tree::new();
        let index = ConditionalIndex::build(&tree.questions);

        assert!(!index.is_child(tree.at(6).id()));
        assert!(index.is_child(tree.at(602).id()));
        let link = index.parent_of(tree.at(60101).id()).unwrap();
        assert_eq!(link.parent.order(), 601);
        assert_eq!(link.option_id, "many");
    }
}
