//! Language-resolved view of a question.

use serde::Serialize;

use super::{ConditionalChild, Question, QuestionConstraints, QuestionRole, QuestionType};
use crate::domain::foundation::{Language, QuestionId, QuestionnaireId, Timestamp};

/// An option with its label in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub id: String,
    pub text: String,
    pub is_other: bool,
}

/// A question with prompt and labels resolved for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: QuestionId,
    pub questionnaire_id: QuestionnaireId,
    pub order: u32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<QuestionRole>,
    #[serde(flatten)]
    pub constraints: QuestionConstraints,
    pub options: Vec<OptionView>,
    pub conditional_children: Vec<ConditionalChild>,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl Question {
    /// Resolves prompt and option labels for `language`, falling back to Danish.
    pub fn translate(&self, language: Language) -> QuestionView {
        QuestionView {
            id: self.id(),
            questionnaire_id: self.questionnaire_id(),
            order: self.order(),
            question_type: self.question_type(),
            text: self.text().resolve(language).to_string(),
            language,
            role: self.role(),
            constraints: self.constraints().clone(),
            options: self
                .options()
                .iter()
                .map(|o| OptionView {
                    id: o.id.clone(),
                    text: o.text.resolve(language).to_string(),
                    is_other: o.is_other,
                })
                .collect(),
            conditional_children: self.conditional_children().to_vec(),
            locked: self.is_locked(),
            deleted_at: self.deleted_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::LocalizedText;
    use crate::domain::questionnaire::{NewQuestion, QuestionOption};

    #[test]
    fn translate_resolves_prompt_and_labels() {
        let q = Question::create(
            QuestionId::new(),
            NewQuestion::new(
                QuestionnaireId::new(),
                1,
                QuestionType::MultipleChoice,
                LocalizedText::new("Tog du sovemedicin?", "Did you take sleeping medication?"),
            )
            .with_options(vec![
                QuestionOption::new("med_yes", LocalizedText::new("Ja", "Yes")),
                QuestionOption::new("med_no", LocalizedText::danish("Nej")),
            ]),
        )
        .unwrap();

        let en = q.translate(Language::En);
        assert_eq!(en.text, "Did you take sleeping medication?");
        assert_eq!(en.options[0].text, "Yes");
        assert_eq!(en.options[1].text, "Nej");

        let da = q.translate(Language::Da);
        assert_eq!(da.text, "Tog du sovemedicin?");
    }

    #[test]
    fn view_serializes_constraints_inline() {
        let q = Question::create(
            QuestionId::new(),
            NewQuestion::new(
                QuestionnaireId::new(),
                9,
                QuestionType::Slider,
                LocalizedText::danish("Hvordan har du det?"),
            )
            .with_constraints(QuestionConstraints::range(1, 5)),
        )
        .unwrap();

        let json = serde_json::to_value(q.translate(Language::Da)).unwrap();
        assert_eq!(json["type"], "slider");
        assert_eq!(json["minValue"], 1);
        assert_eq!(json["maxValue"], 5);
        assert!(json.get("deletedAt").is_none());
    }
}
