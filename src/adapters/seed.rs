//! Default diary content.
//!
//! Seeds the morning questionnaire with its locked core questions and an
//! empty evening questionnaire. Seeding is an upsert keyed by questionnaire
//! type and question order, so running it on every start is safe: existing
//! questions get their seed text back and nothing is duplicated.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, LocalizedText, QuestionId, QuestionnaireId};
use crate::domain::questionnaire::{
    child_order, NewQuestion, Question, QuestionConstraints, QuestionOption, QuestionPatch,
    QuestionRole, QuestionType, Questionnaire, QuestionnaireType, WAKE_NO, WAKE_YES,
};
use crate::ports::{QuestionRepository, QuestionnaireRepository};

/// Maximum characters for the evening activity answer.
const ACTIVITY_MAX_LENGTH: u32 = 200;

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub questionnaires_created: usize,
    pub questions_created: usize,
    pub questions_refreshed: usize,
}

struct SeedQuestion {
    order: u32,
    question_type: QuestionType,
    text: LocalizedText,
    role: Option<QuestionRole>,
    constraints: QuestionConstraints,
    options: Vec<QuestionOption>,
}

impl SeedQuestion {
    fn new(order: u32, question_type: QuestionType, da: &str, en: &str) -> Self {
        Self {
            order,
            question_type,
            text: LocalizedText::new(da, en),
            role: None,
            constraints: QuestionConstraints::default(),
            options: Vec::new(),
        }
    }

    fn role(mut self, role: QuestionRole) -> Self {
        self.role = Some(role);
        self
    }

    fn constraints(mut self, constraints: QuestionConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    fn options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }

    fn into_new(self, questionnaire_id: QuestionnaireId) -> NewQuestion {
        let mut new = NewQuestion::new(questionnaire_id, self.order, self.question_type, self.text)
            .with_constraints(self.constraints)
            .with_options(self.options)
            .locked();
        new.role = self.role;
        new
    }
}

fn option(id: &str, da: &str, en: &str) -> QuestionOption {
    QuestionOption::new(id, LocalizedText::new(da, en))
}

fn morning_questions() -> Result<Vec<SeedQuestion>, DomainError> {
    let order = |parent, index| {
        child_order(parent, index).map_err(|e| DomainError::database(e.to_string()))
    };
    Ok(vec![
        SeedQuestion::new(
            1,
            QuestionType::MultipleChoice,
            "Tog du nogen form for medicin eller kosttilskud for at hjælpe dig med at sove?",
            "Did you take any form of medicine or dietary supplements to help you sleep?",
        )
        .options(vec![
            option("med_no", "Nej", "No"),
            option("med_yes", "Ja", "Yes"),
        ]),
        SeedQuestion::new(
            order(1, 1)?,
            QuestionType::MultipleChoiceMultiple,
            "Hvilken type medicin eller kosttilskud?",
            "What type of medicine or dietary supplement?",
        )
        .options(vec![
            option("med_sleeping_pill", "Sovemedicin", "Sleeping medication"),
            option("med_melatonin", "Melatonin piller", "Melatonin pills"),
            QuestionOption::other("med_other", LocalizedText::new("Andet", "Other")),
        ]),
        SeedQuestion::new(
            2,
            QuestionType::Text,
            "Hvad foretog du dig de sidste par timer inden du gik i seng?",
            "What did you do in the last few hours before going to bed?",
        )
        .constraints(QuestionConstraints::text(ACTIVITY_MAX_LENGTH)),
        SeedQuestion::new(
            3,
            QuestionType::TimePicker,
            "I går gik jeg i seng klokken:",
            "Yesterday I went to bed at:",
        )
        .role(QuestionRole::Bedtime),
        SeedQuestion::new(
            4,
            QuestionType::TimePicker,
            "Jeg slukkede lyset klokken:",
            "I turned off the light at:",
        )
        .role(QuestionRole::LightsOff),
        SeedQuestion::new(
            5,
            QuestionType::Numeric,
            "Efter jeg slukkede lyset, sov jeg ca. efter (minutter):",
            "After I turned off the light, I fell asleep approximately after (minutes):",
        )
        .role(QuestionRole::SleepOnset),
        SeedQuestion::new(
            6,
            QuestionType::MultipleChoice,
            "Vågnede du i løbet af natten?",
            "Did you wake up during the night?",
        )
        .role(QuestionRole::NightWaking)
        .options(vec![
            option(WAKE_NO, "Nej", "No"),
            option(WAKE_YES, "Ja", "Yes"),
        ]),
        SeedQuestion::new(
            order(6, 1)?,
            QuestionType::Numeric,
            "Hvor mange gange?",
            "How many times?",
        )
        .role(QuestionRole::WakeCount),
        SeedQuestion::new(
            order(6, 2)?,
            QuestionType::Numeric,
            "Hvor mange minutter?",
            "How many minutes?",
        )
        .role(QuestionRole::WakeMinutes),
        SeedQuestion::new(
            7,
            QuestionType::TimePicker,
            "I morges vågnede jeg klokken?",
            "This morning I woke up at:",
        )
        .role(QuestionRole::WakeTime),
        SeedQuestion::new(
            8,
            QuestionType::TimePicker,
            "Og jeg stod op klokken?",
            "And I got out of bed at:",
        )
        .role(QuestionRole::GetUpTime),
        SeedQuestion::new(
            9,
            QuestionType::Slider,
            "Et par timer efter jeg stod op følte jeg mig? (1–5)",
            "A few hours after I got up, I felt? (1–5)",
        )
        .constraints(QuestionConstraints::range(1, 5)),
    ])
}

/// (parent order, option id, child orders) links of the morning questionnaire.
const MORNING_LINKS: &[(u32, &str, &[u32])] = &[
    (1, "med_yes", &[101]),
    (6, WAKE_YES, &[601, 602]),
];

/// Upserts the default questionnaires and their questions.
pub struct DiarySeeder {
    questionnaires: Arc<dyn QuestionnaireRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl DiarySeeder {
    pub fn new(
        questionnaires: Arc<dyn QuestionnaireRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            questionnaires,
            questions,
        }
    }

    pub async fn seed(&self) -> Result<SeedReport, DomainError> {
        let mut report = SeedReport::default();

        let morning = self
            .ensure_questionnaire(QuestionnaireType::Morning, "Morgenskema", &mut report)
            .await?;
        self.ensure_questionnaire(QuestionnaireType::Evening, "Aftenskema", &mut report)
            .await?;

        let mut seeded = Vec::new();
        for seed in morning_questions()? {
            seeded.push(self.upsert_question(morning.id, seed, &mut report).await?);
        }
        self.link_children(&mut seeded).await?;

        tracing::info!(
            questionnaires_created = report.questionnaires_created,
            questions_created = report.questions_created,
            questions_refreshed = report.questions_refreshed,
            "Diary content seeded"
        );
        Ok(report)
    }

    async fn ensure_questionnaire(
        &self,
        questionnaire_type: QuestionnaireType,
        name: &str,
        report: &mut SeedReport,
    ) -> Result<Questionnaire, DomainError> {
        if let Some(existing) = self.questionnaires.find_by_type(questionnaire_type).await? {
            return Ok(existing);
        }
        let questionnaire = Questionnaire::new(QuestionnaireId::new(), questionnaire_type, name);
        self.questionnaires.save(&questionnaire).await?;
        report.questionnaires_created += 1;
        Ok(questionnaire)
    }

    async fn upsert_question(
        &self,
        questionnaire_id: QuestionnaireId,
        seed: SeedQuestion,
        report: &mut SeedReport,
    ) -> Result<Question, DomainError> {
        let existing = self
            .questions
            .find_by_questionnaire(&questionnaire_id, false)
            .await?
            .into_iter()
            .find(|q| q.order() == seed.order && q.question_type() == seed.question_type);

        let question = match existing {
            Some(mut question) => {
                let patch = QuestionPatch {
                    text: Some(seed.text),
                    ..QuestionPatch::default()
                };
                question
                    .update_from(patch)
                    .map_err(|e| DomainError::database(e.to_string()))?;
                report.questions_refreshed += 1;
                question
            }
            None => {
                let question = Question::create(QuestionId::new(), seed.into_new(questionnaire_id))
                    .map_err(|e| DomainError::database(e.to_string()))?;
                report.questions_created += 1;
                question
            }
        };
        self.questions.save(&question).await?;
        Ok(question)
    }

    async fn link_children(&self, seeded: &mut [Question]) -> Result<(), DomainError> {
        for (parent_order, option_id, child_orders) in MORNING_LINKS {
            let child_ids: Vec<QuestionId> = child_orders
                .iter()
                .filter_map(|order| seeded.iter().find(|q| q.order() == *order))
                .map(Question::id)
                .collect();
            let Some(parent) = seeded.iter_mut().find(|q| q.order() == *parent_order) else {
                continue;
            };
            let mut changed = false;
            for child_id in child_ids {
                changed |= parent
                    .add_conditional_child(option_id, child_id)
                    .map_err(|e| DomainError::database(e.to_string()))?;
            }
            if changed {
                self.questions.save(parent).await?;
            }
        }
        Ok(())
    }
}
