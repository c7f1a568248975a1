//! Answer set validation.
//!
//! Validation is a pipeline over an immutable input:
//!
//! 1. **derive defaults**: a citizen who slept through the night gets
//!    0 minutes awake filled in when they left it blank
//! 2. **basic checks**: every visible answer is checked against its
//!    question type and constraints
//! 3. **cross-field rules**: a fixed, ordered list of diary rules over the
//!    questions bound to semantic roles
//!
//! The first violation stops validation. A rule whose role question is
//! missing from the questionnaire is skipped.

use thiserror::Error;

use super::ConditionalIndex;
use crate::domain::foundation::{BilingualMessage, ClockTime, Language, QuestionId};
use crate::domain::questionnaire::{
    Question, QuestionRole, QuestionType, RoleTable, WAKE_NO, WAKE_YES,
};
use crate::domain::response::{AnswerSet, AnswerValue, FormatError};

/// The first rule an answer set breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleViolation {
    pub message: BilingualMessage,
    pub question_id: Option<QuestionId>,
}

impl RuleViolation {
    fn new(question_id: Option<QuestionId>, da: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            message: BilingualMessage::new(da, en),
            question_id,
        }
    }

    fn format(question_id: QuestionId, err: FormatError) -> Self {
        Self {
            message: err.bilingual(),
            question_id: Some(question_id),
        }
    }
}

type BasicCheck = fn(&Question, &AnswerValue) -> Result<(), RuleViolation>;

/// Basic check per question type.
fn basic_check(question_type: QuestionType) -> BasicCheck {
    match question_type {
        QuestionType::Text => check_text,
        QuestionType::Numeric | QuestionType::Slider => check_integer,
        QuestionType::TimePicker => check_time,
        QuestionType::MultipleChoice => check_single_choice,
        QuestionType::MultipleChoiceMultiple => check_multiple_choice,
    }
}

type CrossFieldRule = fn(&RoleTable, &AnswerSet) -> Result<(), RuleViolation>;

/// Cross-field rules in evaluation order.
const CROSS_FIELD_RULES: &[(&str, CrossFieldRule)] = &[
    ("lights_off_not_before_bedtime", lights_off_not_before_bedtime),
    ("get_up_not_before_wake", get_up_not_before_wake),
    ("night_waking_companions", night_waking_companions),
    ("sleep_onset_not_before_bedtime", sleep_onset_not_before_bedtime),
];

/// Validates answer sets against one questionnaire's questions.
pub struct RuleValidator<'a> {
    questions: &'a [Question],
    index: ConditionalIndex<'a>,
    roles: RoleTable,
}

impl<'a> RuleValidator<'a> {
    pub fn new(questions: &'a [Question]) -> Self {
        Self {
            questions,
            index: ConditionalIndex::build(questions),
            roles: RoleTable::resolve(questions),
        }
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Fills answers implied by others, leaving `answers` untouched.
    pub fn derive_defaults(&self, answers: &AnswerSet) -> AnswerSet {
        let mut derived = answers.clone();
        if let (Some(waking), Some(minutes)) = (
            self.roles.question_id(QuestionRole::NightWaking),
            self.roles.question_id(QuestionRole::WakeMinutes),
        ) {
            let slept_through = answers
                .get(&waking)
                .and_then(AnswerValue::option_id)
                .is_some_and(|id| id == WAKE_NO);
            if slept_through && !answers.contains(&minutes) {
                derived.insert(minutes, 0);
            }
        }
        derived
    }

    /// Answers whose question is currently shown, plus answers to unknown ids.
    pub fn visible_answers(&self, answers: &AnswerSet) -> AnswerSet {
        answers
            .iter()
            .filter(|(id, _)| self.index.is_visible(**id, answers))
            .map(|(id, value)| (*id, value.clone()))
            .collect()
    }

    /// Validates `answers`, returning the visible answers with derived
    /// defaults applied.
    ///
    /// Answers to hidden children are dropped from the result.
    pub fn validate(&self, answers: &AnswerSet) -> Result<AnswerSet, RuleViolation> {
        let derived = self.derive_defaults(answers);
        self.check_answers(&derived)?;
        for (name, rule) in CROSS_FIELD_RULES {
            tracing::trace!(rule = *name, "evaluating cross-field rule");
            rule(&self.roles, &derived)?;
        }
        Ok(self.derive_defaults(&self.visible_answers(answers)))
    }

    fn check_answers(&self, answers: &AnswerSet) -> Result<(), RuleViolation> {
        for question in self.questions.iter().filter(|q| !q.is_deleted()) {
            if !self.index.is_visible(question.id(), answers) {
                continue;
            }
            if let Some(answer) = answers.get(&question.id()) {
                basic_check(question.question_type())(question, answer)?;
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Basic checks
// ─────────────────────────────────────────────────────────────────────────────

fn prompt_da(question: &Question) -> &str {
    question.text().resolve(Language::Da)
}

fn prompt_en(question: &Question) -> &str {
    question.text().resolve(Language::En)
}

fn check_text(question: &Question, answer: &AnswerValue) -> Result<(), RuleViolation> {
    let text = answer
        .as_text()
        .map_err(|e| RuleViolation::format(question.id(), e))?;
    let limits = question.constraints();
    let length = text.chars().count();

    if let Some(max) = limits.max_length {
        if length > max as usize {
            return Err(RuleViolation::new(
                Some(question.id()),
                format!(
                    "Teksten for '{}' må højst være {} tegn. Du indtastede {} tegn.",
                    prompt_da(question),
                    max,
                    length
                ),
                format!(
                    "The text for '{}' can be at most {} characters. You entered {} characters.",
                    prompt_en(question),
                    max,
                    length
                ),
            ));
        }
    }
    let trimmed = text.trim().chars().count();
    if let Some(min) = limits.min_length {
        if trimmed < min as usize {
            return Err(RuleViolation::new(
                Some(question.id()),
                format!(
                    "Teksten for '{}' skal mindst være {} tegn.",
                    prompt_da(question),
                    min
                ),
                format!(
                    "The text for '{}' must be at least {} characters.",
                    prompt_en(question),
                    min
                ),
            ));
        }
    }
    if trimmed == 0 {
        return Err(RuleViolation::new(
            Some(question.id()),
            format!(
                "Teksten for '{}' skal indeholde mindst 1 tegn.",
                prompt_da(question)
            ),
            format!(
                "The text for '{}' must contain at least 1 character.",
                prompt_en(question)
            ),
        ));
    }
    Ok(())
}

fn check_integer(question: &Question, answer: &AnswerValue) -> Result<(), RuleViolation> {
    let value = answer.as_integer().map_err(|_| {
        RuleViolation::new(
            Some(question.id()),
            format!(
                "Svaret på '{}' skal være et helt tal. Du indtastede: {}",
                prompt_da(question),
                answer
            ),
            format!(
                "The answer to '{}' must be a whole number. You entered: {}",
                prompt_en(question),
                answer
            ),
        )
    })?;
    let limits = question.constraints();
    let below = limits.min_value.is_some_and(|min| value < min);
    let above = limits.max_value.is_some_and(|max| value > max);
    if !(below || above) {
        return Ok(());
    }

    let (da_range, en_range) = match (limits.min_value, limits.max_value) {
        (Some(min), Some(max)) => (
            format!("mellem {} og {}", min, max),
            format!("between {} and {}", min, max),
        ),
        (Some(min), None) => (format!("mindst {}", min), format!("at least {}", min)),
        (None, Some(max)) => (format!("højst {}", max), format!("at most {}", max)),
        (None, None) => (String::new(), String::new()),
    };
    Err(RuleViolation::new(
        Some(question.id()),
        format!(
            "Værdien for '{}' skal være {}. Du indtastede: {}",
            prompt_da(question),
            da_range,
            value
        ),
        format!(
            "The value for '{}' must be {}. You entered: {}",
            prompt_en(question),
            en_range,
            value
        ),
    ))
}

fn check_time(question: &Question, answer: &AnswerValue) -> Result<(), RuleViolation> {
    let time = answer.as_time().map_err(|_| {
        RuleViolation::new(
            Some(question.id()),
            format!(
                "Tidspunktet for '{}' skal have formatet TT:MM. Du indtastede: {}",
                prompt_da(question),
                answer
            ),
            format!(
                "The time for '{}' must use the HH:mm format. You entered: {}",
                prompt_en(question),
                answer
            ),
        )
    })?;
    let limits = question.constraints();
    let too_early = limits
        .min_time
        .is_some_and(|min| time.is_earlier_in_night_than(&min));
    let too_late = limits
        .max_time
        .is_some_and(|max| max.is_earlier_in_night_than(&time));
    if too_early || too_late {
        let bound = |t: Option<ClockTime>| {
            t.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
        };
        return Err(RuleViolation::new(
            Some(question.id()),
            format!(
                "Tidspunktet for '{}' skal ligge mellem {} og {}. Du indtastede: {}",
                prompt_da(question),
                bound(limits.min_time),
                bound(limits.max_time),
                time
            ),
            format!(
                "The time for '{}' must be between {} and {}. You entered: {}",
                prompt_en(question),
                bound(limits.min_time),
                bound(limits.max_time),
                time
            ),
        ));
    }
    Ok(())
}

fn invalid_option(question: &Question, answer: &AnswerValue) -> RuleViolation {
    RuleViolation::new(
        Some(question.id()),
        format!(
            "'{}' er ikke en gyldig svarmulighed for '{}'.",
            answer,
            prompt_da(question)
        ),
        format!(
            "'{}' is not a valid option for '{}'.",
            answer,
            prompt_en(question)
        ),
    )
}

fn check_single_choice(question: &Question, answer: &AnswerValue) -> Result<(), RuleViolation> {
    match answer.option_id() {
        Some(id) if question.has_option(id) => Ok(()),
        _ => Err(invalid_option(question, answer)),
    }
}

fn check_multiple_choice(question: &Question, answer: &AnswerValue) -> Result<(), RuleViolation> {
    let ids = answer
        .option_ids()
        .map_err(|_| invalid_option(question, answer))?;
    if ids.is_empty() {
        return Err(RuleViolation::new(
            Some(question.id()),
            format!("Vælg mindst én svarmulighed for '{}'.", prompt_da(question)),
            format!("Choose at least one option for '{}'.", prompt_en(question)),
        ));
    }
    if ids.iter().all(|id| question.has_option(id)) {
        Ok(())
    } else {
        Err(invalid_option(question, answer))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cross-field rules
// ─────────────────────────────────────────────────────────────────────────────

/// The answer bound to `role`, if the role exists and was answered.
fn role_answer<'s>(
    roles: &RoleTable,
    answers: &'s AnswerSet,
    role: QuestionRole,
) -> Option<(QuestionId, &'s AnswerValue)> {
    let id = roles.question_id(role)?;
    answers.get(&id).map(|answer| (id, answer))
}

fn lights_off_not_before_bedtime(
    roles: &RoleTable,
    answers: &AnswerSet,
) -> Result<(), RuleViolation> {
    let (Some((bed_id, bed)), Some((off_id, off))) = (
        role_answer(roles, answers, QuestionRole::Bedtime),
        role_answer(roles, answers, QuestionRole::LightsOff),
    ) else {
        return Ok(());
    };
    let bedtime = bed.as_time().map_err(|e| RuleViolation::format(bed_id, e))?;
    let lights_off = off.as_time().map_err(|e| RuleViolation::format(off_id, e))?;

    if lights_off.is_earlier_in_night_than(&bedtime) {
        return Err(RuleViolation::new(
            Some(off_id),
            format!(
                "Du kan ikke have slukket lyset ({}) før du gik i seng ({}). Tjek venligst dine svar.",
                off, bed
            ),
            format!(
                "You cannot have turned off the light ({}) before going to bed ({}). Please check your answers.",
                off, bed
            ),
        ));
    }
    Ok(())
}

fn get_up_not_before_wake(roles: &RoleTable, answers: &AnswerSet) -> Result<(), RuleViolation> {
    let (Some((wake_id, wake)), Some((up_id, up))) = (
        role_answer(roles, answers, QuestionRole::WakeTime),
        role_answer(roles, answers, QuestionRole::GetUpTime),
    ) else {
        return Ok(());
    };
    let woke = wake.as_time().map_err(|e| RuleViolation::format(wake_id, e))?;
    let got_up = up.as_time().map_err(|e| RuleViolation::format(up_id, e))?;

    // Both times fall in the same morning, so wall-clock order applies.
    if got_up < woke {
        return Err(RuleViolation::new(
            Some(up_id),
            format!(
                "Du kan ikke være stået op ({}) før du vågnede ({}). Tjek venligst dine svar.",
                up, wake
            ),
            format!(
                "You cannot have gotten out of bed ({}) before you woke up ({}). Please check your answers.",
                up, wake
            ),
        ));
    }
    Ok(())
}

fn night_waking_companions(roles: &RoleTable, answers: &AnswerSet) -> Result<(), RuleViolation> {
    let (Some(_), Some(count_id), Some(minutes_id)) = (
        roles.question_id(QuestionRole::NightWaking),
        roles.question_id(QuestionRole::WakeCount),
        roles.question_id(QuestionRole::WakeMinutes),
    ) else {
        return Ok(());
    };
    let Some((_, waking)) = role_answer(roles, answers, QuestionRole::NightWaking) else {
        return Ok(());
    };

    match waking.option_id() {
        Some(WAKE_YES) => {
            let (Some(count), Some(minutes)) = (answers.get(&count_id), answers.get(&minutes_id))
            else {
                return Err(RuleViolation::new(
                    Some(count_id),
                    "Hvis du vågnede i løbet af natten, skal du angive både hvor mange gange og hvor mange minutter du var vågen.",
                    "If you woke up during the night, you must specify both how many times and how many minutes you were awake.",
                ));
            };
            let not_whole = |id| {
                RuleViolation::new(
                    Some(id),
                    "Ugyldigt talformat for antal opvågninger eller minutter vågen. Indtast venligst hele tal.",
                    "Invalid number for times woken or minutes awake. Please enter whole numbers.",
                )
            };
            let times = count.as_integer().map_err(|_| not_whole(count_id))?;
            let awake = minutes.as_integer().map_err(|_| not_whole(minutes_id))?;

            if times == 0 {
                return Err(RuleViolation::new(
                    Some(count_id),
                    "Hvis du vågnede i løbet af natten, skal du angive hvor mange gange du vågnede. Værdien kan ikke være 0.",
                    "If you woke up during the night, you must specify how many times you woke up. The value cannot be 0.",
                ));
            }
            if times >= 1 && awake == 0 {
                return Err(RuleViolation::new(
                    Some(minutes_id),
                    format!(
                        "Hvis du vågnede {} gange i løbet af natten, skal du også angive hvor længe du var vågen. Værdien kan ikke være 0.",
                        times
                    ),
                    format!(
                        "If you woke up {} times during the night, you must also specify how long you were awake. The value cannot be 0.",
                        times
                    ),
                ));
            }
            Ok(())
        }
        Some(WAKE_NO) => {
            let Some(minutes) = answers.get(&minutes_id) else {
                return Ok(());
            };
            let awake = minutes.as_integer().map_err(|_| {
                RuleViolation::new(
                    Some(minutes_id),
                    "Ugyldigt talformat for minutter vågen. Indtast venligst et helt tal.",
                    "Invalid number for minutes awake. Please enter a whole number.",
                )
            })?;
            if awake != 0 {
                return Err(RuleViolation::new(
                    Some(minutes_id),
                    format!(
                        "Hvis du ikke vågnede i løbet af natten, kan du ikke have været vågen i flere minutter. Værdien skal være 0. Du indtastede: {}",
                        awake
                    ),
                    format!(
                        "If you did not wake up during the night, you cannot have been awake for several minutes. The value must be 0. You entered: {}",
                        awake
                    ),
                ));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn sleep_onset_not_before_bedtime(
    roles: &RoleTable,
    answers: &AnswerSet,
) -> Result<(), RuleViolation> {
    let (Some((bed_id, bed)), Some((onset_id, onset))) = (
        role_answer(roles, answers, QuestionRole::Bedtime),
        role_answer(roles, answers, QuestionRole::SleepOnset),
    ) else {
        return Ok(());
    };
    let Some(binding) = roles.get(QuestionRole::SleepOnset) else {
        return Ok(());
    };

    match binding.question_type {
        QuestionType::TimePicker => {
            let bedtime = bed.as_time().map_err(|e| RuleViolation::format(bed_id, e))?;
            let asleep = onset
                .as_time()
                .map_err(|e| RuleViolation::format(onset_id, e))?;
            if asleep.is_earlier_in_night_than(&bedtime) {
                return Err(RuleViolation::new(
                    Some(onset_id),
                    format!(
                        "Du kan ikke være faldet i søvn ({}) før du gik i seng ({}). Tjek venligst dine svar.",
                        onset, bed
                    ),
                    format!(
                        "You cannot have fallen asleep ({}) before going to bed ({}). Please check your answers.",
                        onset, bed
                    ),
                ));
            }
            Ok(())
        }
        _ => {
            let minutes = onset
                .as_integer()
                .map_err(|e| RuleViolation::format(onset_id, e))?;
            if minutes < 0 {
                return Err(RuleViolation::new(
                    Some(onset_id),
                    format!(
                        "Du kan ikke være faldet i søvn før du gik i seng. Antal minutter skal være positivt. Du indtastede: {}",
                        minutes
                    ),
                    format!(
                        "You cannot have fallen asleep before going to bed. Minutes must be positive. You entered: {}",
                        minutes
                    ),
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{LocalizedText, QuestionnaireId};
    use crate::domain::questionnaire::{NewQuestion, QuestionConstraints, QuestionOption};

    struct Morning {
        questions: Vec<Question>,
    }

    impl Morning {
        fn new() -> Self {
            Self::with_onset(QuestionType::Numeric)
        }

        fn with_onset(onset_type: QuestionType) -> Self {
            let questionnaire = QuestionnaireId::new();
            let make = |new: NewQuestion| Question::create(QuestionId::new(), new).unwrap();
            let q = |order, question_type, text: &str| {
                NewQuestion::new(questionnaire, order, question_type, LocalizedText::new(text, text))
            };

            let mut waking = make(
                q(6, QuestionType::MultipleChoice, "Vågnede du?")
                    .with_role(QuestionRole::NightWaking)
                    .with_options(vec![
                        QuestionOption::new(WAKE_YES, LocalizedText::new("Ja", "Yes")),
                        QuestionOption::new(WAKE_NO, LocalizedText::new("Nej", "No")),
                    ]),
            );
            let count = make(
                q(601, QuestionType::Numeric, "Hvor mange gange?")
                    .with_role(QuestionRole::WakeCount)
                    .with_constraints(QuestionConstraints::range(0, 20)),
            );
            let minutes = make(
                q(602, QuestionType::Numeric, "Hvor mange minutter?")
                    .with_role(QuestionRole::WakeMinutes)
                    .with_constraints(QuestionConstraints::range(0, 600)),
            );
            waking.add_conditional_child(WAKE_YES, count.id()).unwrap();
            waking.add_conditional_child(WAKE_YES, minutes.id()).unwrap();

            Self {
                questions: vec![
                    make(
                        q(2, QuestionType::Text, "Aktivitet")
                            .with_constraints(QuestionConstraints::text(200)),
                    ),
                    make(q(3, QuestionType::TimePicker, "Seng").with_role(QuestionRole::Bedtime)),
                    make(q(4, QuestionType::TimePicker, "Lys").with_role(QuestionRole::LightsOff)),
                    make(q(5, onset_type, "Søvn").with_role(QuestionRole::SleepOnset)),
                    waking,
                    count,
                    minutes,
                    make(q(7, QuestionType::TimePicker, "Vågnede").with_role(QuestionRole::WakeTime)),
                    make(q(8, QuestionType::TimePicker, "Op").with_role(QuestionRole::GetUpTime)),
                    make(
                        q(9, QuestionType::Slider, "Følelse")
                            .with_constraints(QuestionConstraints::range(1, 5)),
                    ),
                ],
            }
        }

        fn id(&self, order: u32) -> QuestionId {
            self.questions.iter().find(|q| q.order() == order).unwrap().id()
        }

        fn validate(&self, answers: &AnswerSet) -> Result<AnswerSet, RuleViolation> {
            RuleValidator::new(&self.questions).validate(answers)
        }
    }

    #[test]
    fn lights_off_before_bedtime_quotes_both_times() {
        let m = Morning::new();
        let answers = AnswerSet::new().with(m.id(3), "22:00").with(m.id(4), "21:59");

        let err = m.validate(&answers).unwrap_err();
        assert!(err.message.da.contains("21:59") && err.message.da.contains("22:00"));
        assert!(err.message.en.contains("21:59") && err.message.en.contains("22:00"));
        assert_eq!(err.question_id, Some(m.id(4)));

        let ok = AnswerSet::new().with(m.id(3), "22:00").with(m.id(4), "22:15");
        assert!(m.validate(&ok).is_ok());
    }

    #[test]
    fn lights_off_after_midnight_is_accepted() {
        let m = Morning::new();
        let answers = AnswerSet::new().with(m.id(3), "23:50").with(m.id(4), "00:10");
        assert!(m.validate(&answers).is_ok());
    }

    #[test]
    fn get_up_before_wake_is_rejected() {
        let m = Morning::new();
        let answers = AnswerSet::new().with(m.id(7), "07:00").with(m.id(8), "06:45");
        let err = m.validate(&answers).unwrap_err();
        assert!(err.message.en.contains("06:45"));
        assert_eq!(err.question_id, Some(m.id(8)));
    }

    #[test]
    fn late_morning_around_noon_is_accepted() {
        let m = Morning::new();
        let answers = AnswerSet::new().with(m.id(7), "11:50").with(m.id(8), "12:10");
        assert!(m.validate(&answers).is_ok());

        let reversed = AnswerSet::new().with(m.id(7), "12:10").with(m.id(8), "11:50");
        let err = m.validate(&reversed).unwrap_err();
        assert_eq!(err.question_id, Some(m.id(8)));
    }

    #[test]
    fn hidden_child_answers_are_dropped_from_the_result() {
        let m = Morning::new();
        let answers = AnswerSet::new()
            .with(m.id(3), "22:00")
            .with(m.id(602), 240);

        let validated = m.validate(&answers).unwrap();

        assert!(!validated.contains(&m.id(602)));
        assert!(validated.contains(&m.id(3)));
        assert!(answers.contains(&m.id(602)));
    }

    #[test]
    fn woke_without_minutes_is_rejected() {
        let m = Morning::new();
        let answers = AnswerSet::new().with(m.id(6), WAKE_YES).with(m.id(601), 1);
        let err = m.validate(&answers).unwrap_err();
        assert!(err.message.en.contains("both how many times"));
    }

    #[test]
    fn woke_once_with_zero_minutes_is_rejected() {
        let m = Morning::new();
        let answers = AnswerSet::new()
            .with(m.id(6), WAKE_YES)
            .with(m.id(601), 1)
            .with(m.id(602), 0);
        let err = m.validate(&answers).unwrap_err();
        assert_eq!(err.question_id, Some(m.id(602)));
        assert!(err.message.en.contains("how long you were awake"));
    }

    #[test]
    fn woke_with_zero_times_is_rejected() {
        let m = Morning::new();
        let answers = AnswerSet::new()
            .with(m.id(6), WAKE_YES)
            .with(m.id(601), 0)
            .with(m.id(602), 10);
        let err = m.validate(&answers).unwrap_err();
        assert_eq!(err.question_id, Some(m.id(601)));
    }

    #[test]
    fn woke_once_for_ten_minutes_is_accepted() {
        let m = Morning::new();
        let answers = AnswerSet::new()
            .with(m.id(6), WAKE_YES)
            .with(m.id(601), 1)
            .with(m.id(602), 10);
        assert!(m.validate(&answers).is_ok());
    }

    #[test]
    fn sleeping_through_fills_zero_minutes_without_touching_input() {
        let m = Morning::new();
        let answers = AnswerSet::new().with(m.id(6), AnswerValue::choice(WAKE_NO));

        let validated = m.validate(&answers).unwrap();
        assert_eq!(validated.get(&m.id(602)), Some(&AnswerValue::Integer(0)));
        assert!(!answers.contains(&m.id(602)));
    }

    #[test]
    fn sleeping_through_with_minutes_awake_is_rejected() {
        let m = Morning::new();
        let answers = AnswerSet::new().with(m.id(6), WAKE_NO).with(m.id(602), 15);
        let err = m.validate(&answers).unwrap_err();
        assert!(err.message.en.contains("You entered: 15"));
    }

    #[test]
    fn hidden_child_answers_skip_basic_checks() {
        let m = Morning::new();
        // 601 is out of range, but hidden because the parent says wake_no.
        let answers = AnswerSet::new()
            .with(m.id(6), WAKE_NO)
            .with(m.id(601), 999);
        assert!(m.validate(&answers).is_ok());

        let visible = AnswerSet::new()
            .with(m.id(6), WAKE_YES)
            .with(m.id(601), 999)
            .with(m.id(602), 10);
        assert!(m.validate(&visible).is_err());
    }

    #[test]
    fn basic_checks_enforce_constraints() {
        let m = Morning::new();
        let long = "x".repeat(201);
        let err = m
            .validate(&AnswerSet::new().with(m.id(2), long.as_str()))
            .unwrap_err();
        assert!(err.message.da.contains("201 tegn"));

        let blank = m.validate(&AnswerSet::new().with(m.id(2), "   "));
        assert!(blank.is_err());

        let slider = m.validate(&AnswerSet::new().with(m.id(9), 6)).unwrap_err();
        assert!(slider.message.en.contains("between 1 and 5"));

        let time = m.validate(&AnswerSet::new().with(m.id(3), "10pm")).unwrap_err();
        assert!(time.message.en.contains("HH:mm"));

        let option = m.validate(&AnswerSet::new().with(m.id(6), "wake_maybe"));
        assert!(option.is_err());
    }

    #[test]
    fn numeric_sleep_onset_must_not_be_negative() {
        let m = Morning::new();
        let answers = AnswerSet::new().with(m.id(3), "22:00").with(m.id(5), -5);
        let err = m.validate(&answers).unwrap_err();
        assert!(err.message.en.contains("You entered: -5"));
    }

    #[test]
    fn clock_sleep_onset_must_follow_bedtime() {
        let m = Morning::with_onset(QuestionType::TimePicker);
        let answers = AnswerSet::new().with(m.id(3), "22:00").with(m.id(5), "21:30");
        let err = m.validate(&answers).unwrap_err();
        assert!(err.message.da.contains("21:30"));

        let ok = AnswerSet::new().with(m.id(3), "22:00").with(m.id(5), "22:40");
        assert!(m.validate(&ok).is_ok());
    }

    #[test]
    fn rules_for_missing_role_questions_are_skipped() {
        let m = Morning::new();
        let without_bedtime: Vec<Question> = m
            .questions
            .iter()
            .filter(|q| q.role() != Some(QuestionRole::Bedtime))
            .cloned()
            .collect();
        let answers = AnswerSet::new()
            .with(m.id(4), "21:00")
            .with(m.id(7), "07:00")
            .with(m.id(8), "06:00");

        let err = RuleValidator::new(&without_bedtime)
            .validate(&answers)
            .unwrap_err();
        assert_eq!(err.question_id, Some(m.id(8)));
    }
}
