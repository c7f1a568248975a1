//! Sleep parameter derivation from a morning diary.
//!
//! All values are whole minutes:
//!
//! | Metric | Meaning | Derivation |
//! |--------|---------|------------|
//! | SOL | sleep onset latency | minutes to fall asleep, or lights-off → onset time |
//! | WASO | wake after sleep onset | minutes awake during the night |
//! | TIB | time in bed | bedtime → get-up time |
//! | TST | total sleep time | lights-off → wake time, minus SOL and WASO |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AnswerSet, FormatError};
use crate::domain::foundation::{BilingualMessage, ClockTime, Percentage};
use crate::domain::questionnaire::{QuestionRole, QuestionType, RoleTable};

/// Time in bed at or below this many minutes is rated red.
pub const SHORT_TIME_IN_BED_MINUTES: u32 = 6 * 60;

/// Sleep onset at or above this many minutes is rated red.
pub const LONG_SLEEP_ONSET_MINUTES: u32 = 30;

/// The four derived sleep metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SleepParameters {
    #[serde(rename = "SOL")]
    pub sol: u32,
    #[serde(rename = "WASO")]
    pub waso: u32,
    #[serde(rename = "TIB")]
    pub tib: u32,
    #[serde(rename = "TST")]
    pub tst: u32,
}

impl SleepParameters {
    /// Share of the time in bed spent asleep.
    pub fn efficiency(&self) -> Option<Percentage> {
        Percentage::from_ratio(self.tst, self.tib)
    }

    /// Traffic-light ratings used by sleep advisors.
    pub fn ratings(&self) -> SleepRatings {
        SleepRatings {
            tib: if self.tib <= SHORT_TIME_IN_BED_MINUTES {
                ColorCode::Red
            } else {
                ColorCode::Green
            },
            sol: if self.sol >= LONG_SLEEP_ONSET_MINUTES {
                ColorCode::Red
            } else {
                ColorCode::Green
            },
            waso: match self.waso {
                0..=29 => ColorCode::Green,
                30..=59 => ColorCode::Yellow,
                _ => ColorCode::Red,
            },
            tst: match self.efficiency().map(|p| p.value()) {
                None | Some(0..=74) => ColorCode::Red,
                Some(75..=84) => ColorCode::Yellow,
                Some(_) => ColorCode::Green,
            },
        }
    }
}

/// Rating colour for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCode {
    Green,
    Yellow,
    Red,
}

impl ColorCode {
    /// Rates the number of night awakenings.
    pub fn for_awakenings(count: u32) -> Self {
        match count {
            0..=2 => ColorCode::Green,
            3..=4 => ColorCode::Yellow,
            _ => ColorCode::Red,
        }
    }
}

/// Per-metric ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SleepRatings {
    pub tib: ColorCode,
    pub sol: ColorCode,
    pub waso: ColorCode,
    pub tst: ColorCode,
}

/// Why sleep parameters could not be derived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SleepCalculationError {
    #[error("no answer for {0}")]
    MissingAnswer(QuestionRole),

    #[error("answer for {role} is malformed: {source}")]
    Malformed {
        role: QuestionRole,
        #[source]
        source: FormatError,
    },
}

impl SleepCalculationError {
    pub fn bilingual(&self) -> BilingualMessage {
        match self {
            SleepCalculationError::MissingAnswer(role) => BilingualMessage::new(
                format!(
                    "Søvnparametre kan ikke beregnes, fordi {} mangler.",
                    danish_role_name(*role)
                ),
                format!(
                    "Sleep parameters cannot be calculated because {} is missing.",
                    english_role_name(*role)
                ),
            ),
            SleepCalculationError::Malformed { source, .. } => source.bilingual(),
        }
    }
}

fn danish_role_name(role: QuestionRole) -> &'static str {
    match role {
        QuestionRole::Bedtime => "tidspunktet for sengetid",
        QuestionRole::LightsOff => "tidspunktet for slukket lys",
        QuestionRole::SleepOnset => "indsovningstiden",
        QuestionRole::NightWaking => "svaret om natlige opvågninger",
        QuestionRole::WakeCount => "antallet af opvågninger",
        QuestionRole::WakeMinutes => "minutter vågen i løbet af natten",
        QuestionRole::WakeTime => "tidspunktet for opvågning",
        QuestionRole::GetUpTime => "tidspunktet for at stå op",
    }
}

fn english_role_name(role: QuestionRole) -> &'static str {
    match role {
        QuestionRole::Bedtime => "the bedtime",
        QuestionRole::LightsOff => "the lights-off time",
        QuestionRole::SleepOnset => "the sleep onset",
        QuestionRole::NightWaking => "the night waking answer",
        QuestionRole::WakeCount => "the number of awakenings",
        QuestionRole::WakeMinutes => "the minutes awake during the night",
        QuestionRole::WakeTime => "the wake-up time",
        QuestionRole::GetUpTime => "the get-up time",
    }
}

/// Derives [`SleepParameters`] from a validated morning answer set.
///
/// Pure: the same answers and roles always give the same parameters.
pub struct SleepCalculator;

impl SleepCalculator {
    pub fn calculate(
        answers: &AnswerSet,
        roles: &RoleTable,
    ) -> Result<SleepParameters, SleepCalculationError> {
        let bedtime = Self::required_time(answers, roles, QuestionRole::Bedtime)?;
        let lights_off = Self::required_time(answers, roles, QuestionRole::LightsOff)?;
        let wake = Self::required_time(answers, roles, QuestionRole::WakeTime)?;
        let get_up = Self::required_time(answers, roles, QuestionRole::GetUpTime)?;

        let sol = Self::sleep_onset_latency(answers, roles, &lights_off)?;
        let waso = Self::optional_minutes(answers, roles, QuestionRole::WakeMinutes)?;
        let tib = bedtime.minutes_until(&get_up);
        let tst = lights_off
            .minutes_until(&wake)
            .saturating_sub(sol)
            .saturating_sub(waso);

        Ok(SleepParameters {
            sol,
            waso,
            tib,
            tst,
        })
    }

    fn required_time(
        answers: &AnswerSet,
        roles: &RoleTable,
        role: QuestionRole,
    ) -> Result<ClockTime, SleepCalculationError> {
        let answer = roles
            .question_id(role)
            .and_then(|id| answers.get(&id))
            .ok_or(SleepCalculationError::MissingAnswer(role))?;
        answer
            .as_time()
            .map_err(|source| SleepCalculationError::Malformed { role, source })
    }

    fn optional_minutes(
        answers: &AnswerSet,
        roles: &RoleTable,
        role: QuestionRole,
    ) -> Result<u32, SleepCalculationError> {
        let Some(answer) = roles.question_id(role).and_then(|id| answers.get(&id)) else {
            return Ok(0);
        };
        let minutes = answer
            .as_integer()
            .map_err(|source| SleepCalculationError::Malformed { role, source })?;
        Ok(u32::try_from(minutes.max(0)).unwrap_or(u32::MAX))
    }

    fn sleep_onset_latency(
        answers: &AnswerSet,
        roles: &RoleTable,
        lights_off: &ClockTime,
    ) -> Result<u32, SleepCalculationError> {
        let role = QuestionRole::SleepOnset;
        let Some(binding) = roles.get(role) else {
            return Ok(0);
        };
        match binding.question_type {
            QuestionType::TimePicker => match answers.get(&binding.question_id) {
                Some(answer) => answer
                    .as_time()
                    .map(|onset| lights_off.minutes_until(&onset))
                    .map_err(|source| SleepCalculationError::Malformed { role, source }),
                None => Ok(0),
            },
            _ => Self::optional_minutes(answers, roles, role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{LocalizedText, QuestionId, QuestionnaireId};
    use crate::domain::questionnaire::{NewQuestion, Question};

    struct Diary {
        questions: Vec<Question>,
    }

    impl Diary {
        fn new(onset_type: QuestionType) -> Self {
            let questionnaire = QuestionnaireId::new();
            let q = |order, question_type, role| {
                Question::create(
                    QuestionId::new(),
                    NewQuestion::new(
                        questionnaire,
                        order,
                        question_type,
                        LocalizedText::danish("Spørgsmål"),
                    )
                    .with_role(role),
                )
                .unwrap()
            };
            Self {
                questions: vec![
                    q(3, QuestionType::TimePicker, QuestionRole::Bedtime),
                    q(4, QuestionType::TimePicker, QuestionRole::LightsOff),
                    q(5, onset_type, QuestionRole::SleepOnset),
                    q(602, QuestionType::Numeric, QuestionRole::WakeMinutes),
                    q(7, QuestionType::TimePicker, QuestionRole::WakeTime),
                    q(8, QuestionType::TimePicker, QuestionRole::GetUpTime),
                ],
            }
        }

        fn id(&self, role: QuestionRole) -> QuestionId {
            self.questions
                .iter()
                .find(|q| q.role() == Some(role))
                .unwrap()
                .id()
        }

        fn roles(&self) -> RoleTable {
            RoleTable::resolve(&self.questions)
        }

        fn night(&self) -> AnswerSet {
            AnswerSet::new()
                .with(self.id(QuestionRole::Bedtime), "22:30")
                .with(self.id(QuestionRole::LightsOff), "23:00")
                .with(self.id(QuestionRole::WakeTime), "06:30")
                .with(self.id(QuestionRole::GetUpTime), "07:00")
        }
    }

    #[test]
    fn computes_metrics_across_midnight() {
        let diary = Diary::new(QuestionType::Numeric);
        let answers = diary
            .night()
            .with(diary.id(QuestionRole::SleepOnset), 20)
            .with(diary.id(QuestionRole::WakeMinutes), 15);

        let params = SleepCalculator::calculate(&answers, &diary.roles()).unwrap();
        assert_eq!(
            params,
            SleepParameters {
                sol: 20,
                waso: 15,
                tib: 510,
                tst: 415,
            }
        );
    }

    #[test]
    fn onset_given_as_clock_time_counts_from_lights_off() {
        let diary = Diary::new(QuestionType::TimePicker);
        let answers = diary
            .night()
            .with(diary.id(QuestionRole::SleepOnset), "00:15");

        let params = SleepCalculator::calculate(&answers, &diary.roles()).unwrap();
        assert_eq!(params.sol, 75);
        assert_eq!(params.waso, 0);
        assert_eq!(params.tst, 450 - 75);
    }

    #[test]
    fn absent_onset_and_waking_count_as_zero() {
        let diary = Diary::new(QuestionType::Numeric);
        let params = SleepCalculator::calculate(&diary.night(), &diary.roles()).unwrap();
        assert_eq!(params.sol, 0);
        assert_eq!(params.waso, 0);
        assert_eq!(params.tst, 450);
    }

    #[test]
    fn total_sleep_never_goes_negative() {
        let diary = Diary::new(QuestionType::Numeric);
        let answers = diary
            .night()
            .with(diary.id(QuestionRole::SleepOnset), 400)
            .with(diary.id(QuestionRole::WakeMinutes), 200);

        let params = SleepCalculator::calculate(&answers, &diary.roles()).unwrap();
        assert_eq!(params.tst, 0);
    }

    #[test]
    fn missing_clock_answer_is_reported_by_role() {
        let diary = Diary::new(QuestionType::Numeric);
        let answers = AnswerSet::new().with(diary.id(QuestionRole::Bedtime), "22:30");

        assert_eq!(
            SleepCalculator::calculate(&answers, &diary.roles()),
            Err(SleepCalculationError::MissingAnswer(QuestionRole::LightsOff))
        );
    }

    #[test]
    fn recomputation_is_idempotent() {
        let diary = Diary::new(QuestionType::Numeric);
        let answers = diary
            .night()
            .with(diary.id(QuestionRole::SleepOnset), 12)
            .with(diary.id(QuestionRole::WakeMinutes), 40);
        let roles = diary.roles();

        let first = SleepCalculator::calculate(&answers, &roles).unwrap();
        let second = SleepCalculator::calculate(&answers, &roles).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ratings_follow_advisor_thresholds() {
        let params = SleepParameters {
            sol: 30,
            waso: 45,
            tib: 480,
            tst: 384,
        };
        let ratings = params.ratings();
        assert_eq!(params.efficiency(), Some(Percentage::new(80)));
        assert_eq!(ratings.tib, ColorCode::Green);
        assert_eq!(ratings.sol, ColorCode::Red);
        assert_eq!(ratings.waso, ColorCode::Yellow);
        assert_eq!(ratings.tst, ColorCode::Yellow);

        let short = SleepParameters {
            sol: 5,
            waso: 0,
            tib: 360,
            tst: 350,
        };
        assert_eq!(short.ratings().tib, ColorCode::Red);
        assert_eq!(short.ratings().tst, ColorCode::Green);
        assert_eq!(ColorCode::for_awakenings(3), ColorCode::Yellow);
    }

    #[test]
    fn serializes_with_clinical_abbreviations() {
        let params = SleepParameters {
            sol: 1,
            waso: 2,
            tib: 3,
            tst: 4,
        };
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["SOL"], 1);
        assert_eq!(json["TST"], 4);
    }
}
