//! Semantic roles that diary rules and sleep arithmetic refer to.
//!
//! Rules look up "the bedtime question" by role rather than by a fixed
//! order number, so questions can be renumbered without touching the rules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::{Question, QuestionType};
use crate::domain::foundation::QuestionId;

/// Option id meaning "yes, I woke during the night".
pub const WAKE_YES: &str = "wake_yes";

/// Option id meaning "no, I slept through".
pub const WAKE_NO: &str = "wake_no";

/// What a question means to the diary rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionRole {
    /// When the citizen went to bed.
    Bedtime,
    /// When the light was turned off.
    LightsOff,
    /// How long it took to fall asleep, or when sleep began.
    SleepOnset,
    /// Whether the citizen woke during the night.
    NightWaking,
    /// How many times the citizen woke.
    WakeCount,
    /// Minutes spent awake during the night.
    WakeMinutes,
    /// Final awakening.
    WakeTime,
    /// When the citizen got out of bed.
    GetUpTime,
}

impl QuestionRole {
    pub const ALL: [QuestionRole; 8] = [
        QuestionRole::Bedtime,
        QuestionRole::LightsOff,
        QuestionRole::SleepOnset,
        QuestionRole::NightWaking,
        QuestionRole::WakeCount,
        QuestionRole::WakeMinutes,
        QuestionRole::WakeTime,
        QuestionRole::GetUpTime,
    ];

    /// Question types a question must have to fill this role.
    pub fn accepts(&self, question_type: QuestionType) -> bool {
        match self {
            QuestionRole::Bedtime
            | QuestionRole::LightsOff
            | QuestionRole::WakeTime
            | QuestionRole::GetUpTime => question_type == QuestionType::TimePicker,
            QuestionRole::SleepOnset => matches!(
                question_type,
                QuestionType::Numeric | QuestionType::TimePicker
            ),
            QuestionRole::NightWaking => question_type == QuestionType::MultipleChoice,
            QuestionRole::WakeCount | QuestionRole::WakeMinutes => {
                question_type == QuestionType::Numeric
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionRole::Bedtime => "bedtime",
            QuestionRole::LightsOff => "lights_off",
            QuestionRole::SleepOnset => "sleep_onset",
            QuestionRole::NightWaking => "night_waking",
            QuestionRole::WakeCount => "wake_count",
            QuestionRole::WakeMinutes => "wake_minutes",
            QuestionRole::WakeTime => "wake_time",
            QuestionRole::GetUpTime => "get_up_time",
        }
    }
}

impl fmt::Display for QuestionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role bound to a concrete question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleBinding {
    pub question_id: QuestionId,
    pub question_type: QuestionType,
}

/// Roles resolved against one questionnaire's active questions.
///
/// A question fills a role only if its type suits the role. When several
/// questions claim the same role, the one with the lowest order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTable {
    bindings: HashMap<QuestionRole, RoleBinding>,
}

impl RoleTable {
    pub fn resolve<'a>(questions: impl IntoIterator<Item = &'a Question>) -> Self {
        let mut candidates: Vec<&Question> = questions
            .into_iter()
            .filter(|q| !q.is_deleted())
            .filter(|q| q.role().is_some_and(|role| role.accepts(q.question_type())))
            .collect();
        candidates.sort_by_key(|q| q.order());

        let mut bindings = HashMap::new();
        for question in candidates {
            if let Some(role) = question.role() {
                bindings.entry(role).or_insert(RoleBinding {
                    question_id: question.id(),
                    question_type: question.question_type(),
                });
            }
        }
        Self { bindings }
    }

    pub fn get(&self, role: QuestionRole) -> Option<RoleBinding> {
        self.bindings.get(&role).copied()
    }

    pub fn question_id(&self, role: QuestionRole) -> Option<QuestionId> {
        self.get(role).map(|b| b.question_id)
    }

    pub fn role_of(&self, question_id: QuestionId) -> Option<QuestionRole> {
        self.bindings
            .iter()
            .find(|(_, b)| b.question_id == question_id)
            .map(|(role, _)| *role)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
