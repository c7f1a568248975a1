//! Question entity.
//!
//! A question belongs to one questionnaire by id, carries its presentation
//! order, and owns the ordered list of conditional children its options
//! reveal.
//!
//! # Invariants
//!
//! - prompt text is never blank
//! - constraint bounds are consistent (`min <= max`)
//! - choice questions have at least one option, and option ids are unique
//! - every conditional child is attached to an option the question has
//! - locked questions keep their type, order, role, constraints and option ids

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use super::{child_order, OrderError, QuestionRole};
use crate::domain::foundation::{
    BilingualMessage, ClockTime, LocalizedText, QuestionId, QuestionnaireId, Timestamp,
};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    Numeric,
    TimePicker,
    MultipleChoice,
    MultipleChoiceMultiple,
    Slider,
}

impl QuestionType {
    /// Single or multiple choice.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::MultipleChoiceMultiple
        )
    }

    /// Answered with a whole number.
    pub fn is_integer(&self) -> bool {
        matches!(self, QuestionType::Numeric | QuestionType::Slider)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Numeric => "numeric",
            QuestionType::TimePicker => "time_picker",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::MultipleChoiceMultiple => "multiple_choice_multiple",
            QuestionType::Slider => "slider",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable answer of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub text: LocalizedText,
    /// Selecting this option lets the citizen type a free-text answer.
    #[serde(default)]
    pub is_other: bool,
}

impl QuestionOption {
    pub fn new(id: impl Into<String>, text: LocalizedText) -> Self {
        Self {
            id: id.into(),
            text,
            is_other: false,
        }
    }

    pub fn other(id: impl Into<String>, text: LocalizedText) -> Self {
        Self {
            is_other: true,
            ..Self::new(id, text)
        }
    }
}

/// A question revealed when a given option of its parent is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalChild {
    pub option_id: String,
    pub child_question_id: QuestionId,
}

impl ConditionalChild {
    pub fn new(option_id: impl Into<String>, child_question_id: QuestionId) -> Self {
        Self {
            option_id: option_id.into(),
            child_question_id,
        }
    }
}

/// Type-specific answer limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<ClockTime>,
}

impl QuestionConstraints {
    pub fn text(max_length: u32) -> Self {
        Self {
            max_length: Some(max_length),
            ..Self::default()
        }
    }

    pub fn range(min_value: i64, max_value: i64) -> Self {
        Self {
            min_value: Some(min_value),
            max_value: Some(max_value),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), QuestionError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if max < min {
                return Err(QuestionError::LengthBounds { min, max });
            }
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(QuestionError::ValueBounds { min, max });
            }
        }
        if let (Some(min), Some(max)) = (self.min_time, self.max_time) {
            if max.is_earlier_in_night_than(&min) {
                return Err(QuestionError::TimeBounds { min, max });
            }
        }
        Ok(())
    }
}

/// Errors raised by question invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    BlankText,

    #[error("max length {max} is smaller than min length {min}")]
    LengthBounds { min: u32, max: u32 },

    #[error("min value {min} is greater than max value {max}")]
    ValueBounds { min: i64, max: i64 },

    #[error("earliest time {min} is later than latest time {max}")]
    TimeBounds { min: ClockTime, max: ClockTime },

    #[error("choice questions need at least one option")]
    MissingOptions,

    #[error("option ids cannot be empty")]
    BlankOptionId,

    #[error("option id '{0}' is used more than once")]
    DuplicateOption(String),

    #[error("question has no option '{0}'")]
    UnknownOption(String),

    #[error("a question cannot be its own conditional child")]
    SelfReference,

    #[error("question {0} is locked")]
    Locked(QuestionId),

    #[error("question {child} is not a conditional child under option '{option_id}'")]
    NotAChild { option_id: String, child: QuestionId },

    #[error("new order for option '{option_id}' must list all {expected} children exactly once")]
    IncompleteOrder { option_id: String, expected: usize },

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl QuestionError {
    /// The error as shown to authors, in Danish and English.
    pub fn bilingual(&self) -> BilingualMessage {
        let da = match self {
            QuestionError::BlankText => "Spørgsmålsteksten må ikke være tom.".to_string(),
            QuestionError::LengthBounds { min, max } => format!(
                "Maksimal længde ({}) må ikke være mindre end minimal længde ({}).",
                max, min
            ),
            QuestionError::ValueBounds { min, max } => format!(
                "Minimumsværdien ({}) må ikke være større end maksimumsværdien ({}).",
                min, max
            ),
            QuestionError::TimeBounds { min, max } => format!(
                "Tidligste tidspunkt ({}) må ikke være senere end seneste tidspunkt ({}).",
                min, max
            ),
            QuestionError::MissingOptions => {
                "Et valgspørgsmål skal have mindst én svarmulighed.".to_string()
            }
            QuestionError::BlankOptionId => "Svarmuligheder skal have et id.".to_string(),
            QuestionError::DuplicateOption(id) => {
                format!("Svarmuligheden '{}' findes mere end én gang.", id)
            }
            QuestionError::UnknownOption(id) => {
                format!("Svarmuligheden '{}' findes ikke på spørgsmålet.", id)
            }
            QuestionError::SelfReference => {
                "Et spørgsmål kan ikke være betinget af sig selv.".to_string()
            }
            QuestionError::Locked(_) => {
                "Spørgsmålet er låst og kan ikke ændres på denne måde.".to_string()
            }
            QuestionError::NotAChild { option_id, child } => format!(
                "Spørgsmål {} er ikke et betinget spørgsmål under '{}'.",
                child, option_id
            ),
            QuestionError::IncompleteOrder { option_id, expected } => format!(
                "Den nye rækkefølge skal indeholde alle {} betingede spørgsmål under '{}' præcis én gang.",
                expected, option_id
            ),
            QuestionError::Order(err) => format!("Ugyldig rækkefølge: {}", err),
        };
        BilingualMessage::new(da, self.to_string())
    }
}

/// Input for creating a question. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub questionnaire_id: QuestionnaireId,
    pub order: u32,
    pub question_type: QuestionType,
    pub text: LocalizedText,
    pub role: Option<QuestionRole>,
    pub constraints: QuestionConstraints,
    pub options: Vec<QuestionOption>,
    pub locked: bool,
}

impl NewQuestion {
    pub fn new(
        questionnaire_id: QuestionnaireId,
        order: u32,
        question_type: QuestionType,
        text: LocalizedText,
    ) -> Self {
        Self {
            questionnaire_id,
            order,
            question_type,
            text,
            role: None,
            constraints: QuestionConstraints::default(),
            options: Vec::new(),
            locked: false,
        }
    }

    pub fn with_role(mut self, role: QuestionRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_constraints(mut self, constraints: QuestionConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// Field changes requested by an author. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub text: Option<LocalizedText>,
    pub question_type: Option<QuestionType>,
    pub order: Option<u32>,
    /// `Some(None)` clears the role.
    pub role: Option<Option<QuestionRole>>,
    pub constraints: Option<QuestionConstraints>,
    pub options: Option<Vec<QuestionOption>>,
}

/// A diary question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    questionnaire_id: QuestionnaireId,
    order: u32,
    question_type: QuestionType,
    text: LocalizedText,
    role: Option<QuestionRole>,
    constraints: QuestionConstraints,
    options: Vec<QuestionOption>,
    conditional_children: Vec<ConditionalChild>,
    locked: bool,
    deleted_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Question {
    /// Creates a validated question.
    pub fn create(id: QuestionId, new: NewQuestion) -> Result<Self, QuestionError> {
        let now = Timestamp::now();
        let question = Self {
            id,
            questionnaire_id: new.questionnaire_id,
            order: new.order,
            question_type: new.question_type,
            text: new.text,
            role: new.role,
            constraints: new.constraints,
            options: new.options,
            conditional_children: Vec::new(),
            locked: new.locked,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        question.validate()?;
        Ok(question)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn questionnaire_id(&self) -> QuestionnaireId {
        self.questionnaire_id
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn text(&self) -> &LocalizedText {
        &self.text
    }

    pub fn role(&self) -> Option<QuestionRole> {
        self.role
    }

    pub fn constraints(&self) -> &QuestionConstraints {
        &self.constraints
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.option(option_id).is_some()
    }

    pub fn conditional_children(&self) -> &[ConditionalChild] {
        &self.conditional_children
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn deleted_at(&self) -> Option<Timestamp> {
        self.deleted_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Child ids revealed by `option_id`, in presentation order.
    pub fn children_for_option<'a>(
        &'a self,
        option_id: &'a str,
    ) -> impl Iterator<Item = QuestionId> + 'a {
        self.conditional_children
            .iter()
            .filter(move |c| c.option_id == option_id)
            .map(|c| c.child_question_id)
    }

    /// Orders every conditional child should carry under this parent.
    ///
    /// Children are numbered from 1 within each triggering option.
    pub fn child_orders(&self) -> Result<Vec<(QuestionId, u32)>, OrderError> {
        let mut per_option: Vec<(&str, u32)> = Vec::new();
        let mut allocated = Vec::with_capacity(self.conditional_children.len());
        for child in &self.conditional_children {
            let index = match per_option
                .iter_mut()
                .find(|(option, _)| *option == child.option_id)
            {
                Some((_, count)) => {
                    *count += 1;
                    *count
                }
                None => {
                    per_option.push((child.option_id.as_str(), 1));
                    1
                }
            };
            allocated.push((
                child.child_question_id,
                child_order(self.order, index)?,
            ));
        }
        Ok(allocated)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Invariants
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks that type-specific constraints are consistent.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.text.is_blank() {
            return Err(QuestionError::BlankText);
        }
        self.constraints.check()?;

        if self.question_type.is_choice() && self.options.is_empty() {
            return Err(QuestionError::MissingOptions);
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if option.id.trim().is_empty() {
                return Err(QuestionError::BlankOptionId);
            }
            if !seen.insert(option.id.as_str()) {
                return Err(QuestionError::DuplicateOption(option.id.clone()));
            }
        }
        if let Some(child) = self
            .conditional_children
            .iter()
            .find(|c| !seen.contains(c.option_id.as_str()))
        {
            return Err(QuestionError::UnknownOption(child.option_id.clone()));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies an author's patch.
    ///
    /// Locked questions accept new prompt text and option labels only.
    /// The question is left untouched if the patched result is invalid.
    pub fn update_from(&mut self, patch: QuestionPatch) -> Result<(), QuestionError> {
        if self.locked && self.patch_touches_structure(&patch) {
            return Err(QuestionError::Locked(self.id));
        }

        let mut next = self.clone();
        if let Some(text) = patch.text {
            next.text = text;
        }
        if let Some(question_type) = patch.question_type {
            next.question_type = question_type;
        }
        if let Some(order) = patch.order {
            next.order = order;
        }
        if let Some(role) = patch.role {
            next.role = role;
        }
        if let Some(constraints) = patch.constraints {
            next.constraints = constraints;
        }
        if let Some(options) = patch.options {
            next.options = options;
        }
        next.validate()?;
        next.updated_at = Timestamp::now();

        *self = next;
        Ok(())
    }

    fn patch_touches_structure(&self, patch: &QuestionPatch) -> bool {
        let type_changes = patch
            .question_type
            .is_some_and(|t| t != self.question_type);
        let order_changes = patch.order.is_some_and(|o| o != self.order);
        let role_changes = patch.role.is_some_and(|r| r != self.role);
        let constraints_change = patch
            .constraints
            .as_ref()
            .is_some_and(|c| c != &self.constraints);
        let option_ids_change = patch.options.as_ref().is_some_and(|options| {
            options.len() != self.options.len()
                || options
                    .iter()
                    .zip(&self.options)
                    .any(|(new, old)| new.id != old.id || new.is_other != old.is_other)
        });
        type_changes || order_changes || role_changes || constraints_change || option_ids_change
    }

    /// Attaches `child_id` under `option_id`.
    ///
    /// Returns `false` if the pair was already present.
    pub fn add_conditional_child(
        &mut self,
        option_id: &str,
        child_id: QuestionId,
    ) -> Result<bool, QuestionError> {
        if child_id == self.id {
            return Err(QuestionError::SelfReference);
        }
        if !self.has_option(option_id) {
            return Err(QuestionError::UnknownOption(option_id.to_string()));
        }
        let pair = ConditionalChild::new(option_id, child_id);
        if self.conditional_children.contains(&pair) {
            return Ok(false);
        }
        self.conditional_children.push(pair);
        self.updated_at = Timestamp::now();
        Ok(true)
    }

    /// Detaches `child_id` from `option_id`. Returns `false` if it was not attached.
    pub fn remove_conditional_child(&mut self, option_id: &str, child_id: QuestionId) -> bool {
        let before = self.conditional_children.len();
        self.conditional_children
            .retain(|c| !(c.option_id == option_id && c.child_question_id == child_id));
        let removed = self.conditional_children.len() != before;
        if removed {
            self.updated_at = Timestamp::now();
        }
        removed
    }

    /// Reorders the children revealed by `option_id`.
    ///
    /// `ordered` must be a permutation of the current children under that
    /// option. Children of other options keep their positions.
    pub fn update_conditional_children_order(
        &mut self,
        option_id: &str,
        ordered: &[QuestionId],
    ) -> Result<(), QuestionError> {
        let current: Vec<QuestionId> = self.children_for_option(option_id).collect();

        if let Some(stranger) = ordered.iter().find(|id| !current.contains(id)) {
            return Err(QuestionError::NotAChild {
                option_id: option_id.to_string(),
                child: *stranger,
            });
        }
        let distinct: HashSet<_> = ordered.iter().collect();
        if ordered.len() != current.len() || distinct.len() != current.len() {
            return Err(QuestionError::IncompleteOrder {
                option_id: option_id.to_string(),
                expected: current.len(),
            });
        }

        let mut replacement = ordered.iter();
        for child in self
            .conditional_children
            .iter_mut()
            .filter(|c| c.option_id == option_id)
        {
            if let Some(id) = replacement.next() {
                child.child_question_id = *id;
            }
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Sets an order derived from the parent's allocation.
    ///
    /// Applies to locked children too, since their order follows the parent.
    pub fn assign_order(&mut self, order: u32) {
        if self.order != order {
            self.order = order;
            self.updated_at = Timestamp::now();
        }
    }

    /// Marks the question as deleted. Deleting twice keeps the first timestamp.
    pub fn soft_delete(&mut self, at: Timestamp) -> Result<(), QuestionError> {
        if self.locked {
            return Err(QuestionError::Locked(self.id));
        }
        if self.deleted_at.is_none() {
            self.deleted_at = Some(at);
            self.updated_at = at;
        }
        Ok(())
    }
}
