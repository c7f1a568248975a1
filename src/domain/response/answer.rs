//! Raw answers and the parser that types them.
//!
//! Clients send whatever their widget produces: numbers, strings, a choice
//! object carrying an option id, or a list of those for multi-choice. The
//! parser turns a raw value into the shape a question type expects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{BilingualMessage, ClockTime, QuestionId};
use crate::domain::questionnaire::QuestionType;

/// A choice carrying the selected option id and optional free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceAnswer {
    pub option_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_text: Option<String>,
}

/// An answer exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Choice(ChoiceAnswer),
    Multiple(Vec<AnswerValue>),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    pub fn choice(option_id: impl Into<String>) -> Self {
        AnswerValue::Choice(ChoiceAnswer {
            option_id: option_id.into(),
            other_text: None,
        })
    }

    /// The option id this answer selects, if it selects exactly one.
    ///
    /// Accepts a bare id string or a choice object.
    pub fn option_id(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s.trim()).filter(|s| !s.is_empty()),
            AnswerValue::Choice(c) => Some(c.option_id.trim()).filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    /// Every option id selected, for single or multiple choice.
    pub fn option_ids(&self) -> Result<Vec<&str>, FormatError> {
        match self {
            AnswerValue::Multiple(items) => items
                .iter()
                .map(|item| item.option_id().ok_or_else(|| FormatError::not_an_option(item)))
                .collect(),
            single => single
                .option_id()
                .map(|id| vec![id])
                .ok_or_else(|| FormatError::not_an_option(single)),
        }
    }

    /// The answer as a whole number.
    ///
    /// Numeric strings and integral decimals are accepted.
    pub fn as_integer(&self) -> Result<i64, FormatError> {
        match self {
            AnswerValue::Integer(n) => Ok(*n),
            AnswerValue::Decimal(d)
                if d.is_finite() && d.fract() == 0.0 && d.abs() < i64::MAX as f64 =>
            {
                Ok(*d as i64)
            }
            AnswerValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| FormatError::not_an_integer(self)),
            other => Err(FormatError::not_an_integer(other)),
        }
    }

    /// The answer as an `HH:mm` clock time.
    pub fn as_time(&self) -> Result<ClockTime, FormatError> {
        match self {
            AnswerValue::Text(s) => ClockTime::parse(s).map_err(|_| FormatError::not_a_time(self)),
            other => Err(FormatError::not_a_time(other)),
        }
    }

    /// The answer as free text.
    pub fn as_text(&self) -> Result<&str, FormatError> {
        match self {
            AnswerValue::Text(s) => Ok(s),
            AnswerValue::Choice(c) => c.other_text.as_deref().ok_or(FormatError::NotText),
            _ => Err(FormatError::NotText),
        }
    }

    /// Types the answer for a question of `question_type`.
    pub fn parse_for(&self, question_type: QuestionType) -> Result<ParsedAnswer, FormatError> {
        match question_type {
            QuestionType::Text => self.as_text().map(|s| ParsedAnswer::Text(s.to_string())),
            QuestionType::Numeric | QuestionType::Slider => {
                self.as_integer().map(ParsedAnswer::Integer)
            }
            QuestionType::TimePicker => self.as_time().map(ParsedAnswer::Time),
            QuestionType::MultipleChoice => self
                .option_id()
                .map(|id| ParsedAnswer::Option(id.to_string()))
                .ok_or_else(|| FormatError::not_an_option(self)),
            QuestionType::MultipleChoiceMultiple => self.option_ids().map(|ids| {
                ParsedAnswer::Options(ids.into_iter().map(str::to_string).collect())
            }),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Integer(n) => write!(f, "{}", n),
            AnswerValue::Decimal(d) => write!(f, "{}", d),
            AnswerValue::Text(s) => f.write_str(s.trim()),
            AnswerValue::Choice(c) => f.write_str(&c.option_id),
            AnswerValue::Multiple(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Integer(n)
    }
}

impl From<i32> for AnswerValue {
    fn from(n: i32) -> Self {
        AnswerValue::Integer(i64::from(n))
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

/// A raw answer typed for its question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAnswer {
    Text(String),
    Integer(i64),
    Time(ClockTime),
    Option(String),
    Options(Vec<String>),
}

/// A raw answer that cannot be read as its expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    #[error("'{0}' is not a time in HH:mm format")]
    NotATime(String),

    #[error("'{0}' does not select an option")]
    NotAnOption(String),

    #[error("answer is not text")]
    NotText,
}

impl FormatError {
    fn not_an_integer(value: &AnswerValue) -> Self {
        FormatError::NotAnInteger(value.to_string())
    }

    fn not_a_time(value: &AnswerValue) -> Self {
        FormatError::NotATime(value.to_string())
    }

    fn not_an_option(value: &AnswerValue) -> Self {
        FormatError::NotAnOption(value.to_string())
    }

    pub fn bilingual(&self) -> BilingualMessage {
        let da = match self {
            FormatError::NotAnInteger(raw) => {
                format!("'{}' er ikke et helt tal. Indtast venligst et helt tal.", raw)
            }
            FormatError::NotATime(raw) => {
                format!("'{}' er ikke et gyldigt tidspunkt. Brug formatet TT:MM.", raw)
            }
            FormatError::NotAnOption(raw) => format!("'{}' er ikke en gyldig svarmulighed.", raw),
            FormatError::NotText => "Svaret skal være tekst.".to_string(),
        };
        BilingualMessage::new(da, self.to_string())
    }
}

/// Answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.0.contains_key(id)
    }

    pub fn insert(&mut self, id: QuestionId, value: impl Into<AnswerValue>) {
        self.0.insert(id, value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, id: QuestionId, value: impl Into<AnswerValue>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.0.iter()
    }
}

impl FromIterator<(QuestionId, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> AnswerValue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn deserializes_every_client_shape() {
        assert_eq!(raw(json!(5)), AnswerValue::Integer(5));
        assert_eq!(raw(json!(2.5)), AnswerValue::Decimal(2.5));
        assert_eq!(raw(json!("22:00")), AnswerValue::text("22:00"));
        assert_eq!(raw(json!({"optionId": "wake_no"})), AnswerValue::choice("wake_no"));
        assert!(matches!(raw(json!(["a", {"optionId": "b"}])), AnswerValue::Multiple(v) if v.len() == 2));
    }

    #[test]
    fn option_id_accepts_bare_id_or_choice_object() {
        assert_eq!(AnswerValue::text(" wake_yes ").option_id(), Some("wake_yes"));
        let other = raw(json!({"optionId": "med_other", "otherText": "Melatonin"}));
        assert_eq!(other.option_id(), Some("med_other"));
        assert_eq!(other.as_text(), Ok("Melatonin"));
        assert_eq!(AnswerValue::Integer(3).option_id(), None);
        assert_eq!(AnswerValue::text("  ").option_id(), None);
    }

    #[test]
    fn option_ids_reads_lists() {
        let multi = raw(json!(["coffee", {"optionId": "alcohol"}]));
        assert_eq!(multi.option_ids().unwrap(), vec!["coffee", "alcohol"]);
        assert!(raw(json!(["coffee", 4])).option_ids().is_err());
    }

    #[test]
    fn integers_parse_leniently_about_whitespace_only() {
        assert_eq!(AnswerValue::text(" 15 ").as_integer(), Ok(15));
        assert_eq!(AnswerValue::Decimal(10.0).as_integer(), Ok(10));
        assert_eq!(
            AnswerValue::Decimal(10.5).as_integer(),
            Err(FormatError::NotAnInteger("10.5".to_string()))
        );
        assert_eq!(
            AnswerValue::text("ti").as_integer(),
            Err(FormatError::NotAnInteger("ti".to_string()))
        );
        assert!(AnswerValue::text("1e3").as_integer().is_err());
    }

    #[test]
    fn times_parse_strictly() {
        assert_eq!(
            AnswerValue::text(" 07:05").as_time().unwrap().to_string(),
            "07:05"
        );
        assert!(AnswerValue::text("7:05").as_time().is_err());
        assert!(AnswerValue::text("25:00").as_time().is_err());
        assert!(AnswerValue::Integer(700).as_time().is_err());
    }

    #[test]
    fn parse_for_dispatches_on_question_type() {
        assert_eq!(
            AnswerValue::text("wake_no").parse_for(QuestionType::MultipleChoice),
            Ok(ParsedAnswer::Option("wake_no".to_string()))
        );
        assert_eq!(
            AnswerValue::Integer(4).parse_for(QuestionType::Slider),
            Ok(ParsedAnswer::Integer(4))
        );
        assert!(matches!(
            AnswerValue::text("22:30").parse_for(QuestionType::TimePicker),
            Ok(ParsedAnswer::Time(_))
        ));
        assert_eq!(
            AnswerValue::Integer(4).parse_for(QuestionType::Text),
            Err(FormatError::NotText)
        );
    }

    #[test]
    fn answer_set_serializes_as_object_keyed_by_id() {
        let id = QuestionId::new();
        let set = AnswerSet::new().with(id, "22:00");
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json[id.to_string()], "22:00");

        let back: AnswerSet = serde_json::from_value(json).unwrap();
        assert_eq!(back.get(&id), Some(&AnswerValue::text("22:00")));
    }

    #[test]
    fn format_error_is_bilingual() {
        let msg = FormatError::NotATime("7.30".to_string()).bilingual();
        assert!(msg.da.contains("TT:MM"));
        assert!(msg.en.contains("HH:mm"));
    }
}
