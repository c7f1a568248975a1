//! Response domain module.
//!
//! Submitted diaries, the parser that types raw answers, and the derivation
//! of sleep parameters from a morning diary.

mod answer;
#[allow(clippy::module_inception)]
mod response;
mod sleep;

pub use answer::{AnswerSet, AnswerValue, ChoiceAnswer, FormatError, ParsedAnswer};
pub use response::Response;
pub use sleep::{
    ColorCode, SleepCalculationError, SleepCalculator, SleepParameters, SleepRatings,
    LONG_SLEEP_ONSET_MINUTES, SHORT_TIME_IN_BED_MINUTES,
};
