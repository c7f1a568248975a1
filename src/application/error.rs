//! Diary error - the classified failure every handler returns.

use crate::domain::flow::{NavigationError, RuleViolation};
use crate::domain::foundation::{
    BilingualMessage, DomainError, ErrorCode, QuestionId, ResponseId, ValidationError,
};
use crate::domain::questionnaire::{OrderError, QuestionError, QuestionnaireType};
use crate::domain::response::{FormatError, SleepCalculationError};

/// Errors surfaced by diary handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiaryError {
    /// Input is inconsistent; the caller can correct it.
    Validation(BilingualMessage),
    /// Structural edit of a seed-protected question.
    Locked(QuestionId),
    /// The user already submitted this questionnaire today.
    DuplicateResponse(QuestionnaireType),
    /// Another active question already has this order.
    DuplicateOrder(u32),
    QuestionNotFound(QuestionId),
    /// Unknown questionnaire, named as the caller named it.
    QuestionnaireNotFound(String),
    ResponseNotFound(ResponseId),
    /// Store or other unclassified failure.
    Infrastructure(String),
}

impl DiaryError {
    pub fn validation(da: impl Into<String>, en: impl Into<String>) -> Self {
        DiaryError::Validation(BilingualMessage::new(da, en))
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DiaryError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DiaryError::Validation(_) => ErrorCode::ValidationFailed,
            DiaryError::Locked(_) => ErrorCode::QuestionLocked,
            DiaryError::DuplicateResponse(_) => ErrorCode::DuplicateResponse,
            DiaryError::DuplicateOrder(_) => ErrorCode::DuplicateOrder,
            DiaryError::QuestionNotFound(_) => ErrorCode::QuestionNotFound,
            DiaryError::QuestionnaireNotFound(_) => ErrorCode::QuestionnaireNotFound,
            DiaryError::ResponseNotFound(_) => ErrorCode::ResponseNotFound,
            DiaryError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DiaryError::Validation(msg) => msg.en.clone(),
            DiaryError::Locked(id) => format!("Question {} is locked", id),
            DiaryError::DuplicateResponse(kind) => {
                format!("A {} response has already been submitted today", kind)
            }
            DiaryError::DuplicateOrder(order) => {
                format!("Another question already uses order {}", order)
            }
            DiaryError::QuestionNotFound(id) => format!("Question not found: {}", id),
            DiaryError::QuestionnaireNotFound(name) => {
                format!("Questionnaire not found: {}", name)
            }
            DiaryError::ResponseNotFound(id) => format!("Response not found: {}", id),
            DiaryError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Danish and English text for errors a citizen or author can act on.
    pub fn bilingual(&self) -> Option<BilingualMessage> {
        match self {
            DiaryError::Validation(msg) => Some(msg.clone()),
            DiaryError::Locked(_) => Some(BilingualMessage::new(
                "Spørgsmålet er låst og kan ikke ændres på denne måde.",
                self.message(),
            )),
            DiaryError::DuplicateResponse(kind) => Some(BilingualMessage::new(
                format!("Du har allerede udfyldt {} i dag.", danish_name(*kind)),
                self.message(),
            )),
            DiaryError::DuplicateOrder(order) => Some(BilingualMessage::new(
                format!("Et andet spørgsmål har allerede rækkefølgen {}.", order),
                self.message(),
            )),
            _ => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, DiaryError::Infrastructure(_))
    }
}

fn danish_name(kind: QuestionnaireType) -> &'static str {
    match kind {
        QuestionnaireType::Morning => "morgenskemaet",
        QuestionnaireType::Evening => "aftenskemaet",
    }
}

impl std::fmt::Display for DiaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DiaryError {}

impl From<DomainError> for DiaryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => {
                DiaryError::Validation(BilingualMessage::new(err.message.clone(), err.message))
            }
            _ => DiaryError::Infrastructure(err.to_string()),
        }
    }
}

impl From<QuestionError> for DiaryError {
    fn from(err: QuestionError) -> Self {
        match err {
            QuestionError::Locked(id) => DiaryError::Locked(id),
            other => DiaryError::Validation(other.bilingual()),
        }
    }
}

impl From<OrderError> for DiaryError {
    fn from(err: OrderError) -> Self {
        QuestionError::Order(err).into()
    }
}

impl From<FormatError> for DiaryError {
    fn from(err: FormatError) -> Self {
        DiaryError::Validation(err.bilingual())
    }
}

impl From<RuleViolation> for DiaryError {
    fn from(err: RuleViolation) -> Self {
        DiaryError::Validation(err.message)
    }
}

impl From<SleepCalculationError> for DiaryError {
    fn from(err: SleepCalculationError) -> Self {
        DiaryError::Validation(err.bilingual())
    }
}

impl From<NavigationError> for DiaryError {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::UnknownCurrentQuestion(id) => DiaryError::QuestionNotFound(id),
        }
    }
}

impl From<ValidationError> for DiaryError {
    fn from(err: ValidationError) -> Self {
        let text = err.to_string();
        DiaryError::Validation(BilingualMessage::new(text.clone(), text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_question_error_stays_locked() {
        let id = QuestionId::new();
        let err: DiaryError = QuestionError::Locked(id).into();
        assert_eq!(err, DiaryError::Locked(id));
        assert_eq!(err.code(), ErrorCode::QuestionLocked);
    }

    #[test]
    fn format_errors_surface_as_validation() {
        let err: DiaryError = FormatError::NotATime("25:99".to_string()).into();
        assert!(matches!(err, DiaryError::Validation(_)));
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn store_failures_are_internal() {
        let err: DiaryError = DomainError::database("connection reset").into();
        assert!(err.is_internal());
        assert!(err.bilingual().is_none());
    }

    #[test]
    fn unknown_current_question_is_not_found() {
        let id = QuestionId::new();
        let err: DiaryError = NavigationError::UnknownCurrentQuestion(id).into();
        assert_eq!(err, DiaryError::QuestionNotFound(id));
    }

    #[test]
    fn duplicate_response_message_is_bilingual() {
        let err = DiaryError::DuplicateResponse(QuestionnaireType::Morning);
        let msg = err.bilingual().unwrap();
        assert!(msg.da.contains("morgenskemaet"));
        assert!(msg.en.contains("morning"));
    }
}
