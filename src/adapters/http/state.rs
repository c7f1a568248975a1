//! Shared state for the diary API.

use std::sync::Arc;

use chrono_tz::Tz;

use super::error::ApiError;
use crate::application::handlers::{
    AddConditionalChildHandler, CheckTodayHandler, CreateQuestionHandler, DeleteQuestionHandler,
    GetQuestionHandler, GetQuestionnaireHandler, ListQuestionsHandler, ListResponsesHandler,
    NextQuestionHandler, QuestionnaireResolver, RecalculateSleepParametersHandler,
    RemoveConditionalChildHandler, ReorderConditionalChildrenHandler, StartQuestionnaireHandler,
    SubmitResponseHandler, UpdateQuestionHandler, ValidateAnswersHandler,
};
use crate::application::DiaryError;
use crate::domain::foundation::Language;
use crate::ports::{QuestionRepository, QuestionnaireRepository, ResponseRepository};

/// Stores and settings every endpoint builds its handler from.
#[derive(Clone)]
pub struct DiaryAppState {
    pub questionnaires: Arc<dyn QuestionnaireRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub responses: Arc<dyn ResponseRepository>,
    /// Zone the diary day is measured in.
    pub timezone: Tz,
    /// Used when a request names no language.
    pub default_language: Language,
    pub verbose_errors: bool,
}

impl DiaryAppState {
    pub fn new(
        questionnaires: Arc<dyn QuestionnaireRepository>,
        questions: Arc<dyn QuestionRepository>,
        responses: Arc<dyn ResponseRepository>,
        timezone: Tz,
    ) -> Self {
        Self {
            questionnaires,
            questions,
            responses,
            timezone,
            default_language: Language::default(),
            verbose_errors: false,
        }
    }

    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn error(&self, error: DiaryError) -> ApiError {
        ApiError::from_diary(error, self.verbose_errors)
    }

    pub fn language(&self, requested: Option<Language>) -> Language {
        requested.unwrap_or(self.default_language)
    }

    fn resolver(&self) -> QuestionnaireResolver {
        QuestionnaireResolver::new(self.questionnaires.clone())
    }

    // Questionnaires

    pub fn get_questionnaire_handler(&self) -> GetQuestionnaireHandler {
        GetQuestionnaireHandler::new(self.questionnaires.clone())
    }

    pub fn start_questionnaire_handler(&self) -> StartQuestionnaireHandler {
        StartQuestionnaireHandler::new(self.resolver(), self.questions.clone())
    }

    // Questions

    pub fn create_question_handler(&self) -> CreateQuestionHandler {
        CreateQuestionHandler::new(self.questions.clone(), self.questionnaires.clone())
    }

    pub fn update_question_handler(&self) -> UpdateQuestionHandler {
        UpdateQuestionHandler::new(self.questions.clone())
    }

    pub fn delete_question_handler(&self) -> DeleteQuestionHandler {
        DeleteQuestionHandler::new(self.questions.clone())
    }

    pub fn get_question_handler(&self) -> GetQuestionHandler {
        GetQuestionHandler::new(self.questions.clone())
    }

    pub fn list_questions_handler(&self) -> ListQuestionsHandler {
        ListQuestionsHandler::new(self.resolver(), self.questions.clone())
    }

    pub fn add_conditional_child_handler(&self) -> AddConditionalChildHandler {
        AddConditionalChildHandler::new(self.questions.clone())
    }

    pub fn remove_conditional_child_handler(&self) -> RemoveConditionalChildHandler {
        RemoveConditionalChildHandler::new(self.questions.clone())
    }

    pub fn reorder_conditional_children_handler(&self) -> ReorderConditionalChildrenHandler {
        ReorderConditionalChildrenHandler::new(self.questions.clone())
    }

    // Responses

    pub fn submit_response_handler(&self) -> SubmitResponseHandler {
        SubmitResponseHandler::new(
            self.resolver(),
            self.questions.clone(),
            self.responses.clone(),
            self.timezone,
        )
    }

    pub fn next_question_handler(&self) -> NextQuestionHandler {
        NextQuestionHandler::new(self.resolver(), self.questions.clone())
    }

    pub fn validate_answers_handler(&self) -> ValidateAnswersHandler {
        ValidateAnswersHandler::new(self.resolver(), self.questions.clone())
    }

    pub fn list_responses_handler(&self) -> ListResponsesHandler {
        ListResponsesHandler::new(self.resolver(), self.responses.clone())
    }

    pub fn check_today_handler(&self) -> CheckTodayHandler {
        CheckTodayHandler::new(self.responses.clone(), self.timezone)
    }

    pub fn recalculate_handler(&self) -> RecalculateSleepParametersHandler {
        RecalculateSleepParametersHandler::new(self.questions.clone(), self.responses.clone())
    }
}
