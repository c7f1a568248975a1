//! HTTP handlers for response endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::dto::{
    CheckTodayParams, LanguageParams, ListResponsesParams, NextQuestionRequest,
    NextQuestionResponse, ResponseDto, SleepParametersDto, SubmitResponseRequest,
    TodayStatusResponse, ValidatedAnswersResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{parse_param, DiaryUser};
use crate::adapters::http::state::DiaryAppState;
use crate::application::handlers::{
    CheckTodayQuery, ListResponsesQuery, NextQuestionQuery, RecalculateSleepParametersCommand,
    SubmitResponseCommand, ValidateAnswersCommand,
};
use crate::domain::foundation::ResponseId;
use crate::domain::questionnaire::{QuestionnaireRef, QuestionnaireType};

/// POST /api/responses - Submit today's diary
pub async fn submit_response(
    State(state): State<DiaryAppState>,
    user: DiaryUser,
    Json(req): Json<SubmitResponseRequest>,
) -> Result<(StatusCode, Json<ResponseDto>), ApiError> {
    let questionnaire: QuestionnaireRef = parse_param(&req.questionnaire_id, "questionnaire")?;
    let cmd = SubmitResponseCommand {
        user_id: user.user_id,
        questionnaire,
        answers: req.answers,
    };

    let response = state
        .submit_response_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.error(e))?;

    Ok((StatusCode::CREATED, Json(response.into())))
}

/// POST /api/responses/next?language= - Next question to show
///
/// Answers 204 No Content when the questionnaire is finished.
pub async fn next_question(
    State(state): State<DiaryAppState>,
    Query(params): Query<LanguageParams>,
    Json(req): Json<NextQuestionRequest>,
) -> Result<Response, ApiError> {
    let questionnaire: QuestionnaireRef = parse_param(&req.questionnaire_id, "questionnaire")?;
    let query = NextQuestionQuery {
        questionnaire,
        answers: req.answers,
        current_question_id: req.current_question_id,
        language: state.language(params.language),
    };

    let result = state
        .next_question_handler()
        .handle(query)
        .await
        .map_err(|e| state.error(e))?;

    Ok(match NextQuestionResponse::from_result(result) {
        Some(next) => (StatusCode::OK, Json(next)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// POST /api/responses/validate - Check answers without storing them
pub async fn validate_answers(
    State(state): State<DiaryAppState>,
    Json(req): Json<SubmitResponseRequest>,
) -> Result<Json<ValidatedAnswersResponse>, ApiError> {
    let questionnaire: QuestionnaireRef = parse_param(&req.questionnaire_id, "questionnaire")?;
    let cmd = ValidateAnswersCommand {
        questionnaire,
        answers: req.answers,
    };

    let result = state
        .validate_answers_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(ValidatedAnswersResponse {
        questionnaire_id: result.questionnaire.id,
        answers: result.answers,
    }))
}

/// GET /api/responses?questionnaireId= - The caller's diaries, newest first
pub async fn list_responses(
    State(state): State<DiaryAppState>,
    user: DiaryUser,
    Query(params): Query<ListResponsesParams>,
) -> Result<Json<Vec<ResponseDto>>, ApiError> {
    let questionnaire = params
        .questionnaire_id
        .as_deref()
        .map(|raw| parse_param::<QuestionnaireRef>(raw, "questionnaire"))
        .transpose()?;
    let query = ListResponsesQuery {
        user_id: user.user_id,
        questionnaire,
    };

    let responses = state
        .list_responses_handler()
        .handle(query)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(responses.into_iter().map(Into::into).collect()))
}

/// GET /api/responses/check-today?questionnaireType=
pub async fn check_today(
    State(state): State<DiaryAppState>,
    user: DiaryUser,
    Query(params): Query<CheckTodayParams>,
) -> Result<Json<TodayStatusResponse>, ApiError> {
    let questionnaire_type: QuestionnaireType =
        parse_param(&params.questionnaire_type, "questionnaire type")?;
    let query = CheckTodayQuery {
        user_id: user.user_id,
        questionnaire_type,
    };

    let status = state
        .check_today_handler()
        .handle(query)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(status.into()))
}

/// POST /api/responses/:id/sleep-parameters - Recompute a morning diary's parameters
pub async fn recalculate_sleep_parameters(
    State(state): State<DiaryAppState>,
    Path(id): Path<String>,
) -> Result<Json<SleepParametersDto>, ApiError> {
    let response_id: ResponseId = parse_param(&id, "response id")?;

    let params = state
        .recalculate_handler()
        .handle(RecalculateSleepParametersCommand { response_id })
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(params.into()))
}
