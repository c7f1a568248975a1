//! HTTP handlers for questionnaire endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;

use super::dto::{LanguageParams, StartQuestionnaireResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::parse_param;
use crate::adapters::http::state::DiaryAppState;
use crate::application::handlers::{GetQuestionnaireQuery, StartQuestionnaireQuery};
use crate::domain::questionnaire::{Questionnaire, QuestionnaireRef, QuestionnaireType};

/// GET /api/questionnaires/:type
pub async fn get_questionnaire(
    State(state): State<DiaryAppState>,
    Path(kind): Path<String>,
) -> Result<Json<Questionnaire>, ApiError> {
    let questionnaire_type: QuestionnaireType = parse_param(&kind, "questionnaire type")?;

    let questionnaire = state
        .get_questionnaire_handler()
        .handle(GetQuestionnaireQuery { questionnaire_type })
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(questionnaire))
}

/// GET /api/questionnaires/:type/start?language=
pub async fn start_questionnaire(
    State(state): State<DiaryAppState>,
    Path(kind): Path<String>,
    Query(params): Query<LanguageParams>,
) -> Result<Json<StartQuestionnaireResponse>, ApiError> {
    let questionnaire: QuestionnaireRef = parse_param(&kind, "questionnaire")?;
    let query = StartQuestionnaireQuery {
        questionnaire,
        language: state.language(params.language),
    };

    let result = state
        .start_questionnaire_handler()
        .handle(query)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(result.into()))
}
