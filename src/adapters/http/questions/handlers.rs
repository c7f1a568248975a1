//! HTTP handlers for question authoring endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{
    ConditionalChildRequest, ConditionalChildResponse, CreateQuestionRequest,
    GetQuestionParams, ListQuestionsParams, ReorderChildrenRequest, UpdateQuestionRequest,
    UpdateQuestionResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::parse_param;
use crate::adapters::http::state::DiaryAppState;
use crate::application::handlers::{
    AddConditionalChildCommand, CreateQuestionCommand, DeleteQuestionCommand, GetQuestionQuery,
    ListQuestionsQuery, RemoveConditionalChildCommand, ReorderConditionalChildrenCommand,
    UpdateQuestionCommand,
};
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::{Question, QuestionView, QuestionnaireRef};

// ════════════════════════════════════════════════════════════════════════════
// Queries
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/questions?questionnaireId=&language=&includeDeleted=
pub async fn list_questions(
    State(state): State<DiaryAppState>,
    Query(params): Query<ListQuestionsParams>,
) -> Result<Json<Vec<QuestionView>>, ApiError> {
    let questionnaire: QuestionnaireRef = parse_param(&params.questionnaire_id, "questionnaire")?;
    let query = ListQuestionsQuery {
        questionnaire,
        language: state.language(params.language),
        include_deleted: params.include_deleted,
    };

    let views = state
        .list_questions_handler()
        .handle(query)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(views))
}

/// GET /api/questions/:id?language=&includeDeleted=
pub async fn get_question(
    State(state): State<DiaryAppState>,
    Path(id): Path<String>,
    Query(params): Query<GetQuestionParams>,
) -> Result<Json<QuestionView>, ApiError> {
    let question_id: QuestionId = parse_param(&id, "question id")?;
    let query = GetQuestionQuery {
        question_id,
        language: state.language(params.language),
        include_deleted: params.include_deleted,
    };

    let view = state
        .get_question_handler()
        .handle(query)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(view))
}

// ════════════════════════════════════════════════════════════════════════════
// Commands
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/questions
pub async fn create_question(
    State(state): State<DiaryAppState>,
    Json(req): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let cmd = CreateQuestionCommand {
        question: req.into(),
    };

    let question = state
        .create_question_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.error(e))?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// PUT /api/questions/:id
pub async fn update_question(
    State(state): State<DiaryAppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateQuestionRequest>,
) -> Result<Json<UpdateQuestionResponse>, ApiError> {
    let question_id: QuestionId = parse_param(&id, "question id")?;
    let cmd = UpdateQuestionCommand {
        question_id,
        patch: req.into(),
    };

    let result = state
        .update_question_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(UpdateQuestionResponse {
        question: result.question,
        children_reordered: result.children_reordered,
    }))
}

/// DELETE /api/questions/:id
pub async fn delete_question(
    State(state): State<DiaryAppState>,
    Path(id): Path<String>,
) -> Result<Json<Question>, ApiError> {
    let question_id: QuestionId = parse_param(&id, "question id")?;

    let question = state
        .delete_question_handler()
        .handle(DeleteQuestionCommand { question_id })
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(question))
}

/// POST /api/questions/:id/conditional
pub async fn add_conditional_child(
    State(state): State<DiaryAppState>,
    Path(id): Path<String>,
    Json(req): Json<ConditionalChildRequest>,
) -> Result<Json<ConditionalChildResponse>, ApiError> {
    let parent_id: QuestionId = parse_param(&id, "question id")?;
    let cmd = AddConditionalChildCommand {
        parent_id,
        option_id: req.option_id,
        child_id: req.child_question_id,
    };

    let result = state
        .add_conditional_child_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(ConditionalChildResponse {
        parent: result.parent,
        changed: result.added,
        children_reordered: result.children_reordered,
    }))
}

/// DELETE /api/questions/:id/conditional
pub async fn remove_conditional_child(
    State(state): State<DiaryAppState>,
    Path(id): Path<String>,
    Json(req): Json<ConditionalChildRequest>,
) -> Result<Json<ConditionalChildResponse>, ApiError> {
    let parent_id: QuestionId = parse_param(&id, "question id")?;
    let cmd = RemoveConditionalChildCommand {
        parent_id,
        option_id: req.option_id,
        child_id: req.child_question_id,
    };

    let result = state
        .remove_conditional_child_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(ConditionalChildResponse {
        parent: result.parent,
        changed: result.removed,
        children_reordered: 0,
    }))
}

/// PUT /api/questions/:id/conditional/order
pub async fn reorder_conditional_children(
    State(state): State<DiaryAppState>,
    Path(id): Path<String>,
    Json(req): Json<ReorderChildrenRequest>,
) -> Result<Json<ConditionalChildResponse>, ApiError> {
    let parent_id: QuestionId = parse_param(&id, "question id")?;
    let cmd = ReorderConditionalChildrenCommand {
        parent_id,
        option_id: req.option_id,
        ordered_child_ids: req.child_question_ids,
    };

    let result = state
        .reorder_conditional_children_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.error(e))?;

    Ok(Json(ConditionalChildResponse {
        parent: result.parent,
        changed: true,
        children_reordered: result.children_reordered,
    }))
}
