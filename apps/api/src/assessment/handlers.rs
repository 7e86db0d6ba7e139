//! Axum route handlers for the Assessment Composition API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::assessment::composer::compose_assessment;
use crate::assessment::models::{CompositionOptions, GeneratedAssessment, SelectionDraft};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ComposeAssessmentRequest {
    pub job_description: String,
    pub selection: SelectionDraft,
    #[serde(default)]
    pub question_count: Option<usize>,
}

/// POST /api/v1/assessments/compose
///
/// Authors an assessment over a (possibly hand-edited) selection. Calling it again with
/// the same body is the "regenerate" action.
pub async fn handle_compose_assessment(
    State(state): State<AppState>,
    Json(request): Json<ComposeAssessmentRequest>,
) -> Result<Json<GeneratedAssessment>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    if request.selection.categories.is_empty() {
        return Err(AppError::Validation(
            "selection must contain at least one category".to_string(),
        ));
    }

    let options = CompositionOptions::with_question_count(request.question_count);
    let assessment = compose_assessment(
        state.generator.as_ref(),
        &request.job_description,
        &request.selection,
        options,
    )
    .await?;

    Ok(Json(assessment))
}
