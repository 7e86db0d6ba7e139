//! Axum route handlers for the Skill Selection API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::selection::selector::{select_skills, SkillSelectionResult};
use crate::state::AppState;
use crate::taxonomy::{Snapshot, TaxonomyCategory};

#[derive(Debug, Deserialize)]
pub struct SelectSkillsRequest {
    pub job_description: String,
    pub taxonomy: Vec<TaxonomyCategory>,
}

/// POST /api/v1/skills/select
///
/// Indexes the supplied taxonomy and returns the competencies the job needs.
pub async fn handle_select_skills(
    State(state): State<AppState>,
    Json(request): Json<SelectSkillsRequest>,
) -> Result<Json<SkillSelectionResult>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let snapshot = Snapshot::build(&request.taxonomy);
    if snapshot.competency_count() == 0 {
        return Err(AppError::Validation(
            "taxonomy must contain at least one competency".to_string(),
        ));
    }

    let result = select_skills(state.generator.as_ref(), &request.job_description, &snapshot).await?;

    Ok(Json(result))
}
