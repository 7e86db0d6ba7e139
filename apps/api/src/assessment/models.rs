use serde::{Deserialize, Serialize};

use crate::assessment::id_map::CompetencyIdMap;
use crate::selection::selector::SkillSelectionResult;
use crate::taxonomy::{EntityId, TaxonomyCategory};

pub const DEFAULT_QUESTION_COUNT: usize = 3;
pub const MAX_QUESTION_COUNT: usize = 10;

/// Selection-shaped input to composition. Identifiers may be missing after human edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDraft {
    #[serde(default)]
    pub position_name: Option<String>,
    #[serde(default)]
    pub categories: Vec<TaxonomyCategory>,
}

impl From<&SkillSelectionResult> for SelectionDraft {
    fn from(result: &SkillSelectionResult) -> Self {
        SelectionDraft {
            position_name: Some(result.position_name.clone()),
            categories: result.categories.iter().map(Into::into).collect(),
        }
    }
}

/// Knobs passed through to the prompt. The decoder never enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionOptions {
    pub question_count: usize,
}

impl Default for CompositionOptions {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

impl CompositionOptions {
    pub fn with_question_count(requested: Option<usize>) -> Self {
        Self {
            question_count: requested
                .unwrap_or(DEFAULT_QUESTION_COUNT)
                .clamp(1, MAX_QUESTION_COUNT),
        }
    }
}

/// A competency named by the model, with identity if it could be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyRef {
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(rename = "skillId")]
    pub skill_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub context: String,
    pub question: String,
    pub competencies_assessed: Vec<CompetencyRef>,
}

/// Which decoder produced the assessment. Traceability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoderTier {
    StructuredSections,
    EmbeddedJson,
    PlainTextSalvage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAssessment {
    pub context: String,
    pub questions: Vec<AssessmentQuestion>,
    /// Lower-cased name → identifiers, for caller-side debugging.
    pub competency_id_map: CompetencyIdMap,
    pub decoded_by: DecoderTier,
}
