//! Assessment Composition: turns a job description and a selected taxonomy subset into
//! an ordered list of questions tagged with competency identifiers.
//!
//! Flow: re-index draft → build CompetencyIdMap → one generation call → decoder chain.
//!
//! The draft may have been edited by a reviewer since selection, so identifiers are
//! re-derived here rather than trusted. Only the service call can fail.

use tracing::info;

use crate::assessment::decoder::reconcile_assessment;
use crate::assessment::id_map::CompetencyIdMap;
use crate::assessment::models::{CompositionOptions, GeneratedAssessment, SelectionDraft};
use crate::assessment::prompts::{ASSESSMENT_PROMPT_TEMPLATE, ASSESSMENT_SYSTEM};
use crate::errors::PipelineError;
use crate::llm_client::prompts::VERBATIM_NAMES_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::selection::selector::UNTITLED_POSITION;
use crate::taxonomy::Snapshot;

/// Runs one composition (or regeneration) for a job description and selection draft.
pub async fn compose_assessment(
    generator: &dyn TextGenerator,
    job_description: &str,
    draft: &SelectionDraft,
    options: CompositionOptions,
) -> Result<GeneratedAssessment, PipelineError> {
    let snapshot = Snapshot::build(&draft.categories);
    let id_map = CompetencyIdMap::from_snapshot(&snapshot);
    info!(
        "Composing {} questions over {} competencies",
        options.question_count,
        id_map.len()
    );

    let position_name = draft
        .position_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNTITLED_POSITION);

    let prompt = ASSESSMENT_PROMPT_TEMPLATE
        .replace("{names_instruction}", VERBATIM_NAMES_INSTRUCTION)
        .replace("{position_name}", position_name)
        .replace("{question_count}", &options.question_count.to_string())
        .replace("{taxonomy_json}", &snapshot.to_prompt_json())
        .replace("{jd_text}", job_description);

    let text = generator.generate(&prompt, ASSESSMENT_SYSTEM).await?;

    Ok(reconcile_assessment(&text, id_map))
}
