//! Skill Selection Engine: asks the model which competencies a job needs and rebuilds
//! the answer as a pruned subgraph of the snapshot.
//!
//! Flow: index prompt → one generation call → first JSON object → resolve every
//! reference against the snapshot → merge → prune.
//!
//! Bad references never abort the run; they are skipped and counted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::PipelineError;
use crate::llm_client::prompts::ID_FIDELITY_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::reconcile::first_json_object;
use crate::selection::prompts::{SKILL_SELECTION_PROMPT_TEMPLATE, SKILL_SELECTION_SYSTEM};
use crate::taxonomy::{Category, Competency, EntityId, Skill, Snapshot};

pub const UNTITLED_POSITION: &str = "Untitled Position";

const CATEGORY_KEYS: &[&str] = &["category_numId", "categoryNumId", "category_id"];
const SKILL_KEYS: &[&str] = &["skill_numId", "skillNumId", "skill_id"];
const COMPETENCY_KEYS: &[&str] = &["competency_numIds", "competencyNumIds", "competency_ids"];

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The pruned taxonomy subset chosen for a position.
///
/// Every node is drawn from the snapshot with its identifier unchanged. No skill has an
/// empty competency list and no category has an empty skill list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSelectionResult {
    pub position_name: String,
    pub categories: Vec<Category>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs skill selection for one job description against one snapshot.
pub async fn select_skills(
    generator: &dyn TextGenerator,
    job_description: &str,
    snapshot: &Snapshot,
) -> Result<SkillSelectionResult, PipelineError> {
    info!(
        "Selecting skills from {} competencies across {} categories",
        snapshot.competency_count(),
        snapshot.categories().len()
    );

    let prompt = build_selection_prompt(job_description, snapshot);
    let text = generator.generate(&prompt, SKILL_SELECTION_SYSTEM).await?;

    reconcile_selection(&text, snapshot)
}

/// Rebuilds a selection result from raw model output. Pure; no I/O.
pub fn reconcile_selection(
    text: &str,
    snapshot: &Snapshot,
) -> Result<SkillSelectionResult, PipelineError> {
    let span = first_json_object(text).ok_or_else(|| {
        PipelineError::MalformedSelectionResponse("no JSON object found in response".to_string())
    })?;

    let value: Value = serde_json::from_str(span).map_err(|e| {
        PipelineError::MalformedSelectionResponse(format!("candidate object is not valid JSON: {e}"))
    })?;

    let entries = value
        .get("selected_competencies")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PipelineError::MalformedSelectionResponse(
                "object lacks a `selected_competencies` array".to_string(),
            )
        })?;

    let mut builder = SelectionBuilder::default();
    for entry in entries {
        builder.add(entry, snapshot);
    }
    let skipped = builder.skipped;
    let categories = builder.finish();

    if skipped > 0 {
        warn!("Skill selection skipped {skipped} unresolvable references");
    }
    info!(
        "Skill selection kept {} categories, {} competencies",
        categories.len(),
        categories
            .iter()
            .flat_map(|c| &c.skills)
            .map(|s| s.competencies.len())
            .sum::<usize>()
    );

    Ok(SkillSelectionResult {
        position_name: position_name(&value),
        categories,
    })
}

fn build_selection_prompt(job_description: &str, snapshot: &Snapshot) -> String {
    SKILL_SELECTION_PROMPT_TEMPLATE
        .replace("{id_instruction}", ID_FIDELITY_INSTRUCTION)
        .replace("{taxonomy_json}", &snapshot.to_prompt_json())
        .replace("{jd_text}", job_description)
}

fn position_name(value: &Value) -> String {
    ["position_name", "positionName"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNTITLED_POSITION)
        .to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Reference resolution
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates resolved references in first-seen order, borrowing from the snapshot.
#[derive(Default)]
struct SelectionBuilder<'s> {
    categories: Vec<PartialCategory<'s>>,
    skipped: usize,
}

struct PartialCategory<'s> {
    source: &'s Category,
    skills: Vec<PartialSkill<'s>>,
}

struct PartialSkill<'s> {
    source: &'s Skill,
    competencies: Vec<&'s Competency>,
}

impl<'s> SelectionBuilder<'s> {
    fn add(&mut self, entry: &Value, snapshot: &'s Snapshot) {
        let Some(category) = id_field(entry, CATEGORY_KEYS).and_then(|id| snapshot.category(id))
        else {
            debug!("Skipping selection entry with unresolvable category: {entry}");
            self.skipped += 1;
            return;
        };
        let Some(skill) = id_field(entry, SKILL_KEYS).and_then(|id| category.skill(id)) else {
            debug!(
                "Skipping selection entry with unresolvable skill in category {}: {entry}",
                category.id
            );
            self.skipped += 1;
            return;
        };

        let requested: Vec<&Value> = COMPETENCY_KEYS
            .iter()
            .find_map(|key| entry.get(*key).and_then(Value::as_array))
            .map(|ids| ids.iter().collect())
            .unwrap_or_default();

        let partial_skill = self.skill_slot(category, skill);
        let mut skipped = 0;
        for raw in requested {
            match parse_id(raw).and_then(|id| skill.competency(id)) {
                Some(competency) => {
                    if !partial_skill.competencies.iter().any(|c| c.id == competency.id) {
                        partial_skill.competencies.push(competency);
                    }
                }
                None => {
                    debug!("Skipping unknown competency {raw} under skill {}", skill.id);
                    skipped += 1;
                }
            }
        }
        self.skipped += skipped;
    }

    fn skill_slot(&mut self, category: &'s Category, skill: &'s Skill) -> &mut PartialSkill<'s> {
        let ci = match self.categories.iter().position(|c| c.source.id == category.id) {
            Some(i) => i,
            None => {
                self.categories.push(PartialCategory {
                    source: category,
                    skills: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        let skills = &mut self.categories[ci].skills;
        let si = match skills.iter().position(|s| s.source.id == skill.id) {
            Some(i) => i,
            None => {
                skills.push(PartialSkill {
                    source: skill,
                    competencies: Vec::new(),
                });
                skills.len() - 1
            }
        };
        &mut skills[si]
    }

    /// Clones the retained nodes and prunes empty skills, then empty categories.
    fn finish(self) -> Vec<Category> {
        self.categories
            .into_iter()
            .filter_map(|pc| {
                let skills: Vec<Skill> = pc
                    .skills
                    .into_iter()
                    .filter(|ps| !ps.competencies.is_empty())
                    .map(|ps| Skill {
                        id: ps.source.id,
                        name: ps.source.name.clone(),
                        competencies: ps.competencies.into_iter().cloned().collect(),
                    })
                    .collect();
                (!skills.is_empty()).then(|| Category {
                    id: pc.source.id,
                    name: pc.source.name.clone(),
                    skills,
                })
            })
            .collect()
    }
}

fn id_field(entry: &Value, keys: &[&str]) -> Option<EntityId> {
    keys.iter().find_map(|key| entry.get(*key)).and_then(parse_id)
}

/// Accepts integer JSON numbers, integral floats, and numeric strings.
fn parse_id(value: &Value) -> Option<EntityId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(EntityId),
        Value::String(s) => s.trim().parse::<i64>().ok().map(EntityId),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
