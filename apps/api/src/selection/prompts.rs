// All LLM prompt constants for the Skill Selection stage.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for skill selection: asks for a single JSON object.
pub const SKILL_SELECTION_SYSTEM: &str =
    "You are an expert technical recruiter who maps job descriptions onto a skills taxonomy. \
    You MUST respond with one JSON object. \
    Do NOT include explanations or apologies.";

/// Skill selection prompt template.
/// Replace: {id_instruction}, {taxonomy_json}, {jd_text}
pub const SKILL_SELECTION_PROMPT_TEMPLATE: &str = r#"{id_instruction}

Select the competencies from the taxonomy below that a candidate for this job must
demonstrate. Prefer depth over breadth: pick only what the job description actually
requires or strongly implies.

TAXONOMY (categories → skills → competencies, each with its numId):
{taxonomy_json}

Return a JSON object with this EXACT schema:
{
  "position_name": "Senior Frontend Engineer",
  "selected_competencies": [
    {
      "category_numId": 1,
      "skill_numId": 3,
      "competency_numIds": [10, 11]
    }
  ]
}

HARD RULES:
1. `skill_numId` MUST belong to the category given by `category_numId`
2. Every value in `competency_numIds` MUST belong to the skill given by `skill_numId`
3. `position_name` is a short job title inferred from the job description

JOB DESCRIPTION:
{jd_text}"#;
