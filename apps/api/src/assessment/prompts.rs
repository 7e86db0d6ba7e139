// All LLM prompt constants for the Assessment Composition stage.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for assessment authoring: asks for the sectioned Markdown layout.
pub const ASSESSMENT_SYSTEM: &str = "You are a senior engineer who writes practical, \
    scenario-based technical assessments for hiring. \
    Respond in Markdown using EXACTLY the section layout you are given. \
    Do NOT wrap the answer in code fences. \
    Do NOT include explanations or apologies.";

/// Assessment composition prompt template.
/// Replace: {names_instruction}, {position_name}, {question_count}, {taxonomy_json}, {jd_text}
pub const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"{names_instruction}

Write a technical assessment for the position "{position_name}".
It must contain one shared case scenario and exactly {question_count} questions.
Together the questions should exercise the selected competencies below.

SELECTED COMPETENCIES (categories → skills → competencies):
{taxonomy_json}

Use this EXACT layout:

# Assessment Case
<two or three paragraphs describing a realistic scenario at the hiring company>

# Questions
## Question 1
Context: <what the candidate is looking at for this question>
Question: <the task the candidate must complete>
Skills assessed: <comma-separated competency names from the list above>

## Question 2
...

HARD RULES:
1. Every question MUST end with a `Skills assessed:` line
2. Every name on that line MUST be a competency name from the list above
3. Questions must be answerable in writing or code within 20 minutes each

JOB DESCRIPTION:
{jd_text}"#;
