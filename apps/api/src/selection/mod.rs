// Skill Selection stage.
// Maps a job description onto the indexed taxonomy and returns a pruned,
// identifier-stable subset. All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod selector;
