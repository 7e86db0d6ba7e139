// Assessment Composition stage.
// Writes questions over a selected taxonomy subset and maps model-authored
// competency names back to identifiers. All LLM calls go through llm_client.

pub mod composer;
pub mod decoder;
pub mod handlers;
pub mod id_map;
pub mod models;
pub mod prompts;
