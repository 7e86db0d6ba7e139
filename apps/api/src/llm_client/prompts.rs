// Shared prompt constants and prompt-building utilities.
// Each pipeline stage defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Common instruction appended to every prompt that embeds an indexed taxonomy.
pub const ID_FIDELITY_INSTRUCTION: &str = "\
    CRITICAL: Every taxonomy node below carries a `numId`. \
    Refer to taxonomy nodes ONLY by the exact numId shown; never invent, renumber, or \
    reorder ids. Negative numIds are valid and must be copied verbatim.";

/// Instruction to keep competency names verbatim so they can be mapped back to ids.
pub const VERBATIM_NAMES_INSTRUCTION: &str = "\
    CRITICAL: When you list competencies, copy each competency name EXACTLY as it appears \
    in the provided taxonomy. Do not paraphrase, translate, abbreviate, or add the skill name.";
