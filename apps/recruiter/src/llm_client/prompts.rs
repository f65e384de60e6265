// Shared prompt fragments.
// Each extraction step keeps its own prompts.rs alongside it; this file holds
// only what every JSON-producing call has in common.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a helpful assistant designed to output JSON. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Appended to extraction prompts so absent fields come back as null
/// instead of invented values.
pub const NULL_WHEN_ABSENT: &str = "\
    If a field is not explicitly found, use `null` for its value. \
    Do NOT guess or invent information that is not in the text.";
