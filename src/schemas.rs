//! Per-purpose schema builders.
//!
//! Each builder is a stateless pure function returning a draft-07
//! compatible JSON Schema as a `serde_json::Value`. Builders that localize
//! read the [`LanguageProfile`] once, at build time — the directive text is
//! baked into field descriptions and never self-updates afterwards.
//!
//! Field descriptions are documentation metadata for the model; the
//! enforced semantics are the `type`/`minItems`/`maxItems`/`maxLength`/
//! `enum` bounds, every one of which cites [`crate::bounds`].

use crate::bounds::{
    MAX_CODE_THINK_CHARS, MAX_KEYWORD_CHARS, MAX_LANG_CODE_CHARS, MAX_LANG_STYLE_CHARS,
    MAX_PROSE_CHARS, MAX_QUERIES_PER_STEP, MAX_REFLECT_PER_STEP,
};
use crate::language::LanguageProfile;
use serde_json::{json, Value};

// ═══════════════════════════════════════════════════════════════════
// Shared schema fragments
// ═══════════════════════════════════════════════════════════════════

/// Schema for a bounded plain string field.
pub(crate) fn bounded_string(max_chars: usize, description: &str) -> Value {
    json!({
        "type": "string",
        "maxLength": max_chars,
        "description": description
    })
}

/// Schema for a bounded string field written in the session language.
///
/// The directive is captured by the caller at build time and embedded
/// into the description as a literal, not a live reference.
pub(crate) fn localized_string(max_chars: usize, description: &str, directive: &str) -> Value {
    json!({
        "type": "string",
        "maxLength": max_chars,
        "description": format!("{description} Write in {directive}.")
    })
}

/// Schema for a non-empty, bounded array of string items.
pub(crate) fn string_array(max_items: usize, items: Value, description: &str) -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "maxItems": max_items,
        "items": items,
        "description": description
    })
}

// ═══════════════════════════════════════════════════════════════════
// Purpose builders
// ═══════════════════════════════════════════════════════════════════

/// Schema for the language-detection step.
///
/// The only builder with no localized field — it runs before the profile
/// resolves and its result is what resolves it.
pub fn language_detection_schema() -> Value {
    json!({
        "type": "object",
        "required": ["langCode", "langStyle"],
        "additionalProperties": false,
        "properties": {
            "langCode": bounded_string(
                MAX_LANG_CODE_CHARS,
                "ISO 639-1 language code of the question."
            ),
            "langStyle": bounded_string(
                MAX_LANG_STYLE_CHARS,
                "Short descriptor of tone and register, e.g. \"casual French\"."
            )
        }
    })
}

/// Schema for the gap-check step: which follow-up requirements does the
/// question carry?
pub fn gap_check_schema(profile: &LanguageProfile) -> Value {
    let directive = profile.localization_directive();
    json!({
        "type": "object",
        "required": ["think", "needsFreshness", "needsPlurality", "needsCompleteness"],
        "additionalProperties": false,
        "properties": {
            "think": localized_string(
                MAX_PROSE_CHARS,
                "Reasoning about what the question demands.",
                &directive
            ),
            "needsFreshness": {
                "type": "boolean",
                "description": "Does a correct answer depend on recent information?"
            },
            "needsPlurality": {
                "type": "boolean",
                "description": "Does the question ask for multiple items or examples?"
            },
            "needsCompleteness": {
                "type": "boolean",
                "description": "Does the question name several aspects that all need covering?"
            }
        }
    })
}

/// Schema for the code-synthesis step.
///
/// The `code` field carries a content contract the schema cannot check:
/// it must terminate with an explicit result-producing statement, omit
/// defensive error handling, and not re-declare large literals already
/// available in the execution context. Those rules live in the
/// description so the model sees them; enforcement is the executor's job.
pub fn code_generation_schema(profile: &LanguageProfile) -> Value {
    let directive = profile.localization_directive();
    json!({
        "type": "object",
        "required": ["think", "code"],
        "additionalProperties": false,
        "properties": {
            "think": localized_string(
                MAX_CODE_THINK_CHARS,
                "Brief plan for the snippet.",
                &directive
            ),
            "code": {
                "type": "string",
                "description": "Self-contained snippet solving the problem. \
                    End with a statement that produces the result. \
                    Do not add error handling. \
                    Do not re-declare variables already provided in the context."
            }
        }
    })
}

/// Schema for the failure-analysis step run after an unsuccessful trajectory.
pub fn error_analysis_schema(profile: &LanguageProfile) -> Value {
    let directive = profile.localization_directive();
    json!({
        "type": "object",
        "required": ["recap", "blame", "improvement", "questionsToAnswer"],
        "additionalProperties": false,
        "properties": {
            "recap": bounded_string(
                MAX_PROSE_CHARS,
                "What the failed attempt actually did, step by step."
            ),
            "blame": localized_string(
                MAX_PROSE_CHARS,
                "The single step most responsible for the failure.",
                &directive
            ),
            "improvement": localized_string(
                MAX_PROSE_CHARS,
                "What to do differently on the next attempt.",
                &directive
            ),
            "questionsToAnswer": string_array(
                MAX_REFLECT_PER_STEP,
                json!({"type": "string"}),
                "Short sub-questions whose answers would unblock the attempt."
            )
        }
    })
}

/// Schema for the query-rewrite step: turn one question into distinct
/// search-engine queries.
pub fn query_rewrite_schema(profile: &LanguageProfile) -> Value {
    let directive = profile.localization_directive();
    json!({
        "type": "object",
        "required": ["think", "queries"],
        "additionalProperties": false,
        "properties": {
            "think": localized_string(
                MAX_PROSE_CHARS,
                "Why these queries cover the question.",
                &directive
            ),
            "queries": string_array(
                MAX_QUERIES_PER_STEP,
                bounded_string(MAX_KEYWORD_CHARS, "Keyword-style search query."),
                "Distinct queries, each targeting a different aspect."
            )
        }
    })
}
