//! Evaluator schema family: a tagged-union contract over answer checks.
//!
//! Every evaluation shares the base judgment fields `{pass, think}` and
//! adds exactly one tag-specific analysis record. The tag set is closed —
//! an evaluation kind outside it is a fatal configuration error, never a
//! default variant.

use crate::bounds::{MAX_ASPECT_CHARS, MAX_PROSE_CHARS};
use crate::errors::{ContractError, ContractResult};
use crate::language::LanguageProfile;
use crate::schemas::localized_string;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

/// The closed set of answer evaluation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationType {
    /// Is the answer direct and committed, not hedged or refused?
    Definitive,

    /// Is the answer recent enough for a time-sensitive question?
    Freshness,

    /// Does the answer provide as many items as asked for?
    Plurality,

    /// Does the answer cite sources that actually support it?
    Attribution,

    /// Does the answer cover every aspect the question names?
    Completeness,
}

impl EvaluationType {
    /// All evaluation kinds, in documentation order.
    pub const ALL: [EvaluationType; 5] = [
        Self::Definitive,
        Self::Freshness,
        Self::Plurality,
        Self::Attribution,
        Self::Completeness,
    ];

    /// The wire tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Definitive => "definitive",
            Self::Freshness => "freshness",
            Self::Plurality => "plurality",
            Self::Attribution => "attribution",
            Self::Completeness => "completeness",
        }
    }

    /// Name of the analysis record field this kind adds to the base schema.
    pub fn analysis_field(&self) -> &'static str {
        match self {
            Self::Definitive => "definitive_analysis",
            Self::Freshness => "freshness_analysis",
            Self::Plurality => "plurality_analysis",
            Self::Attribution => "attribution_analysis",
            Self::Completeness => "completeness_analysis",
        }
    }

    /// Schema for this kind's analysis record.
    fn analysis_schema(&self) -> Value {
        match self {
            Self::Definitive => json!({
                "type": "object",
                "required": ["hedging_detected", "refusal_detected"],
                "additionalProperties": false,
                "properties": {
                    "hedging_detected": {
                        "type": "boolean",
                        "description": "Does the answer hedge instead of committing?"
                    },
                    "refusal_detected": {
                        "type": "boolean",
                        "description": "Does the answer decline to answer at all?"
                    }
                }
            }),
            Self::Freshness => json!({
                "type": "object",
                "required": ["days_ago"],
                "additionalProperties": false,
                "properties": {
                    "days_ago": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Age of the most recent information used, in days."
                    },
                    "max_age_days": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Oldest acceptable age for this question, in days."
                    }
                }
            }),
            Self::Plurality => json!({
                "type": "object",
                "required": ["minimum_count_required", "actual_count_provided"],
                "additionalProperties": false,
                "properties": {
                    "minimum_count_required": {
                        "type": "number",
                        "minimum": 1,
                        "description": "How many items the question asks for."
                    },
                    "actual_count_provided": {
                        "type": "number",
                        "minimum": 0,
                        "description": "How many items the answer provides."
                    }
                }
            }),
            Self::Attribution => json!({
                "type": "object",
                "required": ["sources_provided", "sources_verified"],
                "additionalProperties": false,
                "properties": {
                    "sources_provided": {
                        "type": "boolean",
                        "description": "Does the answer cite any sources?"
                    },
                    "sources_verified": {
                        "type": "boolean",
                        "description": "Do the cited sources actually contain the claims?"
                    }
                }
            }),
            Self::Completeness => json!({
                "type": "object",
                "required": ["aspects_expected", "aspects_provided"],
                "additionalProperties": false,
                "properties": {
                    "aspects_expected": {
                        "type": "string",
                        "maxLength": MAX_ASPECT_CHARS,
                        "description": "Comma-separated aspects the question names."
                    },
                    "aspects_provided": {
                        "type": "string",
                        "maxLength": MAX_ASPECT_CHARS,
                        "description": "Comma-separated aspects the answer covers."
                    }
                }
            }),
        }
    }
}

impl FromStr for EvaluationType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "definitive" => Ok(Self::Definitive),
            "freshness" => Ok(Self::Freshness),
            "plurality" => Ok(Self::Plurality),
            "attribution" => Ok(Self::Attribution),
            "completeness" => Ok(Self::Completeness),
            other => Err(ContractError::UnknownEvaluationType(other.to_string())),
        }
    }
}

impl std::fmt::Display for EvaluationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Schema for one evaluation kind: base `{pass, think}` plus exactly the
/// matching analysis record.
pub fn evaluator_schema(eval_type: EvaluationType, profile: &LanguageProfile) -> Value {
    let directive = profile.localization_directive();
    json!({
        "type": "object",
        "required": ["pass", "think", eval_type.analysis_field()],
        "additionalProperties": false,
        "properties": {
            "pass": {
                "type": "boolean",
                "description": format!("Whether the answer passes the {} check.", eval_type.tag())
            },
            "think": localized_string(
                MAX_PROSE_CHARS,
                "Reasoning behind the judgment.",
                &directive
            ),
            (eval_type.analysis_field()): eval_type.analysis_schema()
        }
    })
}

/// Parse a wire tag and build its evaluator schema.
///
/// The fatal-error surface for untyped callers: an out-of-set tag aborts
/// composition immediately.
pub fn evaluator_schema_for_tag(tag: &str, profile: &LanguageProfile) -> ContractResult<Value> {
    let eval_type = EvaluationType::from_str(tag)?;
    Ok(evaluator_schema(eval_type, profile))
}
