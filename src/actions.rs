//! Capability-gated decision schema for the agent's single-action step.
//!
//! Each step the agent picks exactly one action. Which actions are on the
//! table varies per step (budgets, repeated failures, and loop policy turn
//! them off), so the schema is composed from capability flags. Action kinds
//! are a closed variant set walked in a fixed priority order — the composed
//! schema's shape and `action` enum ordering are reproducible regardless of
//! how the flags were set.
//!
//! The composed object carries the `action` discriminator, a universal
//! `think` field, and one self-contained optional payload field per enabled
//! action, named after it. `if`/`then` conditionals make the payload field
//! matching `action` mandatory: a value naming `action: "search"` without a
//! `search` payload is invalid, not merely incomplete.

use crate::bounds::{
    MAX_DATETIME_CHARS, MAX_KEYWORD_CHARS, MAX_PROSE_CHARS, MAX_QUERIES_PER_STEP,
    MAX_REFLECT_PER_STEP, MAX_URLS_PER_STEP, MAX_URL_CHARS,
};
use crate::errors::{ContractError, ContractResult};
use crate::language::LanguageProfile;
use crate::schemas::{bounded_string, localized_string, string_array};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The closed set of action kinds the agent can take in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Issue web search queries.
    Search,

    /// Hand a problem to the sandboxed code runner.
    Coding,

    /// Commit to a final answer with references.
    Answer,

    /// Raise sub-questions to research before answering.
    Reflect,

    /// Fetch and read specific URLs.
    Visit,
}

impl ActionKind {
    /// Fixed priority order every composition walks.
    ///
    /// This is the one source of truth for schema shape and `action` enum
    /// ordering — never the order capability flags were toggled in.
    pub const PRIORITY: [ActionKind; 5] = [
        Self::Search,
        Self::Coding,
        Self::Answer,
        Self::Reflect,
        Self::Visit,
    ];

    /// Wire name: the `action` enum entry and the payload field name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Coding => "coding",
            Self::Answer => "answer",
            Self::Reflect => "reflect",
            Self::Visit => "visit",
        }
    }

    /// Self-contained payload schema for this action.
    fn fragment_schema(&self, directive: &str) -> Value {
        match self {
            Self::Search => json!({
                "type": "object",
                "required": ["searchRequests"],
                "additionalProperties": false,
                "properties": {
                    "searchRequests": string_array(
                        MAX_QUERIES_PER_STEP,
                        bounded_string(MAX_KEYWORD_CHARS, "Keyword-style search query."),
                        "Queries to run. Prefer a single focused request; add more \
                         only when the question spans distinct aspects."
                    )
                }
            }),
            Self::Coding => json!({
                "type": "object",
                "required": ["codingIssue"],
                "additionalProperties": false,
                "properties": {
                    "codingIssue": bounded_string(
                        MAX_PROSE_CHARS,
                        "The problem statement handed to the code runner, \
                         including relevant context and expected output."
                    )
                }
            }),
            Self::Answer => json!({
                "type": "object",
                "required": ["references", "answer"],
                "additionalProperties": false,
                "properties": {
                    "references": {
                        "type": "array",
                        "description": "Supporting citations for the answer.",
                        "items": {
                            "type": "object",
                            "required": ["exactQuote", "url", "dateTime"],
                            "additionalProperties": false,
                            "properties": {
                                "exactQuote": bounded_string(
                                    MAX_KEYWORD_CHARS,
                                    "Verbatim snippet from the source."
                                ),
                                "url": bounded_string(
                                    MAX_URL_CHARS,
                                    "Source URL."
                                ),
                                "dateTime": bounded_string(
                                    MAX_DATETIME_CHARS,
                                    "Publication or access date of the source."
                                )
                            }
                        }
                    },
                    "answer": {
                        "type": "string",
                        "description": format!(
                            "Complete, definitive answer to the question. \
                             Write in {directive}."
                        )
                    }
                }
            }),
            Self::Reflect => json!({
                "type": "object",
                "required": ["questionsToAnswer"],
                "additionalProperties": false,
                "properties": {
                    "questionsToAnswer": string_array(
                        MAX_REFLECT_PER_STEP,
                        json!({"type": "string"}),
                        "Sub-questions that must be answered before the \
                         original question can be."
                    )
                }
            }),
            Self::Visit => json!({
                "type": "object",
                "required": ["URLTargets"],
                "additionalProperties": false,
                "properties": {
                    "URLTargets": string_array(
                        MAX_URLS_PER_STEP,
                        bounded_string(MAX_URL_CHARS, "URL to fetch and read."),
                        "URLs worth reading in full this step."
                    )
                }
            }),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Capability flags for one decision step.
///
/// Defaults to everything off; enable per step with the builder methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCapabilitySet {
    pub search: bool,
    pub coding: bool,
    pub answer: bool,
    pub reflect: bool,
    pub visit: bool,
}

impl ActionCapabilitySet {
    /// No actions enabled. Composing a decision schema from this fails.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every action enabled.
    pub fn all() -> Self {
        Self {
            search: true,
            coding: true,
            answer: true,
            reflect: true,
            visit: true,
        }
    }

    /// Enable exactly the given kinds.
    pub fn from_kinds(kinds: &[ActionKind]) -> Self {
        kinds
            .iter()
            .fold(Self::none(), |caps, kind| caps.enable(*kind))
    }

    /// Set the search flag.
    pub fn search(mut self, enabled: bool) -> Self {
        self.search = enabled;
        self
    }

    /// Set the coding flag.
    pub fn coding(mut self, enabled: bool) -> Self {
        self.coding = enabled;
        self
    }

    /// Set the answer flag.
    pub fn answer(mut self, enabled: bool) -> Self {
        self.answer = enabled;
        self
    }

    /// Set the reflect flag.
    pub fn reflect(mut self, enabled: bool) -> Self {
        self.reflect = enabled;
        self
    }

    /// Set the visit flag.
    pub fn visit(mut self, enabled: bool) -> Self {
        self.visit = enabled;
        self
    }

    /// Enable one kind.
    pub fn enable(self, kind: ActionKind) -> Self {
        match kind {
            ActionKind::Search => self.search(true),
            ActionKind::Coding => self.coding(true),
            ActionKind::Answer => self.answer(true),
            ActionKind::Reflect => self.reflect(true),
            ActionKind::Visit => self.visit(true),
        }
    }

    /// Whether a kind is enabled.
    pub fn allows(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Search => self.search,
            ActionKind::Coding => self.coding,
            ActionKind::Answer => self.answer,
            ActionKind::Reflect => self.reflect,
            ActionKind::Visit => self.visit,
        }
    }

    /// Enabled kinds in priority order.
    pub fn enabled_actions(&self) -> Vec<ActionKind> {
        ActionKind::PRIORITY
            .into_iter()
            .filter(|kind| self.allows(*kind))
            .collect()
    }

    /// Whether no kind is enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled_actions().is_empty()
    }
}

/// Compose the decision schema for one step.
///
/// Walks [`ActionKind::PRIORITY`], includes the payload fragment of each
/// enabled kind, builds the `action` enum from exactly those names, and
/// appends the universal `think` field with the localization directive
/// captured at build time. Zero enabled flags is a fatal configuration
/// error — an empty-choice schema is never produced.
pub fn decision_schema(
    capabilities: &ActionCapabilitySet,
    profile: &LanguageProfile,
) -> ContractResult<Value> {
    let enabled = capabilities.enabled_actions();
    if enabled.is_empty() {
        return Err(ContractError::NoActionsEnabled);
    }

    let directive = profile.localization_directive();
    let action_names: Vec<&str> = enabled.iter().map(ActionKind::name).collect();

    let mut properties = serde_json::Map::new();
    properties.insert(
        "action".into(),
        json!({
            "type": "string",
            "enum": action_names,
            "description": "The single action to take this step. Fill in only \
                            the field named after it."
        }),
    );
    for kind in &enabled {
        properties.insert(kind.name().into(), kind.fragment_schema(&directive));
    }
    properties.insert(
        "think".into(),
        localized_string(
            MAX_PROSE_CHARS,
            "Why this action moves the research forward.",
            &directive,
        ),
    );

    // One conditional per enabled kind: the payload field matching the
    // chosen action is the only action field required.
    let variant_requirements: Vec<Value> = enabled
        .iter()
        .map(|kind| {
            json!({
                "if": {"properties": {"action": {"const": kind.name()}}},
                "then": {"required": [kind.name()]}
            })
        })
        .collect();

    Ok(json!({
        "type": "object",
        "required": ["action", "think"],
        "additionalProperties": false,
        "properties": properties,
        "allOf": variant_requirements
    }))
}
