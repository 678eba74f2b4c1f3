//! End-to-end contract checks: every composed schema is compiled with a
//! real JSON Schema validator and exercised with values it must accept
//! and values it must reject.

use jsonschema::JSONSchema;
use research_contracts::prelude::*;
use serde_json::{json, Value};

fn compile(schema: &Value) -> JSONSchema {
    JSONSchema::compile(schema).expect("compile schema")
}

fn assert_valid(schema: &Value, value: &Value) {
    let validator = compile(schema);
    let msgs: Vec<String> = match validator.validate(value) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("expected value to validate: {}", msgs.join(" | "));
}

fn assert_invalid(schema: &Value, value: &Value) {
    let validator = compile(schema);
    assert!(
        validator.validate(value).is_err(),
        "expected value to be rejected: {value}"
    );
}

// ═══════════════════════════════════════════════════════════════════
// Decision schema
// ═══════════════════════════════════════════════════════════════════

#[test]
fn action_enum_equals_every_nonempty_capability_subset() {
    let profile = LanguageProfile::new();

    for mask in 1u32..(1 << ActionKind::PRIORITY.len()) {
        let kinds: Vec<ActionKind> = ActionKind::PRIORITY
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, kind)| kind)
            .collect();

        let caps = ActionCapabilitySet::from_kinds(&kinds);
        let schema = decision_schema(&caps, &profile).unwrap();

        let expected: Vec<&str> = kinds.iter().map(ActionKind::name).collect();
        assert_eq!(
            schema["properties"]["action"]["enum"],
            json!(expected),
            "capability mask {mask:#07b}"
        );
    }
}

#[test]
fn all_false_capability_set_produces_no_schema() {
    let result = decision_schema(&ActionCapabilitySet::none(), &LanguageProfile::new());
    assert_eq!(result.unwrap_err(), ContractError::NoActionsEnabled);
}

#[test]
fn search_requests_at_query_limit_validate() {
    let profile = LanguageProfile::new();
    let schema = decision_schema(&ActionCapabilitySet::all(), &profile).unwrap();

    let at_limit: Vec<String> = (0..MAX_QUERIES_PER_STEP).map(|i| format!("query {i}")).collect();
    assert_valid(
        &schema,
        &json!({
            "action": "search",
            "think": "need sources",
            "search": {"searchRequests": at_limit}
        }),
    );

    let over_limit: Vec<String> =
        (0..=MAX_QUERIES_PER_STEP).map(|i| format!("query {i}")).collect();
    assert_invalid(
        &schema,
        &json!({
            "action": "search",
            "think": "need sources",
            "search": {"searchRequests": over_limit}
        }),
    );
}

#[test]
fn visit_targets_at_url_limit_validate() {
    let profile = LanguageProfile::new();
    let schema = decision_schema(&ActionCapabilitySet::all(), &profile).unwrap();

    assert_valid(
        &schema,
        &json!({
            "action": "visit",
            "think": "read the primary sources",
            "visit": {"URLTargets": ["https://a.example", "https://b.example"]}
        }),
    );

    assert_invalid(
        &schema,
        &json!({
            "action": "visit",
            "think": "read the primary sources",
            "visit": {"URLTargets": ["a", "b", "c"]}
        }),
    );
}

#[test]
fn chosen_action_requires_its_payload_field() {
    let profile = LanguageProfile::new();
    let schema = decision_schema(&ActionCapabilitySet::all(), &profile).unwrap();

    // Naming an action without supplying its payload is invalid,
    // not merely incomplete.
    assert_invalid(
        &schema,
        &json!({"action": "search", "think": "need sources"}),
    );

    // A different enabled action's payload does not satisfy the chosen one.
    assert_invalid(
        &schema,
        &json!({
            "action": "search",
            "think": "need sources",
            "visit": {"URLTargets": ["https://a.example"]}
        }),
    );
}

#[test]
fn search_and_visit_scenario() {
    let profile = LanguageProfile::new();
    let caps = ActionCapabilitySet::none().search(true).visit(true);
    let schema = decision_schema(&caps, &profile).unwrap();

    assert_eq!(
        schema["properties"]["action"]["enum"],
        json!(["search", "visit"])
    );

    assert_valid(
        &schema,
        &json!({
            "action": "search",
            "think": "one focused query should do",
            "search": {"searchRequests": ["quantum computing breakthrough"]}
        }),
    );

    assert_invalid(
        &schema,
        &json!({
            "action": "visit",
            "think": "read everything",
            "visit": {"URLTargets": ["a", "b", "c"]}
        }),
    );
}

#[test]
fn answer_references_respect_field_caps() {
    let profile = LanguageProfile::new();
    let schema = decision_schema(&ActionCapabilitySet::all(), &profile).unwrap();

    assert_valid(
        &schema,
        &json!({
            "action": "answer",
            "think": "the evidence is conclusive",
            "answer": {
                "answer": "The capital of France is Paris.",
                "references": [{
                    "exactQuote": "Paris is the capital",
                    "url": "https://example.org/fr",
                    "dateTime": "2025-03-14"
                }]
            }
        }),
    );

    // URL over the 100-char cap.
    let long_url = format!("https://example.org/{}", "x".repeat(MAX_URL_CHARS));
    assert_invalid(
        &schema,
        &json!({
            "action": "answer",
            "think": "the evidence is conclusive",
            "answer": {
                "answer": "Paris.",
                "references": [{
                    "exactQuote": "Paris is the capital",
                    "url": long_url,
                    "dateTime": "2025-03-14"
                }]
            }
        }),
    );
}

// ═══════════════════════════════════════════════════════════════════
// Evaluator family
// ═══════════════════════════════════════════════════════════════════

#[test]
fn evaluator_schemas_carry_exactly_one_analysis_record() {
    let profile = LanguageProfile::new();

    for eval_type in EvaluationType::ALL {
        let schema = evaluator_schema(eval_type, &profile);
        let properties = schema["properties"].as_object().unwrap();

        assert!(properties.contains_key("pass"));
        assert!(properties.contains_key("think"));
        assert!(properties.contains_key(eval_type.analysis_field()));
        assert_eq!(properties.len(), 3);
    }
}

#[test]
fn unknown_evaluation_tag_is_rejected() {
    let err = evaluator_schema_for_tag("sentiment", &LanguageProfile::new()).unwrap_err();
    assert_eq!(
        err,
        ContractError::UnknownEvaluationType("sentiment".to_string())
    );
}

#[test]
fn freshness_evaluation_values() {
    let profile = LanguageProfile::new();
    let schema = evaluator_schema(EvaluationType::Freshness, &profile);

    assert_valid(
        &schema,
        &json!({
            "pass": false,
            "think": "the cited report is two years old",
            "freshness_analysis": {"days_ago": 730, "max_age_days": 30}
        }),
    );

    // Wrong analysis record for the tag.
    assert_invalid(
        &schema,
        &json!({
            "pass": true,
            "think": "sources check out",
            "attribution_analysis": {"sources_provided": true, "sources_verified": true}
        }),
    );
}

#[test]
fn completeness_evaluation_values() {
    let profile = LanguageProfile::new();
    let schema = evaluator_schema(EvaluationType::Completeness, &profile);

    assert_valid(
        &schema,
        &json!({
            "pass": true,
            "think": "both named aspects are covered",
            "completeness_analysis": {
                "aspects_expected": "pricing, availability",
                "aspects_provided": "pricing, availability"
            }
        }),
    );

    assert_invalid(
        &schema,
        &json!({
            "pass": true,
            "think": "covered",
            "completeness_analysis": {
                "aspects_expected": "a".repeat(MAX_ASPECT_CHARS + 1),
                "aspects_provided": "pricing"
            }
        }),
    );
}

// ═══════════════════════════════════════════════════════════════════
// Fixed-purpose schemas
// ═══════════════════════════════════════════════════════════════════

#[test]
fn gap_check_values() {
    let schema = gap_check_schema(&LanguageProfile::new());

    assert_valid(
        &schema,
        &json!({
            "think": "asks for the three latest releases, so freshness and plurality matter",
            "needsFreshness": true,
            "needsPlurality": true,
            "needsCompleteness": false
        }),
    );

    // Missing one of the required booleans.
    assert_invalid(
        &schema,
        &json!({
            "think": "simple lookup",
            "needsFreshness": false,
            "needsPlurality": false
        }),
    );
}

#[test]
fn query_rewrite_values() {
    let schema = query_rewrite_schema(&LanguageProfile::new());

    assert_valid(
        &schema,
        &json!({
            "think": "split the comparison into per-product queries",
            "queries": ["rust async runtimes 2026", "tokio vs smol benchmark"]
        }),
    );

    // Single query over the keyword cap.
    assert_invalid(
        &schema,
        &json!({
            "think": "one long query",
            "queries": ["q".repeat(MAX_KEYWORD_CHARS + 1)]
        }),
    );

    // Empty query list.
    assert_invalid(&schema, &json!({"think": "nothing to ask", "queries": []}));
}

#[test]
fn error_analysis_values() {
    let schema = error_analysis_schema(&LanguageProfile::new());

    assert_valid(
        &schema,
        &json!({
            "recap": "searched twice, visited one page, answered from memory",
            "blame": "the answer ignored the visited page entirely",
            "improvement": "quote the visited page before answering",
            "questionsToAnswer": ["what does the page actually claim?"]
        }),
    );

    let too_many: Vec<String> = (0..=MAX_REFLECT_PER_STEP).map(|i| format!("q{i}")).collect();
    assert_invalid(
        &schema,
        &json!({
            "recap": "r",
            "blame": "b",
            "improvement": "i",
            "questionsToAnswer": too_many
        }),
    );
}

#[test]
fn language_detection_values() {
    let schema = language_detection_schema();

    assert_valid(&schema, &json!({"langCode": "fr", "langStyle": "casual French"}));
    assert_invalid(
        &schema,
        &json!({"langCode": "french-language-code", "langStyle": "casual"}),
    );
}

// ═══════════════════════════════════════════════════════════════════
// Localization lifecycle
// ═══════════════════════════════════════════════════════════════════

/// Generation stub resolving every detection call to a fixed pair.
struct CannedDetector(Value);

impl StructuredGeneration for CannedDetector {
    fn generate(&self, _request: GenerationRequest) -> GenerationFuture<'_> {
        let value = self.0.clone();
        Box::pin(async move { Ok(value) })
    }
}

#[tokio::test]
async fn schemas_capture_directive_at_build_time() {
    let profile = LanguageProfile::new();
    let caps = ActionCapabilitySet::all();

    let before = decision_schema(&caps, &profile).unwrap();
    let before_think = before["properties"]["think"]["description"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(before_think.contains("lang:en, style:formal English"));

    let detector = CannedDetector(json!({"langCode": "fr", "langStyle": "casual French"}));
    assert!(profile.resolve("Quelle est la capitale?", &detector).await);
    assert_eq!(
        profile.localization_directive(),
        "first-person, lang:fr, style:casual French"
    );

    let after = decision_schema(&caps, &profile).unwrap();
    assert!(after["properties"]["think"]["description"]
        .as_str()
        .unwrap()
        .contains("lang:fr, style:casual French"));

    // The earlier schema keeps its originally embedded directive.
    assert_eq!(
        before["properties"]["think"]["description"].as_str().unwrap(),
        before_think
    );
}
