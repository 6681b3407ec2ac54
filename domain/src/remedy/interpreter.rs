//! Response interpretation for remedy generation.
//!
//! Providers are inconsistent about code fences, wrapper shape and the
//! typing of step entries. [`interpret()`] normalizes their raw text through
//! a fixed pipeline:
//!
//! 1. trim, then short-circuit on the [`NO_REMEDY_SENTINEL`]
//! 2. strip Markdown code fences ([`strip_code_fences()`])
//! 3. parse JSON
//! 4. unwrap an echoed schema (`{"properties": {"remedy_name": {"title": .., "value": ..}}}`)
//! 5. validate into a [`RemedyInstruction`]
//!
//! Every step is pure; nothing here touches the network.

use super::entities::RemedyInstruction;
use crate::prompt::NO_REMEDY_SENTINEL;
use serde_json::{Map, Value};

/// Classification of one raw provider answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// The provider signalled that nothing can be made from the ingredients
    NoRemedy,
    Remedy(RemedyInstruction),
    /// The answer could not be turned into a remedy
    Malformed { reason: String },
}

/// Interpret raw provider text as a remedy.
///
/// Never fails: malformed output becomes [`Interpretation::Malformed`]
/// carrying the parse or validation detail.
pub fn interpret(raw: &str) -> Interpretation {
    let text = raw.trim();

    if text.contains(NO_REMEDY_SENTINEL) {
        return Interpretation::NoRemedy;
    }

    let body = strip_code_fences(text);
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return Interpretation::Malformed {
                reason: format!("invalid JSON: {}", e),
            };
        }
    };

    match validate(&unwrap_schema_wrapper(value)) {
        Ok(remedy) => Interpretation::Remedy(remedy),
        Err(reason) => Interpretation::Malformed { reason },
    }
}

/// Strip leading/trailing triple-backtick fences and an optional language tag.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        body = match rest.find('\n') {
            Some(idx) if is_language_tag(&rest[..idx]) => &rest[idx + 1..],
            Some(_) => rest,
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

/// Cut `raw` to at most `max_bytes` on a UTF-8 boundary, for log lines.
pub fn excerpt(raw: &str, max_bytes: usize) -> &str {
    if raw.len() <= max_bytes {
        return raw;
    }
    let mut end = max_bytes;
    while end > 0 && !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}

fn is_language_tag(candidate: &str) -> bool {
    candidate
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Flatten `{"properties": {field: {"title": .., "value": ..}}}` into `{field: value}`.
///
/// Objects that already carry `remedy_name` at the top level pass through.
fn unwrap_schema_wrapper(value: Value) -> Value {
    let Value::Object(map) = &value else {
        return value;
    };
    if map.contains_key("remedy_name") {
        return value;
    }
    let Some(Value::Object(properties)) = map.get("properties") else {
        return value;
    };

    let flat: Map<String, Value> = properties
        .iter()
        .map(|(key, child)| (key.clone(), unwrap_property(child)))
        .collect();
    Value::Object(flat)
}

fn unwrap_property(child: &Value) -> Value {
    match child {
        Value::Object(descriptor)
            if descriptor.contains_key("title")
                || descriptor.contains_key("value")
                || descriptor.contains_key("type") =>
        {
            descriptor
                .get("value")
                .or_else(|| descriptor.get("default"))
                .cloned()
                .unwrap_or(Value::Null)
        }
        other => other.clone(),
    }
}

fn validate(value: &Value) -> Result<RemedyInstruction, String> {
    let Value::Object(map) = value else {
        return Err("expected a JSON object".to_string());
    };

    let name = match map.get("remedy_name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => return Err("remedy_name must be a string".to_string()),
        None => return Err("missing field `remedy_name`".to_string()),
    };

    let steps = match map.get("steps") {
        None | Some(Value::Null) => None,
        Some(Value::Array(entries)) => Some(entries.iter().map(flatten_step).collect()),
        Some(_) => return Err("steps must be a list".to_string()),
    };

    RemedyInstruction::try_new(name, steps).ok_or_else(|| "remedy_name must not be empty".to_string())
}

/// Object entries contribute their `action` or `caution` text.
fn flatten_step(entry: &Value) -> String {
    match entry {
        Value::String(step) => step.clone(),
        Value::Object(fields) => fields
            .get("action")
            .or_else(|| fields.get("caution"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GINGER_TEA: &str =
        r#"{"remedy_name": "Ginger Tea", "steps": ["Step 1: boil water", "Step 2: add ginger"]}"#;

    fn ginger_tea() -> RemedyInstruction {
        RemedyInstruction::try_new(
            "Ginger Tea",
            Some(vec![
                "Step 1: boil water".to_string(),
                "Step 2: add ginger".to_string(),
            ]),
        )
        .unwrap()
    }

    #[test]
    fn test_flat_payload() {
        assert_eq!(interpret(GINGER_TEA), Interpretation::Remedy(ginger_tea()));
    }

    #[test]
    fn test_fenced_payload_matches_unfenced() {
        let fenced = format!("```json\n{}\n```", GINGER_TEA);
        let bare_fence = format!("```\n{}\n```", GINGER_TEA);
        let one_line = format!("```json{}```", GINGER_TEA);

        assert_eq!(interpret(&fenced), interpret(GINGER_TEA));
        assert_eq!(interpret(&bare_fence), interpret(GINGER_TEA));
        assert_eq!(interpret(&one_line), interpret(GINGER_TEA));
    }

    #[test]
    fn test_sentinel_short_circuits() {
        assert_eq!(interpret(NO_REMEDY_SENTINEL), Interpretation::NoRemedy);
        assert_eq!(
            interpret(&format!("  Sorry. {}\n", NO_REMEDY_SENTINEL)),
            Interpretation::NoRemedy
        );
    }

    #[test]
    fn test_sentinel_match_is_case_sensitive() {
        let shouted = NO_REMEDY_SENTINEL.to_uppercase();
        assert!(matches!(interpret(&shouted), Interpretation::Malformed { .. }));
    }

    #[test]
    fn test_schema_wrapper_is_unwrapped() {
        let wrapped = r#"{
            "title": "RemedyInstruction",
            "type": "object",
            "properties": {
                "remedy_name": {"title": "Remedy Name", "type": "string", "value": "Ginger Tea"},
                "steps": {"title": "Steps", "value": ["Step 1: boil water", "Step 2: add ginger"]}
            }
        }"#;

        assert_eq!(interpret(wrapped), Interpretation::Remedy(ginger_tea()));
    }

    #[test]
    fn test_schema_echo_without_values_is_malformed() {
        let echoed = r#"{
            "properties": {
                "remedy_name": {"title": "Remedy Name", "type": "string"},
                "steps": {"title": "Steps", "type": "array"}
            }
        }"#;

        assert!(matches!(interpret(echoed), Interpretation::Malformed { .. }));
    }

    #[test]
    fn test_object_steps_are_flattened() {
        let payload = r#"{
            "remedy_name": "Honey Lemon Tea",
            "steps": [
                {"step": 1, "action": "Warm a cup of water"},
                "Stir in honey and lemon",
                {"caution": "Honey should not be given to children under 1 year old"},
                {"note": "unused"}
            ]
        }"#;

        let Interpretation::Remedy(remedy) = interpret(payload) else {
            panic!("expected a remedy");
        };
        assert_eq!(
            remedy.steps().unwrap(),
            &[
                "Warm a cup of water".to_string(),
                "Stir in honey and lemon".to_string(),
                "Honey should not be given to children under 1 year old".to_string(),
                String::new(),
            ]
        );
    }

    #[test]
    fn test_missing_steps_is_allowed() {
        let Interpretation::Remedy(remedy) = interpret(r#"{"remedy_name": "Rest", "steps": null}"#)
        else {
            panic!("expected a remedy");
        };
        assert!(remedy.steps().is_none());
    }

    #[test]
    fn test_invalid_payloads() {
        for payload in [
            "Here is a remedy: drink tea",
            r#"{"steps": ["a"]}"#,
            r#"{"remedy_name": ""}"#,
            r#"{"remedy_name": 42}"#,
            r#"{"remedy_name": "Tea", "steps": "boil water"}"#,
            r#"["Ginger Tea"]"#,
        ] {
            assert!(
                matches!(interpret(payload), Interpretation::Malformed { .. }),
                "payload should be malformed: {payload}"
            );
        }
    }

    #[test]
    fn test_strip_code_fences_leaves_plain_text() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_excerpt_respects_char_boundary() {
        assert_eq!(excerpt("hello world", 5), "hello");
        assert_eq!(excerpt("hi", 10), "hi");
        // 'é' is two bytes
        assert_eq!(excerpt("ééé", 3), "é");
    }
}
