//! Entry normalizer: one raw [`Record`] in, one [`NormalizedEntry`] out.
//!
//! Records arrive in several legacy shapes. The conversation is resolved once, in
//! priority order:
//!
//! 1. a `messages` object: turns from `messages.Messages`, reasoning from `messages.Reasoning`
//! 2. a `prompt` sequence: turns only, no reasoning
//! 3. neither: no turns, no reasoning
//!
//! Revised content comes from the first element of `revised_messages.revised_response`
//! (either a string or an object with a `content` field). Revised reasoning comes from
//! `revised_messages.revised_reasoning`, where empty, null and `"N/A"` all mean absent.
//!
//! Every field access is defaulted and the input is never mutated, so normalizing
//! the same record twice yields identical entries.

use serde::Deserialize;
use serde_json::Value;

use crate::models::{ChatTurn, EntryBody, NormalizedEntry, Record, TagField};
use crate::parsers::deserializers::value_to_text;

const ID_KEYS: [&str; 2] = ["original_id", "id"];
const REASONING_NOT_AVAILABLE: &str = "N/A";

pub fn normalize(record: &Record) -> NormalizedEntry {
    NormalizedEntry {
        id: resolve_id(record),
        tag1: record.tag(TagField::Tag1),
        tag2: record.tag(TagField::Tag2),
        body: resolve_body(record),
        revised_content: resolve_revised_content(record),
        revised_reasoning: resolve_revised_reasoning(record),
    }
}

/// `original_id` wins over `id`; null counts as absent
fn resolve_id(record: &Record) -> Option<String> {
    ID_KEYS
        .iter()
        .find_map(|key| record.field(key).filter(|value| !value.is_null()))
        .map(value_to_text)
}

fn resolve_body(record: &Record) -> EntryBody {
    if record.has_field("messages") {
        let messages = record.field("messages");
        EntryBody::Chat {
            turns: messages.and_then(|m| m.get("Messages")).map(read_turns).unwrap_or_default(),
            reasoning: messages
                .and_then(|m| m.get("Reasoning"))
                .map(value_to_text)
                .unwrap_or_default(),
        }
    } else if record.has_field("prompt") {
        EntryBody::PromptOnly { turns: record.field("prompt").map(read_turns).unwrap_or_default() }
    } else {
        EntryBody::Empty
    }
}

/// Read an ordered list of turns; anything that is not a list yields no turns
fn read_turns(value: &Value) -> Vec<ChatTurn> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::Object(_) => ChatTurn::deserialize(item)
                .unwrap_or_else(|_| ChatTurn::new("", value_to_text(item))),
            // Bare values become a role-less turn
            other => ChatTurn::new("", value_to_text(other)),
        })
        .collect()
}

fn revised_messages(record: &Record) -> Option<&Value> {
    record.field("revised_messages")
}

fn resolve_revised_content(record: &Record) -> Option<String> {
    let response = revised_messages(record)?.get("revised_response")?;

    let first = match response {
        Value::Array(items) => items.first()?,
        Value::Null => return None,
        Value::String(s) if s.is_empty() => return None,
        // A bare value stands for the response itself
        other => other,
    };

    match first {
        Value::Object(map) => map.get("content").filter(|content| !content.is_null()).map(value_to_text),
        Value::Null => None,
        other => Some(value_to_text(other)),
    }
}

fn resolve_revised_reasoning(record: &Record) -> Option<String> {
    match revised_messages(record)?.get("revised_reasoning")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() || s == REASONING_NOT_AVAILABLE => None,
        other => Some(value_to_text(other)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{NO_REVISED_CONTENT, NO_REVISED_REASONING, TagValue};

    fn normalize_json(value: Value) -> NormalizedEntry {
        normalize(&Record::new(value))
    }

    #[test]
    fn test_messages_shape() {
        let entry = normalize_json(json!({
            "id": "x1",
            "tag1": "a",
            "messages": {"Messages": [{"role": "user", "content": "hi"}], "Reasoning": "r1"}
        }));

        assert_eq!(entry.id.as_deref(), Some("x1"));
        assert_eq!(entry.tag1, Some(TagValue::Text("a".into())));
        assert_eq!(entry.tag2, None);
        assert_eq!(
            entry.body,
            EntryBody::Chat { turns: vec![ChatTurn::new("user", "hi")], reasoning: "r1".into() }
        );
        assert_eq!(entry.revised_content_text(), NO_REVISED_CONTENT);
        assert_eq!(entry.revised_reasoning_text(), NO_REVISED_REASONING);
    }

    #[test]
    fn test_messages_without_inner_fields() {
        let entry = normalize_json(json!({"messages": {}}));
        assert_eq!(entry.body, EntryBody::Chat { turns: vec![], reasoning: String::new() });

        let entry = normalize_json(json!({"messages": null}));
        assert_eq!(entry.body, EntryBody::Chat { turns: vec![], reasoning: String::new() });
    }

    #[test]
    fn test_messages_takes_priority_over_prompt() {
        let entry = normalize_json(json!({
            "messages": {"Messages": [{"role": "assistant", "content": "from messages"}]},
            "prompt": [{"role": "user", "content": "from prompt"}]
        }));
        assert_eq!(entry.turns()[0].content, "from messages");
    }

    #[test]
    fn test_prompt_shape() {
        let entry = normalize_json(json!({
            "prompt": [{"role": "system", "content": "s"}, {"role": "user", "content": "q"}]
        }));
        assert_eq!(
            entry.body,
            EntryBody::PromptOnly {
                turns: vec![ChatTurn::new("system", "s"), ChatTurn::new("user", "q")]
            }
        );
        assert_eq!(entry.reasoning(), "");
    }

    #[test]
    fn test_prompt_not_a_list() {
        let entry = normalize_json(json!({"prompt": "just text"}));
        assert_eq!(entry.body, EntryBody::PromptOnly { turns: vec![] });
    }

    #[test]
    fn test_neither_shape_is_empty() {
        let entry = normalize_json(json!({"id": 5}));
        assert_eq!(entry.body, EntryBody::Empty);
        assert_eq!(entry.id.as_deref(), Some("5"));
    }

    #[test]
    fn test_id_beyond_64_bits_keeps_digits() {
        let record: Record =
            serde_json::from_str(r#"{"id":123456789012345678901234567890,"n":18446744073709551616}"#)
                .unwrap();
        let entry = normalize(&record);
        assert_eq!(entry.id.as_deref(), Some("123456789012345678901234567890"));
    }

    #[test]
    fn test_non_object_record() {
        let entry = normalize_json(json!([1, 2, 3]));
        assert_eq!(entry.body, EntryBody::Empty);
        assert_eq!(entry.id, None);
        assert_eq!(entry.id_text(), "N/A");
    }

    #[test]
    fn test_turn_items_that_are_not_objects() {
        let entry = normalize_json(json!({"prompt": ["loose text", 42]}));
        assert_eq!(entry.turns(), &[ChatTurn::new("", "loose text"), ChatTurn::new("", "42")]);
    }

    #[test]
    fn test_id_prefers_original_id() {
        let entry = normalize_json(json!({"id": "new", "original_id": "orig"}));
        assert_eq!(entry.id.as_deref(), Some("orig"));

        let entry = normalize_json(json!({"id": "new", "original_id": null}));
        assert_eq!(entry.id.as_deref(), Some("new"));
    }

    #[test]
    fn test_revised_content_plain_string() {
        let entry = normalize_json(json!({
            "revised_messages": {"revised_response": ["plain text"]}
        }));
        assert_eq!(entry.revised_content_text(), "plain text");
    }

    #[test]
    fn test_revised_content_object() {
        let entry = normalize_json(json!({
            "revised_messages": {"revised_response": [{"role": "assistant", "content": "c1"}, "ignored"]}
        }));
        assert_eq!(entry.revised_content_text(), "c1");
    }

    #[test]
    fn test_revised_content_empty_or_missing() {
        for value in [
            json!({"revised_messages": {"revised_response": []}}),
            json!({"revised_messages": {}}),
            json!({"revised_messages": {"revised_response": null}}),
            json!({"revised_messages": {"revised_response": [{"role": "assistant"}]}}),
            json!({}),
        ] {
            let entry = normalize_json(value);
            assert_eq!(entry.revised_content_text(), NO_REVISED_CONTENT);
        }
    }

    #[test]
    fn test_revised_content_bare_string() {
        let entry = normalize_json(json!({"revised_messages": {"revised_response": "whole"}}));
        assert_eq!(entry.revised_content_text(), "whole");
    }

    #[test]
    fn test_revised_content_keeps_empty_string_element() {
        let entry = normalize_json(json!({"revised_messages": {"revised_response": [""]}}));
        assert_eq!(entry.revised_content, Some(String::new()));
    }

    #[test]
    fn test_revised_reasoning_sentinels() {
        for reasoning in [json!(""), json!("N/A"), json!(null)] {
            let entry = normalize_json(json!({"revised_messages": {"revised_reasoning": reasoning}}));
            assert_eq!(entry.revised_reasoning_text(), NO_REVISED_REASONING);
        }

        let entry = normalize_json(json!({"revised_messages": {"revised_reasoning": "better"}}));
        assert_eq!(entry.revised_reasoning_text(), "better");
    }

    #[test]
    fn test_normalize_is_idempotent_and_pure() {
        let record = Record::new(json!({
            "original_id": "o1",
            "tag2": 3,
            "messages": {"Messages": [{"role": "user", "content": "hi"}], "Reasoning": "why"},
            "revised_messages": {"revised_response": [{"content": "c"}], "revised_reasoning": "rr"}
        }));
        let before = record.clone();

        let first = normalize(&record);
        let second = normalize(&record);

        assert_eq!(first, second);
        assert_eq!(record, before);
    }
}
