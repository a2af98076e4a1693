//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;

use serde_json::{Map, Value, json};
use tempfile::{Builder, NamedTempFile};

/// Write `content` to a temp file with the given extension (".json" / ".jsonl")
pub fn write_upload(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Join records into JSONL text (one compact object per line)
pub fn to_jsonl(records: &[Value]) -> String {
    records.iter().map(Value::to_string).collect::<Vec<_>>().join("\n")
}

/// Builder for uploaded chat records
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.fields.insert("id".to_string(), json!(id));
        self
    }

    pub fn original_id(mut self, id: &str) -> Self {
        self.fields.insert("original_id".to_string(), json!(id));
        self
    }

    pub fn tag1(mut self, value: impl Into<Value>) -> Self {
        self.fields.insert("tag1".to_string(), value.into());
        self
    }

    pub fn tag2(mut self, value: impl Into<Value>) -> Self {
        self.fields.insert("tag2".to_string(), value.into());
        self
    }

    /// `messages` object with turns and reasoning
    pub fn chat(mut self, turns: &[(&str, &str)], reasoning: &str) -> Self {
        self.fields.insert(
            "messages".to_string(),
            json!({"Messages": turns_json(turns), "Reasoning": reasoning}),
        );
        self
    }

    /// `prompt` sequence without reasoning
    pub fn prompt(mut self, turns: &[(&str, &str)]) -> Self {
        self.fields.insert("prompt".to_string(), turns_json(turns));
        self
    }

    pub fn revised(mut self, response: Value, reasoning: Value) -> Self {
        self.fields.insert(
            "revised_messages".to_string(),
            json!({"revised_response": response, "revised_reasoning": reasoning}),
        );
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn turns_json(turns: &[(&str, &str)]) -> Value {
    Value::Array(
        turns.iter().map(|(role, content)| json!({"role": role, "content": content})).collect(),
    )
}

/// A small mixed file: chat, prompt-only and bare records across two tags
pub fn realistic_records() -> Vec<Value> {
    vec![
        RecordBuilder::new()
            .id("c1")
            .tag1("math")
            .tag2("easy")
            .chat(&[("user", "What is 2+2?"), ("assistant", "4")], "Basic addition")
            .revised(json!([{"content": "It is 4."}]), json!("Addition of small integers"))
            .build(),
        RecordBuilder::new()
            .original_id("orig-2")
            .id("c2")
            .tag1("code")
            .tag2("hard")
            .prompt(&[("user", "Write a parser")])
            .build(),
        RecordBuilder::new()
            .id("c3")
            .tag1("math")
            .tag2("hard")
            .chat(&[("user", "Integrate x^2"), ("assistant", "x^3/3 + C")], "Power rule")
            .revised(json!(["x^3/3 + C, by the power rule"]), json!("N/A"))
            .build(),
        RecordBuilder::new().id("c4").tag2("easy").build(),
    ]
}
