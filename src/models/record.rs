use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The categorical fields a record can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Tag1,
    Tag2,
}

impl TagField {
    pub const ALL: [TagField; 2] = [TagField::Tag1, TagField::Tag2];

    /// JSON key holding this tag
    pub fn key(self) -> &'static str {
        match self {
            TagField::Tag1 => "tag1",
            TagField::Tag2 => "tag2",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Scalar value of a tag field
///
/// JSON null is treated as "no tag". Arrays and objects are carried as the text of
/// their compact JSON in their own variant, so they never collide with a string
/// tag that happens to spell the same JSON.
///
/// Ordering is total: booleans, then numbers, then text, then compound values.
/// Numbers compare numerically, text and compound values lexicographically.
#[derive(Debug, Clone)]
pub enum TagValue {
    Bool(bool),
    Number(Number),
    Text(String),
    /// Array or object tag, held as its compact JSON text
    Compound(String),
}

impl TagValue {
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(TagValue::Bool(*b)),
            Value::Number(n) => Some(TagValue::Number(n.clone())),
            Value::String(s) => Some(TagValue::Text(s.clone())),
            other => Some(TagValue::Compound(other.to_string())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            TagValue::Bool(_) => 0,
            TagValue::Number(_) => 1,
            TagValue::Text(_) => 2,
            TagValue::Compound(_) => 3,
        }
    }
}

impl Ord for TagValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TagValue::Bool(a), TagValue::Bool(b)) => a.cmp(b),
            (TagValue::Number(a), TagValue::Number(b)) => {
                let a_f = a.as_f64().unwrap_or(f64::NAN);
                let b_f = b.as_f64().unwrap_or(f64::NAN);
                // Equal magnitudes with different spellings (1 vs 1.0) stay distinct
                a_f.total_cmp(&b_f).then_with(|| a.to_string().cmp(&b.to_string()))
            }
            (TagValue::Text(a), TagValue::Text(b))
            | (TagValue::Compound(a), TagValue::Compound(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for TagValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TagValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TagValue {}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Bool(b) => write!(f, "{}", b),
            TagValue::Number(n) => write!(f, "{}", n),
            TagValue::Text(s) | TagValue::Compound(s) => f.write_str(s),
        }
    }
}

/// One uploaded record, kept as the raw JSON value it was parsed from
///
/// Records are usually objects, but any JSON value is accepted; field lookups on
/// a non-object simply find nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }


    /// Look up a top-level field (None for non-objects)
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the top-level field is present, even if it holds null
    pub fn has_field(&self, key: &str) -> bool {
        self.0.as_object().is_some_and(|map| map.contains_key(key))
    }

    pub fn tag(&self, field: TagField) -> Option<TagValue> {
        self.field(field.key()).and_then(TagValue::from_json)
    }

    /// Pretty-printed JSON with two-space indent, non-ASCII left unescaped
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_tag_value_from_json_scalars() {
        assert_eq!(TagValue::from_json(&json!("a")), Some(TagValue::Text("a".to_string())));
        assert_eq!(TagValue::from_json(&json!(true)), Some(TagValue::Bool(true)));
        assert_eq!(TagValue::from_json(&json!(3)), Some(TagValue::Number(Number::from(3))));
        assert_eq!(TagValue::from_json(&json!(null)), None);
    }

    #[test]
    fn test_tag_value_from_json_compound() {
        let value = TagValue::from_json(&json!(["x", 1])).unwrap();
        assert_eq!(value, TagValue::Compound(r#"["x",1]"#.to_string()));
        assert_eq!(value.to_string(), r#"["x",1]"#);
    }

    #[test]
    fn test_compound_tag_distinct_from_same_spelled_text() {
        let compound = TagValue::from_json(&json!(["a"])).unwrap();
        let text = TagValue::from_json(&json!(r#"["a"]"#)).unwrap();
        assert_ne!(compound, text);
        assert!(text < compound);
    }

    #[test]
    fn test_large_numbers_keep_their_digits() {
        let value: Value = serde_json::from_str("123456789012345678901234567890").unwrap();
        let tag = TagValue::from_json(&value).unwrap();
        assert_eq!(tag.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_tag_value_ordering_across_types() {
        let mut values = vec![
            TagValue::Text("b".to_string()),
            TagValue::Number(Number::from(10)),
            TagValue::Text("a".to_string()),
            TagValue::Bool(true),
            TagValue::Number(Number::from(2)),
        ];
        values.sort();

        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["true", "2", "10", "a", "b"]);
    }

    #[test]
    fn test_tag_value_numbers_compare_numerically() {
        let small = TagValue::from_json(&json!(9)).unwrap();
        let large = TagValue::from_json(&json!(10.5)).unwrap();
        assert!(small < large);
    }

    #[test]
    fn test_tag_value_integer_and_float_spelling_distinct() {
        let int = TagValue::from_json(&json!(1)).unwrap();
        let float = TagValue::from_json(&json!(1.0)).unwrap();
        assert_ne!(int, float);
    }

    #[test]
    fn test_record_field_access() {
        let record = Record::new(json!({"id": "x1", "tag1": "a", "empty": null}));
        assert_eq!(record.field("id"), Some(&json!("x1")));
        assert!(record.field("missing").is_none());
        assert!(record.has_field("empty"));
        assert!(!record.has_field("missing"));
        assert_eq!(record.tag(TagField::Tag1), Some(TagValue::Text("a".to_string())));
        assert_eq!(record.tag(TagField::Tag2), None);
    }

    #[test]
    fn test_record_non_object_has_no_fields() {
        let record = Record::new(json!(42));
        assert!(record.field("id").is_none());
        assert!(!record.has_field("id"));
        assert!(record.tag(TagField::Tag1).is_none());
    }

    #[test]
    fn test_record_pretty_json_uses_two_space_indent() {
        let record = Record::new(json!({"id": "x1"}));
        assert_eq!(record.to_pretty_json(), "{\n  \"id\": \"x1\"\n}");
    }

    #[test]
    fn test_record_pretty_json_keeps_unicode() {
        let record = Record::new(json!({"text": "héllo 世界"}));
        assert!(record.to_pretty_json().contains("héllo 世界"));
    }

    #[test]
    fn test_tag_field_keys() {
        assert_eq!(TagField::Tag1.key(), "tag1");
        assert_eq!(TagField::Tag2.to_string(), "tag2");
    }
}
