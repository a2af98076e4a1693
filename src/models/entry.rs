use serde::{Deserialize, Serialize};

use super::record::TagValue;

/// Shown when a record carries no revised response
pub const NO_REVISED_CONTENT: &str = "No revised content";
/// Shown when a record's revised reasoning is absent, empty, null or "N/A"
pub const NO_REVISED_REASONING: &str = "No revised reasoning";
/// Shown on the original side of a comparison when there are no turns
pub const NO_CONTENT_FOUND: &str = "No content found";
/// Shown when neither `original_id` nor `id` is present
pub const ID_NOT_AVAILABLE: &str = "N/A";

/// A single chat turn. Order within a conversation is significant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_text")]
    pub role: String,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_text")]
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self { role: role.into(), content: content.into() }
    }

    pub fn is_user(&self) -> bool {
        self.role.eq_ignore_ascii_case("user")
    }

    /// Role with each word capitalized ("assistant" -> "Assistant")
    pub fn display_role(&self) -> String {
        self.role
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Resolved shape of a record's conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBody {
    /// Record has a `messages` object: turns plus free-text reasoning
    Chat { turns: Vec<ChatTurn>, reasoning: String },
    /// Record has a `prompt` sequence and no reasoning
    PromptOnly { turns: Vec<ChatTurn> },
    /// Record has neither
    Empty,
}

impl EntryBody {
    pub fn turns(&self) -> &[ChatTurn] {
        match self {
            EntryBody::Chat { turns, .. } | EntryBody::PromptOnly { turns } => turns,
            EntryBody::Empty => &[],
        }
    }

    pub fn reasoning(&self) -> &str {
        match self {
            EntryBody::Chat { reasoning, .. } => reasoning,
            EntryBody::PromptOnly { .. } | EntryBody::Empty => "",
        }
    }
}

/// Canonical, renderer-ready view of one record. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub id: Option<String>,
    pub tag1: Option<TagValue>,
    pub tag2: Option<TagValue>,
    pub body: EntryBody,
    pub revised_content: Option<String>,
    pub revised_reasoning: Option<String>,
}

impl NormalizedEntry {
    pub fn id_text(&self) -> &str {
        self.id.as_deref().unwrap_or(ID_NOT_AVAILABLE)
    }

    pub fn turns(&self) -> &[ChatTurn] {
        self.body.turns()
    }

    pub fn reasoning(&self) -> &str {
        self.body.reasoning()
    }

    /// Content of the last turn, the "original" side of a comparison
    pub fn original_content(&self) -> &str {
        self.turns().last().map(|turn| turn.content.as_str()).unwrap_or(NO_CONTENT_FOUND)
    }

    pub fn revised_content_text(&self) -> &str {
        self.revised_content.as_deref().unwrap_or(NO_REVISED_CONTENT)
    }

    pub fn revised_reasoning_text(&self) -> &str {
        self.revised_reasoning.as_deref().unwrap_or(NO_REVISED_REASONING)
    }
}
