use crate::models::{Record, TagField, TagValue};

/// Selection for one tag dimension
///
/// `Unavailable` is offered when no record in the file carries the tag. It never
/// narrows the result set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagSelection {
    #[default]
    All,
    Value(TagValue),
    Unavailable,
}

impl TagSelection {
    pub fn matches(&self, value: Option<&TagValue>) -> bool {
        match self {
            TagSelection::All | TagSelection::Unavailable => true,
            TagSelection::Value(selected) => value == Some(selected),
        }
    }

    /// Whether this selection removes any records
    pub fn is_filtering(&self) -> bool {
        matches!(self, TagSelection::Value(_))
    }

    pub fn label(&self, field: TagField) -> String {
        match self {
            TagSelection::All => "All".to_string(),
            TagSelection::Value(value) => value.to_string(),
            TagSelection::Unavailable => format!("No {} in file", field),
        }
    }

    /// Resolve user-typed text against the offered options
    ///
    /// "All" (any case) selects everything; otherwise the first option whose label
    /// matches exactly wins. Unknown text still becomes a text value, which simply
    /// matches nothing.
    pub fn from_label(label: &str, field: TagField, options: &[TagSelection]) -> Self {
        if label.eq_ignore_ascii_case("all") {
            return TagSelection::All;
        }

        options
            .iter()
            .find(|option| option.is_filtering() && option.label(field) == label)
            .cloned()
            .unwrap_or_else(|| TagSelection::Value(TagValue::Text(label.to_string())))
    }
}

/// Selections for both tag dimensions
///
/// Reset whenever a new file is loaded, kept across navigation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub tag1: TagSelection,
    pub tag2: TagSelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: TagField) -> &TagSelection {
        match field {
            TagField::Tag1 => &self.tag1,
            TagField::Tag2 => &self.tag2,
        }
    }

    pub fn set(&mut self, field: TagField, selection: TagSelection) {
        match field {
            TagField::Tag1 => self.tag1 = selection,
            TagField::Tag2 => self.tag2 = selection,
        }
    }

    pub fn is_active(&self) -> bool {
        self.tag1.is_filtering() || self.tag2.is_filtering()
    }

    /// A record passes when both dimensions match
    pub fn matches(&self, record: &Record) -> bool {
        TagField::ALL
            .iter()
            .all(|field| self.get(*field).matches(record.tag(*field).as_ref()))
    }

    /// Step one dimension to the next (or previous) option, wrapping around
    ///
    /// A selection not present in `options` restarts at the first option.
    pub fn cycle(&mut self, field: TagField, options: &[TagSelection], forward: bool) {
        if options.is_empty() {
            return;
        }

        let next = match options.iter().position(|option| option == self.get(field)) {
            Some(pos) if forward => (pos + 1) % options.len(),
            Some(pos) => (pos + options.len() - 1) % options.len(),
            None => 0,
        };
        self.set(field, options[next].clone());
    }
}
