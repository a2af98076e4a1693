use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use super::selection::TagSelection;
use crate::models::{Record, TagField, TagValue};

/// Distinct values of a tag across all records, in natural order
///
/// Records lacking the tag (or holding null) contribute nothing.
pub fn distinct_tag_values(records: &[Record], field: TagField) -> Vec<TagValue> {
    records.iter().filter_map(|record| record.tag(field)).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Options offered for one tag dimension
///
/// `[All, v1, v2, ...]` sorted, or `[Unavailable]` when no record carries the tag.
pub fn tag_options(records: &[Record], field: TagField) -> Vec<TagSelection> {
    let values = distinct_tag_values(records, field);
    if values.is_empty() {
        return vec![TagSelection::Unavailable];
    }

    iter::once(TagSelection::All).chain(values.into_iter().map(TagSelection::Value)).collect()
}

/// Number of records per tag value, in natural value order
pub fn tag_counts(records: &[Record], field: TagField) -> Vec<(TagValue, usize)> {
    let mut counts = BTreeMap::new();
    for value in records.iter().filter_map(|record| record.tag(field)) {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(values: Vec<serde_json::Value>) -> Vec<Record> {
        values.into_iter().map(Record::new).collect()
    }

    #[test]
    fn test_tag_options_sorted_with_all_prefix() {
        let records = records(vec![
            json!({"tag1": "beta"}),
            json!({"tag1": "alpha"}),
            json!({"tag1": "beta"}),
            json!({"tag2": "x"}),
        ]);

        let options = tag_options(&records, TagField::Tag1);
        assert_eq!(
            options,
            vec![
                TagSelection::All,
                TagSelection::Value(TagValue::Text("alpha".into())),
                TagSelection::Value(TagValue::Text("beta".into())),
            ]
        );
    }

    #[test]
    fn test_tag_options_unavailable_when_absent() {
        let records = records(vec![json!({"id": 1}), json!({"tag1": null})]);
        assert_eq!(tag_options(&records, TagField::Tag1), vec![TagSelection::Unavailable]);
        assert_eq!(tag_options(&[], TagField::Tag2), vec![TagSelection::Unavailable]);
    }

    #[test]
    fn test_tag_options_mixed_types() {
        let records = records(vec![json!({"tag2": "z"}), json!({"tag2": 3}), json!({"tag2": 1})]);
        let labels: Vec<String> =
            tag_options(&records, TagField::Tag2).iter().map(|o| o.label(TagField::Tag2)).collect();
        assert_eq!(labels, vec!["All", "1", "3", "z"]);
    }

    #[test]
    fn test_tag_counts() {
        let records = records(vec![
            json!({"tag1": "a"}),
            json!({"tag1": "b"}),
            json!({"tag1": "a"}),
            json!({}),
        ]);
        let counts = tag_counts(&records, TagField::Tag1);
        assert_eq!(
            counts,
            vec![(TagValue::Text("a".into()), 2), (TagValue::Text("b".into()), 1)]
        );
    }
}
