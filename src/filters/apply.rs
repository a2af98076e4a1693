use super::selection::FilterState;
use crate::models::Record;

/// Positions of the records passing the filter, in input order
pub fn filter_indices(records: &[Record], filter: &FilterState) -> Vec<usize> {
    if !filter.is_active() {
        return (0..records.len()).collect();
    }

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

/// Records passing the filter, in input order
///
/// Filter logic: a record passes when the tag1 selection is All (or unavailable) or
/// equals the record's tag1, AND likewise for tag2. An empty result is a normal
/// outcome, not an error.
pub fn apply_filters<'a>(records: &'a [Record], filter: &FilterState) -> Vec<&'a Record> {
    filter_indices(records, filter).into_iter().map(|idx| &records[idx]).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::filters::selection::TagSelection;
    use crate::models::TagValue;

    fn text(s: &str) -> TagSelection {
        TagSelection::Value(TagValue::Text(s.to_string()))
    }

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new(json!({"tag2": "b"})),
            Record::new(json!({"tag2": "c"})),
            Record::new(json!({"tag1": "x", "tag2": "b"})),
        ]
    }

    #[test]
    fn test_compound_tag_does_not_match_same_spelled_text() {
        let records = vec![
            Record::new(json!({"tag1": ["a"]})),
            Record::new(json!({"tag1": "[\"a\"]"})),
        ];
        let options = crate::filters::tag_options(&records, crate::models::TagField::Tag1);
        assert_eq!(options.len(), 3);

        let filters = FilterState { tag1: text(r#"["a"]"#), tag2: TagSelection::All };
        assert_eq!(filter_indices(&records, &filters), vec![1]);

        let compound = TagSelection::Value(TagValue::Compound(r#"["a"]"#.to_string()));
        let filters = FilterState { tag1: compound, tag2: TagSelection::All };
        assert_eq!(filter_indices(&records, &filters), vec![0]);
    }

    #[test]
    fn test_apply_filters_no_selection_returns_all() {
        let records = sample_records();
        let result = apply_filters(&records, &FilterState::new());
        assert_eq!(result.len(), records.len());
    }

    #[test]
    fn test_apply_filters_tag2_only() {
        let records = sample_records();
        let filter = FilterState { tag1: TagSelection::All, tag2: text("b") };
        let result = apply_filters(&records, &filter);
        assert_eq!(result, vec![&records[0], &records[2]]);
    }

    #[test]
    fn test_apply_filters_both_tags() {
        let records = sample_records();
        let filter = FilterState { tag1: text("x"), tag2: text("b") };
        assert_eq!(filter_indices(&records, &filter), vec![2]);
    }

    #[test]
    fn test_apply_filters_unavailable_is_no_filter() {
        let records = sample_records();
        let filter = FilterState { tag1: TagSelection::Unavailable, tag2: text("c") };
        assert_eq!(filter_indices(&records, &filter), vec![1]);
    }

    #[test]
    fn test_apply_filters_empty_result() {
        let records = sample_records();
        let filter = FilterState { tag1: text("nope"), tag2: TagSelection::All };
        assert!(apply_filters(&records, &filter).is_empty());
    }

    #[test]
    fn test_filter_output_is_ordered_subsequence() {
        let records: Vec<Record> = (0..50)
            .map(|i| Record::new(json!({"tag1": format!("t{}", i % 4), "tag2": i % 3, "n": i})))
            .collect();

        for tag1 in ["t0", "t1", "t3"] {
            let filter = FilterState { tag1: text(tag1), tag2: TagSelection::All };
            let indices = filter_indices(&records, &filter);
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
            assert!(indices.iter().all(|&i| filter.matches(&records[i])));
            let expected = records.iter().filter(|r| filter.matches(r)).count();
            assert_eq!(indices.len(), expected);
        }
    }
}
