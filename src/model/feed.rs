//! The submission collection handed to the manager by its caller

use super::submission::Submission;
use serde_json::Value;
use tracing::warn;

/// Submission collection as received from the data service
///
/// A payload that is not a JSON array is kept as `Malformed` and renders
/// exactly like an empty collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionFeed {
    Records(Vec<Submission>),
    Malformed,
}

impl Default for SubmissionFeed {
    fn default() -> Self {
        SubmissionFeed::Records(Vec::new())
    }
}

impl From<Vec<Submission>> for SubmissionFeed {
    fn from(records: Vec<Submission>) -> Self {
        SubmissionFeed::Records(records)
    }
}

impl SubmissionFeed {
    /// Decode a raw payload, preserving element order
    ///
    /// Elements that are not objects are skipped; fields of the wrong type
    /// fall back to their defaults without dropping the record.
    pub fn from_value(value: Value) -> Self {
        let Value::Array(items) = value else {
            warn!("submission payload is not an array; treating as empty");
            return SubmissionFeed::Malformed;
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if !item.is_object() {
                warn!(index, "skipping non-object submission entry");
                continue;
            }
            match serde_json::from_value::<Submission>(item) {
                Ok(record) => records.push(record),
                Err(e) => warn!(index, error = %e, "skipping undecodable submission entry"),
            }
        }
        SubmissionFeed::Records(records)
    }

    pub fn records(&self) -> &[Submission] {
        match self {
            SubmissionFeed::Records(records) => records,
            SubmissionFeed::Malformed => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_preserves_order() {
        let feed = SubmissionFeed::from_value(json!([
            { "id": "b", "name": "Second in store" },
            { "id": "a", "name": "First in store" },
        ]));

        let ids: Vec<&str> = feed.records().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_non_array_is_malformed() {
        for value in [json!({ "id": "a" }), json!("rows"), json!(null), json!(42)] {
            let feed = SubmissionFeed::from_value(value);
            assert_eq!(feed, SubmissionFeed::Malformed);
            assert!(feed.is_empty());
            assert_eq!(feed.len(), 0);
        }
    }

    #[test]
    fn test_skips_non_object_entries() {
        let feed = SubmissionFeed::from_value(json!([
            { "id": "a" },
            "garbage",
            null,
            [1, 2],
            { "id": "c" },
        ]));

        let ids: Vec<&str> = feed.records().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_keeps_records_with_wrong_typed_fields() {
        let feed = SubmissionFeed::from_value(json!([
            { "id": "a", "resolved": "yes" },
            { "id": 42 },
            { "id": "c", "phone": 5551234 },
        ]));

        let ids: Vec<&str> = feed.records().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "42", "c"]);
        assert_eq!(feed.records()[0].resolved, None);
        assert_eq!(feed.records()[2].display_phone(), "5551234");
    }

    #[test]
    fn test_empty_array() {
        let feed = SubmissionFeed::from_value(json!([]));
        assert_eq!(feed, SubmissionFeed::Records(Vec::new()));
        assert!(feed.is_empty());
    }
}
