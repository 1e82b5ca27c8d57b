//! Restores search relevance order on hydrated records.
//!
//! The daemon returns ids ordered by relevance; the primary store returns the
//! matching records in whatever order it likes. These functions put the
//! records back in the daemon's order.

use std::collections::HashMap;

use tracing::warn;

use crate::interfaces::Searchable;
use sphinx_scout_shared::RawResultSet;

/// Extract document ids from `raw` in row order.
///
/// Rows without a numeric `key_column` are skipped.
pub fn ordered_keys(raw: &RawResultSet, key_column: &str) -> Vec<u64> {
    let mut keys = Vec::with_capacity(raw.len());
    for (position, row) in raw.rows().iter().enumerate() {
        match row.key(key_column) {
            Some(key) => keys.push(key),
            None => warn!(
                position = position,
                key_column = key_column,
                "Result row has no usable key, skipping"
            ),
        }
    }
    keys
}

/// Reorder `records` to follow `keys`.
///
/// Records whose key is not in `keys` are dropped, as are keys with no
/// record. When several records share a key the first one wins; a key listed
/// twice yields its record once, at the first position.
pub fn reorder_by_keys<R: Searchable>(keys: &[u64], records: Vec<R>) -> Vec<R> {
    let mut by_key: HashMap<u64, R> = HashMap::with_capacity(records.len());
    for record in records {
        by_key.entry(record.search_key()).or_insert(record);
    }

    let mut ordered = Vec::with_capacity(by_key.len());
    for key in keys {
        if let Some(record) = by_key.remove(key) {
            ordered.push(record);
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use sphinx_scout_shared::{FieldMap, RawResultRow};

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: u64,
        tag: &'static str,
    }

    impl Searchable for Doc {
        fn search_key(&self) -> u64 {
            self.id
        }

        fn searchable_as(&self) -> String {
            "docs".to_string()
        }

        fn to_searchable_fields(&self) -> FieldMap {
            FieldMap::new().with("id", self.id)
        }
    }

    fn doc(id: u64) -> Doc {
        Doc { id, tag: "" }
    }

    #[test]
    fn test_ordered_keys_preserves_row_order() {
        let raw = RawResultSet::from_rows(vec![
            RawResultRow::new(FieldMap::new().with("id", 3u64)),
            RawResultRow::new(FieldMap::new().with("id", 1u64)),
            RawResultRow::new(FieldMap::new().with("id", 2u64)),
        ]);
        assert_eq!(ordered_keys(&raw, "id"), vec![3, 1, 2]);
    }

    #[test]
    fn test_ordered_keys_skips_rows_without_key() {
        let raw = RawResultSet::from_rows(vec![
            RawResultRow::new(FieldMap::new().with("id", 1u64)),
            RawResultRow::new(FieldMap::new().with("title", "no id")),
            RawResultRow::new(FieldMap::new().with("id", "2")),
        ]);
        assert_eq!(ordered_keys(&raw, "id"), vec![1, 2]);
    }

    #[test]
    fn test_reorder_follows_keys() {
        let records = vec![doc(4), doc(2), doc(1), doc(3)];
        let ordered = reorder_by_keys(&[1, 2, 3, 4], records);
        let ids: Vec<u64> = ordered.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reorder_drops_missing_and_extra() {
        let records = vec![doc(9), doc(3), doc(1)];
        let ordered = reorder_by_keys(&[3, 2, 1], records);
        let ids: Vec<u64> = ordered.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_reorder_duplicates() {
        let records = vec![
            Doc { id: 1, tag: "first" },
            Doc { id: 1, tag: "second" },
            doc(2),
        ];
        let ordered = reorder_by_keys(&[2, 1, 2], records);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].id, 2);
        assert_eq!(ordered[1].tag, "first");
    }

    #[test]
    fn test_reorder_empty() {
        let ordered: Vec<Doc> = reorder_by_keys(&[], vec![doc(1)]);
        assert!(ordered.is_empty());
    }
}
