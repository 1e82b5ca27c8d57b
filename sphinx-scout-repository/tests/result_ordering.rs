//! Property tests for hydrated result ordering.
//!
//! Whatever order the hydration source answers in, and whichever hits it
//! cannot find, mapped results must follow the daemon's row order.
//!
//! Run with: `cargo test --test result_ordering`

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;

use sphinx_scout_repository::sphinxql::SelectStatement;
use sphinx_scout_repository::{
    HydrationSource, Searchable, SphinxEngine, SphinxError, SphinxQlExecutor, Statement,
};
use sphinx_scout_shared::{FieldMap, RawResultRow, RawResultSet, SearchQuery};

struct NullExecutor;

#[async_trait]
impl SphinxQlExecutor for NullExecutor {
    async fn execute(&self, _statement: &Statement) -> Result<u64, SphinxError> {
        Ok(0)
    }

    async fn query(&self, _statement: &SelectStatement) -> Result<RawResultSet, SphinxError> {
        Ok(RawResultSet::empty())
    }

    async fn health_check(&self) -> Result<bool, SphinxError> {
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Doc(u64);

impl Searchable for Doc {
    fn search_key(&self) -> u64 {
        self.0
    }

    fn searchable_as(&self) -> String {
        "docs".to_string()
    }

    fn to_searchable_fields(&self) -> FieldMap {
        FieldMap::new().with("id", self.0)
    }
}

/// Answers with a fixed list of records, in the list's order.
struct FixedSource(Vec<Doc>);

#[async_trait]
impl HydrationSource for FixedSource {
    type Record = Doc;

    async fn load_by_keys(&self, _keys: &[u64]) -> Result<Vec<Doc>, SphinxError> {
        Ok(self.0.clone())
    }
}

/// Distinct hit ids in daemon order, plus the subset the store still has in
/// an arbitrary order.
fn hits_and_hydrated() -> impl Strategy<Value = (Vec<u64>, Vec<u64>)> {
    prop::collection::hash_set(1u64..100_000, 0..64)
        .prop_flat_map(|set| {
            let keys: Vec<u64> = set.into_iter().collect();
            let n = keys.len();
            (Just(keys).prop_shuffle(), prop::collection::vec(any::<bool>(), n))
        })
        .prop_flat_map(|(keys, mask)| {
            let present: Vec<u64> = keys
                .iter()
                .zip(&mask)
                .filter(|(_, keep)| **keep)
                .map(|(k, _)| *k)
                .collect();
            (Just(keys), Just(present).prop_shuffle())
        })
}

fn raw_set(keys: &[u64]) -> RawResultSet {
    let rows = keys
        .iter()
        .map(|k| RawResultRow::new(FieldMap::new().with("id", *k)))
        .collect();
    RawResultSet::from_rows(rows)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    /// Output is the hit order restricted to hydrated keys, with no gaps.
    #[test]
    fn mapped_results_follow_hit_order((keys, hydrated) in hits_and_hydrated()) {
        let engine = SphinxEngine::new(Arc::new(NullExecutor));
        let source = FixedSource(hydrated.iter().copied().map(Doc).collect());
        let raw = raw_set(&keys);

        let results = runtime()
            .block_on(engine.map(&SearchQuery::new("docs", "q"), &raw, &source))
            .unwrap();

        let present: HashSet<u64> = hydrated.iter().copied().collect();
        let expected: Vec<u64> = keys.iter().copied().filter(|k| present.contains(k)).collect();
        let actual: Vec<u64> = results.iter().map(|d| d.0).collect();

        prop_assert_eq!(results.len(), hydrated.len());
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(results.total, keys.len() as u64);
    }

    /// Hydrated records that were never hits are not returned.
    #[test]
    fn unrequested_records_are_dropped(keys in prop::collection::vec(1u64..1000, 0..32)) {
        let engine = SphinxEngine::new(Arc::new(NullExecutor));
        let strangers: Vec<Doc> = (5000u64..5010).map(Doc).collect();
        let raw = raw_set(&keys);

        let results = runtime()
            .block_on(engine.map(&SearchQuery::new("docs", "q"), &raw, &FixedSource(strangers)))
            .unwrap();

        prop_assert!(results.is_empty());
    }
}
