pub mod common;
pub use common::*;

use proptest::prelude::*;
use treaps::{Atomic, Shared, Unique};

/// Indices are drawn up to `len`, so some of them are out of bounds
/// once the tree shrinks below it.
pub fn round_action_strategy(
    len: usize,
    value_strat: impl Strategy<Value = i64> + 'static,
) -> impl Strategy<Value = RoundAction> {
    let range_strat = (0..len, 0..len).prop_map(|(a, b)| (a.min(b), a.max(b)));
    // Delete
    (0..len)
        .prop_map(|index| RoundAction::Delete { index })
        .boxed()
        .prop_union(
            // Insert
            (0..=len, value_strat)
                .prop_map(|(index, value)| RoundAction::Insert { index, value })
                .boxed(),
        )
        // Query
        .or(range_strat
            .prop_map(|(start, end)| RoundAction::Query { start, end })
            .boxed())
}

fn initial_values() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-200..200i64, 0..200)
}

fn params() -> impl Strategy<Value = Vec<RoundAction>> {
    proptest::collection::vec(round_action_strategy(200, -100..100i64), 1..500)
}

fn keyed_params() -> impl Strategy<Value = Vec<(bool, i64)>> {
    proptest::collection::vec((proptest::bool::ANY, -30..30i64), 1..500)
}

proptest::proptest! {
    #[test]
    fn unique_consistency_proptest(initial in initial_values(), array in params()) {
        check_consistency_proptest::<Unique>(&initial, &array)?;
    }

    #[test]
    fn shared_consistency_proptest(initial in initial_values(), array in params()) {
        check_consistency_proptest::<Shared>(&initial, &array)?;
    }

    #[test]
    fn keyed_proptest(array in keyed_params()) {
        check_keyed_proptest::<Unique>(&array)?;
    }
}

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32, .. ProptestConfig::default()
      })]
    #[test]
    fn atomic_consistency_proptest(initial in initial_values(), array in params()) {
        check_consistency_proptest::<Atomic>(&initial, &array)?;
    }

    #[test]
    fn shared_keyed_proptest(array in keyed_params()) {
        check_keyed_proptest::<Shared>(&array)?;
    }
}
