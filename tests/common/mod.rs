use itertools::assert_equal;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use treaps::example_data::SumNum;
use treaps::{KeyedTreap, Ownership, PersistentTreap, PrioritySource, SharedOwnership, Treap};

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Query { start: usize, end: usize },
    Insert { index: usize, value: i64 },
    Delete { index: usize },
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Empty,
    Sum(i64),
    Value(i64),
    Rejected,
}

const MAX_VALUE: i64 = 200;

/// Indices may fall slightly out of bounds, so that rejected calls get tested as well.
pub fn random_round_action(rng: &mut StdRng, len: usize) -> RoundAction {
    use RoundAction::*;
    match rng.gen_range(0..3) {
        // query a segment
        0 => {
            let a = rng.gen_range(0..len + 2);
            let b = rng.gen_range(0..len + 2);
            if rng.gen_ratio(1, 20) {
                Query { start: a, end: b }
            } else {
                Query {
                    start: a.min(b),
                    end: a.max(b),
                }
            }
        }
        // insert a value
        1 => Insert {
            index: rng.gen_range(0..len + 2),
            value: rng.gen_range(-MAX_VALUE..=MAX_VALUE),
        },
        // delete a value
        _ => Delete {
            index: rng.gen_range(0..len + 1),
        },
    }
}

/// Runs the round on the plain vector that serves as the reference.
pub fn run_reference_round(action: &RoundAction, reference: &mut Vec<i64>) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;
    match *action {
        Query { start, end } => {
            if start > end || end >= reference.len() {
                Rejected
            } else {
                Sum(reference[start..=end].iter().sum())
            }
        }
        Insert { index, value } => {
            if index > reference.len() {
                Rejected
            } else {
                reference.insert(index, value);
                Empty
            }
        }
        Delete { index } => {
            if index >= reference.len() {
                Rejected
            } else {
                Value(reference.remove(index))
            }
        }
    }
}

pub fn run_round<O: Ownership<SumNum>>(
    action: &RoundAction,
    tree: &mut Treap<SumNum, O>,
) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;
    let res = match *action {
        Query { start, end } => tree.range_aggregate(start, end).map(|d| Sum(d.aggregate)),
        Insert { index, value } => tree.insert_at(index, SumNum::new(value)).map(|()| Empty),
        Delete { index } => tree.delete_at(index).map(|d| Value(d.value)),
    };
    res.unwrap_or(Rejected)
}

/// The same round on a persistent version, which returns the new version as well.
pub fn run_persistent_round<O: SharedOwnership<SumNum>>(
    action: &RoundAction,
    version: &PersistentTreap<SumNum, O>,
) -> (PersistentTreap<SumNum, O>, RoundResult) {
    use RoundAction::*;
    use RoundResult::*;
    let res = match *action {
        Query { start, end } => version
            .range_aggregate(start, end)
            .map(|d| (version.clone(), Sum(d.aggregate))),
        Insert { index, value } => version
            .insert_at(index, SumNum::new(value))
            .map(|v| (v, Empty)),
        Delete { index } => {
            let value = version.get(index).map(|d| d.value);
            version
                .delete_at(index)
                .map(|v| (v, Value(value.expect("a deleted value was present"))))
        }
    };
    res.unwrap_or_else(|_| (version.clone(), Rejected))
}

const INITIAL_SIZE: i64 = 200;

/// Runs random rounds on a treap and on a reference vector, and checks that they agree.
pub fn check_consistency<O: Ownership<SumNum>>(seed: u64, num_rounds: u32) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut reference: Vec<i64> = (0..INITIAL_SIZE).collect();
    let mut tree: Treap<SumNum, O> = Treap::build(
        reference.iter().map(|&x| SumNum::new(x)),
        PrioritySource::seeded(seed),
    );

    for _ in 0..num_rounds {
        let action = random_round_action(&mut rng, reference.len());
        let expected = run_reference_round(&action, &mut reference);
        let res = run_round(&action, &mut tree);
        assert_eq!(res, expected, "after {:?}", action);
        assert_eq!(tree.len(), reference.len());
        assert_eq!(
            tree.aggregate().map_or(0, |d| d.aggregate),
            reference.iter().sum::<i64>()
        );
        // `O(n)`, but the tree stays small enough
        tree.assert_correctness();
    }
    assert_equal(tree.iter().map(|d| d.value), reference.iter().cloned());
}

/// Like [`check_consistency`], but keeps every version, and checks at the end
/// that all of them still hold what they held when they were created.
pub fn check_persistent_consistency<O: SharedOwnership<SumNum>>(seed: u64, num_rounds: u32) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut reference: Vec<i64> = (0..INITIAL_SIZE).collect();
    let mut version: PersistentTreap<SumNum, O> = PersistentTreap::build(
        reference.iter().map(|&x| SumNum::new(x)),
        PrioritySource::seeded(seed),
    );
    let mut history = vec![(version.clone(), reference.clone())];

    for _ in 0..num_rounds {
        let action = random_round_action(&mut rng, reference.len());
        let expected = run_reference_round(&action, &mut reference);
        let (next, res) = run_persistent_round(&action, &version);
        assert_eq!(res, expected, "after {:?}", action);
        if let RoundResult::Rejected = res {
            assert!(next.ptr_eq(&version));
        }
        version = next;
        history.push((version.clone(), reference.clone()));
    }

    for (version, reference) in &history {
        version.assert_correctness();
        assert_equal(version.iter().map(|d| d.value), reference.iter().cloned());
    }
}

/// Runs the given rounds, reporting a mismatch as a proptest failure.
pub fn check_consistency_proptest<O: Ownership<SumNum>>(
    initial: &[i64],
    actions: &[RoundAction],
) -> Result<(), TestCaseError> {
    let mut reference = initial.to_vec();
    let mut tree: Treap<SumNum, O> = initial.iter().map(|&x| SumNum::new(x)).collect();
    for action in actions {
        let expected = run_reference_round(action, &mut reference);
        let res = run_round(action, &mut tree);
        prop_assert_eq!(res, expected);
        prop_assert_eq!(tree.len(), reference.len());
    }
    tree.assert_correctness();
    prop_assert_eq!(
        tree.iter().map(|d| d.value).collect::<Vec<_>>(),
        reference
    );
    Ok(())
}

/// Keyed rounds: `(true, x)` inserts `x`, `(false, x)` erases one `x`.
pub fn check_keyed_proptest<O: Ownership<SumNum>>(
    actions: &[(bool, i64)],
) -> Result<(), TestCaseError> {
    let mut reference: Vec<i64> = vec![];
    let mut tree: KeyedTreap<SumNum, O> = KeyedTreap::with_seed(actions.len() as u64);
    for &(is_insert, x) in actions {
        if is_insert {
            tree.insert(SumNum::new(x));
            let index = reference.partition_point(|&y| y < x);
            reference.insert(index, x);
        } else {
            let res = tree.erase(&x).map(|d| d.value);
            let index = reference.iter().position(|&y| y == x);
            let expected = index.map(|index| reference.remove(index));
            prop_assert_eq!(res, expected);
        }
        prop_assert_eq!(tree.rank(&x), reference.partition_point(|&y| y < x));
        prop_assert_eq!(tree.count(&x), reference.iter().filter(|&&y| y == x).count());
    }
    tree.assert_correctness();
    prop_assert_eq!(
        tree.iter().map(|d| d.value).collect::<Vec<_>>(),
        reference
    );
    Ok(())
}
