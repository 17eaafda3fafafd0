//! Ready-made [`Data`] instances.
//!
//! [`Folded<C>`] stores a value and the combination of all of the values in its subtree,
//! where the combination is given by an associative [`Combine`] instance.
//! Sums, minimums, maximums and gcds are provided; any other associative
//! operation can be plugged in by implementing [`Combine`].

use super::*;
use std::fmt;
use std::marker::PhantomData;

/// An associative operation over values. It doesn't need to be commutative.
pub trait Combine {
    type Value: Clone;
    fn combine(left: &Self::Value, right: &Self::Value) -> Self::Value;
}

/// A value, together with the combination of all of the values in its subtree.
pub struct Folded<C: Combine> {
    pub value: C::Value,
    /// The combination of all values in the subtree, in order.
    /// Only meaningful after the node has been rebuilt, which the trees do by themselves.
    pub aggregate: C::Value,
}

impl<C: Combine> Folded<C> {
    pub fn new(value: C::Value) -> Self {
        Folded {
            aggregate: value.clone(),
            value,
        }
    }
}

// the derived instances would require `C` itself to implement the traits
impl<C: Combine> Clone for Folded<C> {
    fn clone(&self) -> Self {
        Folded {
            value: self.value.clone(),
            aggregate: self.aggregate.clone(),
        }
    }
}

impl<C: Combine> Copy for Folded<C> where C::Value: Copy {}

impl<C: Combine> Default for Folded<C>
where
    C::Value: Default,
{
    fn default() -> Self {
        Folded::new(Default::default())
    }
}

impl<C: Combine> PartialEq for Folded<C>
where
    C::Value: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.aggregate == other.aggregate
    }
}

impl<C: Combine> Eq for Folded<C> where C::Value: Eq {}

impl<C: Combine> fmt::Debug for Folded<C>
where
    C::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Folded")
            .field("value", &self.value)
            .field("aggregate", &self.aggregate)
            .finish()
    }
}

impl<C: Combine> Data for Folded<C> {
    fn rebuild_data(&mut self, left: Option<&Self>, right: Option<&Self>) {
        let mut aggregate = self.value.clone();
        if let Some(left) = left {
            aggregate = C::combine(&left.aggregate, &aggregate);
        }
        if let Some(right) = right {
            aggregate = C::combine(&aggregate, &right.aggregate);
        }
        self.aggregate = aggregate;
    }
}

/// Values are their own keys.
impl<C: Combine> Keyed for Folded<C>
where
    C::Value: Ord,
{
    type Key = C::Value;
    fn key(&self) -> &C::Value {
        &self.value
    }
}

/// Addition.
pub struct SumOf<T>(PhantomData<T>);

impl<T> Combine for SumOf<T>
where
    T: Clone + std::ops::Add<Output = T>,
{
    type Value = T;
    fn combine(left: &T, right: &T) -> T {
        left.clone() + right.clone()
    }
}

/// Minimum.
pub struct MinOf<T>(PhantomData<T>);

impl<T: Clone + Ord> Combine for MinOf<T> {
    type Value = T;
    fn combine(left: &T, right: &T) -> T {
        std::cmp::min(left, right).clone()
    }
}

/// Maximum.
pub struct MaxOf<T>(PhantomData<T>);

impl<T: Clone + Ord> Combine for MaxOf<T> {
    type Value = T;
    fn combine(left: &T, right: &T) -> T {
        std::cmp::max(left, right).clone()
    }
}

/// Greatest common divisor. `gcd(0, x) = x`, so zeros don't affect the result.
pub struct GcdOf;

impl Combine for GcdOf {
    type Value = u64;
    fn combine(left: &u64, right: &u64) -> u64 {
        let (mut a, mut b) = (*left, *right);
        while b != 0 {
            let r = a % b;
            a = b;
            b = r;
        }
        a
    }
}

pub type SumNum = Folded<SumOf<i64>>;
pub type MinNum = Folded<MinOf<i64>>;
pub type MaxNum = Folded<MaxOf<i64>>;
pub type GcdNum = Folded<GcdOf>;

#[test]
fn folded_rebuild() {
    let mut node = SumNum::new(5);
    assert_eq!((node.value, node.aggregate), (5, 5));
    node.rebuild_data(Some(&SumNum::new(2)), None);
    assert_eq!(node.aggregate, 7);
    node.rebuild_data(None, None);
    assert_eq!(node.aggregate, 5);

    let mut node = GcdNum::new(12);
    node.rebuild_data(Some(&GcdNum::new(18)), Some(&GcdNum::new(0)));
    assert_eq!(node.aggregate, 6);

    let mut node = MinNum::new(4);
    node.rebuild_data(Some(&MinNum::new(9)), Some(&MinNum::new(-3)));
    assert_eq!(node.aggregate, -3);
    assert_eq!(*node.key(), 4);
}
