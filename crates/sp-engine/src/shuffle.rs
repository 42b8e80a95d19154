//! Shuffle primitive shared by the roster builder and both allocators

use rand::prelude::*;

/// Uniformly random permutation of `items`, leaving the input untouched.
///
/// Fisher–Yates via [`SliceRandom::shuffle`]: walks from the last index
/// down, swapping each element with one drawn uniformly from `[0, i]`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
