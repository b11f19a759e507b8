//! Precomputed cyclic rotation sets.
//!
//! The automorphism group of a convex polygon on `n` labelled points is exactly the
//! `n` cyclic rotations of the labels, and, when reflections are identified, the `n`
//! rotations of the reversed labels as well.
//! These sets seed every enumeration at the triangle and re-enter whenever a
//! configuration in convex position is certified, so they are computed once per run
//! and handed out as shared sets.

use std::sync::Arc;

use crate::structures::permutation::{identity, PermutationSet};

#[cfg(feature = "order-types")]
use crate::structures::permutation::reversal;

/// The cyclic (and, for order types, mirrored-cyclic) rotations for every size up to
/// a fixed limit.
pub struct CyclicStore {
    cyclic: Vec<Arc<PermutationSet>>,

    #[cfg(feature = "order-types")]
    mirrored: Vec<Arc<PermutationSet>>,
}

fn rotation_closure(mut seed: Vec<u32>, size: u32) -> PermutationSet {
    let mut set = PermutationSet::with_capacity(size as usize);
    set.push(seed.clone());
    for _ in 1..size {
        seed.rotate_left(1);
        set.push(seed.clone());
    }
    set
}

impl CyclicStore {
    /// Precompute the rotation sets for every `size <= limit`.
    pub fn new(limit: u32) -> Self {
        CyclicStore {
            cyclic: (0..=limit)
                .map(|size| Arc::new(rotation_closure(identity(size), size)))
                .collect(),

            #[cfg(feature = "order-types")]
            mirrored: (0..=limit)
                .map(|size| Arc::new(rotation_closure(reversal(size), size)))
                .collect(),
        }
    }

    /// The `size` rotations of `[0..size]`, by shared reference.
    pub fn rotations(&self, size: u32) -> &Arc<PermutationSet> {
        &self.cyclic[size as usize]
    }

    /// The `size` rotations of `[size-1..0]`, by shared reference.
    #[cfg(feature = "order-types")]
    pub fn mirrored_rotations(&self, size: u32) -> &Arc<PermutationSet> {
        &self.mirrored[size as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_of_four() {
        let store = CyclicStore::new(4);
        let rotations = store.rotations(4);
        assert_eq!(rotations.len(), 4);
        assert_eq!(rotations[0], vec![0, 1, 2, 3]);
        assert_eq!(rotations[1], vec![1, 2, 3, 0]);
        assert_eq!(rotations[3], vec![3, 0, 1, 2]);
    }

    #[cfg(feature = "order-types")]
    #[test]
    fn mirrored_rotations_of_three() {
        let store = CyclicStore::new(3);
        let rotations = store.mirrored_rotations(3);
        assert_eq!(rotations.len(), 3);
        assert_eq!(rotations[0], vec![2, 1, 0]);
        assert_eq!(rotations[1], vec![1, 0, 2]);
    }
}
