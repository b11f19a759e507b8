//! Permutations of point labels and shared automorphism sets.
//!
//! A permutation of `n` labels is a vector holding each of `0..n` exactly once.
//! Automorphism sets are shared between configuration records through [Arc]: a child
//! configuration keeps the set of the predecessor it was certified against, and many
//! children of one predecessor keep the same set.
//! Sharing through a counted handle replaces both the by-value copies and the
//! interning table of earlier designs, and is what makes the records safe to move
//! across worker threads in the parallel build.

use std::sync::Arc;

/// A permutation of the labels `0..n`.
pub type Permutation = Vec<u32>;

/// A collection of permutations, typically closed under composition.
pub type PermutationSet = Vec<Permutation>;

/// The identity permutation of `size` labels.
pub fn identity(size: u32) -> Permutation {
    (0..size).collect()
}

/// The order-reversing permutation of `size` labels.
#[cfg(feature = "order-types")]
pub fn reversal(size: u32) -> Permutation {
    (0..size).rev().collect()
}

/// The automorphisms of a configuration, or of the sub-configuration obtained by
/// removing its innermost hull.
///
/// Under the `order-types` feature a second set carries the orientation-reversing
/// automorphisms; a configuration with a non-empty mirrored set is its own mirror
/// image, up to relabelling.
#[derive(Clone)]
pub struct AutomorphismSets {
    /// The orientation-preserving automorphisms.
    pub plain: Arc<PermutationSet>,

    /// The orientation-reversing automorphisms.
    #[cfg(feature = "order-types")]
    pub mirrored: Arc<PermutationSet>,
}

impl AutomorphismSets {
    /// Sets holding no permutation at all, as for the predecessor of the triangle.
    pub fn empty() -> Self {
        AutomorphismSets {
            plain: Arc::new(Vec::new()),
            #[cfg(feature = "order-types")]
            mirrored: Arc::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_sorted() {
        assert_eq!(identity(5), vec![0, 1, 2, 3, 4]);
        assert_eq!(identity(0), Vec::<u32>::new());
    }

    #[cfg(feature = "order-types")]
    #[test]
    fn reversal_is_reversed() {
        assert_eq!(reversal(4), vec![3, 2, 1, 0]);
    }
}
