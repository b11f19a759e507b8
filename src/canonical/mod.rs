//! The canonicality test: is a configuration the lexicographically smallest member
//! of its equivalence class?
//!
//! # The search
//!
//! Candidates only ever differ from their predecessor in the innermost hull, and
//! every automorphism of the extended configuration restricts to an automorphism of
//! the predecessor, so it suffices to try the permutations which extend a
//! predecessor automorphism.
//! Each such prefix is completed by a backtracking search over the remaining
//! labels, one position at a time.
//! Placing a label at position `d` determines the images of exactly the triples with
//! largest label `d`, that is, bits `C(d,3)..C(d+1,3)` of the permuted
//! configuration, which are compared against the candidate in triple-index order:
//!
//! - Some permuted bit smaller: a smaller configuration exists; the candidate is
//!   rejected outright.
//! - Some permuted bit larger: this branch can only produce larger configurations;
//!   prune it and try the next label.
//! - All equal: the label joins the `equals` frontier of this depth and the search
//!   recurses.
//!
//! A permutation completed with every prefix equal is an automorphism of the
//! candidate, and is harvested rather than signalled: the sets returned on success
//! seed the canonicality tests one size up.
//!
//! Under the `order-types` feature the whole search runs a second time over the
//! mirrored predecessor automorphisms, with every read bit inverted; a permutation
//! completing that scan is an orientation-reversing automorphism.
//!
//! # Special cases
//!
//! - A single hull (a convex polygon): canonical exactly for the all-false vector,
//!   with the cyclic rotations as automorphisms, in constant time.
//! - A singleton innermost hull over a predecessor with a trivial automorphism
//!   group: the only admissible extension is the identity on the new point, which
//!   reproduces the candidate itself; canonical, one automorphism, no search.

use std::sync::Arc;

use crate::{
    db::Tables,
    misc::{interrupt, log::targets},
    structures::{
        configuration::Configuration,
        permutation::{AutomorphismSets, PermutationSet},
        triple::{triple_count, Triple},
    },
};

/// The canonicality engine, owning the scratch space of the search.
///
/// One engine serves one worker; the `equals` frontier rows are indexed by search
/// depth and sized once from the limit.
pub struct Canonicalizer {
    equals: Vec<Vec<u32>>,
    perm: Vec<u32>,
    harvest: PermutationSet,

    #[cfg(feature = "order-types")]
    mirrored_harvest: PermutationSet,
}

impl Canonicalizer {
    pub fn new(limit: u32) -> Self {
        Canonicalizer {
            equals: vec![Vec::new(); limit as usize + 1],
            perm: Vec::new(),
            harvest: PermutationSet::new(),

            #[cfg(feature = "order-types")]
            mirrored_harvest: PermutationSet::new(),
        }
    }

    /// Decide whether `conf` is canonical with respect to the automorphisms of its
    /// predecessor, returning its own automorphism sets when it is.
    pub fn is_canonical(
        &mut self,
        conf: &Configuration,
        struct_length: usize,
        prev: &AutomorphismSets,
        size: u32,
        tables: &Tables,
    ) -> Option<AutomorphismSets> {
        // Convex polygon: only the smallest configuration survives, and its
        // automorphisms are known outright.
        if struct_length == 1 {
            if conf != tables.smallest.configuration(size) {
                return None;
            }
            return Some(AutomorphismSets {
                plain: Arc::clone(tables.cyclic.rotations(size)),
                #[cfg(feature = "order-types")]
                mirrored: Arc::clone(tables.cyclic.mirrored_rotations(size)),
            });
        }

        // Trivial predecessor group with the new point alone in its hull: the only
        // extension is the identity on the new point, which changes nothing.
        #[cfg(not(feature = "order-types"))]
        let trivial = prev.plain.len() == 1 && prev.plain[0].len() == size as usize - 1;
        #[cfg(feature = "order-types")]
        let trivial = prev.mirrored.is_empty()
            && prev.plain.len() == 1
            && prev.plain[0].len() == size as usize - 1;

        if trivial {
            let mut identity_extension = prev.plain[0].clone();
            identity_extension.push(size - 1);
            return Some(AutomorphismSets {
                plain: Arc::new(vec![identity_extension]),
                #[cfg(feature = "order-types")]
                mirrored: Arc::new(Vec::new()),
            });
        }

        self.harvest.clear();
        #[cfg(feature = "order-types")]
        self.mirrored_harvest.clear();

        for prev_perm in prev.plain.iter() {
            if interrupt::interrupted() {
                log::debug!(target: targets::CANONICAL, "Canonicality scan interrupted.");
                return None;
            }

            let fixed = prev_perm.len();
            self.perm.clear();
            self.perm.extend_from_slice(prev_perm);
            self.perm.extend(fixed as u32..size);

            if self.search_smaller(fixed, conf, false) {
                return None;
            }
        }

        #[cfg(feature = "order-types")]
        for prev_perm in prev.mirrored.iter() {
            if interrupt::interrupted() {
                return None;
            }

            let fixed = prev_perm.len();
            self.perm.clear();
            self.perm.extend_from_slice(prev_perm);
            self.perm.extend(fixed as u32..size);

            if self.search_smaller(fixed, conf, true) {
                return None;
            }
        }

        Some(AutomorphismSets {
            plain: Arc::new(std::mem::take(&mut self.harvest)),
            #[cfg(feature = "order-types")]
            mirrored: Arc::new(std::mem::take(&mut self.mirrored_harvest)),
        })
    }

    /// Try to extend the partial permutation fixed below `depth` into one producing
    /// a configuration smaller than `conf`, collecting automorphisms on the way.
    ///
    /// Returns true as soon as a smaller configuration is witnessed; the working
    /// permutation is left as-is in that case, its arrangement being meaningless to
    /// the caller.
    fn search_smaller(&mut self, depth: usize, conf: &Configuration, mirrored: bool) -> bool {
        let size = self.perm.len();
        self.equals[depth].clear();

        for i in depth..size {
            self.perm.swap(i, depth);
            let mut recurse = true;

            // Positions 0 and 1 determine no triple; from depth 2 on, compare the
            // freshly determined bits C(depth,3)..C(depth+1,3) against conf.
            if depth >= 2 {
                let mut triple = Triple(0, 1, depth as u32);
                for j in triple_count(depth as u32)..triple_count(depth as u32 + 1) {
                    let image = triple.map(&self.perm);
                    let positive = image.is_positive();
                    let bit = conf[image.normalized().position()];
                    let permuted_bit = if positive != mirrored { bit } else { !bit };

                    if !permuted_bit && conf[j] {
                        return true;
                    }
                    if permuted_bit && !conf[j] {
                        recurse = false;
                        break;
                    }

                    triple.advance();
                }
            }

            if recurse {
                self.equals[depth].push(i as u32);
            }

            self.perm.swap(i, depth);
        }

        // A complete permutation with an equal prefix is an automorphism.
        if depth + 1 == size {
            if !self.equals[depth].is_empty() {
                let perm = self.perm.clone();

                #[cfg(feature = "order-types")]
                {
                    if mirrored {
                        self.mirrored_harvest.push(perm);
                    } else {
                        self.harvest.push(perm);
                    }
                }
                #[cfg(not(feature = "order-types"))]
                self.harvest.push(perm);
            }
            return false;
        }

        for index in 0..self.equals[depth].len() {
            let i = self.equals[depth][index] as usize;
            self.perm.swap(i, depth);
            if self.search_smaller(depth + 1, conf, mirrored) {
                return true;
            }
            self.perm.swap(i, depth);
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(plain: PermutationSet) -> AutomorphismSets {
        AutomorphismSets {
            plain: Arc::new(plain),
            #[cfg(feature = "order-types")]
            mirrored: Arc::new(Vec::new()),
        }
    }

    #[test]
    fn convex_polygons_are_canonical_once() {
        let tables = Tables::new(5);
        let mut engine = Canonicalizer::new(5);

        let smallest = tables.smallest.configuration(5).clone();
        let own = engine
            .is_canonical(&smallest, 1, &AutomorphismSets::empty(), 5, &tables)
            .expect("the all-false configuration is canonical");
        assert_eq!(own.plain.len(), 5);

        // Any other single-hull configuration is rejected.
        let mut other = smallest;
        *other.last_mut().unwrap() = true;
        assert!(engine
            .is_canonical(&other, 1, &AutomorphismSets::empty(), 5, &tables)
            .is_none());
    }

    #[test]
    fn interior_point_of_the_triangle() {
        let tables = Tables::new(4);
        let mut engine = Canonicalizer::new(4);

        // The triangle with an interior point: bits fix the point inside each edge
        // of the hull cycle 0, 2, 1.
        let conf = vec![false, false, true, false];
        let prev = sets(tables.cyclic.rotations(3).as_ref().clone());

        let own = engine
            .is_canonical(&conf, 2, &prev, 4, &tables)
            .expect("the interior-point configuration is canonical");

        // All three rotations of the outer triangle fix the configuration.
        assert_eq!(own.plain.len(), 3);
        for perm in own.plain.iter() {
            assert_eq!(perm[3], 3);
        }
    }

    #[test]
    fn trivial_predecessor_short_circuit() {
        let tables = Tables::new(6);
        let mut engine = Canonicalizer::new(6);

        let conf = vec![false; triple_count(6)];
        let prev = sets(vec![vec![0, 1, 2, 3, 4]]);

        let own = engine
            .is_canonical(&conf, 3, &prev, 6, &tables)
            .expect("the identity extension cannot be beaten");
        assert_eq!(own.plain.len(), 1);
        assert_eq!(own.plain[0], vec![0, 1, 2, 3, 4, 5]);
    }
}
