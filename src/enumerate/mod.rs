//! The enumeration drivers.
//!
//! Both drivers thread the same loop: for every canonical configuration of one
//! size, fix it in the [generator](crate::generator), enumerate the candidates of
//! each augmented structure, and filter them through the
//! [canonicality engine](crate::canonical).
//! A certified configuration carries two automorphism sets forward: the set it was
//! certified against becomes the 'previous' set of its own children, and the
//! harvested set serves children which start a new innermost hull.
//!
//! - [bfs] keeps every configuration of one size while producing the next, and
//!   reports a summary line per size.
//! - [dfs] holds a single chain of configurations, reports only the limit size, and
//!   optionally fans out over independent subtrees (feature `parallel`).

pub mod bfs;
pub mod dfs;

use crate::structures::permutation::AutomorphismSets;

#[cfg(feature = "print")]
use crate::structures::configuration::Configuration;

/// A count of canonical configurations, together with how many of them are their
/// own mirror image.
///
/// Combining tallies is commutative addition of both components, which is what the
/// parallel driver's reduction relies on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub configurations: u64,
    pub mirror_symmetric: u64,
}

impl Tally {
    /// Count one certified configuration with the given automorphism sets.
    pub fn count(&mut self, own: &AutomorphismSets) {
        self.configurations += 1;

        #[cfg(feature = "order-types")]
        if !own.mirrored.is_empty() {
            self.mirror_symmetric += 1;
        }
        #[cfg(not(feature = "order-types"))]
        let _ = own;
    }
}

impl std::ops::Add for Tally {
    type Output = Tally;

    fn add(self, other: Tally) -> Tally {
        Tally {
            configurations: self.configurations + other.configurations,
            mirror_symmetric: self.mirror_symmetric + other.mirror_symmetric,
        }
    }
}

impl std::ops::AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        *self = *self + other;
    }
}

/// The summary line for one size.
pub fn summary_line(size: u32, tally: Tally, structures: Option<usize>) -> String {
    let mut line = format!("Configs of size {size}: {}", tally.configurations);

    #[cfg(feature = "order-types")]
    line.push_str(&format!(" (mirror-symmetric: {})", tally.mirror_symmetric));

    if let Some(count) = structures {
        line.push_str(&format!(" (num of structs: {count})"));
    }
    line
}

/// Stable merge of two streams pre-sorted by configuration, for the print mode's
/// ascending listing.
#[cfg(feature = "print")]
pub fn merge_by_configuration<T>(
    left: Vec<T>,
    right: Vec<T>,
    conf: impl Fn(&T) -> &Configuration,
) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => conf(a) <= conf(b),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if take_left {
            merged.push(left.next().unwrap());
        } else {
            merged.push(right.next().unwrap());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_reduce_by_addition() {
        let a = Tally { configurations: 3, mirror_symmetric: 1 };
        let b = Tally { configurations: 4, mirror_symmetric: 2 };
        assert_eq!(a + b, b + a);
        assert_eq!((a + b).configurations, 7);
    }

    #[cfg(not(feature = "order-types"))]
    #[test]
    fn summary_formats() {
        let tally = Tally { configurations: 16, mirror_symmetric: 0 };
        assert_eq!(summary_line(6, tally, None), "Configs of size 6: 16");
        assert_eq!(
            summary_line(6, tally, Some(9)),
            "Configs of size 6: 16 (num of structs: 9)"
        );
    }

    #[cfg(feature = "order-types")]
    #[test]
    fn summary_formats_mirror() {
        let tally = Tally { configurations: 14, mirror_symmetric: 12 };
        assert_eq!(
            summary_line(6, tally, None),
            "Configs of size 6: 14 (mirror-symmetric: 12)"
        );
    }
}
