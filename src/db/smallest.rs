//! The lexicographically smallest configuration of each size.
//!
//! The all-false vector: every triple clockwise, which is the convex polygon with
//! labels in clockwise cyclic order.
//! It doubles as the canonical representative of convex position and as the template
//! buffer the generator writes models over.

use crate::structures::{configuration::Configuration, triple::triple_count};

/// The all-false configuration for every size up to a fixed limit.
pub struct SmallestConfigurations {
    smallest: Vec<Configuration>,
}

impl SmallestConfigurations {
    /// Precompute the table for every `size <= limit`.
    pub fn new(limit: u32) -> Self {
        SmallestConfigurations {
            smallest: (0..=limit).map(|size| vec![false; triple_count(size)]).collect(),
        }
    }

    /// The smallest configuration of `size` points.
    pub fn configuration(&self, size: u32) -> &Configuration {
        &self.smallest[size as usize]
    }
}
