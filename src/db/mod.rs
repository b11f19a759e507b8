//! Read-only tables shared by the drivers.
//!
//! Both tables are precomputed once for the limit size and then only read, so in the
//! parallel build they are shared by reference with no synchronisation.
//! They are plain values owned by whoever runs the enumeration; there is no
//! process-wide state.

pub mod cyclic;
pub mod smallest;

use crate::db::{cyclic::CyclicStore, smallest::SmallestConfigurations};

/// The shared tables, bundled for handing to the canonicality engine.
pub struct Tables {
    pub cyclic: CyclicStore,
    pub smallest: SmallestConfigurations,
}

impl Tables {
    /// Precompute both tables for every size up to and including `limit`.
    pub fn new(limit: u32) -> Self {
        Tables {
            cyclic: CyclicStore::new(limit),
            smallest: SmallestConfigurations::new(limit),
        }
    }
}
