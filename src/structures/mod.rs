//! The abstract elements of an enumeration and their representations.
//!
//! - [literal] and [clause] cover the propositional side: variables, packed literals,
//!   and clauses as literal vectors.
//! - [triple] maps ordered point triples to dense variable indices and back.
//! - [configuration], [hull], and [permutation] cover the combinatorial side:
//!   orientation bit vectors, nested hull structures, and label permutations.

pub mod clause;
pub mod configuration;
pub mod hull;
pub mod literal;
pub mod permutation;
pub mod triple;
