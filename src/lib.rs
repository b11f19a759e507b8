//! A library for enumerating, up to combinatorial equivalence, the configurations of
//! points in general position in the plane, indexed by their nested convex hull structure.
//!
//! A configuration records the orientation of every ordered triple of point labels as a
//! bit, with a positive bit read as 'counter-clockwise'.
//! Two configurations are equivalent when a relabelling of the points preserves every
//! orientation, and under the `order-types` feature also when a relabelling inverts
//! every orientation.
//!
//! # Orientation
//!
//! Enumeration is incremental in the number of points.
//! A configuration on n points is extended to configurations on n + 1 points by fixing
//! the known orientation bits as unit clauses, constraining the placement of the new
//! point relative to the hull structure, and asking a SAT solver for every model of the
//! resulting formula (see [generator]).
//! Each candidate is then either rejected or certified as the lexicographically
//! smallest member of its equivalence class by a backtracking permutation search which
//! harvests the automorphisms of accepted configurations as it goes (see [canonical]).
//!
//! The pieces are tied together by two drivers (see [enumerate]):
//! - A breadth-first driver which keeps every canonical configuration of one size
//!   while producing the next, together with a lazily expanded graph of hull
//!   structures.
//! - A depth-first driver which holds a single chain of configurations and so runs in
//!   memory proportional to the recursion depth, with optional work-stealing
//!   parallelism over independent subtrees (feature `parallel`).
//!
//! # Back ends
//!
//! The solver behind the generator is exchangeable (see [backend]):
//! - The bundled watched-literal DPLL solver with stacked clause contexts (default).
//! - An adapter over [varisat](https://docs.rs/varisat) (feature `external`).
//! - An ordered-BDD all-solutions enumerator (feature `bdd`).
//!
//! # Logs
//!
//! Diagnostic output goes through [log] under the targets listed in [misc::log]; no
//! implementation is provided by the library.
//! The binaries install [env_logger](https://docs.rs/env_logger), so `RUST_LOG=enumeration=info …`
//! reports progress during a long run.

pub mod backend;
pub mod builder;
pub mod canonical;
pub mod db;
pub mod enumerate;
pub mod generator;
pub mod misc;
pub mod structures;
pub mod types;
