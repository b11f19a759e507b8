//! The SAT back end behind the configuration generator.
//!
//! The generator needs two things of a solver which plain SAT interfaces do not
//! offer together:
//!
//! - *Stacked clause contexts.* Clauses are added in layers (axioms, then the fixed
//!   predecessor, then the chosen structure), and the upper layers are discarded and
//!   replaced many times while the lower layers persist.
//! - *All-model iteration.* Each prepared formula is not decided but drained:
//!   every satisfying assignment is visited exactly once.
//!
//! The [ClauseContexts] trait captures exactly this surface, and three conforming
//! back ends are provided:
//!
//! | back end | selected by | module |
//! |---|---|---|
//! | watched-literal DPLL | default | [dpll] |
//! | varisat adapter | feature `external` | [external] |
//! | OBDD enumerator | feature `bdd` | [bdd] |
//!
//! At most one back end is active; the [Backend] alias names it.

pub mod dpll;

#[cfg(feature = "bdd")]
pub mod bdd;

#[cfg(feature = "external")]
pub mod external;

#[cfg(all(feature = "bdd", feature = "external"))]
compile_error!("at most one of the `bdd` and `external` back ends may be selected");

use crate::structures::{clause::Clause, literal::Variable};

/// Incremental CNF solving with scoped clause contexts and next-model iteration.
///
/// The expected lifecycle is: add root clauses, then any number of rounds of
/// [push_context](Self::push_context) / [add_clauses](Self::add_clauses) /
/// [pop_to](Self::pop_to), each round finished by a single call to
/// [prepare](Self::prepare) followed by draining [next_model](Self::next_model).
pub trait ClauseContexts {
    /// A solver over `variables` variables, holding no clauses.
    fn new(variables: usize) -> Self
    where
        Self: Sized;

    /// Discard all clauses, contexts, and internal state.
    fn reset(&mut self);

    /// Append a batch of clauses to the current context.
    ///
    /// A batch which is plainly unsatisfiable (an empty clause) latches a conflict:
    /// every model query fails until the offending context is popped.
    fn add_clauses(&mut self, batch: &[Clause]);

    /// Begin a nested context; clauses added afterwards belong to it.
    fn push_context(&mut self);

    /// Discard every context above level `k` together with its clauses.
    fn pop_to(&mut self, k: usize);

    /// Finish adding clauses for the coming next-model loop.
    fn prepare(&mut self);

    /// Advance to the next satisfying assignment distinct from all previously
    /// returned ones within the current [prepare](Self::prepare) cycle.
    ///
    /// Every assignment is visited exactly once before `false` is returned, unless
    /// the run is interrupted.
    fn next_model(&mut self) -> bool;

    /// The value of `variable` in the last model.
    fn value(&self, variable: Variable) -> bool;
}

/// The active back end.
#[cfg(feature = "bdd")]
pub type Backend = bdd::BddSolver;

/// The active back end.
#[cfg(feature = "external")]
pub type Backend = external::ExternalSolver;

/// The active back end.
#[cfg(not(any(feature = "bdd", feature = "external")))]
pub type Backend = dpll::DpllSolver;
