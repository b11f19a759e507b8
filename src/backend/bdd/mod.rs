//! An ordered-BDD back end which enumerates solutions by walking satisfying paths.
//!
//! Clause batches are buffered per context rather than solved eagerly.
//! [prepare](ClauseContexts::prepare) conjoins everything into a single root BDD and
//! plants a [PathCursor](paths::PathCursor) on it; each
//! [next_model](ClauseContexts::next_model) advances the cursor by one satisfying
//! path.
//!
//! The root context holds the axiom clauses, whose conjunction is the expensive part
//! and never changes for a given size, so its BDD is built once and kept behind the
//! arena's persistent boundary; every other node is released before a rebuild.
//!
//! Note, a path fixes only the variables it passes through.
//! Variables absent from a path read as false, so a formula whose models differ only
//! in don't-care variables yields one solution per path, not per model.

pub mod arena;
pub mod paths;

use std::collections::HashMap;

use crate::{
    backend::ClauseContexts,
    misc::log::targets,
    structures::{
        clause::Clause,
        literal::Variable,
    },
};

use arena::{NodeId, Obdd, BOT};
use paths::PathCursor;

pub struct BddSolver {
    dd: Obdd,

    /// Clause batches per context level; level 0 holds the axioms.
    contexts: Vec<Vec<Clause>>,

    /// The conjunction of the level 0 clauses, built once.
    persistent_root: Option<NodeId>,

    cursor: Option<PathCursor>,

    values: Vec<bool>,

    /// The context level at which an empty clause was added, if any.
    empty_clause_context: Option<usize>,
}

impl ClauseContexts for BddSolver {
    fn new(variables: usize) -> Self {
        BddSolver {
            dd: Obdd::new(),
            contexts: vec![Vec::new()],
            persistent_root: None,
            cursor: None,
            values: vec![false; variables],
            empty_clause_context: None,
        }
    }

    fn reset(&mut self) {
        self.dd.release_subarena(false);
        self.contexts.clear();
        self.contexts.push(Vec::new());
        self.persistent_root = None;
        self.cursor = None;
        self.values.iter_mut().for_each(|v| *v = false);
        self.empty_clause_context = None;
    }

    fn add_clauses(&mut self, batch: &[Clause]) {
        for clause in batch {
            if clause.is_empty() {
                self.empty_clause_context = Some(self.contexts.len() - 1);
                return;
            }
            self.contexts.last_mut().unwrap().push(clause.clone());
        }
    }

    fn push_context(&mut self) {
        self.contexts.push(Vec::new());
    }

    fn pop_to(&mut self, k: usize) {
        self.contexts.truncate(k + 1);
        self.cursor = None;
        if let Some(context) = self.empty_clause_context {
            if context >= self.contexts.len() {
                self.empty_clause_context = None;
            }
        }
    }

    fn prepare(&mut self) {
        self.dd.release_subarena(true);
        self.cursor = None;

        if self.empty_clause_context.is_some() {
            return;
        }

        let mut cache = HashMap::new();

        let persistent = match self.persistent_root {
            Some(root) => root,
            None => {
                let mut root = arena::TOP;
                for index in 0..self.contexts[0].len() {
                    let clause = self.dd.clause(&self.contexts[0][index]);
                    root = self.dd.conjoin(root, clause, &mut cache);
                }
                self.dd.mark_persistent();
                self.persistent_root = Some(root);
                log::debug!(
                    target: targets::BACKEND,
                    "Axiom BDD built: {} clauses, root {root}.",
                    self.contexts[0].len(),
                );
                root
            }
        };

        let mut root = persistent;
        for level in 1..self.contexts.len() {
            for index in 0..self.contexts[level].len() {
                if root == BOT {
                    break;
                }
                let clause = self.dd.clause(&self.contexts[level][index]);
                root = self.dd.conjoin(root, clause, &mut cache);
            }
        }

        self.cursor = Some(PathCursor::new(root));
    }

    fn next_model(&mut self) -> bool {
        let Some(cursor) = self.cursor.as_mut() else {
            return false;
        };
        if !cursor.advance(&self.dd) {
            return false;
        }

        self.values.iter_mut().for_each(|v| *v = false);
        for (variable, value) in cursor.assignment() {
            if (variable as usize) < self.values.len() {
                self.values[variable as usize] = value;
            }
        }
        true
    }

    fn value(&self, variable: Variable) -> bool {
        self.values[variable as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::Literal;

    fn literal(int: i64) -> Literal {
        Literal::from_dimacs(int)
    }

    #[test]
    fn paths_under_contexts() {
        let mut solver = BddSolver::new(2);
        solver.add_clauses(&[vec![literal(1), literal(2)]]);

        solver.push_context();
        solver.add_clauses(&[vec![literal(-1)]]);
        solver.prepare();

        let mut count = 0;
        while solver.next_model() {
            assert!(!solver.value(0));
            assert!(solver.value(1));
            count += 1;
        }
        assert_eq!(count, 1);

        // The axiom layer persists, the unit goes.
        solver.pop_to(0);
        solver.prepare();
        let mut count = 0;
        while solver.next_model() {
            count += 1;
        }
        // Three models in two paths: 1 set with 2 a don't-care, and 01.
        assert_eq!(count, 2);
    }

    #[test]
    fn empty_clause_is_conflict() {
        let mut solver = BddSolver::new(2);
        solver.push_context();
        solver.add_clauses(&[vec![]]);
        solver.prepare();
        assert!(!solver.next_model());

        solver.pop_to(0);
        solver.prepare();
        assert!(solver.next_model());
    }
}
