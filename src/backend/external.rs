//! An adapter presenting [varisat](https://docs.rs/varisat) through the
//! [ClauseContexts] interface.
//!
//! # Contexts by activation literal
//!
//! varisat offers assumptions but no clause removal, so clause contexts are realised
//! with the standard activation-literal scheme: each context owns a fresh selector
//! variable `a`, every clause of the context carries the extra disjunct `¬a`, and
//! `a` is assumed while the context is live.
//! Popping a context retires its selector for good with the unit clause `¬a`;
//! selector variables are never reused, so a retired context can never come back to
//! life.
//! Selector variables live above the problem variables and are invisible through
//! [value](ClauseContexts::value).
//!
//! # Model iteration
//!
//! After each model a blocking clause is added over the problem variables not fixed
//! by unit clauses, negating their model values.
//! The blocking clause belongs to the current topmost context (it carries that
//! selector too), so it disappears together with the context that produced it.
//! A per-context stack tracks which variables unit clauses fixed.
//!
//! Solving is deterministic: varisat takes no random seed.

use varisat::{ExtendFormula, Lit, Solver};

use crate::{
    backend::ClauseContexts,
    misc::log::targets,
    structures::{
        clause::Clause,
        literal::{Literal, Variable},
    },
};

/// Which variables are currently fixed by unit clauses, with one level per context.
struct UnitStack {
    fixed: Vec<bool>,
    stack: Vec<Variable>,
    marks: Vec<usize>,
}

impl UnitStack {
    fn new(variables: usize) -> Self {
        UnitStack {
            fixed: vec![false; variables],
            stack: Vec::new(),
            marks: Vec::new(),
        }
    }

    fn is_fixed(&self, variable: Variable) -> bool {
        self.fixed[variable as usize]
    }

    fn fix(&mut self, variable: Variable) {
        self.stack.push(variable);
        self.fixed[variable as usize] = true;
    }

    fn new_level(&mut self) {
        self.marks.push(self.stack.len());
    }

    fn restore_level(&mut self, k: usize) {
        if k >= self.marks.len() {
            return;
        }
        while self.stack.len() > self.marks[k] {
            let variable = self.stack.pop().unwrap();
            self.fixed[variable as usize] = false;
        }
        self.marks.truncate(k);
    }

    fn clear(&mut self) {
        self.fixed.iter_mut().for_each(|f| *f = false);
        self.stack.clear();
        self.marks.clear();
    }
}

pub struct ExternalSolver {
    solver: Solver<'static>,

    /// The last model, over the problem variables only.
    values: Vec<bool>,

    variables: usize,

    /// Selectors of the live contexts, bottom of the stack first.
    selectors: Vec<Lit>,

    /// Total selectors ever allocated; retired selectors are not reused.
    allocated_selectors: usize,

    units: UnitStack,

    /// The context level at which an empty clause was added, if any.
    empty_clause_context: Option<usize>,
}

impl ExternalSolver {
    fn translate(&self, literal: Literal) -> Lit {
        Lit::from_dimacs(literal.as_dimacs() as isize)
    }

    fn fresh_selector(&mut self) -> Lit {
        let dimacs = (self.variables + self.allocated_selectors) as i64 + 1;
        self.allocated_selectors += 1;
        Lit::from_dimacs(dimacs as isize)
    }
}

impl ClauseContexts for ExternalSolver {
    fn new(variables: usize) -> Self {
        ExternalSolver {
            solver: Solver::new(),
            values: vec![false; variables],
            variables,
            selectors: Vec::new(),
            allocated_selectors: 0,
            units: UnitStack::new(variables),
            empty_clause_context: None,
        }
    }

    fn reset(&mut self) {
        self.solver = Solver::new();
        self.values.iter_mut().for_each(|v| *v = false);
        self.selectors.clear();
        self.allocated_selectors = 0;
        self.units.clear();
        self.empty_clause_context = None;
    }

    fn add_clauses(&mut self, batch: &[Clause]) {
        for clause in batch {
            if clause.is_empty() {
                self.empty_clause_context = Some(self.selectors.len());
                return;
            }

            if clause.len() == 1 {
                self.units.fix(clause[0].variable());
            }

            let mut lits: Vec<Lit> =
                clause.iter().map(|literal| self.translate(*literal)).collect();
            if let Some(selector) = self.selectors.last() {
                lits.push(!*selector);
            }
            self.solver.add_clause(&lits);
        }
    }

    fn push_context(&mut self) {
        let selector = self.fresh_selector();
        self.selectors.push(selector);
        self.units.new_level();
    }

    fn pop_to(&mut self, k: usize) {
        while self.selectors.len() > k {
            let selector = self.selectors.pop().unwrap();
            self.solver.add_clause(&[!selector]);
        }
        self.units.restore_level(k);
        if let Some(context) = self.empty_clause_context {
            if context > self.selectors.len() {
                self.empty_clause_context = None;
            }
        }
    }

    fn prepare(&mut self) {
        // Nothing to stage: assumptions are set per solve call.
    }

    fn next_model(&mut self) -> bool {
        if self.empty_clause_context.is_some() {
            return false;
        }

        self.solver.assume(&self.selectors);
        let satisfiable = match self.solver.solve() {
            Ok(answer) => answer,
            Err(e) => {
                log::error!(target: targets::BACKEND, "External solver failed: {e}");
                return false;
            }
        };
        if !satisfiable {
            return false;
        }

        if let Some(model) = self.solver.model() {
            for lit in &model {
                let index = lit.var().index();
                if index < self.variables {
                    self.values[index] = lit.is_positive();
                }
            }
        }

        // Block this model within the current context.
        let mut blocking: Vec<Lit> = Vec::with_capacity(self.variables + 1);
        for variable in 0..self.variables as Variable {
            if self.units.is_fixed(variable) {
                continue;
            }
            let positive = self.values[variable as usize];
            blocking.push(self.translate(Literal::new(variable, !positive)));
        }
        if let Some(selector) = self.selectors.last() {
            blocking.push(!*selector);
        }
        self.solver.add_clause(&blocking);

        true
    }

    fn value(&self, variable: Variable) -> bool {
        self.values[variable as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_models_and_contexts() {
        let mut solver = ExternalSolver::new(2);
        solver.add_clauses(&[vec![
            Literal::from_dimacs(1),
            Literal::from_dimacs(2),
        ]]);

        solver.push_context();
        solver.add_clauses(&[vec![Literal::from_dimacs(-1)]]);
        solver.prepare();

        let mut count = 0;
        while solver.next_model() {
            assert!(!solver.value(0));
            assert!(solver.value(1));
            count += 1;
        }
        assert_eq!(count, 1);

        solver.pop_to(0);
        solver.prepare();
        let mut count = 0;
        while solver.next_model() {
            count += 1;
        }
        assert_eq!(count, 3);
    }
}
