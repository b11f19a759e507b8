//! A watched-literal DPLL solver with stacked clause contexts and next-model
//! iteration.
//!
//! # Search
//!
//! Assignments are pushed on a trail with a level per literal (see [valuation]).
//! Decisions take the lowest undecided variable with negative polarity, so models are
//! produced in ascending order of their assignment read as a bit string, which is the
//! order the enumeration drivers rely on when printing.
//! On conflict the solver backtracks chronologically: the most recent decision is
//! flipped and re-pushed one level down as a forced literal.
//!
//! Model enumeration reuses the same machinery.
//! After a model is returned the next search starts from a manufactured conflict, so
//! the most recent decision is flipped; once every decision has been tried with both
//! polarities the search space is exhausted and the iteration ends.
//! No explicit blocking clauses are ever added.
//!
//! # Watched literals
//!
//! Every long clause watches the two literals at its first two positions, and the
//! watch lists are indexed by the *opposite* of the watched literal: when a literal
//! is set, only the clauses in which its negation is watched need attention.
//! Clauses which are not currently watched (because they were just added, or because
//! they are satisfied at the root level) sit in inactive lists keyed by their first
//! literal, and [prepare](ClauseContexts::prepare) moves them back into play.
//!
//! # Contexts
//!
//! A context checkpoint records the current lengths of the long-clause and unit
//! arrays.
//! Popping truncates both and unhooks the removed clauses from whichever watch or
//! inactive list they sit in.
//! An empty clause latches a conflict together with the context level which added
//! it; the latch clears when that level is popped.

pub mod valuation;

use crate::{
    backend::ClauseContexts,
    misc::log::targets,
    structures::{
        clause::Clause,
        literal::{Literal, Variable},
    },
};

use valuation::Valuation;

pub struct DpllSolver {
    valuation: Valuation,

    /// Long clauses, owned. Watches are the first two literals of each clause.
    clauses: Vec<Clause>,

    /// Unit clauses, as bare literals.
    units: Vec<Literal>,

    /// For each literal code, the long clauses watching that literal.
    watch_lists: Vec<Vec<usize>>,

    /// For each literal code, the long clauses parked under that first literal.
    inactive_lists: Vec<Vec<usize>>,

    /// Context checkpoints into `clauses`.
    clause_marks: Vec<usize>,

    /// Context checkpoints into `units`.
    unit_marks: Vec<usize>,

    /// The context level at which an empty clause was added, if any.
    empty_clause_context: Option<usize>,

    conflict: bool,

    /// The next trail position to propagate from.
    pending: usize,

    /// The variable from which the next decision scan starts.
    next_decision: Variable,

    /// Whether the previous search returned a model, which the next search must
    /// then exclude by flipping its most recent decision.
    model_returned: bool,
}

impl DpllSolver {
    fn set_units(&mut self) {
        for position in 0..self.units.len() {
            let literal = self.units[position];
            match self.valuation.literal_value(literal) {
                Some(false) => {
                    self.conflict = true;
                    return;
                }
                None => self.valuation.push(literal, false),
                Some(true) => {}
            }
        }
    }

    /// Move inactive clauses back into the watch lists, under the current root
    /// assignment: satisfied clauses are re-parked under a true literal, unit and
    /// falsified clauses are detected, everything else watches its first two
    /// literals.
    fn set_watch_lists(&mut self) {
        for code in 0..self.inactive_lists.len() {
            if self.valuation.literal_value(Literal::from_index(code)) == Some(true) {
                continue;
            }

            let mut list = std::mem::take(&mut self.inactive_lists[code]);
            let mut kept = 0;

            for position in 0..list.len() {
                let clause_index = list[position];

                let mut satisfied_at = None;
                let mut found_undefined = false;
                for (i, literal) in self.clauses[clause_index].iter().enumerate() {
                    match self.valuation.literal_value(*literal) {
                        Some(true) => {
                            satisfied_at = Some(i);
                            break;
                        }
                        None => found_undefined = true,
                        Some(false) => {}
                    }
                }

                if let Some(i) = satisfied_at {
                    let front = {
                        let clause = &mut self.clauses[clause_index];
                        clause.swap(0, i);
                        clause[0]
                    };
                    self.inactive_lists[front.index()].push(clause_index);
                    continue;
                }

                if !found_undefined {
                    self.conflict = true;
                    for rest in position..list.len() {
                        list[kept] = list[rest];
                        kept += 1;
                    }
                    list.truncate(kept);
                    self.inactive_lists[code] = list;
                    return;
                }

                let (first, second) = {
                    let clause = &self.clauses[clause_index];
                    (clause[0], clause[1])
                };
                self.watch_lists[first.index()].push(clause_index);
                self.watch_lists[second.index()].push(clause_index);
            }

            list.truncate(kept);
            self.inactive_lists[code] = list;
        }
    }

    /// Park clauses satisfied under the root assignment, keyed by a true literal.
    /// Each such clause appears in two watch lists; the occurrence under the larger
    /// literal code does the parking and the other is simply dropped.
    fn simplify(&mut self) {
        for code in 0..self.watch_lists.len() {
            let mut list = std::mem::take(&mut self.watch_lists[code]);
            let mut kept = 0;

            for position in 0..list.len() {
                let clause_index = list[position];

                let satisfied_at = {
                    let clause = &self.clauses[clause_index];
                    (0..clause.len())
                        .find(|&i| self.valuation.literal_value(clause[i]) == Some(true))
                };

                match satisfied_at {
                    None => {
                        list[kept] = list[position];
                        kept += 1;
                    }
                    Some(i) => {
                        let larger_watch = {
                            let clause = &self.clauses[clause_index];
                            std::cmp::max(clause[0].index(), clause[1].index())
                        };
                        if code != larger_watch {
                            continue;
                        }
                        let front = {
                            let clause = &mut self.clauses[clause_index];
                            if i != 0 {
                                clause.swap(0, i);
                            }
                            clause[0]
                        };
                        self.inactive_lists[front.index()].push(clause_index);
                    }
                }
            }

            list.truncate(kept);
            self.watch_lists[code] = list;
        }
    }

    /// Exhaust the consequences of the trail literals from `pending` onwards,
    /// updating watches, queuing forced literals, or detecting a conflict.
    fn propagate(&mut self) {
        if self.conflict {
            return;
        }

        while self.pending < self.valuation.trail_length() {
            let literal = self.valuation.trail_literal(self.pending);
            let opposite = literal.negated();

            let mut list = std::mem::take(&mut self.watch_lists[opposite.index()]);
            let mut kept = 0;
            let mut index = 0;

            while index < list.len() {
                let clause_index = list[index];

                let alternative = {
                    let clause = &self.clauses[clause_index];
                    (2..clause.len())
                        .find(|&p| self.valuation.literal_value(clause[p]) != Some(false))
                };

                match alternative {
                    Some(p) => {
                        // Move the watch to the alternative literal.
                        let replacement = {
                            let clause = &mut self.clauses[clause_index];
                            let replacement = clause[p];
                            if clause[0] == opposite {
                                clause.swap(0, p);
                            } else {
                                clause.swap(1, p);
                            }
                            replacement
                        };
                        self.watch_lists[replacement.index()].push(clause_index);
                    }

                    None => {
                        // Every other literal is false, so the clause asserts its
                        // other watch, or conflicts.
                        let other = {
                            let clause = &self.clauses[clause_index];
                            if clause[0] == opposite {
                                clause[1]
                            } else {
                                clause[0]
                            }
                        };

                        list[kept] = clause_index;
                        kept += 1;

                        match self.valuation.literal_value(other) {
                            Some(false) => {
                                for rest in index + 1..list.len() {
                                    list[kept] = list[rest];
                                    kept += 1;
                                }
                                list.truncate(kept);
                                self.watch_lists[opposite.index()] = list;
                                self.conflict = true;
                                return;
                            }
                            None => self.valuation.push(other, false),
                            Some(true) => {}
                        }
                    }
                }

                index += 1;
            }

            list.truncate(kept);
            self.watch_lists[opposite.index()] = list;
            self.pending += 1;
        }
    }

    fn choose_decision(&mut self) -> Option<Literal> {
        let count = self.valuation.variable_count() as Variable;
        while self.next_decision < count {
            if self.valuation.value_of(self.next_decision).is_none() {
                let literal = Literal::new(self.next_decision, false);
                self.next_decision += 1;
                return Some(literal);
            }
            self.next_decision += 1;
        }
        None
    }

    /// Flip the most recent decision, re-pushed one level down as a forced literal.
    fn apply_backtrack(&mut self) {
        let decision = self.valuation.backtrack();
        self.valuation.push(decision.negated(), false);
        self.pending = self.valuation.trail_length() - 1;
        self.next_decision = decision.variable() + 1;
        self.conflict = false;
    }
}

impl ClauseContexts for DpllSolver {
    fn new(variables: usize) -> Self {
        DpllSolver {
            valuation: Valuation::new(variables),
            clauses: Vec::new(),
            units: Vec::new(),
            watch_lists: vec![Vec::new(); variables << 1],
            inactive_lists: vec![Vec::new(); variables << 1],
            clause_marks: Vec::new(),
            unit_marks: Vec::new(),
            empty_clause_context: None,
            conflict: false,
            pending: 0,
            next_decision: 0,
            model_returned: false,
        }
    }

    fn reset(&mut self) {
        *self = DpllSolver::new(self.valuation.variable_count());
    }

    fn add_clauses(&mut self, batch: &[Clause]) {
        for clause in batch {
            if clause.is_empty() {
                log::trace!(target: targets::BACKEND, "Empty clause added, conflict latched.");
                self.conflict = true;
                self.empty_clause_context = Some(self.clause_marks.len());
                return;
            }

            if clause.len() == 1 {
                self.units.push(clause[0]);
                continue;
            }

            let clause_index = self.clauses.len();
            self.inactive_lists[clause[0].index()].push(clause_index);
            self.clauses.push(clause.clone());
        }
    }

    fn push_context(&mut self) {
        self.clause_marks.push(self.clauses.len());
        self.unit_marks.push(self.units.len());
    }

    fn pop_to(&mut self, k: usize) {
        if k >= self.clause_marks.len() {
            return;
        }

        while self.clauses.len() > self.clause_marks[k] {
            let clause_index = self.clauses.len() - 1;
            let (first, second) = {
                let clause = &self.clauses[clause_index];
                (clause[0], clause[1])
            };

            // A long clause is either watched by its first two literals or parked in
            // the inactive list of its first.
            let watched = self.watch_lists[first.index()]
                .iter()
                .position(|&index| index == clause_index);
            match watched {
                Some(position) => {
                    self.watch_lists[first.index()].remove(position);
                    if let Some(position) = self.watch_lists[second.index()]
                        .iter()
                        .position(|&index| index == clause_index)
                    {
                        self.watch_lists[second.index()].remove(position);
                    }
                }
                None => {
                    if let Some(position) = self.inactive_lists[first.index()]
                        .iter()
                        .position(|&index| index == clause_index)
                    {
                        self.inactive_lists[first.index()].remove(position);
                    }
                }
            }

            self.clauses.pop();
        }
        self.clause_marks.truncate(k);

        self.units.truncate(self.unit_marks[k]);
        self.unit_marks.truncate(k);

        if let Some(context) = self.empty_clause_context {
            if context > self.clause_marks.len() {
                self.empty_clause_context = None;
            }
        }
    }

    fn prepare(&mut self) {
        self.conflict = self.empty_clause_context.is_some();
        self.model_returned = false;
        self.pending = 0;
        self.next_decision = 0;
        self.valuation.clear();

        self.set_units();
        self.set_watch_lists();
        self.propagate();
        if !self.conflict {
            self.simplify();
        }
    }

    fn next_model(&mut self) -> bool {
        if self.model_returned {
            // Exclude the model just returned by forcing a backtrack.
            self.conflict = true;
        }

        let mut simplified = true;
        loop {
            self.propagate();

            if self.conflict {
                if self.valuation.level() > 0 {
                    self.apply_backtrack();
                    if self.valuation.level() == 0 {
                        simplified = false;
                    }
                } else {
                    return false;
                }
            } else {
                if !simplified && self.valuation.level() == 0 {
                    self.simplify();
                    simplified = true;
                }

                match self.choose_decision() {
                    Some(literal) => self.valuation.push(literal, true),
                    None => {
                        self.model_returned = true;
                        return true;
                    }
                }
            }
        }
    }

    fn value(&self, variable: Variable) -> bool {
        self.valuation.value_of(variable) == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(int: i64) -> Literal {
        Literal::from_dimacs(int)
    }

    fn drain(solver: &mut DpllSolver) -> usize {
        let mut count = 0;
        while solver.next_model() {
            count += 1;
        }
        count
    }

    #[test]
    fn free_variables_have_all_models() {
        let mut solver = DpllSolver::new(3);
        solver.prepare();
        assert_eq!(drain(&mut solver), 8);
        // Exhausted until prepared again.
        assert!(!solver.next_model());
    }

    #[test]
    fn models_in_ascending_bit_order() {
        let mut solver = DpllSolver::new(2);
        solver.prepare();
        let mut models = Vec::new();
        while solver.next_model() {
            models.push((solver.value(0), solver.value(1)));
        }
        assert_eq!(
            models,
            vec![(false, false), (false, true), (true, false), (true, true)]
        );
    }

    #[test]
    fn clauses_prune_models() {
        let mut solver = DpllSolver::new(3);
        solver.add_clauses(&[vec![literal(1), literal(2)]]);
        solver.prepare();
        assert_eq!(drain(&mut solver), 6);
    }

    #[test]
    fn unsatisfiable() {
        let mut solver = DpllSolver::new(2);
        solver.add_clauses(&[
            vec![literal(1), literal(2)],
            vec![literal(-1), literal(2)],
            vec![literal(1), literal(-2)],
            vec![literal(-1), literal(-2)],
        ]);
        solver.prepare();
        assert!(!solver.next_model());
    }

    #[test]
    fn units_propagate() {
        let mut solver = DpllSolver::new(3);
        solver.add_clauses(&[
            vec![literal(1)],
            vec![literal(-1), literal(2)],
            vec![literal(-2), literal(3)],
        ]);
        solver.prepare();
        assert!(solver.next_model());
        assert!(solver.value(0));
        assert!(solver.value(1));
        assert!(solver.value(2));
        assert!(!solver.next_model());
    }

    #[test]
    fn contexts_scope_clauses() {
        let mut solver = DpllSolver::new(2);
        solver.add_clauses(&[vec![literal(1), literal(2)]]);

        solver.push_context();
        solver.add_clauses(&[vec![literal(-1)], vec![literal(-2)]]);
        solver.prepare();
        assert!(!solver.next_model());

        // Popping the units restores satisfiability.
        solver.pop_to(0);
        solver.prepare();
        assert_eq!(drain(&mut solver), 3);
    }

    #[test]
    fn empty_clause_latches_until_popped() {
        let mut solver = DpllSolver::new(2);
        solver.push_context();
        solver.add_clauses(&[vec![]]);
        solver.prepare();
        assert!(!solver.next_model());

        solver.pop_to(0);
        solver.prepare();
        assert_eq!(drain(&mut solver), 4);
    }

    #[test]
    fn long_clauses_survive_context_cycles() {
        let mut solver = DpllSolver::new(3);
        solver.add_clauses(&[vec![literal(1), literal(2), literal(3)]]);

        for _ in 0..3 {
            solver.push_context();
            solver.add_clauses(&[vec![literal(-1)], vec![literal(-2)]]);
            solver.prepare();
            // 1 and 2 false, so 3 is forced.
            assert!(solver.next_model());
            assert!(solver.value(2));
            assert!(!solver.next_model());
            solver.pop_to(0);
        }

        solver.prepare();
        assert_eq!(drain(&mut solver), 7);
    }
}
