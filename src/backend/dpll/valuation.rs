//! The valuation behind the DPLL solver: variable values plus the trail which
//! produced them.
//!
//! Each trail entry records the decision level at which its literal was set, so
//! backtracking is a walk down the trail un-assigning everything at the current
//! level.
//! The literal returned by [backtrack](Valuation::backtrack) is the last one popped,
//! which by construction is the decision which opened the level.

use crate::structures::literal::{Literal, Variable};

pub struct Valuation {
    values: Vec<Option<bool>>,
    trail: Vec<(Literal, u32)>,
    level: u32,
}

impl Valuation {
    pub fn new(variables: usize) -> Self {
        Valuation {
            values: vec![None; variables],
            trail: Vec::new(),
            level: 0,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.values.len()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn trail_length(&self) -> usize {
        self.trail.len()
    }

    /// The literal at the given trail position.
    pub fn trail_literal(&self, position: usize) -> Literal {
        self.trail[position].0
    }

    /// Set a literal, opening a fresh level when it is a decision.
    pub fn push(&mut self, literal: Literal, decision: bool) {
        if decision {
            self.level += 1;
        }
        self.trail.push((literal, self.level));
        self.values[literal.variable() as usize] = Some(literal.is_positive());
    }

    /// Un-assign everything at the current level and close it, returning the
    /// decision which opened the level.
    pub fn backtrack(&mut self) -> Literal {
        let mut literal = Literal::new(0, true);
        while let Some((top, level)) = self.trail.last() {
            if *level != self.level {
                break;
            }
            literal = *top;
            self.values[literal.variable() as usize] = None;
            self.trail.pop();
        }
        self.level -= 1;
        literal
    }

    pub fn clear(&mut self) {
        self.trail.clear();
        self.values.iter_mut().for_each(|value| *value = None);
        self.level = 0;
    }

    pub fn value_of(&self, variable: Variable) -> Option<bool> {
        self.values[variable as usize]
    }

    pub fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.values[literal.variable() as usize]
            .map(|value| if literal.is_positive() { value } else { !value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_backtrack() {
        let mut valuation = Valuation::new(4);

        valuation.push(Literal::new(0, true), false);
        valuation.push(Literal::new(1, false), true);
        valuation.push(Literal::new(2, true), false);

        assert_eq!(valuation.level(), 1);
        assert_eq!(valuation.value_of(2), Some(true));
        assert_eq!(valuation.literal_value(Literal::new(1, true)), Some(false));

        // The decision is recovered, and everything above level zero is unset.
        let decision = valuation.backtrack();
        assert_eq!(decision, Literal::new(1, false));
        assert_eq!(valuation.level(), 0);
        assert_eq!(valuation.value_of(1), None);
        assert_eq!(valuation.value_of(2), None);
        assert_eq!(valuation.value_of(0), Some(true));
    }
}
