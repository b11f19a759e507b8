//! The configuration generator: from a fixed predecessor and a chosen hull
//! structure to a stream of candidate configurations.
//!
//! # Encoding
//!
//! One boolean variable per triple index below `C(n,3)`, the variable being true
//! when the triple is counter-clockwise.
//! Clauses are laid down in three contexts, from long-lived to short-lived:
//!
//! - *Context 0, the axioms*, built once per size.
//!   Axiom 4 (interiority) forbids, for every triple over the first `n−1` points,
//!   the four orientation patterns placing the new point on contradictory sides of
//!   the triangle; two 4-literal clauses per triple.
//!   Axiom 5 (transitivity) contributes two 6-literal clauses per choice of a triple
//!   and two further points.
//!   Since every triple over the first `n−1` points is already fixed by context 1,
//!   instances whose five points all avoid the new point can never fire, so the
//!   loop requires at least one of the two further points to be the new point
//!   whenever the triple itself avoids it.
//!   This pruning cuts the clause count substantially and is relied upon; do not
//!   'simplify' it away.
//!
//! - *Context 1, the predecessor*: a unit clause per known triple bit, plus unit
//!   clauses placing the new point inside every hull of the predecessor except the
//!   innermost.
//!
//! - *Context 2, the structure*: for a new singleton innermost hull, unit clauses
//!   placing the new point inside the previous innermost hull as well; for a grown
//!   innermost hull, an exactly-one constraint that the new point lies outside
//!   precisely one edge of the previous innermost hull.
//!   A one or two point innermost hull needs no clause at all: any placement inside
//!   the outer hulls grows it.
//!
//! Walking a hull in cyclic order sorts its vertices around the first by the
//! orientation bits of the predecessor.
//!
//! # Lifecycle
//!
//! [set_configuration](ConfigurationGenerator::set_configuration) rebuilds context 1,
//! [set_structure](ConfigurationGenerator::set_structure) rebuilds context 2 and
//! prepares the back end, and
//! [generate_next_configuration](ConfigurationGenerator::generate_next_configuration)
//! drains models.
//! After the first model of a round only the bits of triples through the new point
//! are copied out; the rest is fixed by context 1 and already present in the buffer.

use crate::{
    backend::{Backend, ClauseContexts},
    misc::{interrupt, log::targets},
    structures::{
        clause::Clause,
        configuration::Configuration,
        hull::HullStructure,
        literal::Literal,
        triple::{oriented_bit, oriented_literal, triple_count, Triple},
    },
};

pub struct ConfigurationGenerator<S: ClauseContexts = Backend> {
    size: u32,
    axiom_clauses: Vec<Clause>,
    prev_conf_clauses: Vec<Clause>,
    prev_struct_clauses: Vec<Clause>,
    new_struct_clauses: Vec<Clause>,
    solver: S,
    first_conf: bool,
}

/// The vertices of the hull starting at `start`, in cyclic order around the first.
fn hull_in_cyclic_order(start: u32, length: u32, conf: &Configuration) -> Vec<u32> {
    let mut hull: Vec<u32> = (start..start + length).collect();
    hull[1..].sort_by(|&x, &y| {
        if oriented_bit(conf, Triple(start, x, y)) {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Greater
        }
    });
    hull
}

impl<S: ClauseContexts> ConfigurationGenerator<S> {
    /// A generator for configurations of `size` points, with the axioms built and
    /// loaded as the root context.
    pub fn new(size: u32) -> Self {
        let mut generator = ConfigurationGenerator {
            size,
            axiom_clauses: Vec::new(),
            prev_conf_clauses: Vec::new(),
            prev_struct_clauses: Vec::new(),
            new_struct_clauses: Vec::new(),
            solver: S::new(triple_count(size)),
            first_conf: true,
        };

        if size >= 4 {
            generator.build_axiom_4();
        }
        if size >= 5 {
            generator.build_axiom_5();
        }
        generator.solver.add_clauses(&generator.axiom_clauses);

        log::debug!(
            target: targets::GENERATOR,
            "Generator for size {size}: {} axiom clauses.",
            generator.axiom_clauses.len(),
        );

        generator
    }

    fn build_axiom_4(&mut self) {
        let new_point = self.size - 1;

        let mut triangle = Triple::FIRST;
        for _ in 0..triple_count(self.size - 1) {
            let Triple(p, q, r) = triangle;
            let qrt = Triple(q, r, new_point).position() as u32;
            let prt = Triple(p, r, new_point).position() as u32;
            let pqt = Triple(p, q, new_point).position() as u32;
            let pqr = triangle.position() as u32;

            self.axiom_clauses.push(vec![
                Literal::new(qrt, false),
                Literal::new(prt, true),
                Literal::new(pqt, false),
                Literal::new(pqr, true),
            ]);
            self.axiom_clauses.push(vec![
                Literal::new(qrt, true),
                Literal::new(prt, false),
                Literal::new(pqt, true),
                Literal::new(pqr, false),
            ]);

            triangle.advance();
        }
    }

    fn build_axiom_5(&mut self) {
        let size = self.size;
        let new_point = size - 1;

        let mut triangle = Triple::FIRST;
        for _ in 0..triple_count(size) {
            let Triple(p, q, r) = triangle;

            for t in 0..size {
                if t == p || t == q || t == r {
                    continue;
                }

                let s_from = if r != new_point && t != new_point {
                    new_point
                } else {
                    0
                };
                for s in s_from..size {
                    if s == p || s == q || s == r || s == t {
                        continue;
                    }

                    let pts = Triple(p, t, s);
                    let qts = Triple(q, t, s);
                    let rts = Triple(r, t, s);
                    let pqt = Triple(p, q, t);
                    let qrt = Triple(q, r, t);
                    let prt = Triple(p, r, t);

                    self.axiom_clauses.push(vec![
                        oriented_literal(pts, false),
                        oriented_literal(qts, false),
                        oriented_literal(rts, false),
                        oriented_literal(pqt, false),
                        oriented_literal(qrt, false),
                        oriented_literal(prt, true),
                    ]);
                    self.axiom_clauses.push(vec![
                        oriented_literal(pts, false),
                        oriented_literal(qts, false),
                        oriented_literal(rts, false),
                        oriented_literal(pqt, true),
                        oriented_literal(qrt, true),
                        oriented_literal(prt, false),
                    ]);
                }
            }

            triangle.advance();
        }
    }

    /// Fix the configuration being extended, together with the constraint that the
    /// new point lies inside every hull of `prev_struct` except the innermost.
    pub fn set_configuration(&mut self, old_conf: &Configuration, prev_struct: &HullStructure) {
        self.solver.pop_to(0);
        self.prev_conf_clauses.clear();
        self.prev_struct_clauses.clear();

        for (variable, bit) in old_conf.iter().enumerate() {
            self.prev_conf_clauses
                .push(vec![Literal::new(variable as u32, *bit)]);
        }

        let mut start = 0;
        for hull_size in &prev_struct[..prev_struct.len() - 1] {
            let hull = hull_in_cyclic_order(start, *hull_size, old_conf);
            debug_assert!(hull.iter().all(|&vertex| vertex != self.size - 1));

            for j in 0..hull.len() {
                let next = hull[if j + 1 < hull.len() { j + 1 } else { 0 }];
                let edge = Triple(hull[j], next, self.size - 1);
                self.prev_struct_clauses.push(vec![oriented_literal(edge, true)]);
            }

            start += hull_size;
        }

        self.solver.push_context();
        self.solver.add_clauses(&self.prev_conf_clauses);
        self.solver.add_clauses(&self.prev_struct_clauses);
    }

    /// Fix the augmented structure the extension should have, and prepare the back
    /// end for model iteration.
    pub fn set_structure(&mut self, old_conf: &Configuration, new_struct: &HullStructure) {
        self.solver.pop_to(1);
        self.new_struct_clauses.clear();

        let innermost = *new_struct.last().unwrap();
        let start = if innermost == 1 {
            self.size - 1 - new_struct[new_struct.len() - 2]
        } else {
            self.size - innermost
        };
        let hull_size = self.size - start - 1;

        if hull_size >= 3 {
            let hull = hull_in_cyclic_order(start, hull_size, old_conf);
            debug_assert!(hull.iter().all(|&vertex| vertex != self.size - 1));

            let edges: Vec<Triple> = (0..hull.len())
                .map(|j| {
                    let next = hull[if j + 1 < hull.len() { j + 1 } else { 0 }];
                    Triple(hull[j], next, self.size - 1)
                })
                .collect();

            if innermost == 1 {
                // A new interior point stays inside the previous innermost hull too.
                for edge in edges {
                    self.new_struct_clauses.push(vec![oriented_literal(edge, true)]);
                }
            } else {
                // The new point breaks exactly one edge of the previous innermost
                // hull: outside at least one, and no two at once.
                let broken: Clause = edges
                    .iter()
                    .map(|edge| oriented_literal(*edge, false))
                    .collect();
                self.new_struct_clauses.push(broken.clone());
                for j1 in 0..broken.len() {
                    for j2 in j1 + 1..broken.len() {
                        self.new_struct_clauses
                            .push(vec![broken[j1].negated(), broken[j2].negated()]);
                    }
                }
            }
        }

        self.first_conf = true;

        self.solver.push_context();
        self.solver.add_clauses(&self.new_struct_clauses);
        self.solver.prepare();
    }

    /// Write the next candidate configuration into `conf`, returning false once the
    /// models are exhausted (or the run was interrupted).
    pub fn generate_next_configuration(&mut self, conf: &mut Configuration) -> bool {
        if interrupt::interrupted() {
            return false;
        }

        if !self.solver.next_model() {
            return false;
        }

        let from = if self.first_conf {
            0
        } else {
            triple_count(self.size - 1)
        };
        for variable in from..conf.len() {
            conf[variable] = self.solver.value(variable as u32);
        }

        self.first_conf = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::dpll::DpllSolver;

    fn drain(
        generator: &mut ConfigurationGenerator<DpllSolver>,
        size: u32,
    ) -> Vec<Configuration> {
        let mut buffer = vec![false; triple_count(size)];
        let mut models = Vec::new();
        while generator.generate_next_configuration(&mut buffer) {
            models.push(buffer.clone());
        }
        models
    }

    #[test]
    fn extensions_of_the_triangle() {
        let triangle: Configuration = vec![false];
        let mut generator: ConfigurationGenerator<DpllSolver> = ConfigurationGenerator::new(4);

        generator.set_configuration(&triangle, &vec![3]);

        // Joining the hull: the fourth point beyond exactly one of three edges.
        generator.set_structure(&triangle, &vec![4]);
        let convex = drain(&mut generator, 4);
        assert_eq!(convex.len(), 3);
        assert!(convex.contains(&vec![false, false, false, false]));

        // An interior point: inside all three edges, one placement.
        generator.set_structure(&triangle, &vec![3, 1]);
        let interior = drain(&mut generator, 4);
        assert_eq!(interior.len(), 1);

        // The two structures partition the axiom-consistent extensions.
        for conf in &interior {
            assert!(!convex.contains(conf));
        }
    }

    #[test]
    fn extension_streams_are_restartable() {
        let triangle: Configuration = vec![false];
        let mut generator: ConfigurationGenerator<DpllSolver> = ConfigurationGenerator::new(4);

        generator.set_configuration(&triangle, &vec![3]);
        generator.set_structure(&triangle, &vec![4]);
        let first = drain(&mut generator, 4);

        generator.set_configuration(&triangle, &vec![3]);
        generator.set_structure(&triangle, &vec![4]);
        let second = drain(&mut generator, 4);

        assert_eq!(first, second);
    }

    #[test]
    fn prefix_is_preserved_across_models() {
        // Extend the convex quadrilateral: all models share the fixed prefix.
        let quad: Configuration = vec![false; triple_count(4)];
        let mut generator: ConfigurationGenerator<DpllSolver> = ConfigurationGenerator::new(5);

        generator.set_configuration(&quad, &vec![4]);
        generator.set_structure(&quad, &vec![5]);

        let models = drain(&mut generator, 5);
        assert!(!models.is_empty());
        for model in &models {
            assert_eq!(&model[..triple_count(4)], &quad[..]);
        }
    }
}
