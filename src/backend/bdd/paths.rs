//! Iteration over the satisfying paths of a BDD, top-to-bottom and
//! low-branch-first.
//!
//! The cursor keeps a pair of stacks: the nodes whose low branch the current path
//! follows and is yet to leave, and the branch taken at every node on the path, as a
//! signed 1-based variable, negated on a low branch.
//! Producing the next solution pops nodes until the last one whose high branch is
//! unexplored, switches to that branch, and descends low again; the iteration ends
//! when the node stack empties.
//!
//! A path fixes only the variables it passes; everything else is a don't-care and is
//! reported as false.

use super::arena::{NodeId, Obdd, BOT, TOP};

pub struct PathCursor {
    root: NodeId,
    nodes: Vec<NodeId>,
    branches: Vec<i64>,
    first: bool,
    done: bool,
}

impl PathCursor {
    pub fn new(root: NodeId) -> Self {
        PathCursor {
            root,
            nodes: Vec::new(),
            branches: Vec::new(),
            first: true,
            done: root == BOT,
        }
    }

    /// Advance to the next satisfying path, if any.
    pub fn advance(&mut self, dd: &Obdd) -> bool {
        if self.done {
            return false;
        }

        loop {
            let mut current = if self.first {
                self.first = false;
                self.root
            } else {
                let node = match self.nodes.pop() {
                    Some(node) => node,
                    None => {
                        self.done = true;
                        return false;
                    }
                };
                // Unwind past finished high branches, then switch the deepest
                // pending node onto its high branch.
                while matches!(self.branches.last(), Some(branch) if *branch > 0) {
                    self.branches.pop();
                }
                if let Some(branch) = self.branches.last_mut() {
                    *branch = branch.abs();
                }
                dd.node(node).hi
            };

            while current != BOT && current != TOP {
                self.nodes.push(current);
                self.branches.push(-(dd.node(current).variable as i64 + 1));
                current = dd.node(current).lo;
            }

            if current == TOP {
                return true;
            }
        }
    }

    /// The variables fixed by the current path, with their values.
    pub fn assignment(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.branches
            .iter()
            .map(|branch| (branch.unsigned_abs() as u32 - 1, *branch > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_of_a_disjunction() {
        use crate::structures::literal::Literal;

        let mut dd = Obdd::new();
        // x0 or x1, as a BDD with three paths: 01, 10, 11 collapses to 1-.
        let root = dd.clause(&vec![Literal::new(0, true), Literal::new(1, true)]);

        let mut cursor = PathCursor::new(root);
        let mut paths = Vec::new();
        while cursor.advance(&dd) {
            paths.push(cursor.assignment().collect::<Vec<_>>());
        }

        assert_eq!(paths, vec![vec![(0, false), (1, true)], vec![(0, true)]]);
    }

    #[test]
    fn bot_has_no_paths() {
        let dd = Obdd::new();
        let mut cursor = PathCursor::new(BOT);
        assert!(!cursor.advance(&dd));
    }

    #[test]
    fn top_has_the_empty_path() {
        let dd = Obdd::new();
        let mut cursor = PathCursor::new(TOP);
        assert!(cursor.advance(&dd));
        assert_eq!(cursor.assignment().count(), 0);
        assert!(!cursor.advance(&dd));
    }
}
