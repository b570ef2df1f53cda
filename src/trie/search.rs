//! The matching engine.
//!
//! A plain depth-first search. At each node, child names are tried in
//! alphabetical order; the first child that produces an answer wins, and if
//! none does the node falls back to its own occupant. Since names only get
//! larger going down a path, every name is consulted at most once per path.
use super::{Branches, Node, Occupant};
use crate::pattern::{Pattern, ANY};

/// Find the occupant that answers `query`
pub(crate) fn search<'n, T>(
    root: &'n Node<T>,
    query: &Pattern,
    exact: bool,
    gex: bool,
) -> Option<&'n Occupant<T>> {
    Search { query, exact, gex }.visit(root, 0)
}

struct Search<'q> {
    query: &'q Pattern,
    exact: bool,
    gex: bool,
}

impl<'q> Search<'q> {
    /// `depth` is the number of query properties consumed on the way to `node`
    fn visit<'n, T>(&self, node: &'n Node<T>, depth: usize) -> Option<&'n Occupant<T>> {
        for (name, branches) in &node.splits {
            let value = match self.query.get(name) {
                Some(value) => value,
                None => continue,
            };
            if let Some(found) = self.visit_branches(branches, name, value, depth) {
                return Some(found);
            }
        }

        // Any query property left over disqualifies an exact match
        if self.exact && depth != self.query.len() {
            return None;
        }
        node.occupant.as_ref()
    }

    /// Try the children of one name: the equal literal first, then (for `*`
    /// queries) every other literal, then the globs in registration order
    fn visit_branches<'n, T>(
        &self,
        branches: &'n Branches<T>,
        name: &str,
        value: &str,
        depth: usize,
    ) -> Option<&'n Occupant<T>> {
        let descend = |child: &'n Node<T>, label: &str| {
            trace!("Descending into {}={}", name, label);
            self.visit(child, depth + 1)
        };

        if let Some(child) = branches.literals.get(value) {
            if let Some(found) = descend(child, value) {
                return Some(found);
            }
        }

        if value == ANY {
            for (literal, child) in branches.sorted_literals() {
                if literal == ANY {
                    continue;
                }
                if let Some(found) = descend(child, literal) {
                    return Some(found);
                }
            }
        }

        if self.gex {
            for (glob, child) in &branches.globs {
                if value != ANY && !glob.matches(value) {
                    continue;
                }
                if let Some(found) = descend(child, glob.source()) {
                    return Some(found);
                }
            }
        }

        None
    }
}
