//! The trie the router is built on.
//!
//! Every node stands for the pattern spelled out by the path from the root to
//! it. A node branches first on a property *name* (the "split"), then on the
//! value that property takes. Names are kept in alphabetical order, which is
//! the order every traversal (search, listing, rendering) visits them in, so
//! results never depend on the order patterns were added in.
use crate::handler::{Finder, Handler, Match};
use crate::pattern::Pattern;
use crate::types::Map;
use crate::wildcard::{is_wildcard, Glob};
use std::collections::BTreeMap;
use std::fmt;

pub(crate) mod list;
pub(crate) mod render;
pub(crate) mod search;

pub use self::list::Entry;

/// What a trie node holds
pub enum Occupant<T> {
    /// A payload, returned verbatim by lookups
    Data(T),
    /// A payload run through a transform on every lookup. Removal always
    /// empties the node.
    Finder {
        /// The payload the transform was installed with
        data: T,
        /// The transform
        finder: Finder<T>,
    },
    /// A payload guarded by a custom handler, which decides what lookups
    /// return and when removal actually empties the node
    Handler {
        /// The payload the handler was installed with
        data: T,
        /// The handler itself
        handler: Box<dyn Handler<T>>,
    },
}

impl<T> Occupant<T> {
    /// The stored payload
    pub fn data(&self) -> &T {
        match self {
            Occupant::Data(data) | Occupant::Finder { data, .. } | Occupant::Handler { data, .. } => data,
        }
    }

    /// The handler guarding the payload, if there is one
    pub fn handler(&self) -> Option<&dyn Handler<T>> {
        match self {
            Occupant::Data(_) => None,
            Occupant::Finder { finder, .. } => Some(finder as &dyn Handler<T>),
            Occupant::Handler { handler, .. } => Some(&**handler),
        }
    }

    /// Evaluate this occupant against `query`, the way a lookup that ended at
    /// its node would
    pub fn resolve(&self, query: &Pattern) -> Option<Match<'_, T>> {
        match self {
            Occupant::Data(data) => Some(Match::Stored(data)),
            Occupant::Finder { data, finder } => finder.find(query, data),
            Occupant::Handler { data, handler } => handler.find(query, data),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Occupant<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Data(data) => f.debug_tuple("Data").field(data).finish(),
            Occupant::Finder { data, .. } => f.debug_tuple("Finder").field(data).finish(),
            Occupant::Handler { data, .. } => f.debug_tuple("Handler").field(data).finish(),
        }
    }
}

/// A node of the trie
pub(crate) struct Node<T> {
    pub(crate) occupant: Option<Occupant<T>>,
    /// Branches, keyed by property name
    pub(crate) splits: BTreeMap<String, Branches<T>>,
}

// Manual impl: doesn't require T: Default
impl<T> Default for Node<T> {
    fn default() -> Self {
        Node {
            occupant: None,
            splits: BTreeMap::new(),
        }
    }
}

impl<T> Node<T> {
    /// Follow `pattern` exactly, without creating anything
    pub(crate) fn descend_mut(&mut self, pattern: &Pattern, gex: bool) -> Option<&mut Node<T>> {
        let mut node = self;
        for (name, value) in pattern {
            node = node.splits.get_mut(name)?.exact_mut(value, gex)?;
        }
        Some(node)
    }

    /// Follow `pattern` exactly, creating whatever is missing along the way
    pub(crate) fn descend_or_create(&mut self, pattern: &Pattern, gex: bool) -> &mut Node<T> {
        let mut node = self;
        for (name, value) in pattern {
            node = node
                .splits
                .entry(name.to_string())
                .or_default()
                .entry(value, gex);
        }
        node
    }
}

/// The children of a node for a single property name
pub(crate) struct Branches<T> {
    /// Children for plain values
    pub(crate) literals: Map<String, Node<T>>,
    /// Children for glob values, in the order they were registered.
    /// Only populated when wildcard support is on.
    pub(crate) globs: Vec<(Glob, Node<T>)>,
}

impl<T> Default for Branches<T> {
    fn default() -> Self {
        Branches {
            literals: Map::default(),
            globs: Vec::new(),
        }
    }
}

impl<T> Branches<T> {
    /// Literal children, ordered by value
    pub(crate) fn sorted_literals(&self) -> Vec<(&str, &Node<T>)> {
        let mut literals: Vec<_> = self
            .literals
            .iter()
            .map(|(value, node)| (value.as_str(), node))
            .collect();
        literals.sort_unstable_by(|a, b| a.0.cmp(b.0));
        literals
    }

    /// Every child in traversal order: literals by value, then globs in
    /// registration order
    pub(crate) fn ordered(&self) -> Vec<(&str, &Node<T>)> {
        let mut children = self.sorted_literals();
        children.extend(self.globs.iter().map(|(glob, node)| (glob.source(), node)));
        children
    }

    /// The child stored for exactly `value`.
    /// With wildcard support on, a wildcard value names the glob compiled
    /// from that same text.
    pub(crate) fn exact_mut(&mut self, value: &str, gex: bool) -> Option<&mut Node<T>> {
        if gex && is_wildcard(value) {
            if let Some(i) = self.globs.iter().position(|(glob, _)| glob.source() == value) {
                return Some(&mut self.globs[i].1);
            }
        }
        self.literals.get_mut(value)
    }

    /// The child for `value`, created if needed
    pub(crate) fn entry(&mut self, value: &str, gex: bool) -> &mut Node<T> {
        if gex && is_wildcard(value) && !self.literals.contains_key(value) {
            let existing = self.globs.iter().position(|(glob, _)| glob.source() == value);
            let index = match existing {
                Some(i) => Some(i),
                None => match Glob::new(value) {
                    Ok(glob) => {
                        self.globs.push((glob, Node::default()));
                        Some(self.globs.len() - 1)
                    }
                    Err(e) => {
                        warn!("{}, storing it as a literal value", e);
                        None
                    }
                },
            };
            if let Some(i) = index {
                return &mut self.globs[i].1;
            }
        }
        self.literals.entry(value.to_string()).or_default()
    }
}
