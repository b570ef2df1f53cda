//! Custom matching.
//!
//! A router can be built with a *hook* that runs on every `add`. The hook
//! sees the pattern before it is stored (and may rewrite it), can look at what
//! the router already holds through a [`Context`](struct.Context.html), and
//! returns a [`Custom`](enum.Custom.html) verdict saying how the new node
//! should behave.
//!
//! Handlers are how callers layer their own semantics on top of the trie:
//! several payloads accumulating on one pattern and removed one at a time,
//! glob constraints evaluated at lookup time, priorities, and so on. The trie
//! still picks *which* node answers a query; the handler decides *what* that
//! node answers.
use crate::pattern::{Base, Pattern};
use crate::router::{Options, Router};
use crate::trie::{Entry, Occupant};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// The result of a successful lookup
pub enum Match<'a, T> {
    /// The payload stored in the trie
    Stored(&'a T),
    /// A value computed by a handler
    Computed(T),
}

impl<'a, T> Deref for Match<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Match::Stored(data) => data,
            Match::Computed(data) => data,
        }
    }
}

impl<'a, T: Clone> Match<'a, T> {
    /// Take the matched value, cloning it if it lives in the trie
    pub fn into_owned(self) -> T {
        match self {
            Match::Stored(data) => data.clone(),
            Match::Computed(data) => data,
        }
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Match<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Match::Stored(data) => f.debug_tuple("Stored").field(data).finish(),
            Match::Computed(data) => f.debug_tuple("Computed").field(data).finish(),
        }
    }
}

impl<'a, 'b, T: PartialEq> PartialEq<Match<'b, T>> for Match<'a, T> {
    fn eq(&self, other: &Match<'b, T>) -> bool {
        **self == **other
    }
}

/// Custom behavior for one trie node
pub trait Handler<T> {
    /// Called when a lookup ends at this handler's node. `data` is the payload
    /// the handler was installed with. Whatever this returns, including
    /// `None`, is the final answer of the lookup.
    fn find<'a>(&'a self, query: &Pattern, data: &'a T) -> Option<Match<'a, T>>;

    /// Called when the node's exact pattern is removed. Returns `true` once
    /// the handler has nothing left, at which point the node is emptied.
    fn remove(&mut self, query: &Pattern, data: &T) -> bool;
}

/// A transform from `(query, payload)` to the lookup result
pub type Finder<T> = Box<dyn Fn(&Pattern, &T) -> Option<T>>;

/// What the hook wants done with the node being added
pub enum Custom<T> {
    /// Store the payload verbatim
    Default,
    /// Store the payload and run lookups through this transform. Removing the
    /// pattern empties the node.
    Finder(Finder<T>),
    /// Store the payload behind a full handler
    Handler(Box<dyn Handler<T>>),
}

impl<T> fmt::Debug for Custom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Custom::Default => write!(f, "Default"),
            Custom::Finder(_) => write!(f, "Finder"),
            Custom::Handler(_) => write!(f, "Handler"),
        }
    }
}

/// A bare transform is a handler that never holds on to anything
impl<T> Handler<T> for Finder<T> {
    fn find<'a>(&'a self, query: &Pattern, data: &'a T) -> Option<Match<'a, T>> {
        self(query, data).map(Match::Computed)
    }

    fn remove(&mut self, _query: &Pattern, _data: &T) -> bool {
        true
    }
}

impl<T> Custom<T> {
    /// Turn this verdict into what actually gets stored
    pub(crate) fn into_occupant(self, data: T) -> Occupant<T> {
        match self {
            Custom::Default => Occupant::Data(data),
            Custom::Finder(finder) => Occupant::Finder { data, finder },
            Custom::Handler(handler) => Occupant::Handler { data, handler },
        }
    }
}

/// The hook signature
pub(crate) type Hook<T> = Rc<dyn Fn(&mut Context<'_, T>, &mut Pattern, &T) -> Custom<T>>;

/// What a hook can see of its router while a pattern is being added
pub struct Context<'r, T> {
    router: &'r mut Router<T>,
}

impl<'r, T> Context<'r, T> {
    pub(crate) fn new(router: &'r mut Router<T>) -> Self {
        Context { router }
    }

    /// See [`Router::find`](struct.Router.html#method.find)
    pub fn find(&self, query: &Pattern, exact: bool) -> Option<Match<'_, T>> {
        self.router.find(query, exact)
    }

    /// See [`Router::find_exact`](struct.Router.html#method.find_exact)
    pub fn find_exact(&self, pattern: &Pattern) -> Option<Match<'_, T>> {
        self.router.find_exact(pattern)
    }

    /// See [`Router::list`](struct.Router.html#method.list)
    pub fn list(&self, base: impl Into<Base>, exact: bool) -> Vec<Entry<'_, T>> {
        self.router.list(base, exact)
    }

    /// See [`Router::remove`](struct.Router.html#method.remove)
    pub fn remove(&mut self, pattern: &Pattern) {
        self.router.remove(pattern)
    }

    /// Take whatever is stored at exactly `pattern` out of the router.
    ///
    /// The node being added is about to be overwritten anyway; detaching its
    /// old occupant lets a new handler take it over, e.g. to fall back to it.
    pub fn detach(&mut self, pattern: &Pattern) -> Option<Occupant<T>> {
        self.router.detach(pattern)
    }

    /// The options the router was built with
    pub fn options(&self) -> &Options {
        self.router.options()
    }
}
