//! The router: a pattern-matching dictionary over the trie
use crate::handler::{Context, Custom, Hook, Match};
use crate::pattern::{Base, Pattern};
use crate::trie::list::{self, Filter};
use crate::trie::render::{CompactTree, Structure};
use crate::trie::search;
use crate::trie::{Entry, Node, Occupant};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

#[cfg(test)]
mod test;
#[cfg(test)]
pub mod proptest;

/// Router configuration
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Treat `*`-containing values of added patterns as globs.
    /// Defaults to off, in which case they are ordinary literal values.
    pub gex: bool,
}

/// Stores payloads under patterns and finds the most specific pattern a query
/// satisfies.
///
/// Lookups walk property names in alphabetical order and backtrack out of
/// dead ends, so when two stored patterns are equally good matches the one
/// whose distinguishing property sorts first wins.
pub struct Router<T> {
    root: Node<T>,
    options: Options,
    hook: Option<Hook<T>>,
}

impl<T> Default for Router<T> {
    fn default() -> Router<T> {
        Router::with_options(Default::default())
    }
}

impl<T> Router<T> {
    /// A router with default options and no hook
    pub fn new() -> Router<T> {
        Default::default()
    }

    /// A router with the provided options
    pub fn with_options(options: Options) -> Router<T> {
        Router {
            root: Default::default(),
            options,
            hook: None,
        }
    }

    /// The options this router was built with
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Find the payload of the most specific pattern `query` satisfies.
    ///
    /// With `exact` set, a pattern only counts if it constrains every property
    /// of the query.
    pub fn find(&self, query: &Pattern, exact: bool) -> Option<Match<'_, T>> {
        let occupant = search::search(&self.root, query, exact, self.options.gex);
        match occupant {
            Some(occupant) => {
                trace!("{:?} landed on an occupied node", query);
                occupant.resolve(query)
            }
            None => {
                trace!("Nothing matches {:?}", query);
                None
            }
        }
    }

    /// Find the payload stored under exactly `pattern`
    pub fn find_exact(&self, pattern: &Pattern) -> Option<Match<'_, T>> {
        self.find(pattern, true)
    }

    /// Remove what is stored under exactly `pattern`.
    ///
    /// Patterns that merely overlap `pattern` are untouched. A node guarded by
    /// a handler is only emptied once the handler reports it is exhausted.
    pub fn remove(&mut self, pattern: &Pattern) {
        let node = match self.root.descend_mut(pattern, self.options.gex) {
            Some(node) => node,
            None => {
                debug!("Nothing to remove at {:?}", pattern);
                return;
            }
        };

        let exhausted = match &mut node.occupant {
            None => false,
            Some(Occupant::Data(_)) | Some(Occupant::Finder { .. }) => true,
            Some(Occupant::Handler { data, handler }) => handler.remove(pattern, data),
        };

        if exhausted {
            debug!("Removing {:?}", pattern);
            node.occupant = None;
        }
    }

    /// Every stored entry compatible with `base`, in alphabetical depth-first
    /// order.
    ///
    /// Each constraint of `base` must appear in the entry's pattern, either
    /// with the same value or, for a `*`-containing base value, with a value
    /// that glob-matches it. A [`Base`](struct.Base.html) may list several
    /// alternatives for one property, any of which will do. With `exact` set
    /// the entry's pattern must also constrain nothing beyond `base`.
    pub fn list(&self, base: impl Into<Base>, exact: bool) -> Vec<Entry<'_, T>> {
        let filter = Filter::new(&base.into());
        let mut entries = Vec::new();
        list::collect(&self.root, &filter, exact, &mut Pattern::new(), 0, &mut entries);
        entries
    }

    /// Take the occupant stored at exactly `pattern`, leaving the node empty
    pub(crate) fn detach(&mut self, pattern: &Pattern) -> Option<Occupant<T>> {
        self.root
            .descend_mut(pattern, self.options.gex)
            .and_then(|node| node.occupant.take())
    }

    /// Render every entry on its own line as `name=value, ... -> <payload>`,
    /// or with `compact` set, as an indented tree of the trie itself
    pub fn render(&self, compact: bool) -> String
    where
        T: fmt::Display,
    {
        if compact {
            CompactTree(&self.root).to_string()
        } else {
            self.to_string()
        }
    }

    /// A structural record of the trie, for introspection.
    ///
    /// Each node is an object holding its payload under `"d"` (`"h": true`
    /// marks a handler-backed node) and its splits under `"s"`. Each split
    /// holds the property name `"k"`, a sort key `"sk"` and the children for
    /// literal (`"v"`) and glob (`"g"`) values. The layout is not guaranteed
    /// to be stable.
    pub fn structure(&self) -> serde_json::Result<serde_json::Value>
    where
        T: Serialize,
    {
        serde_json::to_value(Structure(&self.root))
    }

    /// A router whose additions all go through `hook`.
    ///
    /// The hook gets a context over the router, a copy of the pattern being
    /// added (which it may rewrite) and the payload. Its verdict decides what
    /// the new node holds.
    pub fn with_hook<F>(hook: F) -> Router<T>
    where
        F: Fn(&mut Context<'_, T>, &mut Pattern, &T) -> Custom<T> + 'static,
    {
        Router::with_options_and_hook(Default::default(), hook)
    }

    /// A router with both options and a hook
    pub fn with_options_and_hook<F>(options: Options, hook: F) -> Router<T>
    where
        F: Fn(&mut Context<'_, T>, &mut Pattern, &T) -> Custom<T> + 'static,
    {
        Router {
            root: Default::default(),
            options,
            hook: Some(Rc::new(hook)),
        }
    }

    /// Store `data` under `pattern`, replacing whatever was stored under
    /// exactly the same pattern
    pub fn add(&mut self, pattern: &Pattern, data: T) {
        let mut stored = pattern.clone();
        let custom = match self.hook.clone() {
            Some(hook) => hook(&mut Context::new(self), &mut stored, &data),
            None => Custom::Default,
        };
        if stored != *pattern {
            debug!("Hook rewrote {:?} to {:?}", pattern, stored);
        }
        debug!("Adding {:?} ({:?})", stored, custom);

        let node = self.root.descend_or_create(&stored, self.options.gex);
        node.occupant = Some(custom.into_occupant(data));
    }
}

/// One line per entry, as `name=value, ... -> <payload>`
impl<T: fmt::Display> fmt::Display for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for entry in self.list(&Pattern::new(), false) {
            write!(f, "{}{} -> <{}>", separator, entry.pattern(), entry.data())?;
            separator = "\n";
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.list(&Pattern::new(), false);
        f.debug_struct("Router")
            .field("options", &self.options)
            .field("hook", &self.hook.is_some())
            .field("entries", &entries)
            .finish()
    }
}

impl<T: Serialize> Serialize for Router<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Structure(&self.root).serialize(serializer)
    }
}
