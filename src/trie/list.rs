//! Enumerating the entries of a trie
use super::Node;
use crate::handler::Handler;
use crate::pattern::{Base, Pattern, ANY};
use crate::wildcard::{is_wildcard, Glob};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A stored pattern along with what is stored under it
pub struct Entry<'a, T> {
    pattern: Pattern,
    data: &'a T,
    handler: Option<&'a dyn Handler<T>>,
}

impl<'a, T> Entry<'a, T> {
    /// The pattern the payload was stored under (after any hook rewrite)
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The stored payload
    pub fn data(&self) -> &'a T {
        self.data
    }

    /// The handler guarding the payload, if the hook installed one
    pub fn handler(&self) -> Option<&'a dyn Handler<T>> {
        self.handler
    }

    /// Take the pattern out of the entry
    pub fn into_pattern(self) -> Pattern {
        self.pattern
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Entry<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("pattern", &self.pattern)
            .field("data", self.data)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Serialized as `{"match": {...}, "data": ...}`
impl<'a, T: Serialize> Serialize for Entry<'a, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("match", &self.pattern)?;
        map.serialize_entry("data", self.data)?;
        map.end()
    }
}

/// How one property of a listing base restricts entries
#[derive(Debug)]
enum Constraint {
    /// `*`: the property must be present, with any value
    Any,
    /// The property value must match the glob
    Glob(Glob),
    /// The property value must be exactly this
    Equals(String),
    /// Any one of these must accept the property value
    OneOf(Vec<Constraint>),
}

impl Constraint {
    fn new(value: &str) -> Constraint {
        if value == ANY {
            return Constraint::Any;
        }
        if is_wildcard(value) {
            match Glob::new(value) {
                Ok(glob) => return Constraint::Glob(glob),
                Err(e) => warn!("{}, listing it as a literal value", e),
            }
        }
        Constraint::Equals(value.to_string())
    }

    fn accepts(&self, value: &str) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Glob(glob) => glob.matches(value),
            Constraint::Equals(expected) => expected == value,
            Constraint::OneOf(alternatives) => alternatives.iter().any(|c| c.accepts(value)),
        }
    }
}

/// The compiled form of a listing base
#[derive(Debug)]
pub(crate) struct Filter {
    constraints: BTreeMap<String, Constraint>,
}

impl Filter {
    pub(crate) fn new(base: &Base) -> Filter {
        Filter {
            constraints: base
                .iter()
                .map(|(name, values)| {
                    let constraint = match values {
                        [value] => Constraint::new(value),
                        values => Constraint::OneOf(values.iter().map(|v| Constraint::new(v)).collect()),
                    };
                    (name.to_string(), constraint)
                })
                .collect(),
        }
    }

    /// Number of properties the base constrains
    pub(crate) fn len(&self) -> usize {
        self.constraints.len()
    }

    /// `None` if the base says nothing about `name`, otherwise whether
    /// `value` is acceptable for it
    pub(crate) fn accepts(&self, name: &str, value: &str) -> Option<bool> {
        self.constraints.get(name).map(|c| c.accepts(value))
    }
}

/// Push every entry at or below `node` that `filter` accepts onto `out`.
///
/// `path` is the pattern spelled out by the way down to `node`, and `matched`
/// the number of base properties it satisfies. The node's own entry comes
/// first, then its children by name, then by value (literals sorted, globs in
/// registration order).
pub(crate) fn collect<'n, T>(
    node: &'n Node<T>,
    filter: &Filter,
    exact: bool,
    path: &mut Pattern,
    matched: usize,
    out: &mut Vec<Entry<'n, T>>,
) {
    if let Some(occupant) = &node.occupant {
        if matched == filter.len() && (!exact || path.len() == filter.len()) {
            out.push(Entry {
                pattern: path.clone(),
                data: occupant.data(),
                handler: occupant.handler(),
            });
        }
    }

    for (name, branches) in &node.splits {
        for (value, child) in branches.ordered() {
            let matched = match filter.accepts(name, value) {
                Some(true) => matched + 1,
                Some(false) => continue,
                // Exact listings can't grow past the base
                None if exact => continue,
                None => matched,
            };
            path.insert(name.as_str(), value);
            collect(child, filter, exact, path, matched, out);
            path.remove(name);
        }
    }
}
