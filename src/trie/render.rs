//! Human and machine readable views of a trie
use super::{Branches, Node};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// The indented tree view of a trie
pub(crate) struct CompactTree<'a, T>(pub(crate) &'a Node<T>);

impl<'a, T: fmt::Display> fmt::Display for CompactTree<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

fn write_node<T: fmt::Display>(f: &mut fmt::Formatter<'_>, node: &Node<T>, indent: usize) -> fmt::Result {
    if let Some(occupant) = &node.occupant {
        write!(f, " <{}>", occupant.data())?;
    }

    for (i, (name, branches)) in node.splits.iter().enumerate() {
        // Later values line up under the first one
        let label = if i > 0 { format!("|{}:", name) } else { format!("{}:", name) };
        for (j, (value, child)) in branches.ordered().into_iter().enumerate() {
            if j == 0 {
                write!(f, "\n{:indent$}{}{} ->", "", label, value, indent = indent)?;
            } else {
                write!(
                    f,
                    "\n{:indent$}{:width$}{} ->",
                    "",
                    "",
                    value,
                    indent = indent,
                    width = label.len()
                )?;
            }
            write_node(f, child, indent + 2)?;
        }
    }
    Ok(())
}

/// The structural record of a trie
pub(crate) struct Structure<'a, T>(pub(crate) &'a Node<T>);

impl<'a, T: Serialize> Serialize for Structure<'a, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRepr::from(self.0).serialize(serializer)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Serialize)]
struct NodeRepr<'a, T> {
    #[serde(rename = "d", skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(rename = "h", skip_serializing_if = "is_false")]
    handler: bool,
    #[serde(rename = "s", skip_serializing_if = "Vec::is_empty")]
    splits: Vec<SplitRepr<'a, T>>,
}

#[derive(Serialize)]
struct SplitRepr<'a, T> {
    #[serde(rename = "k")]
    name: &'a str,
    #[serde(rename = "sk")]
    sort_key: String,
    #[serde(rename = "v", skip_serializing_if = "BTreeMap::is_empty")]
    literals: BTreeMap<&'a str, NodeRepr<'a, T>>,
    #[serde(rename = "g", skip_serializing_if = "GlobsRepr::is_empty")]
    globs: GlobsRepr<'a, T>,
}

/// Glob children keep their registration order
struct GlobsRepr<'a, T>(Vec<(&'a str, NodeRepr<'a, T>)>);

impl<'a, T> GlobsRepr<'a, T> {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a, T: Serialize> Serialize for GlobsRepr<'a, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(glob, node)| (glob, node)))
    }
}

impl<'a, T> From<&'a Node<T>> for NodeRepr<'a, T> {
    fn from(node: &'a Node<T>) -> Self {
        NodeRepr {
            data: node.occupant.as_ref().map(|o| o.data()),
            handler: node.occupant.as_ref().map_or(false, |o| o.handler().is_some()),
            splits: node
                .splits
                .iter()
                .enumerate()
                .map(|(ordinal, (name, branches))| SplitRepr::new(ordinal, name, branches))
                .collect(),
        }
    }
}

impl<'a, T> SplitRepr<'a, T> {
    fn new(ordinal: usize, name: &'a str, branches: &'a Branches<T>) -> Self {
        SplitRepr {
            name,
            sort_key: format!("{}~{}", ordinal, name),
            literals: branches
                .literals
                .iter()
                .map(|(value, child)| (value.as_str(), NodeRepr::from(child)))
                .collect(),
            globs: GlobsRepr(
                branches
                    .globs
                    .iter()
                    .map(|(glob, child)| (glob.source(), NodeRepr::from(child)))
                    .collect(),
            ),
        }
    }
}
