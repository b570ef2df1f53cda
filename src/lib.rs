/* Patrun's main file
Copyright (C) 2018 Reed Koser
Patrun is free software; you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation; either version 3 of the License, or (at your option) any later
version.

Patrun is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE.  See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
this program.  If not, see <http://www.gnu.org/licenses/>.  */

//! Patrun is a pattern-matching dictionary.
//!
//! Payloads are stored under *patterns*, partial sets of `name = value`
//! constraints. Looking up a *query* (a concrete set of properties) returns
//! the payload of the most specific stored pattern the query satisfies. This
//! makes it a handy dispatch primitive, e.g. for picking the handler of a
//! message from its attributes:
//!
//! ```
//! use patrun::{pattern, Router};
//!
//! let mut router = Router::new();
//! router.add(&pattern! { role: "math" }, "generic math");
//! router.add(&pattern! { role: "math", cmd: "sum" }, "sum");
//!
//! let found = router.find(&pattern! { role: "math", cmd: "sum", left: 1 }, false);
//! assert_eq!(found.as_deref(), Some(&"sum"));
//! let found = router.find(&pattern! { role: "math", cmd: "product" }, false);
//! assert_eq!(found.as_deref(), Some(&"generic math"));
//! ```
//!
//! Ties between equally specific patterns are broken by property name, in
//! alphabetical order, never by insertion order. Per-router custom matching
//! can be installed with [`Router::with_hook`](struct.Router.html#method.with_hook).
#![warn(missing_docs)]

extern crate fxhash;
#[macro_use]
extern crate log;
#[macro_use]
extern crate nom;

/// Internal macros for use in test assertions
#[cfg(test)]
#[macro_use]
mod test_macros;

#[macro_use]
pub mod pattern;
mod handler;
mod parsers;
mod router;
mod trie;
mod types;
pub mod wildcard;

pub use crate::handler::{Context, Custom, Finder, Handler, Match};
pub use crate::pattern::{Base, Pattern, Value, ANY};
pub use crate::router::{Options, Router};
pub use crate::trie::{Entry, Occupant};

use failure::Fail;
use std::fmt;

/// Things that can go wrong while building patterns.
///
/// None of the router operations return these; a glob that fails to compile
/// while adding a pattern is logged and stored as a literal value instead.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternError {
    /// A wildcard value could not be compiled into a glob
    InvalidGlob {
        /// The offending value
        glob: String,
        /// Why the glob engine rejected it
        reason: String,
    },
    /// The text form of a pattern could not be parsed
    Syntax(String),
    /// The text form of a pattern had leftover content after the last constraint
    TrailingInput(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            PatternError::InvalidGlob { glob, reason } => {
                write!(f, "invalid glob {:?}: {}", glob, reason)
            }
            PatternError::Syntax(e) => write!(f, "malformed pattern: {}", e),
            PatternError::TrailingInput(rest) => {
                write!(f, "unexpected input after pattern: {:?}", rest)
            }
        }
    }
}

impl Fail for PatternError {}
