//! Glob matching for wildcard values.
//!
//! The matching itself is the `glob` crate's; this module only decides which
//! values are globs and remembers the text each glob was compiled from, since
//! that text is how a glob branch is addressed when it is re-added, removed or
//! rendered.
//!
//! Only `*` (any run of characters) and `?` (any one character) are special.
//! Everything else, brackets included, matches itself.

use crate::PatternError;
use std::fmt;

/// The marker that makes a value a glob when wildcard support is enabled
pub const WILDCARD: char = '*';

/// Whether `value` should be treated as a glob
#[inline]
pub fn is_wildcard(value: &str) -> bool {
    value.contains(WILDCARD)
}

/// A compiled glob
#[derive(Clone)]
pub struct Glob {
    source: String,
    compiled: ::glob::Pattern,
}

impl Glob {
    /// Compile `source`
    pub fn new(source: &str) -> Result<Glob, PatternError> {
        let compiled = ::glob::Pattern::new(&translate(source)).map_err(|e| PatternError::InvalidGlob {
            glob: source.into(),
            reason: e.to_string(),
        })?;
        Ok(Glob {
            source: source.into(),
            compiled,
        })
    }

    /// The text this glob was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `candidate` is accepted by this glob
    pub fn matches(&self, candidate: &str) -> bool {
        self.compiled.matches(candidate)
    }
}

impl fmt::Debug for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Glob({:?})", self.source)
    }
}

/// Rewrite `source` into `glob` crate syntax: literal runs are escaped and
/// runs of `*` collapse into one
fn translate(source: &str) -> String {
    let mut translated = String::with_capacity(source.len());
    let mut literal = String::new();
    for c in source.chars() {
        match c {
            '*' | '?' => {
                if !literal.is_empty() {
                    translated.push_str(&::glob::Pattern::escape(&literal));
                    literal.clear();
                } else if c == WILDCARD && translated.ends_with(WILDCARD) {
                    continue;
                }
                translated.push(c);
            }
            _ => literal.push(c),
        }
    }
    translated.push_str(&::glob::Pattern::escape(&literal));
    translated
}

/// One-shot form of [`Glob::matches`](struct.Glob.html#method.matches).
/// A glob that does not compile matches nothing.
pub fn matches(glob: &str, candidate: &str) -> bool {
    match Glob::new(glob) {
        Ok(g) => g.matches(candidate),
        Err(e) => {
            warn!("{}", e);
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn star_matches_anything() {
        let g = assert_ok!(Glob::new("*"));
        assert!(g.matches(""));
        assert!(g.matches("0"));
        assert!(g.matches("anything at all"));
        assert_eq!(g.source(), "*");
    }

    #[test]
    fn prefix_and_suffix() {
        assert!(matches("a*", "aq"));
        assert!(!matches("a*", "qa"));
        assert!(matches("*a", "qa"));
        assert!(!matches("*a", "aq"));
        assert!(matches("q*z", "qaz"));
        assert!(matches("q*z", "qz"));
        assert!(!matches("q*z", "qaza"));
    }

    #[test]
    fn wildcard_detection() {
        assert!(is_wildcard("*"));
        assert!(is_wildcard("x*"));
        assert!(!is_wildcard("x"));
        assert!(!is_wildcard(""));
    }

    #[test]
    fn brackets_are_literal() {
        crate::test::setup();
        let g = assert_ok!(Glob::new("v[1]*"));
        assert_eq!(g.source(), "v[1]*");
        assert!(g.matches("v[1]x"));
        assert!(g.matches("v[1]"));
        assert!(!g.matches("v1x"));
        assert!(matches("[*", "[x"));
        assert!(!matches("[*", "x"));
        assert!(matches("*]", "a]"));
    }

    #[test]
    fn question_mark_is_one_character() {
        assert!(matches("a?c", "abc"));
        assert!(!matches("a?c", "ac"));
        assert!(!matches("a?c", "abbc"));
        assert!(matches("?*", "x"));
        assert!(!matches("?*", ""));
    }

    #[test]
    fn star_runs_collapse() {
        let g = assert_ok!(Glob::new("x**"));
        assert_eq!(g.source(), "x**");
        assert!(g.matches("x"));
        assert!(g.matches("xyz"));
        assert!(matches("a***b", "a/b/c/b"));
        assert!(!matches("a***b", "ab/c"));
    }

    #[test]
    fn translation() {
        assert_eq!(translate("*"), "*");
        assert_eq!(translate("a**b"), "a*b");
        assert_eq!(translate("[*]"), "[[]*[]]");
        assert_eq!(translate("a?*"), "a?*");
        assert_eq!(translate("plain"), "plain");
    }
}
