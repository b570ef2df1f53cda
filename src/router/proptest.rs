//! Proptest generators for patterns and routers

use crate::pattern::Pattern;
use proptest::prelude::*;

/// Patterns over a handful of names and values, so that generated patterns
/// overlap often
pub fn arb_pattern() -> impl Strategy<Value = Pattern> {
    prop::collection::btree_map("[a-e]", "[0-3]", 0..4).prop_map(|map| map.into_iter().collect())
}

/// A set of distinct patterns to store
pub fn arb_patterns(max: usize) -> impl Strategy<Value = Vec<Pattern>> {
    prop::collection::btree_set(arb_pattern(), 0..max).prop_map(|set| set.into_iter().collect())
}

/// A router storing each pattern's text under the pattern itself
pub fn build_router(patterns: &[Pattern]) -> super::Router<String> {
    let mut router = super::Router::new();
    for pattern in patterns {
        router.add(pattern, pattern.to_string());
    }
    router
}
