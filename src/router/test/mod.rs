//! Tests for the router

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Build a router from `(pattern, payload)` pairs, optionally with wildcard
/// support turned on
macro_rules! router_with (
    (gex; $($pattern:expr => $data:expr),* $(,)?) => {{
        crate::test::setup();
        let mut router = Router::with_options(Options { gex: true });
        $(
            router.add(&$pattern, $data);
        )*
        router
    }};
    ($($pattern:expr => $data:expr),* $(,)?) => {{
        crate::test::setup();
        let mut router = Router::new();
        $(
            router.add(&$pattern, $data);
        )*
        router
    }};
);


/// Render a router the way a person would skim it: compact, no whitespace
fn skim<T: fmt::Display>(router: &Router<T>) -> String {
    router
        .render(true)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// List as JSON text
fn listed<T: Serialize>(router: &Router<T>, base: Pattern, exact: bool) -> String {
    assert_ok!(serde_json::to_string(&router.list(&base, exact)))
}

/// List from a base with alternatives, as JSON text
fn listed_base<T: Serialize>(router: &Router<T>, base: Base, exact: bool) -> String {
    assert_ok!(serde_json::to_string(&router.list(base, exact)))
}

/// The payloads of a listing, in order
fn listed_data<T: Clone>(router: &Router<T>, base: Pattern, exact: bool) -> Vec<T> {
    router
        .list(&base, exact)
        .into_iter()
        .map(|entry| entry.data().clone())
        .collect()
}
