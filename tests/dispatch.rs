#[macro_use]
extern crate log;

#[macro_use]
mod util_macros;

use patrun::{pattern, Base, Options, Pattern, Router};
use serde_json::json;

/// Messages as they would arrive off the wire
fn message(text: &str) -> Pattern {
    let json: serde_json::Value = serde_json::from_str(text).expect("test messages are valid JSON");
    Pattern::from_json(&json)
}

#[test]
fn message_dispatch() {
    env_logger::builder().is_test(true).init();

    let mut router = Router::new();
    router.add(&pattern! { role: "math", cmd: "sum" }, "sum");
    router.add(&pattern! { role: "math", cmd: "product" }, "product");
    router.add(&pattern! { role: "math", cmd: "sum", integer: true }, "integer sum");
    router.add(&pattern! { role: "store" }, "store");
    info!("Routes:\n{}", router);

    finds!(router, message(r#"{"role": "math", "cmd": "sum", "left": 1, "right": 2}"#), "sum");
    finds!(router, message(r#"{"role": "math", "cmd": "sum", "integer": true}"#), "integer sum");
    finds!(router, message(r#"{"role": "math", "cmd": "product"}"#), "product");
    finds!(router, message(r#"{"role": "store", "cmd": "sum"}"#), "store");
    finds_nothing!(router, message(r#"{"role": "math", "cmd": "divide"}"#));
    finds_nothing!(router, message("[1, 2, 3]"));

    // Removing a route only touches that route
    router.remove(&pattern! { role: "math", cmd: "sum" });
    finds_nothing!(router, message(r#"{"role": "math", "cmd": "sum"}"#));
    finds!(router, message(r#"{"role": "math", "cmd": "sum", "integer": true}"#), "integer sum");

    let listed = serde_json::to_value(router.list(&pattern! { role: "math" }, false)).expect("entries serialize");
    assert_eq!(
        listed,
        json!([
            { "match": { "cmd": "product", "role": "math" }, "data": "product" },
            { "match": { "cmd": "sum", "integer": "true", "role": "math" }, "data": "integer sum" },
        ])
    );
}

#[test]
fn textual_patterns() {
    let mut router = Router::with_options(Options { gex: true });
    for (text, data) in &[("a=1", "A"), ("a=1, b=x*", "B"), ("c = 3", "C")] {
        let pattern: Pattern = text.parse().expect("patterns in this test are well formed");
        router.add(&pattern, *data);
    }

    finds!(router, pattern! { a: 1, b: "xyz" }, "B");
    finds!(router, pattern! { a: 1, b: "y" }, "A");
    finds!(router, pattern! { c: 3 }, "C");

    // Rendered entries parse back into the patterns they came from
    for entry in router.list(&Pattern::new(), false) {
        let reparsed: Pattern = entry.pattern().to_string().parse().expect("rendered patterns parse");
        assert_eq!(&reparsed, entry.pattern());
    }

    assert!("a=1, =2".parse::<Pattern>().is_err());
}

#[test]
fn structure_is_plain_json() {
    let mut router = Router::new();
    router.add(&Pattern::new(), 0);
    router.add(&pattern! { p: "v" }, 1);

    let text = serde_json::to_string(&router).expect("routers serialize");
    let value: serde_json::Value = serde_json::from_str(&text).expect("and parse back");
    assert_eq!(
        value,
        json!({ "d": 0, "s": [{ "k": "p", "sk": "0~p", "v": { "v": { "d": 1 } } }] })
    );
}

#[test]
fn listing_several_commands() {
    let mut router = Router::new();
    for cmd in &["sum", "product", "divide"] {
        router.add(&pattern! { role: "math", cmd: *cmd }, cmd.to_string());
    }
    router.add(&pattern! { role: "store", cmd: "save" }, "save".to_string());

    let base = Base::from_json(&json!({ "cmd": ["sum", "d*", "save"], "role": "math" }));
    let found: Vec<String> = router.list(base, false).into_iter().map(|e| e.data().clone()).collect();
    assert_eq!(found, vec!["divide".to_string(), "sum".to_string()]);
}
