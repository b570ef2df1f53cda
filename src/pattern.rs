//! Patterns and queries.
//!
//! Both are the same thing: a set of `name = value` constraints, kept in
//! canonical form. Canonical form means that
//!
//! - properties without a value (`None`, JSON `null`) are dropped entirely,
//!   they do not even constrain to the empty string;
//! - every other value is stringified, so `1`, `1.0` and `"1"` are the same
//!   constraint;
//! - properties are ordered by name, which is also the order the matching
//!   engine walks them in.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

/// A query or base-pattern value that accepts any value
pub const ANY: &str = "*";

/// A raw property value, before canonicalization
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value. The property does not constrain anything.
    Absent,
    /// A string, used verbatim
    Str(String),
    /// An integer
    Int(i64),
    /// A floating point number
    Float(f64),
    /// A boolean, canonicalized as `true`/`false`
    Bool(bool),
}

impl Value {
    /// The canonical string form of this value, or `None` if the property
    /// should be dropped
    pub fn into_canonical(self) -> Option<String> {
        match self {
            Value::Absent => None,
            Value::Str(s) => Some(s),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) if f == f64::INFINITY => Some("Infinity".to_string()),
            Value::Float(f) if f == f64::NEG_INFINITY => Some("-Infinity".to_string()),
            // Also catches -0.0
            Value::Float(f) if f == 0.0 => Some("0".to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(other: &str) -> Value {
        Value::Str(other.into())
    }
}

impl From<String> for Value {
    fn from(other: String) -> Value {
        Value::Str(other)
    }
}

impl From<&String> for Value {
    fn from(other: &String) -> Value {
        Value::Str(other.clone())
    }
}

impl From<char> for Value {
    fn from(other: char) -> Value {
        Value::Str(other.to_string())
    }
}

impl From<bool> for Value {
    fn from(other: bool) -> Value {
        Value::Bool(other)
    }
}

impl From<f32> for Value {
    fn from(other: f32) -> Value {
        Value::Float(f64::from(other))
    }
}

impl From<f64> for Value {
    fn from(other: f64) -> Value {
        Value::Float(other)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(other: $t) -> Value {
                    Value::Int(i64::from(other))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

// These don't fit in an i64, but their decimal form is all we keep anyway
macro_rules! value_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(other: $t) -> Value {
                    Value::Str(other.to_string())
                }
            }
        )*
    };
}

value_from_wide_int!(u64, usize, i128, u128);

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(other: Option<V>) -> Value {
        match other {
            Some(v) => v.into(),
            None => Value::Absent,
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(other: &serde_json::Value) -> Value {
        use serde_json::Value as Json;
        match other {
            Json::Null => Value::Absent,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => match n.as_f64() {
                    Some(f) if n.is_f64() => Value::Float(f),
                    _ => Value::Str(n.to_string()),
                },
            },
            Json::String(s) => Value::Str(s.clone()),
            nested => Value::Str(nested.to_string()),
        }
    }
}

/// A canonical set of property constraints.
///
/// See the module documentation for what "canonical" means here.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern {
    constraints: BTreeMap<String, String>,
}

impl Pattern {
    /// The empty pattern. It matches every query.
    pub fn new() -> Pattern {
        Default::default()
    }

    /// Canonicalize a JSON document.
    ///
    /// Only objects carry constraints. Anything else (`null`, numbers,
    /// strings, arrays) is treated as "no constraints" rather than an error.
    pub fn from_json(json: &serde_json::Value) -> Pattern {
        match json {
            serde_json::Value::Object(properties) => properties
                .iter()
                .map(|(name, value)| (name.as_str(), Value::from(value)))
                .collect(),
            other => {
                debug!("Non-object {:?} canonicalizes to the empty pattern", other);
                Pattern::new()
            }
        }
    }

    /// Set a constraint, returning the previous value for `name`.
    /// An absent value removes the constraint instead.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<String> {
        let name = name.into();
        match value.into().into_canonical() {
            Some(value) => self.constraints.insert(name, value),
            None => self.constraints.remove(&name),
        }
    }

    /// Builder-style version of `insert`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Pattern {
        self.insert(name, value);
        self
    }

    /// Drop the constraint on `name`, if there is one
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.constraints.remove(name)
    }

    /// The canonical value `name` is constrained to
    pub fn get(&self, name: &str) -> Option<&str> {
        self.constraints.get(name).map(String::as_str)
    }

    /// Whether `name` is constrained at all
    pub fn contains(&self, name: &str) -> bool {
        self.constraints.contains_key(name)
    }

    /// Number of constraints
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// True for the catch-all pattern
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterate over the constraints in canonical (alphabetical) order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.constraints.iter(),
        }
    }

    /// Iterate over the constrained names in canonical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constraints.keys().map(String::as_str)
    }
}

/// Iterator over the `(name, value)` constraints of a pattern
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Pattern {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Pattern {
        let mut pattern = Pattern::new();
        pattern.extend(iter);
        pattern
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Pattern {
    fn from(other: BTreeMap<K, V>) -> Pattern {
        other.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Pattern {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Renders as `name=value, name=value`. The empty pattern renders as the
/// empty string.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for (name, value) in self.iter() {
            write!(f, "{}{}={}", separator, name, value)?;
            separator = ", ";
        }
        Ok(())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Parses the `Display` form back into a pattern
impl FromStr for Pattern {
    type Err = crate::PatternError;

    fn from_str(s: &str) -> Result<Pattern, Self::Err> {
        crate::parsers::parse_pattern(s)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The base of a listing.
///
/// Like a [`Pattern`](struct.Pattern.html), except that a property may list
/// several alternative values. An entry satisfies such a property if its value
/// is accepted by any one of them, each alternative being a literal value or,
/// if it contains `*`, a glob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Base {
    constraints: BTreeMap<String, Vec<String>>,
}

impl Base {
    /// The empty base. It accepts every entry.
    pub fn new() -> Base {
        Default::default()
    }

    /// Canonicalize a JSON document.
    ///
    /// Arrays give a property several alternatives; `null` elements are
    /// skipped. Non-objects are treated as "no constraints", as in
    /// [`Pattern::from_json`](struct.Pattern.html#method.from_json).
    pub fn from_json(json: &serde_json::Value) -> Base {
        let properties = match json {
            serde_json::Value::Object(properties) => properties,
            other => {
                debug!("Non-object {:?} canonicalizes to the empty base", other);
                return Base::new();
            }
        };
        let mut base = Base::new();
        for (name, value) in properties {
            match value {
                serde_json::Value::Array(values) => {
                    base = base.one_of(name.as_str(), values.iter().map(Value::from))
                }
                value => base = base.with(name.as_str(), Value::from(value)),
            }
        }
        base
    }

    /// Builder-style constraint of `name` to a single value.
    /// An absent value removes the constraint instead.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Base {
        let name = name.into();
        match value.into().into_canonical() {
            Some(value) => {
                self.constraints.insert(name, vec![value]);
            }
            None => {
                self.constraints.remove(&name);
            }
        }
        self
    }

    /// Builder-style constraint of `name` to any of `values`. Absent values
    /// are skipped; with none left, nothing satisfies the property.
    pub fn one_of<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Base {
        let values = values
            .into_iter()
            .filter_map(|value| value.into().into_canonical())
            .collect();
        self.constraints.insert(name.into(), values);
        self
    }

    /// Number of constrained properties
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// True for the base that accepts everything
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterate over the constrained names and their alternatives, in
    /// canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.constraints
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl From<&Pattern> for Base {
    fn from(other: &Pattern) -> Base {
        Base {
            constraints: other
                .iter()
                .map(|(name, value)| (name.to_string(), vec![value.to_string()]))
                .collect(),
        }
    }
}

impl From<Pattern> for Base {
    fn from(other: Pattern) -> Base {
        Base {
            constraints: other
                .constraints
                .into_iter()
                .map(|(name, value)| (name, vec![value]))
                .collect(),
        }
    }
}

/// Build a [`Pattern`](pattern/struct.Pattern.html) from `name: value` pairs.
///
/// ```
/// use patrun::pattern;
///
/// let p = pattern! { role: "math", cmd: "sum", version: 2 };
/// assert_eq!(p.to_string(), "cmd=sum, role=math, version=2");
/// ```
#[macro_export]
macro_rules! pattern {
    () => {
        $crate::pattern::Pattern::new()
    };
    ($($name:ident : $value:expr),+ $(,)?) => {{
        let mut pattern = $crate::pattern::Pattern::new();
        $(
            pattern.insert(stringify!($name), $value);
        )+
        pattern
    }};
}

#[cfg(test)]
mod test {
    use super::{Base, Pattern, Value};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn absent_values_are_dropped() {
        crate::test::setup();
        let p = pattern! { p1: None as Option<&str>, p2: "v2" };
        assert_eq!(p.len(), 1);
        assert!(!p.contains("p1"));
        assert_eq!(p.get("p2"), Some("v2"));
    }

    #[test]
    fn absent_value_clears_constraint() {
        let mut p = pattern! { a: 1 };
        assert_eq!(p.insert("a", Value::Absent), Some("1".to_string()));
        assert!(p.is_empty());
    }

    #[test]
    fn numbers_and_strings_are_indistinguishable() {
        assert_eq!(pattern! { a: 1 }, pattern! { a: "1" });
        assert_eq!(pattern! { a: 1.0 }, pattern! { a: "1" });
        assert_eq!(pattern! { a: 1.5 }, pattern! { a: "1.5" });
        assert_eq!(pattern! { a: true }, pattern! { a: "true" });
        assert_eq!(pattern! { a: 0u64 }, pattern! { a: "0" });
        assert_ne!(pattern! { a: 0 }, pattern! { a: false });
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(pattern! { a: std::f64::INFINITY }, pattern! { a: "Infinity" });
        assert_eq!(pattern! { a: std::f64::NEG_INFINITY }, pattern! { a: "-Infinity" });
        assert_eq!(pattern! { a: std::f32::INFINITY }, pattern! { a: "Infinity" });
        assert_eq!(pattern! { a: std::f64::NAN }, pattern! { a: "NaN" });
        assert_eq!(pattern! { a: -0.0 }, pattern! { a: "0" });
    }

    #[test]
    fn canonical_order() {
        let p = pattern! { c: 3, a: 1, b: 2 };
        let names: Vec<_> = p.names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(p.to_string(), "a=1, b=2, c=3");
    }

    #[test]
    fn empty_pattern_renders_empty() {
        assert_eq!(Pattern::new().to_string(), "");
        assert_eq!(pattern! {}, Pattern::new());
    }

    #[test]
    fn json_objects() {
        crate::test::setup();
        let p = Pattern::from_json(&json!({
            "a": 1,
            "b": null,
            "c": "x",
            "d": true,
            "e": 1.5,
            "f": 2.0,
            "g": [1, 2]
        }));
        assert_eq!(
            p,
            pattern! { a: "1", c: "x", d: "true", e: "1.5", f: "2", g: "[1,2]" }
        );
    }

    #[test]
    fn json_non_objects_have_no_constraints() {
        crate::test::setup();
        assert!(Pattern::from_json(&json!(null)).is_empty());
        assert!(Pattern::from_json(&json!(42)).is_empty());
        assert!(Pattern::from_json(&json!("a=1")).is_empty());
        assert!(Pattern::from_json(&json!([["a", 1]])).is_empty());
    }

    #[test]
    fn serializes_as_map() {
        let p = pattern! { b: 2, a: "1" };
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"a":"1","b":"2"}"#
        );
    }

    #[test]
    fn from_iterator() {
        let p: Pattern = vec![("x", Value::from(1)), ("y", Value::Absent)]
            .into_iter()
            .collect();
        assert_eq!(p, pattern! { x: 1 });
    }

    #[test]
    fn from_map() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("role", Some("math"));
        map.insert("cmd", None);
        assert_eq!(Pattern::from(map), pattern! { role: "math" });
    }

    #[test]
    fn bases_from_patterns() {
        let base = Base::from(&pattern! { b: 2, a: 1 });
        let constraints: Vec<_> = base.iter().collect();
        assert_eq!(
            constraints,
            vec![("a", &["1".to_string()][..]), ("b", &["2".to_string()][..])]
        );
        assert_eq!(Base::from(pattern! { b: 2, a: 1 }), base);
        assert!(Base::from(Pattern::new()).is_empty());
    }

    #[test]
    fn bases_from_json() {
        crate::test::setup();
        let base = Base::from_json(&json!({
            "p1": "v1",
            "p2": ["v2a", 2, null, "v2*"],
            "p3": null,
            "p4": []
        }));
        assert_eq!(
            base,
            Base::new()
                .with("p1", "v1")
                .one_of("p2", vec!["v2a", "2", "v2*"])
                .one_of("p4", Vec::<Value>::new())
        );
        assert_eq!(base.len(), 3);
        assert!(Base::from_json(&json!(["p1", "v1"])).is_empty());
    }
}
