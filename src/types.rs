//! Shorthand for some annoying-to-write types

pub type Map<K, V> = fxhash::FxHashMap<K, V>;
