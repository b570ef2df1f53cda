//! Various utility macros

/// Assert that a lookup returns the expected payload
#[macro_export]
macro_rules! finds (
    ($router:expr, $query:expr, $expected:expr) => {{
        let router = &$router;
        let query = $query;
        match router.find(&query, false) {
            Some(found) => assert_eq!(*found, $expected, "looking up {}", query),
            None => panic!("Looking up {} found nothing, expected {:?}", query, $expected),
        }
    }}
);

/// Assert that a lookup comes back empty
#[macro_export]
macro_rules! finds_nothing (
    ($router:expr, $query:expr) => {{
        let router = &$router;
        let query = $query;
        if let Some(found) = router.find(&query, false) {
            panic!("Looking up {} found {:?}, expected nothing", query, *found);
        }
    }}
);
