/// Assert that the provided `Result<T, E>` is the Ok variant
#[macro_export]
macro_rules! assert_ok {
    ($r:expr) => {{
        let r = $r;
        match r {
            Ok(v) => v,
            Err(e) => panic!("Unexpected error {:?}", e),
        }
    }};
}

/// Assert that the provided `Result<T, E>` is the Error variant
#[macro_export]
macro_rules! assert_err {
    ($r:expr) => {{
        let r = $r;
        match r {
            Ok(v) => panic!("Unexpected success {:?}", v),
            Err(e) => e,
        }
    }};
}

/// Assert that a lookup produced the expected payload
#[macro_export]
macro_rules! assert_found {
    ($found:expr, $expected:expr) => {{
        let found = $found;
        match found {
            Some(ref m) => assert_eq!(**m, $expected),
            None => panic!("Expected {:?}, found nothing", $expected),
        }
    }};
}

/// Assert that a lookup came back empty
#[macro_export]
macro_rules! assert_not_found {
    ($found:expr) => {{
        let found = $found;
        if let Some(ref m) = found {
            panic!("Expected nothing, found {:?}", **m);
        }
    }};
}
