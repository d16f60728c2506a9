//! Domain-specific assertion macros for pathnorm harnesses.
//!
//! These wrap `pretty_assertions` and name the input that produced a wrong
//! label, which plain `assert_eq!` output leaves out.

/// Assert that normalizing `$input` with `$rules` yields `$expected`.
///
/// ```rust
/// assert_normalizes!(api_rules(), "/api/v1/users/3", "/api/v1/users/:id");
/// ```
#[macro_export]
macro_rules! assert_normalizes {
    ($rules:expr, $input:expr, $expected:expr) => {{
        let rules: &pathnorm_core::RuleSet = &$rules;
        let input: &str = $input;
        let expected: &str = $expected;
        match pathnorm_core::normalize_path(input, Some(rules)) {
            Ok(actual) => pretty_assertions::assert_eq!(
                actual, expected,
                "assert_normalizes! failed for input {:?}", input
            ),
            Err(e) => panic!("assert_normalizes! failed: {:?} raised {}", input, e),
        }
    }};
}

/// Assert that a label is one of the four status classes.
pub fn assert_status_label(label: &str) {
    assert!(
        matches!(label, "2XX" | "3XX" | "4XX" | "5XX"),
        "not a status class label: {label:?}"
    );
}

/// Assert that a path label carries no query string or fragment.
pub fn assert_bare_path(label: &str) {
    assert!(
        !label.contains('?') && !label.contains('#'),
        "label still carries a query or fragment: {label:?}"
    );
}
