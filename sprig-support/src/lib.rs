use std::borrow::Cow;
use std::fmt;

fn escape_single_quotes(input: &str) -> Cow<'_, str> {
    if input.contains('\'') {
        Cow::Owned(input.replace('\'', "\\'"))
    } else {
        Cow::Borrowed(input)
    }
}

fn format_operation_error(
    operation: &str,
    target: Option<&str>,
    error: impl fmt::Display,
) -> String {
    match target {
        Some(target) => {
            let escaped = escape_single_quotes(target);
            format!("{operation}('{}'): {error}", escaped)
        }
        None => format!("{operation}: {error}"),
    }
}

/// Message for a missing or malformed argument, e.g. `insert: index argument required`.
pub fn argument_error(operation: &str, error: impl fmt::Display) -> String {
    format_operation_error(operation, None, error)
}

/// Message for an index that fell outside `min..=max` after normalization.
pub fn index_error(index: i64, min: i64, max: i64) -> String {
    format!("index ({index}) out of range ({min} to {max})")
}

/// Message for a receiver of the wrong variant.
pub fn type_error(operation: &str, expected: &str) -> String {
    format!("'{operation}' requires {expected}")
}

/// Message for a request that exceeds a runtime limit.
pub fn limit_error(operation: &str, error: impl fmt::Display) -> String {
    format_operation_error(operation, None, error)
}

/// Message for registry misconfiguration, naming the offending intrinsic.
pub fn registry_error(operation: &str, name: &str, error: impl fmt::Display) -> String {
    format_operation_error(operation, Some(name), error)
}
