//! Shared validation predicates.
//!
//! These are stateless, never-panicking predicates over primitives and
//! slices. Composite checks are all-or-nothing: an empty slice or a single
//! failing element fails the whole slice. UUID validity is a purely lexical
//! check of the RFC 4122 textual shape; no lookup of any kind happens here.

use uuid::Uuid;

/// Returns true iff the string is non-empty.
pub fn is_non_empty_string(value: &str) -> bool {
    !value.is_empty()
}

/// Returns true iff the string parses as an RFC 4122 UUID.
pub fn is_valid_uuid(value: &str) -> bool {
    Uuid::try_parse(value).is_ok()
}

/// Returns true iff the slice is non-empty and every element satisfies the
/// predicate.
pub fn validate_non_empty_slice<T, F>(items: &[T], predicate: F) -> bool
where
    F: Fn(&T) -> bool,
{
    !items.is_empty() && items.iter().all(predicate)
}

/// Returns true iff the slice is a non-empty slice of non-empty strings.
pub fn is_non_empty_string_slice<S: AsRef<str>>(values: &[S]) -> bool {
    validate_non_empty_slice(values, |v| is_non_empty_string(v.as_ref()))
}

/// Returns true iff the slice is a non-empty slice of valid UUID strings.
pub fn is_valid_uuid_slice<S: AsRef<str>>(values: &[S]) -> bool {
    validate_non_empty_slice(values, |v| is_valid_uuid(v.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_UUID: &str = "ec6865e6-e60e-424b-a071-6a9c1603d735";

    #[test]
    fn non_empty_string() {
        assert!(is_non_empty_string("a"));
        assert!(!is_non_empty_string(""));
    }

    #[test]
    fn uuid_lexical_check() {
        assert!(is_valid_uuid(VALID_UUID));
        assert!(is_valid_uuid("00000000-0000-0000-0000-000000000000"));
        assert!(!is_valid_uuid("not-a-uuid"));
        assert!(!is_valid_uuid(""));
        assert!(!is_valid_uuid("ec6865e6-e60e-424b-a071-6a9c1603d73"));
    }

    #[test]
    fn empty_slice_fails() {
        let empty: [&str; 0] = [];
        assert!(!is_non_empty_string_slice(&empty));
        assert!(!is_valid_uuid_slice(&empty));
    }

    #[test]
    fn slice_validation_is_all_or_nothing() {
        assert!(is_non_empty_string_slice(&["a", "b"]));
        assert!(!is_non_empty_string_slice(&["a", ""]));
        assert!(is_valid_uuid_slice(&[VALID_UUID]));
        assert!(!is_valid_uuid_slice(&[VALID_UUID, "nope"]));
    }
}
