use crate::base36;

/// Length of identifiers produced by a default-configured generator.
pub const DEFAULT_LENGTH: usize = 24;

/// Checks that `value` is structurally a default-length cuid: exactly
/// [`DEFAULT_LENGTH`] characters, all in `[0-9a-z]`.
///
/// Only the shape is checked. There is no checksum, so this cannot tell
/// whether the value was ever produced by a generator.
///
/// # Example
/// ```
/// use cuidgen::is_cuid;
///
/// assert!(is_cuid("tz4a98xxat96iws9zmbrgj3a"));
/// assert!(!is_cuid("TZ4A98XXAT96IWS9ZMBRGJ3A"));
/// assert!(!is_cuid(""));
/// ```
pub fn is_cuid(value: impl AsRef<[u8]>) -> bool {
    is_cuid_with_length(value, DEFAULT_LENGTH)
}

/// Like [`is_cuid`], for identifiers configured with a custom `length`.
pub fn is_cuid_with_length(value: impl AsRef<[u8]>, length: usize) -> bool {
    let bytes = value.as_ref();
    bytes.len() == length && bytes.iter().all(|&b| base36::is_digit(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lower_case_base36_of_default_length() {
        assert!(is_cuid("a".repeat(24)));
        assert!(is_cuid("0123456789abcdefghijklmn"));
        assert!(is_cuid(String::from("zzzzzzzzzzzzzzzzzzzzzzzz")));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(!is_cuid(""));
        assert!(!is_cuid("A".repeat(24)));
        assert!(!is_cuid("a".repeat(23)));
        assert!(!is_cuid("a".repeat(25)));
        assert!(!is_cuid("0123456789abcdefghijklm-"));
        assert!(!is_cuid("0123456789abcdefghijklm "));
    }

    #[test]
    fn rejects_non_ascii_bytes() {
        // 12 two-byte characters: 24 bytes, none of them base-36.
        assert!(!is_cuid("é".repeat(12)));
        assert!(!is_cuid([0xff_u8; 24]));
    }

    #[test]
    fn honours_custom_lengths() {
        assert!(is_cuid_with_length("ab", 2));
        assert!(!is_cuid_with_length("ab", 3));
        assert!(is_cuid_with_length("", 0));
    }
}
