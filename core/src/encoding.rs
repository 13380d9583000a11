//! Query-string escaping.
//!
//! Letters, digits and `-_.~` pass through, a space becomes `+`, and every
//! other byte of the UTF-8 form becomes `%XX` with uppercase hex. Applying
//! the escape twice is not a no-op: `"a b"` becomes `"a+b"` and then
//! `"a%2Bb"`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn query_escape(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_ESCAPE).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_becomes_plus() {
        assert_eq!(query_escape("a b"), "a+b");
        assert_eq!(query_escape("  "), "++");
    }

    #[test]
    fn unreserved_pass_through() {
        assert_eq!(query_escape("AZaz09-_.~"), "AZaz09-_.~");
        assert_eq!(query_escape(""), "");
    }

    #[test]
    fn reserved_are_percent_encoded() {
        assert_eq!(query_escape("a/b?c=d&e"), "a%2Fb%3Fc%3Dd%26e");
        assert_eq!(query_escape("1+1*2"), "1%2B1%2A2");
        assert_eq!(query_escape("100%"), "100%25");
    }

    #[test]
    fn multibyte_uses_utf8_bytes() {
        assert_eq!(query_escape("über"), "%C3%BCber");
    }

    #[test]
    fn escaping_twice_encodes_the_escapes() {
        assert_eq!(query_escape(&query_escape("a b")), "a%2Bb");
        assert_eq!(query_escape(&query_escape("x/y")), "x%252Fy");
    }
}
