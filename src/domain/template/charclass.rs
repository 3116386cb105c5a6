// Character classes and percent-encoding (RFC 3986 / RFC 3987 / RFC 6570)
//
// Classification works on byte slices starting at the character being looked at,
// so multi-byte sequences and percent-encoded triplets can be inspected in place.

use super::buffer::OutputBuffer;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Reserved characters that `+` and `#` expansions let through unescaped
pub fn is_reserved(c: u8) -> bool {
    matches!(
        c,
        b':' | b'/'
            | b'?'
            | b'#'
            | b'['
            | b']'
            | b'@'
            | b'!'
            | b'$'
            | b'&'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b'+'
            | b','
            | b';'
            | b'='
            | b'|'
    )
}

pub fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'_' | b'~')
}

/// Length of the UTF-8 sequence introduced by `lead`, or 0 for an invalid lead byte
pub fn utf8_len(lead: u8) -> usize {
    match lead {
        0x00..=0xBF => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

/// Decode the code point at the start of `s`.
///
/// Returns `None` for an invalid lead byte or a truncated sequence. Continuation
/// bytes are masked, not checked.
pub fn decode_codepoint(s: &[u8]) -> Option<u32> {
    let lead = *s.first()?;
    let len = utf8_len(lead);
    if len == 0 || s.len() < len {
        return None;
    }
    if len == 1 {
        return Some(u32::from(lead));
    }

    let mask = (1u32 << (7 - len)) - 1;
    let cp = s[1..len]
        .iter()
        .fold(u32::from(lead) & mask, |acc, b| (acc << 6) | (u32::from(*b) & 0x3F));
    Some(cp)
}

/// `ucschar` from RFC 3987
pub fn is_ucschar(cp: u32) -> bool {
    matches!(
        cp,
        0xA0..=0xD7FF
            | 0xF900..=0xFDCF
            | 0xFDF0..=0xFFEF
            | 0x10000..=0x1FFFD
            | 0x20000..=0x2FFFD
            | 0x30000..=0x3FFFD
            | 0x40000..=0x4FFFD
            | 0x50000..=0x5FFFD
            | 0x60000..=0x6FFFD
            | 0x70000..=0x7FFFD
            | 0x80000..=0x8FFFD
            | 0x90000..=0x9FFFD
            | 0xA0000..=0xAFFFD
            | 0xB0000..=0xBFFFD
            | 0xC0000..=0xCFFFD
            | 0xD0000..=0xDFFFD
            | 0xE1000..=0xEFFFD
    )
}

/// `iprivate` from RFC 3987
pub fn is_iprivate(cp: u32) -> bool {
    matches!(cp, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD)
}

/// True when `s` starts with `%` followed by two hex digits
pub fn is_pct_encoded(s: &[u8]) -> bool {
    matches!(s, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

/// `literals` production of RFC 6570, applied to the character starting `s`
pub fn is_literal(s: &[u8]) -> bool {
    let Some(&c) = s.first() else {
        return false;
    };

    if c < 0x80 {
        return matches!(
            c,
            0x21 | 0x23..=0x24 | 0x26 | 0x28..=0x3B | 0x3D | 0x3F..=0x5B | 0x5D | 0x5F | 0x61..=0x7A | 0x7E
        ) || is_pct_encoded(s);
    }

    match decode_codepoint(s) {
        Some(cp) if utf8_len(c) > 1 => is_ucschar(cp) || is_iprivate(cp),
        _ => false,
    }
}

/// `varchar` from RFC 6570: ALPHA / DIGIT / "_" / pct-encoded
pub fn is_varname_char(s: &[u8]) -> bool {
    match s.first() {
        Some(&c) if c.is_ascii_alphanumeric() || c == b'_' => true,
        Some(_) => is_pct_encoded(s),
        None => false,
    }
}

/// `%XX` with uppercase hex digits
pub fn percent_encode_byte(b: u8) -> [char; 3] {
    [
        '%',
        char::from(HEX_UPPER[usize::from(b >> 4)]),
        char::from(HEX_UPPER[usize::from(b & 0x0F)]),
    ]
}

/// Encode `value` into `out`.
///
/// Unreserved characters (and reserved ones when `allow_reserved` is set) pass
/// through, existing percent-encoded triplets are copied unchanged, everything else
/// is percent-encoded byte by byte. When `max_chars` is non-zero, at most that many
/// characters of `value` are consumed; a triplet counts as one character.
pub fn encode_into(out: &mut OutputBuffer, value: &str, allow_reserved: bool, max_chars: usize) {
    let bytes = value.as_bytes();
    let mut i = 0;
    let mut consumed = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if is_pct_encoded(&bytes[i..]) {
            out.append_str(&value[i..i + 3]);
            i += 3;
        } else if c < 0x80 {
            if is_unreserved(c) || (allow_reserved && is_reserved(c)) {
                out.append_char(char::from(c));
            } else {
                out.append_pct_byte(c);
            }
            i += 1;
        } else {
            let len = utf8_len(c).clamp(1, bytes.len() - i);
            for b in &bytes[i..i + len] {
                out.append_pct_byte(*b);
            }
            i += len;
        }

        consumed += 1;
        if consumed == max_chars {
            break;
        }
    }
}

/// Encode `value` into a fresh string. See [`encode_into`].
pub fn encode(value: &str, allow_reserved: bool, max_chars: usize) -> String {
    let mut out = OutputBuffer::with_capacity(value.len());
    encode_into(&mut out, value, allow_reserved, max_chars);
    out.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_and_unreserved_are_disjoint() {
        for c in 0u8..0x80 {
            assert!(!(is_reserved(c) && is_unreserved(c)), "{:?}", char::from(c));
        }
        assert!(is_reserved(b'|'));
        assert!(is_reserved(b'\''));
        assert!(!is_reserved(b'%'));
        assert!(is_unreserved(b'~'));
        assert!(!is_unreserved(b' '));
    }

    #[test]
    fn test_utf8_len() {
        assert_eq!(utf8_len(b'a'), 1);
        assert_eq!(utf8_len(0xC3), 2);
        assert_eq!(utf8_len(0xE2), 3);
        assert_eq!(utf8_len(0xF0), 4);
        assert_eq!(utf8_len(0xF8), 0);
        assert_eq!(utf8_len(0xFF), 0);
    }

    #[test]
    fn test_decode_codepoint() {
        assert_eq!(decode_codepoint("é".as_bytes()), Some(0xE9));
        assert_eq!(decode_codepoint("€".as_bytes()), Some(0x20AC));
        assert_eq!(decode_codepoint("😀".as_bytes()), Some(0x1F600));
        assert_eq!(decode_codepoint(&[0xE2, 0x82]), None);
        assert_eq!(decode_codepoint(&[0xF8, 0x80, 0x80]), None);
        assert_eq!(decode_codepoint(&[]), None);
    }

    #[test]
    fn test_pct_encoded() {
        assert!(is_pct_encoded(b"%20"));
        assert!(is_pct_encoded(b"%aFtail"));
        assert!(!is_pct_encoded(b"%2"));
        assert!(!is_pct_encoded(b"%G0"));
        assert!(!is_pct_encoded(b"20%"));
    }

    #[test]
    fn test_literal_ascii() {
        assert!(is_literal(b"a"));
        assert!(is_literal(b"/"));
        assert!(is_literal(b"%41"));
        for c in [b' ', b'"', b'\'', b'<', b'>', b'\\', b'^', b'`', b'{', b'|', b'}', b'%'] {
            assert!(!is_literal(&[c]), "{:?}", char::from(c));
        }
    }

    #[test]
    fn test_literal_unicode_ranges() {
        assert!(is_literal("é".as_bytes()));
        assert!(is_literal("\u{E000}".as_bytes()));
        assert!(is_literal("\u{10FFFD}".as_bytes()));
        assert!(!is_literal("\u{85}".as_bytes()));
        assert!(!is_literal("\u{FFFE}".as_bytes()));
        assert!(!is_literal(&[0xF8]));
    }

    #[test]
    fn test_varname_char() {
        assert!(is_varname_char(b"a"));
        assert!(is_varname_char(b"_"));
        assert!(is_varname_char(b"7"));
        assert!(is_varname_char(b"%2E"));
        assert!(!is_varname_char(b"."));
        assert!(!is_varname_char(b"-"));
        assert!(!is_varname_char(b""));
    }

    #[test]
    fn test_percent_encode_byte_is_uppercase() {
        assert_eq!(percent_encode_byte(b' '), ['%', '2', '0']);
        assert_eq!(percent_encode_byte(0xAB), ['%', 'A', 'B']);
    }

    #[test]
    fn test_encode_unreserved_only() {
        assert_eq!(encode("Hello World!", false, 0), "Hello%20World%21");
        assert_eq!(encode("/foo/bar", false, 0), "%2Ffoo%2Fbar");
    }

    #[test]
    fn test_encode_allow_reserved() {
        assert_eq!(encode("Hello World!", true, 0), "Hello%20World!");
        assert_eq!(encode("/foo/bar", true, 0), "/foo/bar");
    }

    #[test]
    fn test_encode_keeps_triplets() {
        assert_eq!(encode("50%25", false, 0), "50%25");
        assert_eq!(encode("50%", false, 0), "50%25");
        assert_eq!(encode("%zz", false, 0), "%25zz");
    }

    #[test]
    fn test_encode_multibyte() {
        assert_eq!(encode("é", false, 0), "%C3%A9");
        assert_eq!(encode("\u{85}", false, 0), "%C2%85");
    }

    #[test]
    fn test_encode_prefix_counts_characters() {
        assert_eq!(encode("value", false, 3), "val");
        assert_eq!(encode("value", false, 30), "value");
        assert_eq!(encode("éclair", false, 2), "%C3%A9c");
        assert_eq!(encode("%41BC", false, 2), "%41B");
    }
}
