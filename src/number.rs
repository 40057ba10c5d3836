//! Prefix-tolerant operand parsing.
//!
//! Operands arrive as untyped query-string text. They are read the way the
//! classic `parseFloat` primitive reads them: leading whitespace is skipped,
//! the longest prefix that forms a decimal literal is converted, and any
//! trailing garbage is ignored. `"12abc"` is therefore `12`, while `"abc"`
//! has no numeric prefix at all.
//!
//! Accepted prefix grammar:
//!
//! ```text
//! [+-]? ( Infinity | ( digits [ "." digits? ] | "." digits ) ( [eE] [+-]? digits )? )
//! ```
//!
//! Hexadecimal, `inf`, `nan` and digit separators are not recognized, so
//! `"0x10"` parses as `0` and `"nan"` has no numeric value.

/// Parse the numeric prefix of `raw`, returning `None` when there is none.
///
/// # Examples
///
/// ```
/// use calcapi::parse_number;
///
/// assert_eq!(parse_number("12abc"), Some(12.0));
/// assert_eq!(parse_number("  -.5e1"), Some(-5.0));
/// assert_eq!(parse_number("abc"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start_matches(is_js_whitespace);
    let bytes = s.as_bytes();

    let negative = bytes.first() == Some(&b'-');
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        // A lone "." only belongs to the literal when a digit precedes or follows it.
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Whitespace as ECMAScript defines it: `WhiteSpace` plus `LineTerminator`.
///
/// Differs from [`char::is_whitespace`]: U+FEFF counts, U+0085 does not.
pub(crate) fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}
