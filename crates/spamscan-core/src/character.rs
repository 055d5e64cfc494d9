// Byte classification for the single-byte input alphabet.
//
// The automaton guards are built on these predicates; they never look at
// more than the one byte they are given.

// ---------------------------------------------------------------------------
// Byte classes
// ---------------------------------------------------------------------------

/// Returns true for `0` through `9`.
#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Returns true for space, tab, carriage return, or newline.
///
/// Form feed and vertical tab are deliberately not included.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Returns true for a phrase boundary byte (space or double quote).
#[inline]
pub fn is_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'"')
}

/// Numeric value of an ASCII digit byte.
#[inline]
pub fn digit_value(b: u8) -> Option<u8> {
    if is_digit(b) { Some(b - b'0') } else { None }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Render a byte for log and error messages.
///
/// Printable ASCII is shown as-is, common control characters use their
/// backslash escapes and everything else is shown as `\xNN`.
pub fn escape_byte(b: u8) -> String {
    match b {
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        0x20..=0x7E => (b as char).to_string(),
        _ => format!("\\x{b:02X}"),
    }
}
