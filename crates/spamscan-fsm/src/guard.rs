// Guard predicates deciding whether a transition rule applies to a byte.

use spamscan_core::character::{is_delimiter, is_digit, is_whitespace};

/// The closed set of guard kinds a transition rule can carry.
///
/// Guards are pure: evaluating one never changes any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Catch-all: accepts every byte.
    Always,
    /// `0` through `9`.
    Digit,
    /// Space, tab, carriage return, newline.
    Whitespace,
    /// Space or double quote.
    Delimiter,
    /// Exactly the stored byte.
    Literal(u8),
}

impl Guard {
    /// Returns true if this guard accepts `b`.
    #[inline]
    pub fn accepts(self, b: u8) -> bool {
        match self {
            Guard::Always => true,
            Guard::Digit => is_digit(b),
            Guard::Whitespace => is_whitespace(b),
            Guard::Delimiter => is_delimiter(b),
            Guard::Literal(expected) => b == expected,
        }
    }

    /// Returns true if this guard accepts every byte value.
    #[inline]
    pub fn is_catch_all(self) -> bool {
        matches!(self, Guard::Always)
    }

}
