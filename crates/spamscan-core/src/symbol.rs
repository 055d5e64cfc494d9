// Input symbols consumed by the automaton, one at a time.

use std::fmt;

use crate::character::escape_byte;

/// A single input symbol: either a concrete byte or the end of the stream.
///
/// `End` is not a byte value, so no input byte can be confused with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Byte(u8),
    End,
}

impl Symbol {
    #[inline]
    pub fn is_end(self) -> bool {
        matches!(self, Symbol::End)
    }
}

impl From<Option<u8>> for Symbol {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(b) => Symbol::Byte(b),
            None => Symbol::End,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) => f.write_str(&escape_byte(*b)),
            Symbol::End => f.write_str("<end>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_option() {
        assert_eq!(Symbol::from(Some(b'a')), Symbol::Byte(b'a'));
        assert_eq!(Symbol::from(None), Symbol::End);
    }

    #[test]
    fn end_is_not_a_byte() {
        assert!(Symbol::End.is_end());
        assert!(!Symbol::Byte(0xFF).is_end());
    }

    #[test]
    fn display() {
        assert_eq!(Symbol::Byte(b'w').to_string(), "w");
        assert_eq!(Symbol::Byte(b'\n').to_string(), "\\n");
        assert_eq!(Symbol::End.to_string(), "<end>");
    }
}
