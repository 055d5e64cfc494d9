// Input collaborators: anything that yields one symbol at a time.

use std::io::{self, BufReader, Read};

use spamscan_core::symbol::Symbol;

/// A sequential source of input symbols, consumed strictly once.
///
/// After the first [`Symbol::End`] a source keeps returning `End`.
pub trait SymbolSource {
    fn next_symbol(&mut self) -> Symbol;
}

impl<S: SymbolSource + ?Sized> SymbolSource for &mut S {
    fn next_symbol(&mut self) -> Symbol {
        (**self).next_symbol()
    }
}

/// Symbols from any byte iterator.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    inner: I,
}

impl<I: Iterator<Item = u8>> IterSource<I> {
    pub fn new(bytes: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: bytes.into_iter(),
        }
    }
}

impl<I: Iterator<Item = u8>> SymbolSource for IterSource<I> {
    fn next_symbol(&mut self) -> Symbol {
        self.inner.next().into()
    }
}

/// Symbols from a reader.
///
/// A read error ends the input, like end-of-file. The error is kept so the
/// caller can tell a truncated scan from a complete one.
pub struct ReadSource<R> {
    bytes: io::Bytes<BufReader<R>>,
    error: Option<io::Error>,
    done: bool,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            error: None,
            done: false,
        }
    }

    /// The read error that ended the input, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> SymbolSource for ReadSource<R> {
    fn next_symbol(&mut self) -> Symbol {
        while !self.done {
            match self.bytes.next() {
                Some(Ok(b)) => return Symbol::Byte(b),
                Some(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Some(Err(e)) => {
                    self.error = Some(e);
                    self.done = true;
                }
                None => self.done = true,
            }
        }
        Symbol::End
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(source: &mut impl SymbolSource) -> Vec<Symbol> {
        let mut out = Vec::new();
        loop {
            let s = source.next_symbol();
            out.push(s);
            if s.is_end() {
                return out;
            }
        }
    }

    #[test]
    fn iter_source() {
        let mut src = IterSource::new(b"ab".iter().copied());
        assert_eq!(
            drain(&mut src),
            vec![Symbol::Byte(b'a'), Symbol::Byte(b'b'), Symbol::End]
        );
        assert_eq!(src.next_symbol(), Symbol::End);
    }

    #[test]
    fn read_source() {
        let mut src = ReadSource::new(Cursor::new(b"<\n".to_vec()));
        assert_eq!(
            drain(&mut src),
            vec![Symbol::Byte(b'<'), Symbol::Byte(b'\n'), Symbol::End]
        );
        assert!(src.take_error().is_none());
    }

    struct Failing {
        served: bool,
    }

    impl Read for Failing {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("disk on fire"));
            }
            self.served = true;
            buf[0] = b'x';
            Ok(1)
        }
    }

    #[test]
    fn read_error_ends_input() {
        let mut src = ReadSource::new(Failing { served: false });
        assert_eq!(drain(&mut src), vec![Symbol::Byte(b'x'), Symbol::End]);
        assert_eq!(src.next_symbol(), Symbol::End);
        let err = src.take_error().unwrap();
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn mut_ref_is_a_source() {
        let mut src = IterSource::new(vec![1u8]);
        let mut by_ref = &mut src;
        assert_eq!(drain(&mut by_ref), vec![Symbol::Byte(1), Symbol::End]);
    }
}
