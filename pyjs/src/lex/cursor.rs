//! Character scanner.
use std::{iter::Peekable, str::CharIndices};

/// Stand-in character reported when the cursor runs past the source.
///
/// Source text may contain a literal null character, so check
/// [`Cursor::at_end`] before treating it as the end.
pub const EOF_CHAR: char = '\0';

pub struct Cursor<'a> {
    chars: Peekable<CharIndices<'a>>,
    original: &'a str,
    /// Byte position and value of the character under the cursor.
    current: (u32, char),
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned *before* the first character.
    ///
    /// Call [`Cursor::next`] once to load the first character.
    pub fn new(original: &'a str) -> Self {
        Self {
            chars: original.char_indices().peekable(),
            original,
            current: (0, EOF_CHAR),
        }
    }

    /// Advance to the next character and return it.
    pub fn next(&mut self) -> Option<char> {
        match self.chars.next() {
            Some((index, c)) => {
                self.current = (index as u32, c);
                Some(c)
            }
            None => {
                // No end-of-file character exists, so point
                // one past the last byte.
                self.current = (self.byte_count(), EOF_CHAR);
                None
            }
        }
    }

    #[inline]
    pub fn current(&self) -> char {
        self.current.1
    }

    /// Byte offset of the current character.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.current.0
    }

    /// Character after the current one, without advancing.
    #[inline]
    pub fn peek(&mut self) -> char {
        self.chars.peek().map(|(_, c)| *c).unwrap_or(EOF_CHAR)
    }

    /// Byte offset of the character after the current one.
    ///
    /// This is also the exclusive end of the current character.
    #[inline]
    pub fn peek_offset(&mut self) -> u32 {
        let byte_count = self.byte_count();
        self.chars
            .peek()
            .map(|(index, _)| *index as u32)
            .unwrap_or(byte_count)
    }

    pub fn at_end(&self) -> bool {
        self.current.0 >= self.byte_count()
    }

    fn byte_count(&self) -> u32 {
        self.original.len() as u32
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cursor_walk() {
        let mut cursor = Cursor::new("aé1");
        assert_eq!(cursor.next(), Some('a'));
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.peek(), 'é');
        assert_eq!(cursor.peek_offset(), 1);

        assert_eq!(cursor.next(), Some('é'));
        // Two byte character
        assert_eq!(cursor.peek_offset(), 3);

        assert_eq!(cursor.next(), Some('1'));
        assert!(!cursor.at_end());
        assert_eq!(cursor.peek(), EOF_CHAR);

        assert_eq!(cursor.next(), None);
        assert!(cursor.at_end());
        assert_eq!(cursor.current(), EOF_CHAR);
        assert_eq!(cursor.offset(), 4);
    }

    #[test]
    fn test_cursor_null_char_is_not_end() {
        let mut cursor = Cursor::new("\0x");
        cursor.next();
        assert_eq!(cursor.current(), EOF_CHAR);
        assert!(!cursor.at_end());
    }
}
