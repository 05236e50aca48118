//! Byte cursor with the marked/current offset discipline.
//!
//! The scanner snaps the marked offset to the current position at each
//! token start and consumes until the token is complete; the emitted
//! `(offset, length)` pair then refers to the exact slice consumed.

use memchr::memchr;

/// Cursor over UTF-8 source text.
///
/// Byte-level access for the ASCII fast paths, char-level access where
/// the grammar is Unicode-aware (identifiers, whitespace).
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: u32,
    marked: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        debug_assert!(
            u32::try_from(source.len()).is_ok(),
            "source larger than u32::MAX bytes"
        );
        Cursor {
            source,
            pos: 0,
            marked: 0,
        }
    }

    /// Byte at the current position, `0` at EOF.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.source.as_bytes().get(self.pos as usize).copied().unwrap_or(0)
    }

    /// Byte one position ahead, `0` at or past EOF.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.source
            .as_bytes()
            .get(self.pos as usize + 1)
            .copied()
            .unwrap_or(0)
    }

    /// Decode the character at the current position.
    #[inline]
    pub(crate) fn current_char(&self) -> Option<char> {
        self.source[self.pos as usize..].chars().next()
    }

    /// Advance by one byte.
    #[inline]
    pub(crate) fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance past the character at the current position.
    #[inline]
    pub(crate) fn advance_char(&mut self) {
        if let Some(c) = self.current_char() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "UTF-8 encodings are at most 4 bytes"
            )]
            let width = c.len_utf8() as u32;
            self.pos += width;
        }
    }

    /// Jump to an absolute byte position (forward only).
    #[inline]
    pub(crate) fn advance_to(&mut self, pos: u32) {
        debug_assert!(pos >= self.pos && pos as usize <= self.source.len());
        self.pos = pos;
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    /// Current byte offset.
    #[inline]
    pub(crate) fn pos(&self) -> u32 {
        self.pos
    }

    /// Snap the marked offset to the current position.
    #[inline]
    pub(crate) fn mark(&mut self) {
        self.marked = self.pos;
    }

    /// Offset marked at the start of the current token.
    #[inline]
    pub(crate) fn marked(&self) -> u32 {
        self.marked
    }

    /// Length of the token consumed so far, capped at the 16-bit field.
    #[inline]
    pub(crate) fn token_len(&self) -> u16 {
        u16::try_from(self.pos - self.marked).unwrap_or(u16::MAX)
    }

    /// Source slice between two offsets.
    #[inline]
    pub(crate) fn slice(&self, start: u32, end: u32) -> &'a str {
        &self.source[start as usize..end as usize]
    }

    /// Byte at an absolute offset, `0` past the end.
    #[inline]
    pub(crate) fn byte_at(&self, pos: u32) -> u8 {
        self.source.as_bytes().get(pos as usize).copied().unwrap_or(0)
    }

    /// Offset of the next `\n` at or after the current position.
    #[inline]
    pub(crate) fn next_newline(&self) -> Option<u32> {
        let start = self.pos as usize;
        memchr(b'\n', &self.source.as_bytes()[start..]).map(|i| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "source length fits in u32, checked at construction"
            )]
            let at = (start + i) as u32;
            at
        })
    }

    /// Total source length in bytes.
    #[inline]
    pub(crate) fn source_len(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "source length fits in u32, checked at construction"
        )]
        let len = self.source.len() as u32;
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn byte_access_and_eof() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.current(), b'a');
        assert_eq!(cursor.peek(), b'b');
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), 0);
        assert_eq!(cursor.peek(), 0);
    }

    #[test]
    fn mark_and_slice() {
        let mut cursor = Cursor::new("hello world");
        cursor.mark();
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.token_len(), 5);
        assert_eq!(cursor.slice(cursor.marked(), cursor.pos()), "hello");
    }

    #[test]
    fn char_advance_handles_multibyte() {
        let mut cursor = Cursor::new("αb");
        assert_eq!(cursor.current_char(), Some('α'));
        cursor.advance_char();
        assert_eq!(cursor.current(), b'b');
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn next_newline_finds_offset() {
        let cursor = Cursor::new("ab\ncd");
        assert_eq!(cursor.next_newline(), Some(2));
        let cursor = Cursor::new("abcd");
        assert_eq!(cursor.next_newline(), None);
    }
}
