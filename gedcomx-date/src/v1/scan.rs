use miette::SourceSpan;

/// A byte cursor over a formal date string.
///
/// The formal date grammar is pure ASCII, so scanning works on bytes.
/// `base` is the offset of this slice within the string the caller
/// originally passed in; spans produced here always point into that
/// original string, even when a sub-production (a range part, a
/// recurring segment) is being parsed in isolation.
pub(crate) struct Scanner<'a> {
    bytes: &'a [u8],
    base: usize,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str, base: usize) -> Self {
        Self {
            bytes: input.as_bytes(),
            base,
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Consumes the next byte if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Span of the next byte, or a zero-length span at the end of input.
    pub(crate) fn here(&self) -> SourceSpan {
        let len = usize::from(!self.is_done());
        (self.base + self.pos, len).into()
    }

    /// Span from a previously recorded position up to the current position.
    pub(crate) fn span_since(&self, start: usize) -> SourceSpan {
        (self.base + start, self.pos - start).into()
    }

    /// Span of a fixed-width field starting at `start`, clipped to the
    /// available input. Used to point at fields that failed to parse.
    pub(crate) fn field_span(&self, start: usize, width: usize) -> SourceSpan {
        let available = self.bytes.len().saturating_sub(start).min(width);
        (self.base + start, available).into()
    }

    /// Span covering everything from the current position to the end.
    pub(crate) fn rest(&self) -> SourceSpan {
        (self.base + self.pos, self.bytes.len() - self.pos).into()
    }

    /// Reads exactly `n` ASCII digits as an unsigned number, consuming
    /// nothing on failure.
    pub(crate) fn fixed_digits(&mut self, n: usize) -> Option<u32> {
        let start = self.pos;
        let mut value = 0u32;
        for _ in 0..n {
            let b = self.peek()?;
            if !b.is_ascii_digit() {
                self.pos = start;
                return None;
            }
            value = value * 10 + u32::from(b - b'0');
            self.pos += 1;
        }
        Some(value)
    }
}
