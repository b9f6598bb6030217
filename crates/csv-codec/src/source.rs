//! Character sources for the decoder
//!
//! The decoder never touches a global cursor. Every decode call receives the
//! source explicitly and advances it through this trait.

/// 1-based line and column of the next unread character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number, incremented after each `\n`
    pub line: usize,
    /// Column in characters
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// A forward-only cursor over characters
pub trait CharSource {
    /// Look at the next character without consuming it
    fn peek(&self) -> Option<char>;

    /// Consume and return the next character
    fn next_char(&mut self) -> Option<char>;

    /// Whether the upcoming characters equal `s`
    fn starts_with(&self, s: &str) -> bool;

    /// Position of the next unread character
    fn position(&self) -> Position;

    /// Whether any input is left
    fn has_next(&self) -> bool {
        self.peek().is_some()
    }

    /// Consume the next character if it equals `expected`
    fn next_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Consume `s` if the upcoming characters equal it
    fn next_if_str(&mut self, s: &str) -> bool {
        if !self.starts_with(s) {
            return false;
        }
        for _ in s.chars() {
            self.next_char();
        }
        true
    }

    /// Consume characters up to (not including) the first one in `stops`,
    /// appending them to `dst`. Returns the number of characters consumed.
    fn read_until(&mut self, stops: &[char], dst: &mut String) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if stops.contains(&ch) {
                break;
            }
            self.next_char();
            dst.push(ch);
            count += 1;
        }
        count
    }

    /// Consume and discard any run of characters contained in `set`
    fn skip_any(&mut self, set: &[char]) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(|ch| set.contains(&ch)) {
            self.next_char();
            count += 1;
        }
        count
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn peek(&self) -> Option<char> {
        (**self).peek()
    }

    fn next_char(&mut self) -> Option<char> {
        (**self).next_char()
    }

    fn starts_with(&self, s: &str) -> bool {
        (**self).starts_with(s)
    }

    fn position(&self) -> Position {
        (**self).position()
    }

    fn read_until(&mut self, stops: &[char], dst: &mut String) -> usize {
        (**self).read_until(stops, dst)
    }

    fn skip_any(&mut self, set: &[char]) -> usize {
        (**self).skip_any(set)
    }
}

/// Character source over an in-memory string
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    input: &'a str,
    offset: usize,
    position: Position,
}

impl<'a> StrSource<'a> {
    /// Start reading at the beginning of `input`
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            position: Position::default(),
        }
    }

    /// Unread remainder of the input
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Byte offset of the next unread character
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl CharSource for StrSource<'_> {
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(ch)
    }

    fn starts_with(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    fn position(&self) -> Position {
        self.position
    }

    fn read_until(&mut self, stops: &[char], dst: &mut String) -> usize {
        let rest = self.remaining();
        let end = rest.find(stops).unwrap_or(rest.len());
        let run = &rest[..end];
        dst.push_str(run);

        let count = run.chars().count();
        for ch in run.chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.offset += end;
        count
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(input: &'a str) -> Self {
        Self::new(input)
    }
}
