/// Forward-only scanner over a query clause
///
/// Every operation is total: reading past the end yields `None` and
/// advancing at the end is a no-op. Grammar rules decide what "nothing
/// consumed" means.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    mark: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            mark: 0,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    pub fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    /// Remember the current position as the start of the next slice
    pub fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// Text between the mark and the current position
    pub fn slice(&self) -> &'a str {
        &self.input[self.mark..self.pos]
    }

    /// Advance past consecutive spaces
    pub fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.advance();
        }
    }
}
