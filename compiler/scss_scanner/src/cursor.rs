//! Parser-side cursor over a [`Scanner`].
//!
//! A recursive-descent parser keeps its own position into the token stream
//! and asks the scanner for one token at a time under the restriction of the
//! production it is in. Backtracking moves the position back and discards the
//! tokens after it.

use crate::error::ScanError;
use crate::scanner::Scanner;

/// Position into a scanner's token stream.
///
/// # Example
///
/// ```
/// use scss_scanner::{PatternTable, Scanner, TokenCursor};
///
/// let table = PatternTable::from_patterns(&[("WS", " +"), ("NUM", "[0-9]+"), ("ID", "[a-z]+")]).unwrap();
/// let mut scanner = Scanner::new(&table, &["WS"], "width 12");
/// let mut cursor = TokenCursor::new(&mut scanner);
///
/// assert_eq!(cursor.peek(&["ID", "NUM"]).unwrap(), Some("ID"));
/// assert_eq!(cursor.expect("ID").unwrap(), "width");
/// assert_eq!(cursor.expect("NUM").unwrap(), "12");
/// assert_eq!(cursor.position(), 2);
/// ```
pub struct TokenCursor<'s, 't> {
    scanner: &'s mut Scanner<'t>,
    pos: usize,
}

impl<'s, 't> TokenCursor<'s, 't> {
    pub fn new(scanner: &'s mut Scanner<'t>) -> Self {
        TokenCursor { scanner, pos: 0 }
    }

    /// Index of the next token to consume.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn scanner(&self) -> &Scanner<'t> {
        self.scanner
    }

    /// Name of the next token permitted by `types`, without consuming it.
    ///
    /// `Ok(None)` at end of input.
    pub fn peek(&mut self, types: &[&str]) -> Result<Option<&'t str>, ScanError> {
        let token = self.scanner.token(self.pos, types)?;
        Ok(token.map(|token| self.scanner.token_name(&token)))
    }

    /// Consume a token of pattern `name` and return its text.
    pub fn expect(&mut self, name: &str) -> Result<&str, ScanError> {
        let found = self.scanner.token(self.pos, &[name])?;
        let Some(token) = found.filter(|token| self.scanner.token_name(token) == name) else {
            let (offset, found) = match found {
                Some(token) => (token.span.start, format!("`{}`", self.scanner.token_name(&token))),
                None => (
                    scss_ir::offset_u32(self.scanner.input().len()),
                    "end of input".to_owned(),
                ),
            };
            return Err(ScanError::Expected {
                offset,
                line: self.scanner.line_at(offset),
                expected: name.to_owned(),
                found,
            });
        };

        self.pos += 1;
        Ok(self.scanner.text(&token))
    }

    /// Step back `n` tokens and drop everything scanned after the new position.
    pub fn rewind(&mut self, n: usize) {
        self.pos -= n.min(self.pos);
        self.scanner.rewind(self.pos);
    }
}
