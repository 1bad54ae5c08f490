//! Restriction-aware token scanner.
//!
//! Tokens are produced on demand by index. Requesting index `len` scans one
//! more token; a lower index replays a memoized token, which lets a
//! backtracking parser rewind and retry alternatives without rescanning.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use regex_automata::{Anchored, Input};
use scss_ir::{offset_u32, LineOffsetTable, Span};
use tracing::{debug, trace};

use crate::config::ScannerConfig;
use crate::error::ScanError;
use crate::pattern::{PatternId, PatternTable};
use crate::restriction::RestrictionSet;

/// A matched token: which pattern produced it and where.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub pattern: PatternId,
    pub span: Span,
}

scss_ir::static_assert_size!(Token, 12);

/// Tokenizer over one owned input buffer.
pub struct Scanner<'t> {
    table: &'t PatternTable,
    config: ScannerConfig,
    /// Patterns matched and discarded between tokens.
    ignore: RestrictionSet,
    input: String,
    lines: LineOffsetTable,
    pos: usize,
    tokens: Vec<Token>,
    /// Restriction each token was scanned under, parallel to `tokens`.
    restrictions: Vec<Arc<RestrictionSet>>,
}

impl<'t> Scanner<'t> {
    /// Create a scanner over `input`, skipping matches of the patterns named in
    /// `ignore`.
    ///
    /// Token spans are `u32` offsets, so `input` must be under 4 GiB. Offsets
    /// past that saturate at `u32::MAX` and the affected tokens read as `""`.
    pub fn new<S: AsRef<str>>(table: &'t PatternTable, ignore: &[S], input: impl Into<String>) -> Self {
        Self::with_config(table, ignore, input, ScannerConfig::default())
    }

    pub fn with_config<S: AsRef<str>>(
        table: &'t PatternTable,
        ignore: &[S],
        input: impl Into<String>,
        config: ScannerConfig,
    ) -> Self {
        let input = input.into();
        Scanner {
            table,
            ignore: RestrictionSet::new(ignore, config.restriction_buckets),
            config,
            lines: LineOffsetTable::build(&input),
            input,
            pos: 0,
            tokens: Vec::new(),
            restrictions: Vec::new(),
        }
    }

    /// Replace the input and forget every token. The 4 GiB limit of
    /// [`Scanner::new`] applies.
    pub fn reset(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.lines = LineOffsetTable::build(&self.input);
        self.pos = 0;
        self.tokens.clear();
        self.restrictions.clear();
        debug!(len = self.input.len(), "scanner reset");
    }

    #[inline]
    pub fn table(&self) -> &'t PatternTable {
        self.table
    }

    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset the next scan starts from.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Matched text of `token`.
    #[inline]
    pub fn text(&self, token: &Token) -> &str {
        token.span.text(&self.input)
    }

    /// Name of the pattern that produced `token`.
    #[inline]
    pub fn token_name(&self, token: &Token) -> &'t str {
        self.table.name(token.pattern).unwrap_or_default()
    }

    /// 1-based line `token` starts on.
    #[inline]
    pub fn line_of(&self, token: &Token) -> u32 {
        self.line_at(token.span.start)
    }

    /// 1-based line containing byte `offset`.
    #[inline]
    pub fn line_at(&self, offset: u32) -> u32 {
        self.lines.line_from_offset(offset)
    }

    /// Get token `index`, scanning it if `index` is one past the last token.
    ///
    /// `restrict` names the patterns permitted for this step; empty means
    /// any. Returns `Ok(None)` at end of input.
    pub fn token<S: AsRef<str>>(&mut self, index: usize, restrict: &[S]) -> Result<Option<Token>, ScanError> {
        let requested = self
            .table
            .restriction_set(restrict, self.config.restriction_buckets);

        match index.cmp(&self.tokens.len()) {
            Ordering::Less => {
                // Narrowing is fine; widening could have matched another pattern.
                if !requested.is_subset_of(&self.restrictions[index]) {
                    debug!(
                        index,
                        stored = ?self.restrictions[index].names(),
                        requested = ?requested.names(),
                        "replay rejected",
                    );
                    return Err(ScanError::UnsupportedBacktrack { index });
                }
                Ok(Some(self.tokens[index]))
            }
            Ordering::Equal => self.scan(requested),
            Ordering::Greater => Ok(None),
        }
    }

    /// Drop token `index` and everything after it, resuming the scan where it
    /// started. Out-of-range indices are ignored.
    pub fn rewind(&mut self, index: usize) {
        let Some(token) = self.tokens.get(index) else {
            return;
        };
        self.pos = token.span.start as usize;
        self.tokens.truncate(index);
        self.restrictions.truncate(index);
        debug!(index, pos = self.pos, "scanner rewound");
    }

    /// First candidate pattern matching at the current position.
    fn match_here(&self, restriction: &RestrictionSet) -> Result<Option<(PatternId, usize)>, ScanError> {
        for (id, pattern) in self.table.iter() {
            let ignored = self.ignore.contains(pattern.name());
            if !ignored && !restriction.permits(pattern.name()) {
                continue;
            }

            let input = Input::new(self.input.as_str())
                .range(self.pos..)
                .anchored(Anchored::Yes);
            let Some(found) = pattern.regex()?.find(input) else {
                continue;
            };
            // An empty ignored match would never advance the scan.
            if ignored && found.is_empty() {
                continue;
            }
            return Ok(Some((id, found.end())));
        }
        Ok(None)
    }

    fn scan(&mut self, restriction: Arc<RestrictionSet>) -> Result<Option<Token>, ScanError> {
        loop {
            let Some((pattern, end)) = self.match_here(&restriction)? else {
                if self.pos >= self.input.len() {
                    trace!(pos = self.pos, "end of input");
                    return Ok(None);
                }
                let offset = offset_u32(self.pos);
                let line = self.lines.line_from_offset(offset);
                return Err(if restriction.is_empty() {
                    ScanError::BadToken { offset, line }
                } else {
                    ScanError::Restricted {
                        offset,
                        line,
                        expected: restriction.names().to_vec(),
                    }
                });
            };

            let name = self.table.name(pattern).unwrap_or_default();
            if self.ignore.contains(name) {
                trace!(name, from = self.pos, to = end, "skipped ignored match");
                self.pos = end;
                continue;
            }

            let token = Token {
                pattern,
                span: Span::new(offset_u32(self.pos), offset_u32(end)),
            };
            if self.tokens.last() == Some(&token) {
                trace!(name, pos = self.pos, "repeated token, end of input");
                return Ok(None);
            }

            self.tokens.push(token);
            self.restrictions.push(restriction);
            self.pos = end;
            debug!(index = self.tokens.len() - 1, name, span = %token.span, "scanned token");
            return Ok(Some(token));
        }
    }
}

/// Recent tokens, one per line: `  (@start)  NAME  =  'text'`.
impl fmt::Display for Scanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let skip = self.tokens.len().saturating_sub(self.config.history_len);
        for (i, token) in self.tokens.iter().skip(skip).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(
                f,
                "  (@{})  {}  =  {}",
                token.span.start,
                self.token_name(token),
                quoted(self.text(token))
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("pos", &self.pos)
            .field("tokens", &self.tokens.len())
            .field("input_len", &self.input.len())
            .finish_non_exhaustive()
    }
}

/// Quote `text` for display, escaping quotes and control characters.
///
/// Single quotes are used unless the text contains one and no double quote.
fn quoted(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let code = u32::from(c);
                if code <= 0xff {
                    out.push_str(&format!("\\x{code:02x}"));
                } else {
                    out.push_str(&format!("\\u{code:04x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
