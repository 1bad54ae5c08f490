//! The block locator state machine.
//!
//! Markers into the source drive the splitting:
//!
//! - `segment_start`: start of the header currently being collected
//! - `safe_mark`: just past the last `,` or `(`; text after it is part of
//!   a multi-line selector
//! - `probe_mark`: just past a tentative newline split
//! - `flush_mark`: start of text not yet emitted as a declaration
//! - `block_start`: the `{` of the top-level block being read
//!
//! Only bytes at nesting depth 0 move the header markers; inside a block the
//! locator just counts braces until the matching `}`.
//!
//! Each `Handler` is one row of the byte table: a quote opens or closes a
//! string, parentheses adjust the depth, `{` and `}` split by nesting into
//! top-level (`OpenBlock`, `CloseBlock`) and inner (`OpenNested`,
//! `CloseNested`) variants, and `;`, `,` and newline at the top level end a
//! declaration, mark a safe split, or mark a tentative one. `OpenString`
//! carries the quote byte, so one variant covers both `"` and `'`.

use std::sync::Arc;

use scss_ir::{offset_u32, LineOffsetTable, Span};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::block::Block;
use crate::char_class::CharClass;
use crate::error::LocateError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Nesting {
    Top,
    One,
    Deep,
}

impl Nesting {
    #[inline]
    fn of(depth: u32) -> Self {
        match depth {
            0 => Nesting::Top,
            1 => Nesting::One,
            _ => Nesting::Deep,
        }
    }
}

/// Everything the dispatch depends on besides the marker positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct StateKey {
    class: CharClass,
    in_string: Option<u8>,
    in_parens: bool,
    nesting: Nesting,
}

/// What a significant byte does in its state. Inert bytes have no handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Handler {
    OpenString(u8),
    CloseString,
    OpenParen,
    CloseParen,
    OpenBlock,
    OpenNested,
    CloseBlock,
    CloseNested,
    EndDeclaration,
    MarkSafe,
    MarkProbe,
}

/// Map a state key to its handler. `None` means the byte is inert here.
fn handler_for(key: StateKey) -> Option<Handler> {
    use CharClass as C;
    use Nesting as N;

    match (key.class, key.in_string, key.in_parens, key.nesting) {
        (C::Quote(quote), None, _, _) => Some(Handler::OpenString(quote)),
        (C::Quote(quote), Some(open), _, _) if quote == open => Some(Handler::CloseString),
        (_, Some(_), _, _) => None,

        (C::OpenParen, None, _, _) => Some(Handler::OpenParen),
        (C::CloseParen, None, true, _) => Some(Handler::CloseParen),

        (C::OpenBrace, None, false, N::Top) => Some(Handler::OpenBlock),
        (C::OpenBrace, None, false, N::One | N::Deep) => Some(Handler::OpenNested),
        (C::CloseBrace, None, false, N::One) => Some(Handler::CloseBlock),
        (C::CloseBrace, None, false, N::Deep) => Some(Handler::CloseNested),

        (C::Semicolon, None, false, N::Top) => Some(Handler::EndDeclaration),
        (C::Comma, None, false, N::Top) => Some(Handler::MarkSafe),
        (C::Newline, None, false, N::Top) => Some(Handler::MarkProbe),

        _ => None,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// Reading input bytes.
    Scan,
    /// Closing blocks left open at the end of input.
    Recover,
    /// Emitting trailing text as a final declaration.
    Flush,
    /// Yielding the pending error, then resetting.
    Report,
}

/// Lazy iterator over the top-level blocks of a source range.
///
/// After the iterator returns `None` it rewinds itself, so iterating again
/// yields the same sequence.
pub struct BlockLocator<'a> {
    source: &'a str,
    lines: Arc<LineOffsetTable>,
    begin: usize,
    end: usize,

    phase: Phase,
    pos: usize,
    in_string: Option<u8>,
    paren_depth: u32,
    depth: u32,
    /// Inside a top-level `#{...}` interpolation.
    skip: bool,
    line_stack: SmallVec<[u32; 8]>,

    segment_start: usize,
    safe_mark: usize,
    probe_mark: Option<usize>,
    flush_mark: usize,
    block_start: usize,

    string_open: usize,
    paren_open: usize,
    block_open: usize,
    error: Option<LocateError>,
}

impl<'a> BlockLocator<'a> {
    /// Create a locator over the whole of `source`.
    ///
    /// Spans are `u32` offsets, so `source` must be under 4 GiB. Offsets past
    /// that saturate at `u32::MAX` and the affected spans slice to `""`.
    pub fn new(source: &'a str) -> Self {
        let lines = Arc::new(LineOffsetTable::build(source));
        Self::over_range(source, lines, 0, source.len())
    }

    /// Create a locator over the body of `block`, one of this locator's
    /// rules (or a rule located in the same source).
    ///
    /// Spans and line numbers stay relative to the whole source. Returns
    /// `None` for declarations and for bodies outside the source.
    pub fn nested(&self, block: &Block) -> Option<BlockLocator<'a>> {
        let body = block.body?.to_range();
        if body.start > body.end || body.end > self.source.len() {
            return None;
        }
        Some(Self::over_range(
            self.source,
            Arc::clone(&self.lines),
            body.start,
            body.end,
        ))
    }

    fn over_range(source: &'a str, lines: Arc<LineOffsetTable>, begin: usize, end: usize) -> Self {
        BlockLocator {
            source,
            lines,
            begin,
            end,
            phase: Phase::Scan,
            pos: begin,
            in_string: None,
            paren_depth: 0,
            depth: 0,
            skip: false,
            line_stack: SmallVec::new(),
            segment_start: begin,
            safe_mark: begin,
            probe_mark: None,
            flush_mark: begin,
            block_start: begin,
            string_open: begin,
            paren_open: begin,
            block_open: begin,
            error: None,
        }
    }

    /// The source text spans of located blocks refer to.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The byte range this locator covers.
    #[inline]
    pub fn range(&self) -> Span {
        Span::new(offset_u32(self.begin), offset_u32(self.end))
    }

    /// Restart from the beginning of the range.
    pub fn rewind(&mut self) {
        *self = Self::over_range(self.source, Arc::clone(&self.lines), self.begin, self.end);
    }

    #[inline]
    fn line_of(&self, offset: usize) -> u32 {
        self.lines.line_from_offset(offset_u32(offset))
    }

    /// `from..to` with surrounding ASCII whitespace removed.
    fn trimmed(&self, from: usize, to: usize) -> Span {
        let Some(bytes) = self.source.as_bytes().get(from..to) else {
            return Span::point(offset_u32(to));
        };
        let lead = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
        let trail = bytes[lead..]
            .iter()
            .rev()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        Span::new(offset_u32(from + lead), offset_u32(to - trail))
    }

    #[inline]
    fn is_blank(&self, from: usize, to: usize) -> bool {
        self.trimmed(from, to).is_empty()
    }

    fn declaration(&self, from: usize, to: usize) -> Option<Block> {
        let header = self.trimmed(from, to);
        if header.is_empty() {
            return None;
        }
        let block = Block::declaration(self.line_of(header.start as usize), header);
        debug!(line = block.line, header = %header, "located declaration");
        Some(block)
    }

    /// Reset every header marker to `at`.
    fn reset_markers(&mut self, at: usize) {
        self.segment_start = at;
        self.safe_mark = at;
        self.flush_mark = at;
        self.probe_mark = None;
    }

    /// Promote a tentative split to the header start if text follows it.
    fn promote_probe(&mut self, at: usize) {
        if let Some(probe) = self.probe_mark {
            if !self.is_blank(probe, at) {
                self.segment_start = probe;
            }
        }
    }

    /// Emit pending text before `segment_start` as a declaration.
    fn flush_declaration(&mut self) -> Option<Block> {
        let (from, to) = (self.flush_mark, self.segment_start);
        if from > to {
            return None;
        }
        self.flush_mark = to;
        self.declaration(from, to)
    }

    fn dispatch(&mut self, class: CharClass, at: usize) -> Option<Block> {
        let key = StateKey {
            class,
            in_string: self.in_string,
            in_parens: self.paren_depth > 0,
            nesting: Nesting::of(self.depth),
        };
        let handler = handler_for(key)?;
        trace!(?handler, at, depth = self.depth, "locator dispatch");

        match handler {
            Handler::OpenString(quote) => {
                self.in_string = Some(quote);
                self.string_open = at;
                None
            }
            Handler::CloseString => {
                self.in_string = None;
                None
            }
            Handler::OpenParen => {
                if self.paren_depth == 0 {
                    self.paren_open = at;
                }
                self.paren_depth += 1;
                self.probe_mark = None;
                self.safe_mark = at + 1;
                None
            }
            Handler::CloseParen => {
                self.paren_depth -= 1;
                None
            }
            Handler::OpenBlock => self.open_block(at),
            Handler::OpenNested => {
                self.depth += 1;
                None
            }
            Handler::CloseBlock => self.close_block(at),
            Handler::CloseNested => {
                self.depth -= 1;
                None
            }
            Handler::EndDeclaration => {
                let block = self.declaration(self.flush_mark, at);
                self.reset_markers(at + 1);
                block
            }
            Handler::MarkSafe => {
                self.promote_probe(at);
                self.probe_mark = None;
                self.safe_mark = at + 1;
                None
            }
            Handler::MarkProbe => {
                match self.probe_mark {
                    Some(probe) if !self.is_blank(probe, at) => {
                        self.segment_start = probe;
                        self.probe_mark = Some(at + 1);
                    }
                    None if !self.is_blank(self.safe_mark, at) => {
                        self.probe_mark = Some(at + 1);
                    }
                    _ => {}
                }
                None
            }
        }
    }

    fn open_block(&mut self, at: usize) -> Option<Block> {
        self.block_open = at;
        self.depth += 1;

        if at > self.begin && self.source.as_bytes()[at - 1] == b'#' {
            self.skip = true;
            return None;
        }

        self.block_start = at;
        self.promote_probe(at);
        let flushed = self.flush_declaration();
        self.line_stack.push(self.line_of(at));
        self.probe_mark = None;
        flushed
    }

    fn close_block(&mut self, at: usize) -> Option<Block> {
        self.depth -= 1;
        if std::mem::take(&mut self.skip) {
            return None;
        }

        let opened_on = self.line_stack.pop();
        let header = self.trimmed(self.segment_start, self.block_start);
        let line = if header.is_empty() {
            opened_on.unwrap_or_else(|| self.line_of(self.block_start))
        } else {
            self.line_of(header.start as usize)
        };
        let body = Span::new(offset_u32(self.block_start + 1), offset_u32(at));
        self.reset_markers((at + 1).min(self.end));

        let block = Block::rule(line, header, body);
        debug!(line, header = %header, body = %body, "located rule");
        Some(block)
    }

    /// Read bytes until a block is emitted or the range is exhausted.
    fn scan(&mut self) -> Option<Block> {
        let bytes = self.source.as_bytes();
        while self.pos < self.end {
            let at = self.pos;
            self.pos += 1;
            match CharClass::of(bytes[at]) {
                CharClass::Other => {}
                CharClass::Escape => self.pos = (self.pos + 1).min(self.end),
                class => {
                    if let Some(block) = self.dispatch(class, at) {
                        return Some(block);
                    }
                }
            }
        }
        None
    }

    fn unclosed(&self) -> Option<LocateError> {
        if self.paren_depth > 0 {
            Some(LocateError::UnclosedParenthesis {
                offset: offset_u32(self.paren_open),
                line: self.line_of(self.paren_open),
            })
        } else if let Some(quote) = self.in_string {
            Some(LocateError::UnclosedString {
                quote: char::from(quote),
                offset: offset_u32(self.string_open),
                line: self.line_of(self.string_open),
            })
        } else if self.depth > 0 {
            Some(LocateError::UnclosedBlock {
                offset: offset_u32(self.block_open),
                line: self.line_of(self.block_open),
            })
        } else {
            None
        }
    }
}

impl Iterator for BlockLocator<'_> {
    type Item = Result<Block, LocateError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::Scan => {
                    if let Some(block) = self.scan() {
                        return Some(Ok(block));
                    }
                    self.error = self.unclosed();
                    if let Some(error) = &self.error {
                        debug!(%error, "end of input inside an open construct");
                    }
                    self.phase = Phase::Recover;
                }
                Phase::Recover => {
                    if matches!(self.error, Some(LocateError::UnclosedBlock { .. })) {
                        // Close open blocks at the end of input so their contents
                        // are still reported.
                        while self.depth > 0 && self.segment_start < self.end {
                            if let Some(block) = self.dispatch(CharClass::CloseBrace, self.end) {
                                return Some(Ok(block));
                            }
                        }
                    }
                    self.phase = Phase::Flush;
                }
                Phase::Flush => {
                    self.phase = Phase::Report;
                    if self.paren_depth == 0 && self.in_string.is_none() && self.flush_mark < self.end {
                        self.segment_start = self.end;
                        if let Some(block) = self.flush_declaration() {
                            return Some(Ok(block));
                        }
                    }
                }
                Phase::Report => {
                    if let Some(error) = self.error.take() {
                        return Some(Err(error));
                    }
                    trace!("locator exhausted, rewinding");
                    self.rewind();
                    return None;
                }
            }
        }
    }
}
