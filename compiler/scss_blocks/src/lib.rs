//! Block locator for the SCSS front end.
//!
//! Splits SCSS source text into a flat sequence of top-level [`Block`]s:
//! bare declarations (`color: red;`, `@import "x";`) and rule blocks
//! (`.a, .b { ... }`) whose bodies are left unparsed. The driving compiler
//! recurses into a rule body with [`BlockLocator::nested`], and hands
//! declaration text to the scanner.
//!
//! # Design
//!
//! The locator is a byte-at-a-time state machine. Each significant byte is
//! classified, combined with the current string/parenthesis/nesting state into
//! a dispatch key, and mapped to one handler. Quoted strings, parenthesized
//! expressions, `#{...}` interpolations, and `\` escapes never split a block.
//!
//! Multi-line selectors are kept together when joined by `,` or wrapped in
//! parentheses. A bare newline is only a tentative split point: if the text
//! after it turns out to start a block, the text before it is flushed as a
//! declaration.
//!
//! # Example
//!
//! ```
//! use scss_blocks::locate_blocks;
//!
//! let source = "$x: 1;\n.a { color: red; }";
//! let blocks: Vec<_> = locate_blocks(source).collect::<Result<_, _>>().unwrap();
//!
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0].header_text(source), "$x: 1");
//! assert_eq!(blocks[1].header_text(source), ".a");
//! assert_eq!(blocks[1].body_text(source), Some(" color: red; "));
//! assert_eq!(blocks[1].line, 2);
//! ```

mod block;
mod char_class;
mod error;
mod locator;

pub use block::Block;
pub use error::LocateError;
pub use locator::BlockLocator;

/// Locate the top-level blocks of `source`.
///
/// Returns a lazy, forward-only iterator. Unclosed parentheses, strings, or
/// blocks are reported as the final item, after any blocks recovered from the
/// truncated input. `source` must be under 4 GiB; see [`BlockLocator::new`].
pub fn locate_blocks(source: &str) -> BlockLocator<'_> {
    BlockLocator::new(source)
}
