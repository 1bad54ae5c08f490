//! Token scanner for the SCSS expression grammar.
//!
//! A [`PatternTable`] holds named regular expressions in priority order. A
//! [`Scanner`] tokenizes one input buffer against that table on demand: the
//! driving parser asks for token `i` under a restriction set naming the
//! patterns its current production accepts, and may rewind to retry another
//! alternative. [`TokenCursor`] wraps that protocol in the `peek`/`expect`
//! calls a recursive-descent parser makes.
//!
//! # Matching
//!
//! - Matches are anchored at the scan position.
//! - The first candidate pattern in priority order wins, not the longest.
//! - Patterns in the scanner's ignore set are always candidates and are
//!   skipped silently (whitespace, comments).
//!
//! # Example
//!
//! ```
//! use scss_scanner::{PatternTable, Scanner};
//!
//! let table = PatternTable::from_patterns(&[
//!     ("WS", "[ \t\n]+"),
//!     ("NUM", "[0-9]+"),
//!     ("ID", "[a-z]+"),
//! ])
//! .unwrap();
//!
//! let mut scanner = Scanner::new(&table, &["WS"], "12 px");
//! let num = scanner.token(0, &["NUM"]).unwrap().unwrap();
//! let id = scanner.token(1, &["ID"]).unwrap().unwrap();
//!
//! assert_eq!(scanner.text(&num), "12");
//! assert_eq!(scanner.token_name(&id), "ID");
//! assert_eq!(scanner.token(2, &["ID"]).unwrap(), None);
//! ```

mod config;
mod cursor;
mod error;
pub mod excerpt;
pub mod hashtable;
mod pattern;
mod restriction;
mod scanner;

pub use config::ScannerConfig;
pub use cursor::TokenCursor;
pub use error::{PatternError, ScanError};
pub use hashtable::HashTable;
pub use pattern::{Pattern, PatternId, PatternTable};
pub use restriction::{RestrictionCache, RestrictionSet};
pub use scanner::{Scanner, Token};
