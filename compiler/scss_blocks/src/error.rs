//! Locator errors.
//!
//! Each error points at the opener that was never closed, so the caller can
//! render an excerpt of the offending line.

/// Structural error found when the locator reaches the end of its input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error("missing closing parenthesis for `(` on line {line}")]
    UnclosedParenthesis { offset: u32, line: u32 },

    #[error("missing closing `{quote}` for string opened on line {line}")]
    UnclosedString { quote: char, offset: u32, line: u32 },

    #[error("missing closing `}}` for block opened on line {line}")]
    UnclosedBlock { offset: u32, line: u32 },
}

impl LocateError {
    /// Byte offset of the unclosed opener.
    pub fn offset(&self) -> u32 {
        match *self {
            LocateError::UnclosedParenthesis { offset, .. }
            | LocateError::UnclosedString { offset, .. }
            | LocateError::UnclosedBlock { offset, .. } => offset,
        }
    }

    /// 1-based line of the unclosed opener.
    pub fn line(&self) -> u32 {
        match *self {
            LocateError::UnclosedParenthesis { line, .. }
            | LocateError::UnclosedString { line, .. }
            | LocateError::UnclosedBlock { line, .. } => line,
        }
    }
}
