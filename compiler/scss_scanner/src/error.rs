//! Scanner and pattern errors.

/// Error raised while registering or compiling a pattern.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("invalid expression for pattern `{name}`: {message}")]
    Syntax { name: String, message: String },

    #[error("failed to compile pattern `{name}`: {message}")]
    Compile { name: String, message: String },
}

impl PatternError {
    /// Name of the offending pattern.
    pub fn name(&self) -> &str {
        match self {
            PatternError::Syntax { name, .. } | PatternError::Compile { name, .. } => name,
        }
    }
}

/// Error raised while producing or replaying tokens.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// No pattern matches at `offset`.
    #[error("bad token at offset {offset} on line {line}")]
    BadToken { offset: u32, line: u32 },

    /// None of the permitted patterns match at `offset`.
    #[error("bad token at offset {offset} on line {line}, expected one of: {}", .expected.join(", "))]
    Restricted {
        offset: u32,
        line: u32,
        expected: Vec<String>,
    },

    /// A token was requested again under a restriction it was not scanned with.
    #[error("restriction set changed when replaying token {index}")]
    UnsupportedBacktrack { index: usize },

    /// The token cursor found a different token than the production needed.
    #[error("expected `{expected}` at offset {offset} on line {line}, found {found}")]
    Expected {
        offset: u32,
        line: u32,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl ScanError {
    /// Byte offset the error refers to, if it has one.
    pub fn offset(&self) -> Option<u32> {
        match *self {
            ScanError::BadToken { offset, .. }
            | ScanError::Restricted { offset, .. }
            | ScanError::Expected { offset, .. } => Some(offset),
            ScanError::UnsupportedBacktrack { .. } | ScanError::Pattern(_) => None,
        }
    }
}
