#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// A lexical error pinned to the line it was detected on.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("[line {line}] Error: {error}")]
pub struct Diagnostic {
    pub line: u32,
    #[source]
    pub error: LexError,
}

impl Diagnostic {
    pub fn new(line: u32, error: LexError) -> Self {
        Self { line, error }
    }
}
