use thiserror::Error;

/// Recoverable lexical problems. None of them stop a run; each is
/// reported and the offending input is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("Unexpected character '{0}' at line {1}")]
    UnexpectedChar(char, usize),

    #[error("Character {0:?} outside the source alphabet dropped at line {1}")]
    DroppedChar(char, usize),

    #[error("Unterminated block comment starting at line {0}")]
    UnterminatedBlockComment(usize),
}
