//! Identifier classification from a short window of preceding tokens.
//!
//! No grammar is consulted. The rules only look at the last three token
//! kinds, so a name is a function name only in the exact shape
//! `funcType <type> : name`. Array return types (`funcType integer[]: f`)
//! and anything longer classify as variables.

use std::collections::VecDeque;

use crate::lexer::{IdentKind, Keyword, TokenKind};

/// How many preceding kinds the classifier can see.
pub const HISTORY_DEPTH: usize = 3;

/// Ring buffer of the most recent token kinds, oldest first.
///
/// The caller owns it and pushes every token after classification.
#[derive(Debug, Clone, Default)]
pub struct History {
    kinds: VecDeque<TokenKind>,
}

impl History {
    pub fn new() -> Self {
        Self {
            kinds: VecDeque::with_capacity(HISTORY_DEPTH),
        }
    }

    pub fn push(&mut self, kind: TokenKind) {
        if self.kinds.len() == HISTORY_DEPTH {
            self.kinds.pop_front();
        }
        self.kinds.push_back(kind);
    }

    /// The kind `n` positions back; `back(1)` is the previous token.
    pub fn back(&self, n: usize) -> Option<TokenKind> {
        if n == 0 || n > self.kinds.len() {
            return None;
        }
        self.kinds.get(self.kinds.len() - n).copied()
    }
}

/// Decides what an identifier names. First matching rule wins.
pub fn classify(history: &History) -> IdentKind {
    if history.back(1) == Some(TokenKind::Keyword(Keyword::Program)) {
        return IdentKind::ProgramName;
    }

    let is_function_header = history.back(3) == Some(TokenKind::Keyword(Keyword::FuncType))
        && history.back(2).is_some_and(|kind| kind.is_type_keyword())
        && history.back(1) == Some(TokenKind::Colon);
    if is_function_header {
        return IdentKind::FunctionName;
    }

    IdentKind::Variable
}

/// Classifies `kind` if it is an identifier and records the result.
pub fn classify_and_record(history: &mut History, kind: TokenKind) -> TokenKind {
    let kind = match kind {
        TokenKind::Identifier(_) => TokenKind::Identifier(classify(history)),
        other => other,
    };
    history.push(kind);
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(kinds: &[TokenKind]) -> History {
        let mut history = History::new();
        for kind in kinds {
            history.push(*kind);
        }
        history
    }

    const FUNC_TYPE: TokenKind = TokenKind::Keyword(Keyword::FuncType);
    const VAR: TokenKind = TokenKind::Identifier(IdentKind::Variable);

    #[test]
    fn empty_history_is_variable() {
        assert_eq!(classify(&History::new()), IdentKind::Variable);
    }

    #[test]
    fn after_program_keyword() {
        let history = history_of(&[TokenKind::Keyword(Keyword::Program)]);
        assert_eq!(classify(&history), IdentKind::ProgramName);
    }

    #[test]
    fn function_header() {
        let history = history_of(&[
            FUNC_TYPE,
            TokenKind::Keyword(Keyword::Void),
            TokenKind::Colon,
        ]);
        assert_eq!(classify(&history), IdentKind::FunctionName);
    }

    #[test]
    fn var_type_header_is_variable() {
        let history = history_of(&[
            TokenKind::Keyword(Keyword::VarType),
            TokenKind::Keyword(Keyword::Integer),
            TokenKind::Colon,
        ]);
        assert_eq!(classify(&history), IdentKind::Variable);
    }

    #[test]
    fn array_return_type_is_a_known_miss() {
        let history = history_of(&[
            FUNC_TYPE,
            TokenKind::Keyword(Keyword::Integer),
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Colon,
        ]);
        assert_eq!(classify(&history), IdentKind::Variable);
    }

    #[test]
    fn window_forgets_older_kinds() {
        let mut history = history_of(&[TokenKind::Keyword(Keyword::Program), VAR, VAR, VAR]);
        assert_eq!(history.back(HISTORY_DEPTH), Some(VAR));
        assert_eq!(history.back(HISTORY_DEPTH + 1), None);
        assert_eq!(classify_and_record(&mut history, VAR), VAR);
    }

    #[test]
    fn classified_kind_enters_history() {
        let mut history = History::new();
        classify_and_record(&mut history, TokenKind::Keyword(Keyword::Program));
        let kind = classify_and_record(&mut history, VAR);
        assert_eq!(kind, TokenKind::Identifier(IdentKind::ProgramName));
        assert_eq!(history.back(1), Some(kind));
    }
}
