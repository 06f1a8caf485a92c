use std::iter::FusedIterator;

use tracing::{trace, warn};

use crate::lexer::{rules, LexerError, Token};

/// Forward-only tokenizer over preprocessed source text.
///
/// Each call to `next` yields a token, or an `UnexpectedChar` error after
/// skipping exactly one character the rules could not match. Whitespace
/// and newlines never produce tokens. Once the input is exhausted the
/// scanner keeps returning `None`.
pub struct Scanner {
    input: String,
    current: usize,
    line: usize,
    finished: bool,
}

impl Scanner {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            current: 0,
            line: 1,
            finished: false,
        }
    }

    /// Line the cursor is on (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.current..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                // \r on its own, or before \n, is not a line break
                ' ' | '\t' | '\r' | '\x0C' => self.current += 1,
                '\n' => {
                    self.line += 1;
                    self.current += 1;
                }
                _ => break,
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token, LexerError> {
        let rest = &self.input.as_bytes()[self.current..];

        match rules::longest_match(rest) {
            Some((rule, len)) => {
                let text = &self.input[self.current..self.current + len];
                let token = Token::new(rule.kind, text, self.line);
                self.current += len;
                trace!(kind = ?token.kind, lexeme = %token.lexeme, line = token.line, "token");
                Ok(token)
            }
            None => {
                let ch = self.peek().unwrap_or('\0');
                self.current += ch.len_utf8();
                let err = LexerError::UnexpectedChar(ch, self.line);
                warn!("{err}");
                Err(err)
            }
        }
    }
}

impl Iterator for Scanner {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.skip_whitespace();
        if self.is_at_end() {
            self.finished = true;
            return None;
        }
        Some(self.scan_token())
    }
}

impl FusedIterator for Scanner {}

/// Everything a full scan produced.
#[derive(Debug, Default, Clone)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexerError>,
}

// Convenience function for tokenizing input
pub fn tokenize(input: impl Into<String>) -> Lexed {
    let mut lexed = Lexed::default();
    for item in Scanner::new(input) {
        match item {
            Ok(token) => lexed.tokens.push(token),
            Err(err) => lexed.errors.push(err),
        }
    }
    lexed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{IdentKind, Keyword, TokenKind};

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn newlines_advance_line_counter() {
        let lexed = tokenize("a\n\n b\r\nc\rd");
        let lines: Vec<usize> = lexed.tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 4, 4]);
    }

    #[test]
    fn bare_carriage_return_is_whitespace() {
        let lexed = tokenize("a\rb");
        let lines: Vec<usize> = lexed.tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1]);
    }

    #[test]
    fn unexpected_character_is_skipped() {
        let lexed = tokenize("x = y");
        assert_eq!(lexed.tokens.len(), 2);
        assert_eq!(lexed.errors, vec![LexerError::UnexpectedChar('=', 1)]);
    }

    #[test]
    fn non_ascii_character_is_skipped_whole() {
        let lexed = tokenize("a\u{e9}b");
        assert_eq!(lexed.tokens.len(), 2);
        assert_eq!(lexed.errors, vec![LexerError::UnexpectedChar('\u{e9}', 1)]);
    }

    #[test]
    fn declaration_shape() {
        assert_eq!(
            kinds("funcType integer: soma(x)"),
            vec![
                TokenKind::Keyword(Keyword::FuncType),
                TokenKind::Keyword(Keyword::Integer),
                TokenKind::Colon,
                TokenKind::Identifier(IdentKind::Variable),
                TokenKind::OpenParen,
                TokenKind::Identifier(IdentKind::Variable),
                TokenKind::CloseParen,
            ]
        );
    }

    #[test]
    fn scanner_stays_finished() {
        let mut scanner = Scanner::new("x");
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn keyword_keeps_source_spelling() {
        let lexed = tokenize("EndProgram");
        assert_eq!(lexed.tokens[0].lexeme, "EndProgram");
        assert_eq!(lexed.tokens[0].kind, TokenKind::Keyword(Keyword::EndProgram));
    }
}
