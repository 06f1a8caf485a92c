//! Source filtering that runs before the scanner.
//!
//! Comments are removed and characters outside the source alphabet are
//! replaced by a space. Newlines always survive so token lines match the
//! original file.

use tracing::warn;

use crate::lexer::rules::Pattern;
use crate::lexer::LexerError;

/// Output of [`preprocess`].
#[derive(Debug, Default, Clone)]
pub struct Preprocessed {
    pub text: String,
    pub diagnostics: Vec<LexerError>,
}

/// Punctuation the language uses, besides letters, digits and whitespace.
const PUNCTUATION: &str = ";,:=?()[]{}+-*/%!<>\"'$_.";

pub fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '\t' | '\r' | '\n') || PUNCTUATION.contains(ch)
}

/// Strips `//` and `/* */` comments and filters the character set.
pub fn preprocess(source: &str) -> Preprocessed {
    let mut out = Preprocessed {
        text: String::with_capacity(source.len()),
        diagnostics: Vec::new(),
    };
    let mut chars = source.char_indices().peekable();
    let mut line = 1;

    while let Some((at, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        match ch {
            '\n' => {
                line += 1;
                out.text.push('\n');
            }
            '"' => match Pattern::StringConst.match_len(&source.as_bytes()[at..]) {
                // A whole string constant is copied as is
                Some(len) => {
                    out.text.push_str(&source[at..at + len]);
                    while chars.peek().is_some_and(|&(i, _)| i < at + len) {
                        chars.next();
                    }
                }
                // A stray quote is left for the scanner to reject
                None => out.text.push('"'),
            },
            '/' if next == Some('/') => {
                while chars.peek().is_some_and(|&(_, c)| c != '\n') {
                    chars.next();
                }
            }
            '/' if next == Some('*') => {
                chars.next();
                let start = line;
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    if c == '*' && chars.peek().is_some_and(|&(_, c)| c == '/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                    if c == '\n' {
                        line += 1;
                        out.text.push('\n');
                    }
                }
                // Keep the tokens around the comment apart
                out.text.push(' ');
                if !closed {
                    let err = LexerError::UnterminatedBlockComment(start);
                    warn!("{err}");
                    out.diagnostics.push(err);
                }
            }
            c if is_allowed(c) => out.text.push(c),
            c => {
                let err = LexerError::DroppedChar(c, line);
                warn!("{err}");
                out.diagnostics.push(err);
                out.text.push(' ');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_comment_removed() {
        let out = preprocess("x := 1 // set x\ny");
        assert_eq!(out.text, "x := 1 \ny");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn block_comment_keeps_newlines() {
        let out = preprocess("a /* one\ntwo\n */ b");
        assert_eq!(out.text, "a \n\n  b");
    }

    #[test]
    fn block_comment_separates_words() {
        let out = preprocess("a/**/b");
        assert_eq!(out.text, "a b");
    }

    #[test]
    fn unterminated_block_comment_reported() {
        let out = preprocess("a\n/* never closed\n");
        assert_eq!(out.text, "a\n\n ");
        assert_eq!(out.diagnostics, vec![LexerError::UnterminatedBlockComment(2)]);
    }

    #[test]
    fn string_constant_copied_before_comment() {
        let out = preprocess("\"a $b.\" // c");
        assert_eq!(out.text, "\"a $b.\" ");
    }

    #[test]
    fn unclosed_quote_does_not_hide_comment() {
        let out = preprocess("x := \"oops // note here\ny");
        assert_eq!(out.text, "x := \"oops \ny");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn foreign_characters_become_spaces() {
        let out = preprocess("x@y\n#z");
        assert_eq!(out.text, "x y\n z");
        assert_eq!(
            out.diagnostics,
            vec![LexerError::DroppedChar('@', 1), LexerError::DroppedChar('#', 2)]
        );
    }
}
