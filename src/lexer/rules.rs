//! Declared token rules.
//!
//! Every rule in [`RULES`] is tried at the cursor. The longest match wins;
//! on equal length the rule declared first wins. That is how `:=` beats
//! `:`, how `3.14` beats `3`, and how `endIf` becomes a reserved word
//! rather than an identifier.

use crate::lexer::{Keyword, IdentKind, TokenKind};

/// Shape of text a rule accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Exactly this text.
    Exact(&'static str),
    /// A whole word spelling this reserved word, any case.
    Reserved(Keyword),
    /// `(letter|_)(letter|digit|_)*`
    Word,
    /// `digit+ . digit+` with an optional exponent.
    RealConst,
    /// `digit+`
    IntConst,
    /// `"` then one or more string characters then `"`.
    StringConst,
    /// `'` one letter or digit `'`
    CharConst,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: Pattern,
    pub kind: TokenKind,
}

const fn rule(pattern: Pattern, kind: TokenKind) -> Rule {
    Rule { pattern, kind }
}

const fn reserved(kw: Keyword) -> Rule {
    rule(Pattern::Reserved(kw), TokenKind::Keyword(kw))
}

pub static RULES: &[Rule] = &[
    // Compound operators before their one-character prefixes
    rule(Pattern::Exact(":="), TokenKind::Assign),
    rule(Pattern::Exact("=="), TokenKind::Equal),
    rule(Pattern::Exact("!="), TokenKind::NotEqual),
    rule(Pattern::Exact("<="), TokenKind::LessEqual),
    rule(Pattern::Exact(">="), TokenKind::GreaterEqual),
    rule(Pattern::Exact(";"), TokenKind::Semicolon),
    rule(Pattern::Exact(","), TokenKind::Comma),
    rule(Pattern::Exact(":"), TokenKind::Colon),
    rule(Pattern::Exact("?"), TokenKind::Question),
    rule(Pattern::Exact("("), TokenKind::OpenParen),
    rule(Pattern::Exact(")"), TokenKind::CloseParen),
    rule(Pattern::Exact("["), TokenKind::OpenBracket),
    rule(Pattern::Exact("]"), TokenKind::CloseBracket),
    rule(Pattern::Exact("{"), TokenKind::OpenBrace),
    rule(Pattern::Exact("}"), TokenKind::CloseBrace),
    rule(Pattern::Exact("+"), TokenKind::Plus),
    rule(Pattern::Exact("-"), TokenKind::Minus),
    rule(Pattern::Exact("*"), TokenKind::Asterisk),
    rule(Pattern::Exact("/"), TokenKind::Slash),
    rule(Pattern::Exact("%"), TokenKind::Percent),
    rule(Pattern::Exact("<"), TokenKind::Less),
    rule(Pattern::Exact(">"), TokenKind::Greater),
    // Constants
    rule(Pattern::RealConst, TokenKind::RealConst),
    rule(Pattern::IntConst, TokenKind::IntConst),
    rule(Pattern::StringConst, TokenKind::StringConst),
    rule(Pattern::CharConst, TokenKind::CharConst),
    // Reserved words before the generic identifier
    reserved(Keyword::Integer),
    reserved(Keyword::Real),
    reserved(Keyword::Character),
    reserved(Keyword::String),
    reserved(Keyword::Boolean),
    reserved(Keyword::Void),
    reserved(Keyword::True),
    reserved(Keyword::False),
    reserved(Keyword::VarType),
    reserved(Keyword::FuncType),
    reserved(Keyword::ParamType),
    reserved(Keyword::Declarations),
    reserved(Keyword::EndDeclarations),
    reserved(Keyword::Program),
    reserved(Keyword::EndProgram),
    reserved(Keyword::Functions),
    reserved(Keyword::EndFunctions),
    reserved(Keyword::EndFunction),
    reserved(Keyword::Return),
    reserved(Keyword::If),
    reserved(Keyword::Else),
    reserved(Keyword::EndIf),
    reserved(Keyword::While),
    reserved(Keyword::EndWhile),
    reserved(Keyword::Break),
    reserved(Keyword::Print),
    rule(Pattern::Word, TokenKind::Identifier(IdentKind::Variable)),
];

/// Finds the winning rule at the start of `input` and the length it matched.
pub fn longest_match(input: &[u8]) -> Option<(&'static Rule, usize)> {
    let mut best: Option<(&'static Rule, usize)> = None;
    for rule in RULES {
        if let Some(len) = rule.pattern.match_len(input) {
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((rule, len));
            }
        }
    }
    best
}

impl Pattern {
    /// Length of the match at the start of `input`, if any. Empty matches
    /// are never returned.
    pub fn match_len(self, input: &[u8]) -> Option<usize> {
        let len = match self {
            Pattern::Exact(text) => {
                if input.starts_with(text.as_bytes()) {
                    text.len()
                } else {
                    0
                }
            }
            Pattern::Reserved(kw) => {
                let len = word_len(input);
                if input[..len].eq_ignore_ascii_case(kw.as_str().as_bytes()) {
                    len
                } else {
                    0
                }
            }
            Pattern::Word => word_len(input),
            Pattern::RealConst => real_len(input),
            Pattern::IntConst => digits_len(input),
            Pattern::StringConst => string_len(input),
            Pattern::CharConst => match input {
                [b'\'', c, b'\'', ..] if c.is_ascii_alphanumeric() => 3,
                _ => 0,
            },
        };
        (len > 0).then_some(len)
    }
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Characters allowed between the quotes of a string constant.
pub fn is_string_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b' ' | b'$' | b'_' | b'.')
}

fn word_len(input: &[u8]) -> usize {
    match input.first() {
        Some(&b) if is_word_start(b) => {
            1 + input[1..].iter().take_while(|&&b| is_word_continue(b)).count()
        }
        _ => 0,
    }
}

fn digits_len(input: &[u8]) -> usize {
    input.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn real_len(input: &[u8]) -> usize {
    let whole = digits_len(input);
    if whole == 0 || input.get(whole) != Some(&b'.') {
        return 0;
    }
    let frac = digits_len(&input[whole + 1..]);
    if frac == 0 {
        return 0;
    }
    let len = whole + 1 + frac;

    // Exponent only counts when digits follow it
    if matches!(input.get(len), Some(b'e' | b'E')) {
        let mut exp = len + 1;
        if matches!(input.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_len(&input[exp.min(input.len())..]);
        if exp_digits > 0 {
            return exp + exp_digits;
        }
    }
    len
}

fn string_len(input: &[u8]) -> usize {
    if input.first() != Some(&b'"') {
        return 0;
    }
    let body = input[1..].iter().take_while(|&&b| is_string_char(b)).count();
    if body > 0 && input.get(1 + body) == Some(&b'"') {
        body + 2
    } else {
        0
    }
}
