use std::fmt;

/// Longest lexeme stored for identifiers and constants.
pub const MAX_LEXEME_LEN: usize = 32;

/// Reserved words of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Integer,
    Real,
    Character,
    String,
    Boolean,
    Void,
    True,
    False,
    VarType,
    FuncType,
    ParamType,
    Declarations,
    EndDeclarations,
    Program,
    EndProgram,
    Functions,
    EndFunctions,
    EndFunction,
    Return,
    If,
    Else,
    EndIf,
    While,
    EndWhile,
    Break,
    Print,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Integer => "integer",
            Keyword::Real => "real",
            Keyword::Character => "character",
            Keyword::String => "string",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::VarType => "varType",
            Keyword::FuncType => "funcType",
            Keyword::ParamType => "paramType",
            Keyword::Declarations => "declarations",
            Keyword::EndDeclarations => "endDeclarations",
            Keyword::Program => "program",
            Keyword::EndProgram => "endProgram",
            Keyword::Functions => "functions",
            Keyword::EndFunctions => "endFunctions",
            Keyword::EndFunction => "endFunction",
            Keyword::Return => "return",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::EndIf => "endIf",
            Keyword::While => "while",
            Keyword::EndWhile => "endWhile",
            Keyword::Break => "break",
            Keyword::Print => "print",
        }
    }

    /// Keywords that name a data type in declarations.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Keyword::Integer
                | Keyword::Real
                | Keyword::Character
                | Keyword::String
                | Keyword::Boolean
                | Keyword::Void
        )
    }

    fn atom_code(self) -> &'static str {
        match self {
            Keyword::Integer => "PRS01",
            Keyword::Real => "PRS02",
            Keyword::Character => "PRS03",
            Keyword::String => "PRS04",
            Keyword::Boolean => "PRS05",
            Keyword::Void => "PRS06",
            Keyword::True => "PRS07",
            Keyword::False => "PRS08",
            Keyword::VarType => "PRS09",
            Keyword::FuncType => "PRS10",
            Keyword::ParamType => "PRS11",
            Keyword::Declarations => "PRS12",
            Keyword::EndDeclarations => "PRS13",
            Keyword::Program => "PRS14",
            Keyword::EndProgram => "PRS15",
            Keyword::Functions => "PRS16",
            Keyword::EndFunctions => "PRS17",
            Keyword::EndFunction => "PRS18",
            Keyword::Return => "PRS19",
            Keyword::If => "PRS20",
            Keyword::Else => "PRS21",
            Keyword::EndIf => "PRS22",
            Keyword::While => "PRS23",
            Keyword::EndWhile => "PRS24",
            Keyword::Break => "PRS25",
            Keyword::Print => "PRS26",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic subkind of an identifier, decided by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentKind {
    ProgramName,
    Variable,
    FunctionName,
}

impl IdentKind {
    pub fn atom_code(self) -> &'static str {
        match self {
            IdentKind::ProgramName => "IDN01",
            IdentKind::Variable => "IDN02",
            IdentKind::FunctionName => "IDN03",
        }
    }
}

impl fmt::Display for IdentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            IdentKind::ProgramName => "program-name",
            IdentKind::Variable => "variable",
            IdentKind::FunctionName => "function-name",
        };
        write!(f, "{}", s)
    }
}

/// Token kinds
///
/// The scanner emits `Identifier(IdentKind::Variable)` for every
/// identifier-shaped lexeme; the classifier refines it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),

    // Delimiters
    Semicolon,          // ;
    Comma,              // ,
    Colon,              // :
    Assign,             // :=
    Question,           // ?
    OpenParen,          // (
    CloseParen,         // )
    OpenBracket,        // [
    CloseBracket,       // ]
    OpenBrace,          // {
    CloseBrace,         // }

    // Arithmetic operators
    Plus,               // +
    Minus,              // -
    Asterisk,           // *
    Slash,              // /
    Percent,            // %

    // Relational operators
    Equal,              // ==
    NotEqual,           // !=
    Less,               // <
    LessEqual,          // <=
    Greater,            // >
    GreaterEqual,       // >=

    // Constants
    IntConst,
    RealConst,
    StringConst,
    CharConst,

    Identifier(IdentKind),
}

impl TokenKind {
    /// Stable code used in reports instead of the kind's name.
    pub fn atom_code(&self) -> &'static str {
        match self {
            TokenKind::Keyword(kw) => kw.atom_code(),
            TokenKind::Semicolon => "SRS01",
            TokenKind::Comma => "SRS02",
            TokenKind::Colon => "SRS03",
            TokenKind::Assign => "SRS04",
            TokenKind::Question => "SRS05",
            TokenKind::OpenParen => "SRS06",
            TokenKind::CloseParen => "SRS07",
            TokenKind::OpenBracket => "SRS08",
            TokenKind::CloseBracket => "SRS09",
            TokenKind::OpenBrace => "SRS10",
            TokenKind::CloseBrace => "SRS11",
            TokenKind::Plus => "SRS12",
            TokenKind::Minus => "SRS13",
            TokenKind::Asterisk => "SRS14",
            TokenKind::Slash => "SRS15",
            TokenKind::Percent => "SRS16",
            TokenKind::Equal => "SRS17",
            TokenKind::NotEqual => "SRS18",
            TokenKind::Less => "SRS19",
            TokenKind::LessEqual => "SRS20",
            TokenKind::Greater => "SRS21",
            TokenKind::GreaterEqual => "SRS22",
            TokenKind::Identifier(kind) => kind.atom_code(),
            TokenKind::IntConst => "IDN04",
            TokenKind::RealConst => "IDN05",
            TokenKind::StringConst => "IDN06",
            TokenKind::CharConst => "IDN07",
        }
    }

    /// Identifiers and constants are uppercased and length-capped.
    pub fn is_normalized(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier(_)
                | TokenKind::IntConst
                | TokenKind::RealConst
                | TokenKind::StringConst
                | TokenKind::CharConst
        )
    }

    pub fn is_type_keyword(&self) -> bool {
        matches!(self, TokenKind::Keyword(kw) if kw.is_type())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "{}", kw),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Assign => write!(f, ":="),
            TokenKind::Question => write!(f, "?"),
            TokenKind::OpenParen => write!(f, "("),
            TokenKind::CloseParen => write!(f, ")"),
            TokenKind::OpenBracket => write!(f, "["),
            TokenKind::CloseBracket => write!(f, "]"),
            TokenKind::OpenBrace => write!(f, "{{"),
            TokenKind::CloseBrace => write!(f, "}}"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Asterisk => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Equal => write!(f, "=="),
            TokenKind::NotEqual => write!(f, "!="),
            TokenKind::Less => write!(f, "<"),
            TokenKind::LessEqual => write!(f, "<="),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::GreaterEqual => write!(f, ">="),
            TokenKind::IntConst => write!(f, "integer constant"),
            TokenKind::RealConst => write!(f, "real constant"),
            TokenKind::StringConst => write!(f, "string constant"),
            TokenKind::CharConst => write!(f, "character constant"),
            TokenKind::Identifier(kind) => write!(f, "{}", kind),
        }
    }
}

/// A token with its source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    /// Length of the matched text before truncation.
    pub original_len: usize,
}

impl Token {
    /// Builds a token from matched text, uppercasing and truncating
    /// identifiers and constants.
    pub fn new(kind: TokenKind, text: &str, line: usize) -> Self {
        let original_len = text.chars().count();
        let lexeme = if kind.is_normalized() {
            normalize(text)
        } else {
            text.to_string()
        };
        Self {
            kind,
            lexeme,
            line,
            original_len,
        }
    }
}

/// Uppercases `text` and keeps at most [`MAX_LEXEME_LEN`] characters of
/// the result.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_uppercase)
        .take(MAX_LEXEME_LEN)
        .collect()
}
