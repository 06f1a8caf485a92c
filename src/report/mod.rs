//! Token (.LEX) and symbol table (.TAB) reports.
//!
//! Both renderings are pure functions of the scanned tokens and the final
//! table. Nothing is rescanned and neither input is modified.

use std::fmt;

use crate::lexer::Token;
use crate::symbol::SymbolTable;

pub const TOKEN_REPORT_TITLE: &str = "LEXICAL ANALYSIS REPORT";
pub const SYMBOL_REPORT_TITLE: &str = "SYMBOL TABLE REPORT";
const BLOCK_SEPARATOR: &str = "------------------------------------------------------------";

/// A scanned token and the symbol entry it produced, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub token: Token,
    pub entry: Option<usize>,
}

/// Lines printed above both reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    pub team: Option<String>,
    pub members: Vec<String>,
    /// File name of the analysed source, e.g. `exemplo.251`.
    pub source_name: String,
}

impl ReportHeader {
    fn write(&self, f: &mut fmt::Formatter, title: &str) -> fmt::Result {
        if let Some(team) = &self.team {
            writeln!(f, "Team: {team}")?;
        }
        if !self.members.is_empty() {
            writeln!(f, "Members:")?;
            for member in &self.members {
                writeln!(f, "    {member}")?;
            }
        }
        if self.team.is_some() || !self.members.is_empty() {
            writeln!(f)?;
        }
        writeln!(f, "{title}. Source analyzed: {}", self.source_name)?;
        writeln!(f)
    }
}

/// Display adapter for the token report
pub struct TokenReport<'a> {
    pub header: &'a ReportHeader,
    pub records: &'a [TokenRecord],
}

impl fmt::Display for TokenReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.header.write(f, TOKEN_REPORT_TITLE)?;
        for record in self.records {
            let token = &record.token;
            write!(f, "Lexeme: {}, Code: {}, ", token.lexeme, token.kind.atom_code())?;
            match record.entry {
                Some(entry) => write!(f, "SymbolIndex: {entry}, ")?,
                None => write!(f, "SymbolIndex: -, ")?,
            }
            writeln!(f, "Line: {}.", token.line)?;
        }
        Ok(())
    }
}

/// Display adapter for the symbol table report
pub struct SymbolReport<'a> {
    pub header: &'a ReportHeader,
    pub table: &'a SymbolTable,
}

impl fmt::Display for SymbolReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.header.write(f, SYMBOL_REPORT_TITLE)?;
        if self.table.is_empty() {
            return writeln!(f, "No symbols found.");
        }
        for symbol in self.table.iter() {
            writeln!(
                f,
                "Entry: {}, Code: {}, Lexeme: {},",
                symbol.entry_number, symbol.atom_code, symbol.lexeme
            )?;
            writeln!(
                f,
                "LengthBeforeTrunc: {}, LengthAfterTrunc: {},",
                symbol.original_len, symbol.truncated_len
            )?;
            let lines: Vec<String> = symbol.lines.iter().map(ToString::to_string).collect();
            writeln!(f, "Type: {}, Lines: {{{}}}.", symbol.kind, lines.join(", "))?;
            writeln!(f, "{BLOCK_SEPARATOR}")?;
        }
        Ok(())
    }
}

#[must_use]
pub fn token_report(header: &ReportHeader, records: &[TokenRecord]) -> String {
    TokenReport { header, records }.to_string()
}

#[must_use]
pub fn symbol_report(header: &ReportHeader, table: &SymbolTable) -> String {
    SymbolReport { header, table }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{IdentKind, TokenKind};
    use pretty_assertions::assert_eq;

    fn header() -> ReportHeader {
        ReportHeader {
            source_name: "t.251".to_string(),
            ..ReportHeader::default()
        }
    }

    #[test]
    fn token_line_format() {
        let records = vec![
            TokenRecord {
                token: Token::new(TokenKind::Identifier(IdentKind::Variable), "x", 4),
                entry: Some(2),
            },
            TokenRecord {
                token: Token::new(TokenKind::Assign, ":=", 4),
                entry: None,
            },
        ];
        assert_eq!(
            token_report(&header(), &records),
            "LEXICAL ANALYSIS REPORT. Source analyzed: t.251\n\n\
             Lexeme: X, Code: IDN02, SymbolIndex: 2, Line: 4.\n\
             Lexeme: :=, Code: SRS04, SymbolIndex: -, Line: 4.\n"
        );
    }

    #[test]
    fn symbol_block_format() {
        let mut table = SymbolTable::new();
        table.insert("media", IdentKind::Variable, 3);
        table.insert("MEDIA", IdentKind::Variable, 8);
        assert_eq!(
            symbol_report(&header(), &table),
            "SYMBOL TABLE REPORT. Source analyzed: t.251\n\n\
             Entry: 1, Code: IDN02, Lexeme: MEDIA,\n\
             LengthBeforeTrunc: 5, LengthAfterTrunc: 5,\n\
             Type: variable, Lines: {3, 8}.\n\
             ------------------------------------------------------------\n"
        );
    }

    #[test]
    fn empty_table_message() {
        let table = SymbolTable::new();
        let report = symbol_report(&header(), &table);
        assert!(report.ends_with("No symbols found.\n"));
    }

    #[test]
    fn team_header_printed_when_configured() {
        let header = ReportHeader {
            team: Some("EQ03".to_string()),
            members: vec!["Ana; ana@example.com".to_string()],
            source_name: "t.251".to_string(),
        };
        let report = token_report(&header, &[]);
        assert_eq!(
            report,
            "Team: EQ03\nMembers:\n    Ana; ana@example.com\n\n\
             LEXICAL ANALYSIS REPORT. Source analyzed: t.251\n\n"
        );
    }
}
