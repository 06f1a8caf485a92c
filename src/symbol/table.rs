use crate::lexer::{normalize, IdentKind, Token, TokenKind, MAX_LEXEME_LEN};
use std::collections::HashMap;
use tracing::debug;

/// Most occurrence lines kept per symbol.
pub const MAX_OCCURRENCE_LINES: usize = 5;

/// One distinct identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub entry_number: usize,
    pub atom_code: &'static str,
    /// Uppercased, at most [`MAX_LEXEME_LEN`] characters.
    pub lexeme: String,
    pub original_len: usize,
    pub truncated_len: usize,
    /// Fixed by the first insertion.
    pub kind: IdentKind,
    /// Ascending, distinct, at most [`MAX_OCCURRENCE_LINES`].
    pub lines: Vec<usize>,
}

impl Symbol {
    fn record_line(&mut self, line: usize) {
        if self.lines.len() >= MAX_OCCURRENCE_LINES {
            return;
        }
        if let Err(at) = self.lines.binary_search(&line) {
            self.lines.insert(at, line);
        }
    }
}

/// Deduplicating identifier table for one analysis run.
///
/// Entries are numbered from 1 in first-seen order and are never removed.
/// Build a fresh table for each source file.
#[derive(Debug)]
pub struct SymbolTable {
    /// Symbols in insertion order; `symbols[i].entry_number == i + 1`
    symbols: Vec<Symbol>,
    /// Normalized lexeme -> entry number
    index: HashMap<String, usize>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Records an identifier occurrence and returns its entry number.
    ///
    /// The first sighting of a lexeme (compared case-insensitively, after
    /// truncation) creates the symbol. Later sightings only add `line` to
    /// its occurrence list, while the list has room.
    pub fn insert(&mut self, lexeme: &str, kind: IdentKind, line: usize) -> usize {
        self.insert_with_len(lexeme, lexeme.chars().count(), kind, line)
    }

    /// Inserts a scanned identifier token, whose lexeme may already be
    /// truncated. Returns `None` for any other token.
    pub fn insert_token(&mut self, token: &Token) -> Option<usize> {
        match token.kind {
            TokenKind::Identifier(kind) => {
                Some(self.insert_with_len(&token.lexeme, token.original_len, kind, token.line))
            }
            _ => None,
        }
    }

    fn insert_with_len(
        &mut self,
        lexeme: &str,
        original_len: usize,
        kind: IdentKind,
        line: usize,
    ) -> usize {
        let key = normalize(lexeme);

        if let Some(&entry) = self.index.get(&key) {
            let symbol = &mut self.symbols[entry - 1];
            assert_eq!(symbol.lexeme, key, "symbol index out of sync with entries");
            symbol.record_line(line);
            debug!(lexeme = %key, entry, line, "symbol seen again");
            return entry;
        }

        let entry = self.symbols.len() + 1;
        let symbol = Symbol {
            entry_number: entry,
            atom_code: kind.atom_code(),
            truncated_len: original_len.min(MAX_LEXEME_LEN),
            lexeme: key.clone(),
            original_len,
            kind,
            lines: vec![line],
        };
        debug!(lexeme = %symbol.lexeme, entry, %kind, line, "new symbol");

        self.symbols.push(symbol);
        let previous = self.index.insert(key, entry);
        assert!(previous.is_none(), "entry number {entry} assigned twice");
        entry
    }

    /// Entry number of `lexeme`, compared case-insensitively
    #[must_use]
    pub fn lookup(&self, lexeme: &str) -> Option<usize> {
        self.index.get(&normalize(lexeme)).copied()
    }

    /// Symbol with the given 1-based entry number
    #[must_use]
    pub fn get(&self, entry: usize) -> Option<&Symbol> {
        entry.checked_sub(1).and_then(|i| self.symbols.get(i))
    }

    /// All symbols in first-insertion order
    #[must_use]
    pub fn all_symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn case_variants_share_an_entry() {
        let mut table = SymbolTable::new();
        assert_eq!(table.insert("Foo", IdentKind::Variable, 1), 1);
        assert_eq!(table.insert("FOO", IdentKind::Variable, 2), 1);
        assert_eq!(table.insert("foo", IdentKind::Variable, 3), 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("fOo"), Some(1));
    }

    #[test]
    fn entries_are_dense_in_first_seen_order() {
        let mut table = SymbolTable::new();
        for name in ["c", "a", "b", "a", "d"] {
            table.insert(name, IdentKind::Variable, 1);
        }
        let seen: Vec<(usize, &str)> = table
            .iter()
            .map(|s| (s.entry_number, s.lexeme.as_str()))
            .collect();
        assert_eq!(seen, vec![(1, "C"), (2, "A"), (3, "B"), (4, "D")]);
    }

    #[test]
    fn long_lexeme_truncated() {
        let mut table = SymbolTable::new();
        let name = "abcdefghij".repeat(4);
        let entry = table.insert(&name, IdentKind::Variable, 1);
        let symbol = table.get(entry).unwrap();
        assert_eq!(symbol.lexeme, &"ABCDEFGHIJ".repeat(4)[..32]);
        assert_eq!(symbol.original_len, 40);
        assert_eq!(symbol.truncated_len, 32);
    }

    #[test]
    fn stored_lexeme_never_exceeds_truncated_length() {
        let mut table = SymbolTable::new();
        table.insert(&"\u{df}".repeat(32), IdentKind::Variable, 1);
        let symbol = table.get(1).unwrap();
        assert_eq!(symbol.lexeme.chars().count(), symbol.truncated_len);
        assert_eq!(symbol.truncated_len, 32);
    }

    #[test]
    fn short_lexeme_untouched() {
        let mut table = SymbolTable::new();
        table.insert("contador", IdentKind::Variable, 1);
        let symbol = &table.all_symbols()[0];
        assert_eq!(symbol.lexeme, "CONTADOR");
        assert_eq!(symbol.original_len, symbol.truncated_len);
    }

    #[test]
    fn occurrence_lines_capped_at_five() {
        let mut table = SymbolTable::new();
        for line in [2, 2, 4, 5, 7, 9, 11, 12] {
            table.insert("x", IdentKind::Variable, line);
        }
        assert_eq!(table.get(1).unwrap().lines, vec![2, 4, 5, 7, 9]);
    }

    #[test]
    fn out_of_order_lines_stay_sorted() {
        let mut table = SymbolTable::new();
        for line in [8, 3, 5] {
            table.insert("x", IdentKind::Variable, line);
        }
        assert_eq!(table.get(1).unwrap().lines, vec![3, 5, 8]);
    }

    #[test]
    fn scanned_token_keeps_original_length() {
        let mut table = SymbolTable::new();
        let token = Token::new(TokenKind::Identifier(IdentKind::Variable), &"q".repeat(40), 6);
        assert_eq!(table.insert_token(&token), Some(1));
        let symbol = table.get(1).unwrap();
        assert_eq!(symbol.original_len, 40);
        assert_eq!(symbol.truncated_len, 32);
        assert_eq!(symbol.lines, vec![6]);

        let colon = Token::new(TokenKind::Colon, ":", 6);
        assert_eq!(table.insert_token(&colon), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn kind_fixed_at_first_insertion() {
        let mut table = SymbolTable::new();
        table.insert("soma", IdentKind::FunctionName, 3);
        table.insert("soma", IdentKind::Variable, 9);
        let symbol = table.get(1).unwrap();
        assert_eq!(symbol.kind, IdentKind::FunctionName);
        assert_eq!(symbol.atom_code, "IDN03");
    }

    #[test]
    fn lookup_does_not_insert() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup("ghost"), None);
        assert!(table.is_empty());
        assert!(table.get(0).is_none());
    }
}
