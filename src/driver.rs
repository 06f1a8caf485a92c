//! The analysis run: read the source, pull tokens one at a time, classify
//! identifiers and fill the symbol table, then write both reports beside
//! the source file.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::lexer::{classify_and_record, preprocess, History, LexerError, Scanner};
use crate::report::{symbol_report, token_report, ReportHeader, TokenRecord};
use crate::symbol::SymbolTable;

pub const SOURCE_EXTENSION: &str = "251";
pub const TOKEN_REPORT_EXTENSION: &str = "LEX";
pub const SYMBOL_REPORT_EXTENSION: &str = "TAB";

/// Failures that stop a run before or after scanning
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write report '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Appends `.251` unless the path already ends with it, then checks
/// that the file exists.
///
/// # Errors
/// If no file exists at the resolved path
pub fn resolve_source_path(arg: &Path) -> Result<PathBuf, AnalyzerError> {
    let path = if arg.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
        arg.to_path_buf()
    } else {
        let mut name = OsString::from(arg.as_os_str());
        name.push(".");
        name.push(SOURCE_EXTENSION);
        PathBuf::from(name)
    };

    if !path.is_file() {
        return Err(AnalyzerError::SourceNotFound(path));
    }
    Ok(path)
}

/// Reads the source, dropping any byte outside ASCII.
///
/// # Errors
/// If the file cannot be read
pub fn read_source(path: &Path) -> Result<String, AnalyzerError> {
    let bytes = fs::read(path).map_err(|source| AnalyzerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes
        .into_iter()
        .filter(u8::is_ascii)
        .map(char::from)
        .collect())
}

/// Counts reported after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub tokens: usize,
    pub symbols: usize,
    pub lines: usize,
    pub lexical_errors: usize,
}

/// Result of scanning one source text
#[derive(Debug)]
pub struct Analysis {
    /// Tokens in scan order with their symbol entries
    pub records: Vec<TokenRecord>,
    pub table: SymbolTable,
    /// Characters the scanner skipped
    pub lexical_errors: Vec<LexerError>,
    /// Comments and characters the preprocessor dealt with
    pub diagnostics: Vec<LexerError>,
    /// Number of source lines scanned
    pub lines: usize,
}

impl Analysis {
    /// Scans `source` in a single pass.
    ///
    /// Each token is classified and, if it is an identifier, inserted into
    /// the table as soon as it is pulled from the scanner.
    #[must_use]
    pub fn run(source: &str) -> Self {
        let preprocessed = preprocess(source);
        // The line after a final newline holds no source text
        let trailing_newline = preprocessed.text.ends_with('\n');
        let mut scanner = Scanner::new(preprocessed.text);
        let mut history = History::new();
        let mut table = SymbolTable::new();
        let mut records = Vec::new();
        let mut lexical_errors = Vec::new();

        for item in scanner.by_ref() {
            match item {
                Ok(mut token) => {
                    token.kind = classify_and_record(&mut history, token.kind);
                    let entry = table.insert_token(&token);
                    records.push(TokenRecord { token, entry });
                }
                Err(err) => lexical_errors.push(err),
            }
        }

        let analysis = Self {
            records,
            table,
            lexical_errors,
            diagnostics: preprocessed.diagnostics,
            lines: scanner.line() - usize::from(trailing_newline),
        };
        debug!(stats = ?analysis.stats(), "scan finished");
        analysis
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats {
            tokens: self.records.len(),
            symbols: self.table.len(),
            lines: self.lines,
            lexical_errors: self.lexical_errors.len(),
        }
    }

    #[must_use]
    pub fn token_report(&self, header: &ReportHeader) -> String {
        token_report(header, &self.records)
    }

    #[must_use]
    pub fn symbol_report(&self, header: &ReportHeader) -> String {
        symbol_report(header, &self.table)
    }
}

/// Where the two reports of a source file go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub tokens: PathBuf,
    pub symbols: PathBuf,
}

impl ReportPaths {
    /// Replaces the source extension with `.LEX` and `.TAB`.
    #[must_use]
    pub fn for_source(source: &Path) -> Self {
        Self {
            tokens: source.with_extension(TOKEN_REPORT_EXTENSION),
            symbols: source.with_extension(SYMBOL_REPORT_EXTENSION),
        }
    }
}

/// Writes both reports beside `source`.
///
/// # Errors
/// If either report file cannot be written
pub fn write_reports(
    analysis: &Analysis,
    source: &Path,
    header: &ReportHeader,
) -> Result<ReportPaths, AnalyzerError> {
    let paths = ReportPaths::for_source(source);
    write_file(&paths.tokens, &analysis.token_report(header))?;
    write_file(&paths.symbols, &analysis.symbol_report(header))?;
    Ok(paths)
}

fn write_file(path: &Path, contents: &str) -> Result<(), AnalyzerError> {
    fs::write(path, contents).map_err(|source| AnalyzerError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "report written");
    Ok(())
}

/// Everything one configured run produced
#[derive(Debug)]
pub struct Outcome {
    pub source: PathBuf,
    pub header: ReportHeader,
    pub analysis: Analysis,
    pub reports: ReportPaths,
}

/// Resolves, reads and scans the configured source, then writes the
/// reports. Nothing is written if the source cannot be read.
///
/// # Errors
/// If the source is missing or unreadable, or a report cannot be written
pub fn analyze_file(config: &AnalyzerConfig) -> Result<Outcome, AnalyzerError> {
    let source = resolve_source_path(&config.source)?;
    let text = read_source(&source)?;
    info!(path = %source.display(), "analyzing");

    let source_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let header = config.report_header(source_name);

    let analysis = Analysis::run(&text);
    let reports = write_reports(&analysis, &source, &header)?;
    info!(
        tokens = analysis.records.len(),
        symbols = analysis.table.len(),
        "analysis complete"
    );

    Ok(Outcome {
        source,
        header,
        analysis,
        reports,
    })
}
