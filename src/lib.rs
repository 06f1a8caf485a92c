//! CangaCode static checker front end
//!
//! Scans source text of the CangaCode teaching language, classifies
//! identifiers, collects them in a deduplicated symbol table and renders
//! the token (.LEX) and symbol table (.TAB) reports.

pub mod config;
pub mod driver;
pub mod lexer;
pub mod report;
pub mod symbol;

pub use config::*;
pub use driver::*;
pub use lexer::*;
pub use report::*;
pub use symbol::*;
