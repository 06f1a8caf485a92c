use anyhow::{Context, Result};
use canga_lex::{analyze_file, AnalyzerConfig};
use clap::Parser as ClapParser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(ClapParser)]
#[command(name = "canga-lex")]
#[command(about = "Lexical analyzer and symbol table builder for CangaCode sources", long_about = None)]
struct Cli {
    /// Source file; the .251 extension may be omitted
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Team code printed above both reports
    #[arg(long, value_name = "CODE")]
    team: Option<String>,

    /// Team member line for the report header (repeatable)
    #[arg(long = "member", value_name = "TEXT")]
    members: Vec<String>,

    /// Also print both reports to stdout
    #[arg(long = "stdout")]
    echo: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for AnalyzerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            source: cli.file,
            team: cli.team,
            members: cli.members,
            echo_reports: cli.echo,
            verbosity: cli.verbose,
        }
    }
}

fn init_tracing(config: &AnalyzerConfig) {
    // RUST_LOG wins over -v when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let config = AnalyzerConfig::from(Cli::parse());
    init_tracing(&config);

    let outcome = analyze_file(&config)
        .with_context(|| format!("failed to analyze '{}'", config.source.display()))?;

    if config.echo_reports {
        println!("{}", outcome.analysis.token_report(&outcome.header));
        println!("{}", outcome.analysis.symbol_report(&outcome.header));
    }

    let stats = outcome.analysis.stats();
    println!("Analyzed {}", outcome.source.display());
    println!("  Tokens processed: {}", stats.tokens);
    println!("  Symbols in table: {}", stats.symbols);
    println!("  Lines scanned:    {}", stats.lines);
    if stats.lexical_errors > 0 {
        println!("  Lexical errors:   {}", stats.lexical_errors);
    }
    println!("Token report:  {}", outcome.reports.tokens.display());
    println!("Symbol report: {}", outcome.reports.symbols.display());

    Ok(())
}
