use std::path::PathBuf;

use crate::report::ReportHeader;

/// Settings for one analyzer run, gathered from the command line
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Source file as given; the `.251` extension may be missing.
    pub source: PathBuf,
    /// Team code printed above both reports.
    pub team: Option<String>,
    /// One line per team member.
    pub members: Vec<String>,
    /// Print both reports to stdout as well as writing them.
    pub echo_reports: bool,
    /// 0 = warnings only, 1 = info, 2 = debug, 3+ = trace.
    pub verbosity: u8,
}

impl AnalyzerConfig {
    /// Report header for a source file named `source_name`.
    #[must_use]
    pub fn report_header(&self, source_name: impl Into<String>) -> ReportHeader {
        ReportHeader {
            team: self.team.clone(),
            members: self.members.clone(),
            source_name: source_name.into(),
        }
    }

    /// Default `tracing` filter directive for the configured verbosity.
    #[must_use]
    pub fn log_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
