//! CLI command implementations - one command per file.

pub mod categories;
pub mod extract;
pub mod scan;

use symcat::Extractor;
use symcat_output::{OutputFormat, OutputFormatter};

use crate::config::SymcatConfig;

/// Shared state every command runs with.
pub struct Context {
    pub config: SymcatConfig,
    pub format: OutputFormat,
}

impl Context {
    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.config.rules.resolve())
    }
}

/// Print a report, turning render failures (bad jq filters) into errors.
pub(crate) fn print_report(
    report: &impl OutputFormatter,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    report.print(format).map_err(anyhow::Error::msg)
}

/// Report an error and turn it into an exit code.
pub(crate) fn exit_code(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {:#}", e);
            1
        }
    }
}
