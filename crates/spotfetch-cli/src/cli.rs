//! CLI argument definitions for spotfetch.

use std::path::PathBuf;

use clap::Parser;

/// Fetch latest spot prices for a symbol list and write a tab-separated
/// report.
///
/// The input file carries one symbol per line; empty lines are kept in the
/// report as `n/a` placeholder rows. Every input line produces exactly one
/// report row, failed lookups included.
#[derive(Debug, Parser)]
#[command(name = "spotfetch", author, version, about = "Spot price report generator")]
pub struct Cli {
    /// Input file with one market symbol per line.
    #[arg(long)]
    pub input: PathBuf,

    /// Output report path. Defaults to `<input stem>-prices-output.csv`
    /// next to the input file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Request timeout budget in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
}

impl Cli {
    /// Resolve the report path, deriving the default from the input path.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let stem = self
                    .input
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| String::from("symbols"));
                self.input.with_file_name(format!("{stem}-prices-output.csv"))
            }
        }
    }
}
