//! Run orchestration: symbols in, report out.

use std::fs::File;
use std::io::BufWriter;

use tracing::info;

use spotfetch_core::{
    read_symbol_lines, BybitAdapter, PriceFetcher, ReportWriter, EMPTY_SYMBOL,
};

use crate::cli::Cli;
use crate::error::CliError;
use crate::preflight;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let output_path = cli.output_path();
    info!(
        input = %cli.input.display(),
        output = %output_path.display(),
        "resolved paths"
    );

    // Both file checks happen before the output is truncated; a fatal error
    // here produces no report at all.
    preflight::check_output_path(&output_path)?;
    let lines = read_symbol_lines(&cli.input)?;
    info!(count = lines.len(), symbols = %preview(&lines), "read symbol list");

    let adapter = BybitAdapter::new().with_timeout_ms(cli.timeout_ms);

    let output = File::create(&output_path)?;
    let mut writer = ReportWriter::new(BufWriter::new(output));
    writer.write_header()?;

    let mut fetcher = PriceFetcher::new(lines.into_iter(), &adapter);
    while let Some(record) = fetcher.next_record().await {
        writer.write_record(&record)?;
    }

    info!(report = %output_path.display(), "done");
    Ok(())
}

/// Numbered one-line preview of the parsed symbol list, empty lines shown
/// with the placeholder symbol.
fn preview(lines: &[String]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let shown = if line.is_empty() { EMPTY_SYMBOL } else { line };
            format!("{}.{shown}", index + 1)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
