//! Tab-separated report writer.
//!
//! Streams one line per record as records are produced; nothing is buffered
//! beyond the line being written, and every line is flushed before the next
//! record is fetched.

use std::io::Write;

use crate::domain::PriceRecord;

/// Header row of every report.
pub const REPORT_HEADER: &str = "Num\tSymbol\tDate\tPrice";

/// Streaming report writer over any byte sink.
///
/// Line numbers are 1-based and strictly increasing with no gaps, counted
/// identically for success and failure rows.
pub struct ReportWriter<W: Write> {
    writer: W,
    next_line: u64,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            next_line: 1,
        }
    }

    /// Write the header row. Call once, before any record.
    pub fn write_header(&mut self) -> Result<(), ReportError> {
        self.writer.write_all(REPORT_HEADER.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write one record row and flush it.
    pub fn write_record(&mut self, record: &PriceRecord) -> Result<(), ReportError> {
        let line = Self::format_row(self.next_line, record);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.next_line += 1;
        Ok(())
    }

    /// Line number the next record will receive.
    pub fn next_line(&self) -> u64 {
        self.next_line
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn format_row(line_number: u64, record: &PriceRecord) -> String {
        if record.is_success() {
            format!(
                "{line_number}\t{}\t{}\t{}",
                record.symbol,
                record.as_of.format_rfc3339(),
                record.price
            )
        } else {
            format!(
                "{line_number}\t{}\t{}\tError ({}): {}",
                record.symbol,
                record.as_of.format_rfc3339(),
                record.ret_code,
                record.ret_msg.as_deref().unwrap_or_default()
            )
        }
    }
}

/// Error type for report output.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
