//! Report sinks
//!
//! Rows are handed to a [`ReportSink`] one at a time as soon as they are
//! produced. [`CsvReportWriter`] persists them with a fixed header and flushes
//! after every row, so an interrupted run still leaves every completed row on
//! disk.

use crate::error::Result;
use crate::report::row::ReportRow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row of the CSV report
pub const REPORT_HEADER: [&str; 5] = ["Organization", "Repo Name", "User Name", "Email", "Permission"];

/// Destination for report rows
pub trait ReportSink {
    fn write_row(&mut self, row: &ReportRow) -> Result<()>;
}

impl ReportSink for Vec<ReportRow> {
    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.push(row.clone());
        Ok(())
    }
}

/// CSV writer that emits the header on creation
pub struct CsvReportWriter<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl CsvReportWriter<File> {
    /// Creates (or truncates) the report file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write> CsvReportWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(REPORT_HEADER)?;
        writer.flush()?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::AuditError::ReportWrite(e.to_string()))
    }
}

impl<W: Write> ReportSink for CsvReportWriter<W> {
    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.writer.write_record(row.fields())?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}
