pub mod row;
pub mod sink;

pub use row::{EMAIL_UNAVAILABLE, Email, ReportRow};
pub use sink::{CsvReportWriter, REPORT_HEADER, ReportSink};
