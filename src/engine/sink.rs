//! Report sinks: where finished records go. The orchestrating thread owns the sink; workers
//! never write the report.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::debug;
use std::io::Write;
use std::path::Path;

use super::tools::path_to_report_string;
use crate::{DigestAlgorithm, FileRecord, OutputMode};

/// Consumer of the completed-record stream.
pub trait ReportSink {
    fn write_record(&mut self, record: &FileRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink, for library callers that want the records themselves.
impl ReportSink for Vec<FileRecord> {
    fn write_record(&mut self, record: &FileRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Absolute path as written to a full report. Names that are not valid UTF-8 are written with
/// replacement characters, and the loss is logged.
fn report_path(path: &Path) -> String {
    match path.to_str() {
        Some(s) => s.to_string(),
        None => {
            debug!("path is not valid UTF-8, written lossily: {}", path.display());
            path.to_string_lossy().into_owned()
        }
    }
}

/// `%Y-%b-%d`, e.g. `2021-Feb-28`.
pub fn format_date(d: &DateTime<Local>) -> String {
    d.format("%Y-%b-%d").to_string()
}

/// `%H:%M:%S%z`, e.g. `16:23:56+0400`.
pub fn format_time(d: &DateTime<Local>) -> String {
    d.format("%H:%M:%S%z").to_string()
}

pub fn format_date_time(d: &DateTime<Local>) -> String {
    format!("{} {}", format_date(d), format_time(d))
}

/// Column names for `mode`; the digest columns are named after `algorithm`.
pub fn report_header(mode: OutputMode, algorithm: DigestAlgorithm) -> Vec<String> {
    match mode {
        OutputMode::Simple => vec![
            "case-label".into(),
            "relative-path".into(),
            algorithm.name().into(),
            "hash-error".into(),
            "size".into(),
            "created".into(),
            "modified".into(),
            "file-name".into(),
            "file-extension".into(),
        ],
        OutputMode::Full => vec![
            "case-label".into(),
            "path".into(),
            algorithm.column().into(),
            format!("{}-uc", algorithm.column()),
            "hash-error".into(),
            "size".into(),
            "created".into(),
            "created-time".into(),
            "modified".into(),
            "modified-time".into(),
            "file-name".into(),
            "file-extension".into(),
        ],
    }
}

/// One report row, in the same column order as [`report_header`].
pub fn report_row(record: &FileRecord, mode: OutputMode) -> Vec<String> {
    let size = record.size.map(|s| s.to_string()).unwrap_or_default();
    let stamp = |t: &Option<DateTime<Local>>, f: fn(&DateTime<Local>) -> String| {
        t.as_ref().map(f).unwrap_or_default()
    };
    match mode {
        OutputMode::Simple => vec![
            record.case_label.clone(),
            record
                .relative_path
                .as_deref()
                .map(path_to_report_string)
                .unwrap_or_default(),
            record.digest.clone(),
            record.hash_error.clone(),
            size,
            stamp(&record.created, format_date_time),
            stamp(&record.modified, format_date_time),
            record.file_name.clone(),
            record.file_extension.clone(),
        ],
        OutputMode::Full => vec![
            record.case_label.clone(),
            report_path(&record.path),
            record.digest.clone(),
            record.digest_upper(),
            record.hash_error.clone(),
            size,
            stamp(&record.created, format_date),
            stamp(&record.created, format_time),
            stamp(&record.modified, format_date),
            stamp(&record.modified, format_time),
            record.file_name.clone(),
            record.file_extension.clone(),
        ],
    }
}

/// Delimited report: every field quoted, `\n` line endings, header written on creation.
pub struct CsvReportSink<W: Write> {
    writer: csv::Writer<W>,
    mode: OutputMode,
}

impl<W: Write> CsvReportSink<W> {
    pub fn new(inner: W, mode: OutputMode, algorithm: DigestAlgorithm) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(inner);
        writer
            .write_record(report_header(mode, algorithm))
            .context("write report header")?;
        Ok(CsvReportSink { writer, mode })
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flush report: {}", e.error()))
    }
}

impl<W: Write> ReportSink for CsvReportSink<W> {
    fn write_record(&mut self, record: &FileRecord) -> Result<()> {
        self.writer
            .write_record(report_row(record, self.mode))
            .with_context(|| format!("write report row for {}", record.path.display()))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("flush report")
    }
}
