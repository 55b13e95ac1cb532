use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, XlsxError};
use scout_core::{KeywordRecord, Stage};
use scout_logging::{scout_debug, scout_info};

use crate::persist::{AtomicFileWriter, PersistError};

pub const EXPORT_HEADERS: [&str; 3] = ["Keyword", "Metrica", "Dettagli"];
/// Spreadsheet column widths, in characters, matching `EXPORT_HEADERS`.
pub const COLUMN_WIDTHS: [f64; 3] = [30.0, 20.0, 60.0];
pub const SHEET_NAME: &str = "Keywords";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Xlsx];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// `{prefix}_keywords_{YYYY-MM-DD}`, without extension.
pub fn export_filename(stage: Stage, date: NaiveDate) -> String {
    format!("{}_keywords_{}", stage.file_prefix(), date.format("%Y-%m-%d"))
}

/// CSV bytes: a bare header line, then every field double-quoted with
/// embedded quotes doubled.
pub fn render_delimited_text(records: &[KeywordRecord]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = EXPORT_HEADERS.join(",").into_bytes();
    buffer.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buffer);
    for record in records {
        writer.write_record([record.keyword(), record.metric(), record.details()])?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

/// Single-sheet workbook with the export headers and fixed column widths.
pub fn render_spreadsheet(records: &[KeywordRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in EXPORT_HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string(0, col, *header)?;
        worksheet.set_column_width(col, width)?;
    }
    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, record.keyword())?;
        worksheet.write_string(row, 1, record.metric())?;
        worksheet.write_string(row, 2, record.details())?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write `{dir}/{filename}.csv`. Nothing is written for an empty list.
pub fn write_delimited_text(
    records: &[KeywordRecord],
    dir: &Path,
    filename: &str,
) -> Result<Option<PathBuf>, ExportError> {
    export_records(ExportFormat::Csv, records, dir, filename)
}

/// Write `{dir}/{filename}.xlsx`. Nothing is written for an empty list.
pub fn write_spreadsheet(
    records: &[KeywordRecord],
    dir: &Path,
    filename: &str,
) -> Result<Option<PathBuf>, ExportError> {
    export_records(ExportFormat::Xlsx, records, dir, filename)
}

pub fn export_records(
    format: ExportFormat,
    records: &[KeywordRecord],
    dir: &Path,
    filename: &str,
) -> Result<Option<PathBuf>, ExportError> {
    if records.is_empty() {
        scout_debug!("skipping {} export of empty list {}", format.extension(), filename);
        return Ok(None);
    }
    let bytes = match format {
        ExportFormat::Csv => render_delimited_text(records)?,
        ExportFormat::Xlsx => render_spreadsheet(records)?,
    };
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let path = writer.write(&format!("{filename}.{}", format.extension()), &bytes)?;
    scout_info!("exported {} keywords to {}", records.len(), path.display());
    Ok(Some(path))
}
