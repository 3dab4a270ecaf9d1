//! Kit loading from CSV
//!
//! Reads headerless records of the form `quantity, type, field1, ...` into a
//! [`Kit`]. A record that fails to decode is reported and skipped; only
//! problems with the stream itself abort the load.

use miette::Diagnostic;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::entities::error::ParseError;
use crate::entities::factory::parse_record;
use crate::entities::kit::{Kit, KitType};

/// Load behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Abort on the first record that fails to decode
    pub stop_on_error: bool,
}

/// A record that could not be decoded
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number in the input
    pub row: usize,
    /// The raw record, re-joined with commas
    pub record: String,
    pub error: ParseError,
}

/// Outcome of loading a kit
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub kit: Kit,
    pub rows_processed: usize,
    pub skipped: usize,
    pub errors: Vec<RowError>,
}

impl LoadReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Errors that stop a load
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    #[diagnostic(code(ckit::load::csv))]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(ckit::load::io))]
    Io(#[from] std::io::Error),

    #[error("Row {row}: {source}")]
    #[diagnostic(code(ckit::load::row))]
    Row {
        row: usize,
        #[source]
        source: ParseError,
    },
}

/// Read CSV records from `reader` into a new kit of type `kind`
pub fn load_kit<R: Read>(
    kind: KitType,
    reader: R,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut report = LoadReport {
        kit: Kit::new(kind),
        rows_processed: 0,
        skipped: 0,
        errors: Vec::new(),
    };

    for (idx, result) in rdr.byte_records().enumerate() {
        let record = result?;
        let row = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(idx + 1);

        if record.iter().all(<[u8]>::is_empty) {
            report.skipped += 1;
            continue;
        }
        report.rows_processed += 1;

        let decoded = utf8_fields(&record).and_then(|fields| parse_record(&fields));
        match decoded {
            Ok((quantity, component)) => {
                tracing::debug!(row, quantity, kind = %component.kind(), "decoded component");
                report.kit.add(quantity, component);
            }
            Err(error) => {
                if options.stop_on_error {
                    return Err(LoadError::Row { row, source: error });
                }
                tracing::warn!(row, %error, "skipping record");
                report.errors.push(RowError {
                    row,
                    record: lossy_record(&record),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        kit = report.kit.kit_name(),
        lines = report.kit.lines().len(),
        errors = report.errors.len(),
        "kit loaded"
    );
    Ok(report)
}

/// Borrow every field as text; a field that is not UTF-8 fails only its own record
fn utf8_fields(record: &csv::ByteRecord) -> Result<Vec<&str>, ParseError> {
    record
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            std::str::from_utf8(field).map_err(|_| ParseError::InvalidEncoding { column: idx + 1 })
        })
        .collect()
}

fn lossy_record(record: &csv::ByteRecord) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}

/// Open `path` and load it with [`load_kit`]
pub fn load_kit_from_path(
    kind: KitType,
    path: &Path,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    let file = File::open(path)?;
    load_kit(kind, BufReader::new(file), options)
}
