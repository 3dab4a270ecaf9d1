//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Write;

use crate::core::loader::RowError;

/// Write records as CSV, quoting fields that need it
pub fn write_csv_records<W, R, S>(out: W, records: R) -> Result<()>
where
    W: Write,
    R: IntoIterator,
    R::Item: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    for record in records {
        wtr.write_record(record).into_diagnostic()?;
    }
    wtr.flush().into_diagnostic()?;
    Ok(())
}

/// One record rendered as a CSV line, without the line terminator
pub fn csv_record_line<S: AsRef<[u8]>>(record: &[S]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_records(&mut buf, [record])?;
    let line = String::from_utf8(buf).into_diagnostic()?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Dollar amount with two decimals
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Print row decode failures to stderr
pub fn report_row_errors(errors: &[RowError]) {
    for err in errors {
        eprintln!(
            "{} Row {}: {} {}",
            style("✗").red(),
            err.row,
            err.error,
            style(format!("[{}]", err.record)).dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_record_line() {
        assert_eq!(
            csv_record_line(&["17", "Wire", "40", "2.40"]).unwrap(),
            "17,Wire,40,2.40"
        );
        assert_eq!(
            csv_record_line(&["1", "Sensor", "dust, fine", "5", "3.90"]).unwrap(),
            "1,Sensor,\"dust, fine\",5,3.90"
        );
    }

    #[test]
    fn test_write_csv_records_allows_uneven_rows() {
        let mut buf = Vec::new();
        write_csv_records(
            &mut buf,
            vec![
                vec!["2", "Battery", "AA", "1.5", "3.10"],
                vec!["14", "Wire", "60", "3.20"],
            ],
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["2,Battery,AA,1.5,3.10", "14,Wire,60,3.20"]);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(69.6), "$69.60");
        assert_eq!(format_price(0.0), "$0.00");
    }
}
