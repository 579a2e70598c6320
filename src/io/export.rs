//! CSV export for the per-year escalation schedule.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::escalation::YearRow;

/// Column header for schedule export.
const HEADER: &str = "year,monthly_end,paid_in_year,cumulative";

/// Exports a projection schedule to a CSV file at the given path.
///
/// Writes a header row followed by one data row per projected year.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(rows: &[YearRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(rows, buf)
}

/// Writes a projection schedule as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(rows: &[YearRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in rows {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.2}", r.monthly_end),
            format!("{:.2}", r.paid_in_year),
            format!("{:.2}", r.cumulative),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escalation::project_schedule;

    #[test]
    fn header_and_row_count() {
        let rows = project_schedule(200.0, 0.09, 5);
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], HEADER);
    }

    #[test]
    fn flat_series_rows_are_stable() {
        let rows = project_schedule(100.0, 0.0, 2);
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1,100.00,1200.00,1200.00"));
        assert!(text.contains("2,100.00,1200.00,2400.00"));
    }

    #[test]
    fn deterministic_output() {
        let rows = project_schedule(137.5, 0.07, 10);
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_csv(&rows, &mut a).unwrap();
        write_csv(&rows, &mut b).unwrap();
        assert_eq!(a, b);
    }
}
