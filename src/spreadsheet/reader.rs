//! Attendance file reading.
//!
//! Reads a spreadsheet workbook or a delimited export into a [`RawTable`].
//! Cells stay text; rows may be ragged. Only failures to open or decode the
//! file are errors here.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use tracing::info;

use crate::error::{PayrollError, PayrollResult};
use crate::models::RawTable;

use super::sheets::TIMESTAMP_FORMAT;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Extensions read as spreadsheet workbooks; anything else is delimited text.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether `path` names a spreadsheet workbook, by extension.
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| w.eq_ignore_ascii_case(ext)))
}

/// Reads the attendance table at `path`.
///
/// Workbooks (see [`WORKBOOK_EXTENSIONS`]) are read from their first
/// worksheet; `delimiter` only applies to delimited text.
///
/// # Errors
///
/// Returns [`PayrollError::FileRead`] when the file can't be opened or
/// decoded.
pub fn read_table<P: AsRef<Path>>(path: P, delimiter: u8) -> PayrollResult<RawTable> {
    let path = path.as_ref();
    let origin = path.display().to_string();

    let table = if is_workbook_path(path) {
        read_workbook(path)?
    } else {
        let file = File::open(path).map_err(|e| PayrollError::FileRead {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        read_table_from(file, delimiter, &origin)?
    };

    info!(
        path = %origin,
        columns = table.headers.len(),
        rows = table.rows.len(),
        "Read attendance table"
    );
    Ok(table)
}

/// Reads an attendance table from any reader; `origin` names it in errors.
///
/// # Examples
///
/// ```
/// use attendance_payroll::spreadsheet::read_table_from;
///
/// let data = "Name,Emp ID,Time,Attendance State\nAsha,6,2025-03-03 08:00:00,Check In\n";
/// let table = read_table_from(data.as_bytes(), b',', "inline").unwrap();
///
/// assert_eq!(table.headers.len(), 4);
/// assert_eq!(table.cell(0, 3), "Check In");
/// ```
pub fn read_table_from<R: Read>(reader: R, delimiter: u8, origin: &str) -> PayrollResult<RawTable> {
    let to_error = |e: csv::Error| PayrollError::FileRead {
        path: origin.to_string(),
        message: e.to_string(),
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(to_error)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(to_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Reads the first worksheet of a workbook.
///
/// Date cells become text in [`TIMESTAMP_FORMAT`], rounded to the second.
/// Blank rows are skipped.
pub fn read_workbook(path: &Path) -> PayrollResult<RawTable> {
    let origin = path.display().to_string();
    let to_error = |e: calamine::Error| PayrollError::FileRead {
        path: origin.clone(),
        message: e.to_string(),
    };

    let mut workbook = open_workbook_auto(path).map_err(to_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PayrollError::FileRead {
            path: origin.clone(),
            message: "workbook has no worksheets".to_string(),
        })?
        .map_err(to_error)?;

    let mut cells = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    let mut headers = cells.next().unwrap_or_default();
    if let Some(first) = headers.first_mut() {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }

    let rows = cells
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    Ok(RawTable { headers, rows })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(ts) => round_to_second(ts).format(TIMESTAMP_FORMAT).to_string(),
            None => value.as_f64().to_string(),
        },
        other => other.to_string(),
    }
}

// Serial dates carry float error, e.g. 07:59:59.999 for 08:00
fn round_to_second(ts: NaiveDateTime) -> NaiveDateTime {
    let shifted = ts + TimeDelta::milliseconds(500);
    shifted.with_nanosecond(0).unwrap_or(shifted)
}
