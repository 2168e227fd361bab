//! Attendance input models.
//!
//! This module contains the [`RawTable`] handed over by the file reader and the
//! normalized [`AttendanceEvent`] produced from each of its usable rows.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// An untyped table as read from the attendance export.
///
/// Cells are kept as text; interpreting them is the normalizer's job.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::RawTable;
///
/// let table = RawTable {
///     headers: vec!["Name".to_string(), "Emp ID".to_string()],
///     rows: vec![vec!["Asha".to_string(), "6".to_string()]],
/// };
/// assert_eq!(table.column_index("Emp ID"), Some(1));
/// assert_eq!(table.cell(0, 1), "6");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column headers in file order.
    pub headers: Vec<String>,
    /// Data rows; a row may be shorter than the header list.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Returns the position of the column whose trimmed header equals `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Returns the cell at `row`, `column`, or an empty string when absent.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// The attendance state recorded by the biometric device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    /// "Check In".
    CheckIn,
    /// "Check Out".
    CheckOut,
    /// Any other value (break, overtime punch, ...). Ignored when pairing.
    Other(String),
}

impl AttendanceState {
    /// Interprets a device state label.
    ///
    /// ```
    /// use attendance_payroll::models::AttendanceState;
    ///
    /// assert_eq!(AttendanceState::from_label(" Check In "), AttendanceState::CheckIn);
    /// assert_eq!(
    ///     AttendanceState::from_label("Break Out"),
    ///     AttendanceState::Other("Break Out".to_string())
    /// );
    /// ```
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Check In" => Self::CheckIn,
            "Check Out" => Self::CheckOut,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A single normalized check-in/check-out event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// The employee the event belongs to.
    pub employee_id: EmployeeId,
    /// The employee's display name as exported.
    pub name: String,
    /// When the event was recorded.
    pub timestamp: NaiveDateTime,
    /// The calendar date of `timestamp`.
    pub date: NaiveDate,
    /// The recorded attendance state.
    pub state: AttendanceState,
    /// Zero-based index of the source row in the input table.
    pub source_row: usize,
    /// The source row's cells, kept for the raw data sheet.
    pub fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable {
            headers: vec![" Name ".to_string(), "Emp ID".to_string(), "Time".to_string()],
            rows: vec![vec!["Asha".to_string(), "6".to_string()]],
        }
    }

    #[test]
    fn test_column_index_trims_headers() {
        assert_eq!(table().column_index("Name"), Some(0));
    }

    #[test]
    fn test_column_index_missing() {
        assert_eq!(table().column_index("Attendance State"), None);
    }

    #[test]
    fn test_cell_short_row_is_empty() {
        assert_eq!(table().cell(0, 2), "");
    }

    #[test]
    fn test_cell_missing_row_is_empty() {
        assert_eq!(table().cell(5, 0), "");
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(AttendanceState::from_label("Check In"), AttendanceState::CheckIn);
        assert_eq!(AttendanceState::from_label("Check Out"), AttendanceState::CheckOut);
    }

    #[test]
    fn test_state_label_is_case_sensitive() {
        assert_eq!(
            AttendanceState::from_label("check in"),
            AttendanceState::Other("check in".to_string())
        );
    }

    #[test]
    fn test_state_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceState::CheckOut).unwrap(),
            "\"check_out\""
        );
    }
}
