//! Event normalization.
//!
//! This module turns the raw attendance table into typed, sorted
//! [`AttendanceEvent`]s. It checks the required columns, parses each row's
//! timestamp, excludes rows whose timestamp can't be read, and sorts the
//! survivors so that the first check-in and check-out of every
//! employee-day come first within their group.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use crate::config::PayrollConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{AttendanceEvent, AttendanceState, AuditWarning, EmployeeId, RawTable};

/// Header of the employee name column.
pub const NAME_COLUMN: &str = "Name";
/// Header of the employee identifier column.
pub const EMPLOYEE_ID_COLUMN: &str = "Emp ID";
/// Header of the event timestamp column.
pub const TIME_COLUMN: &str = "Time";
/// Header of the attendance state column.
pub const STATE_COLUMN: &str = "Attendance State";

/// Columns every input table must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 4] = [NAME_COLUMN, EMPLOYEE_ID_COLUMN, TIME_COLUMN, STATE_COLUMN];

/// The result of normalizing a raw table.
#[derive(Debug, Clone)]
pub struct NormalizationResult {
    /// Parsed events sorted by (employee, date, timestamp).
    pub events: Vec<AttendanceEvent>,
    /// Zero-based indexes of the rows excluded for an unparseable timestamp.
    pub excluded_rows: Vec<usize>,
    /// A warning describing the exclusions, present only when rows were excluded.
    pub warning: Option<AuditWarning>,
}

/// Parses a timestamp against `formats`, first match wins.
///
/// Formats without a time component yield midnight of that date.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::parse_timestamp;
/// use chrono::NaiveDate;
///
/// let formats = vec!["%Y-%m-%d %H:%M:%S".to_string(), "%Y-%m-%d".to_string()];
///
/// let ts = parse_timestamp("2025-03-03 09:15:00", &formats).unwrap();
/// assert_eq!(ts, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(9, 15, 0).unwrap());
///
/// let midnight = parse_timestamp("2025-03-03", &formats).unwrap();
/// assert_eq!(midnight.time(), chrono::NaiveTime::MIN);
///
/// assert!(parse_timestamp("not a time", &formats).is_none());
/// ```
pub fn parse_timestamp(value: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    formats.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(value, format)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    })
}

/// Validates, parses and sorts the attendance table.
///
/// # Errors
///
/// Returns [`PayrollError::MissingColumn`] naming the first required column
/// that is absent. No rows are processed in that case.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::normalize_events;
/// use attendance_payroll::config::PayrollConfig;
/// use attendance_payroll::models::RawTable;
///
/// let row = |cells: [&str; 4]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
/// let table = RawTable {
///     headers: row(["Name", "Emp ID", "Time", "Attendance State"]),
///     rows: vec![
///         row(["Ravi", "10", "2025-03-03 09:00:00", "Check In"]),
///         row(["Asha", "6", "2025-03-03 09:05:00", "Check In"]),
///         row(["Asha", "6", "garbage", "Check Out"]),
///     ],
/// };
///
/// let result = normalize_events(&table, &PayrollConfig::default()).unwrap();
/// assert_eq!(result.events.len(), 2);
/// assert_eq!(result.events[0].name, "Asha");
/// assert_eq!(result.excluded_rows, vec![2]);
/// ```
pub fn normalize_events(
    table: &RawTable,
    config: &PayrollConfig,
) -> PayrollResult<NormalizationResult> {
    let mut indexes = [0usize; 4];
    for (slot, column) in indexes.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = table
            .column_index(column)
            .ok_or_else(|| PayrollError::MissingColumn {
                column: column.to_string(),
            })?;
    }
    let [name_idx, id_idx, time_idx, state_idx] = indexes;

    let mut events = Vec::with_capacity(table.rows.len());
    let mut excluded_rows = Vec::new();

    for (row_idx, fields) in table.rows.iter().enumerate() {
        let raw_time = table.cell(row_idx, time_idx);
        let Some(timestamp) = parse_timestamp(raw_time, &config.timestamp_formats) else {
            debug!(row = row_idx, time = raw_time, "Excluding row with unparseable timestamp");
            excluded_rows.push(row_idx);
            continue;
        };

        let Ok(employee_id) = table.cell(row_idx, id_idx).parse::<EmployeeId>();

        events.push(AttendanceEvent {
            employee_id,
            name: table.cell(row_idx, name_idx).trim().to_string(),
            timestamp,
            date: timestamp.date(),
            state: AttendanceState::from_label(table.cell(row_idx, state_idx)),
            source_row: row_idx,
            fields: fields.clone(),
        });
    }

    // Stable: equal keys keep their input order
    events.sort_by(|a, b| {
        (&a.employee_id, a.date, a.timestamp).cmp(&(&b.employee_id, b.date, b.timestamp))
    });

    let warning = if excluded_rows.is_empty() {
        None
    } else {
        warn!(
            excluded = excluded_rows.len(),
            total = table.rows.len(),
            "Excluded rows with unparseable timestamps"
        );
        Some(AuditWarning {
            code: "UNPARSEABLE_TIMESTAMP".to_string(),
            message: format!(
                "{} of {} rows excluded because the '{}' value could not be parsed",
                excluded_rows.len(),
                table.rows.len(),
                TIME_COLUMN
            ),
            severity: "low".to_string(),
        })
    };

    Ok(NormalizationResult {
        events,
        excluded_rows,
        warning,
    })
}
