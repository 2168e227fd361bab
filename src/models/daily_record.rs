//! Daily attendance record model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// One reconciled work day for one employee.
///
/// Created once per (employee, calendar date) group by the daily reconciler
/// and never modified afterwards.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::{DailyRecord, EmployeeId};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let record = DailyRecord {
///     employee_id: EmployeeId::Numeric(6),
///     name: "Asha".to_string(),
///     date,
///     check_in: date.and_hms_opt(9, 0, 0),
///     check_out: date.and_hms_opt(17, 0, 0),
///     work_minutes: 480,
///     overtime_minutes: 0,
///     adjustment_minutes: -120,
///     overnight_corrected: false,
/// };
/// assert!(record.is_paired());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The employee the day belongs to.
    pub employee_id: EmployeeId,
    /// Display name taken from the day's first event.
    pub name: String,
    /// The calendar date of the grouped events.
    pub date: NaiveDate,
    /// First check-in of the day, if any.
    pub check_in: Option<NaiveDateTime>,
    /// First check-out of the day after overnight correction, if any.
    pub check_out: Option<NaiveDateTime>,
    /// Whole minutes between check-in and check-out.
    pub work_minutes: i64,
    /// Minutes beyond the daily baseline, zero when under the suppression threshold.
    pub overtime_minutes: i64,
    /// Signed minutes relative to the daily baseline.
    pub adjustment_minutes: i64,
    /// Whether the check-out was shifted forward by the overnight correction.
    pub overnight_corrected: bool,
}

impl DailyRecord {
    /// Returns true when both a check-in and a check-out were recorded.
    pub fn is_paired(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }
}
