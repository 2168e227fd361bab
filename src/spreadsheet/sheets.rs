//! Report sheet rendering.
//!
//! Turns a [`PayrollReport`] into the three output tables: raw data, daily
//! summary and monthly summary. Minute quantities are rendered as `H:MM`
//! and money with two decimals.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculation::{TIME_COLUMN, format_minutes};
use crate::models::PayrollReport;

/// Layout used for every timestamp written to a sheet.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout used for every date written to a sheet.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A rendered output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    /// The sheet title, e.g. "Daily Summary".
    pub name: &'static str,
    /// File stem used when the sheet is written on its own.
    pub file_stem: &'static str,
    /// Column headers.
    pub headers: Vec<String>,
    /// Rendered rows.
    pub rows: Vec<Vec<String>>,
}

/// Renders all three sheets in workbook order.
pub fn workbook(report: &PayrollReport) -> Vec<Sheet> {
    vec![
        raw_data_sheet(report),
        daily_summary_sheet(report),
        summary_sheet(report),
    ]
}

/// The normalized input rows, sorted, with a derived `Date` column.
///
/// Every input column is kept; `Time` is rewritten in [`TIMESTAMP_FORMAT`].
pub fn raw_data_sheet(report: &PayrollReport) -> Sheet {
    let mut headers = report.raw_headers.clone();
    headers.push("Date".to_string());

    let time_idx = report.raw_headers.iter().position(|h| h.trim() == TIME_COLUMN);
    let width = report.raw_headers.len();

    let rows = report
        .events
        .iter()
        .map(|event| {
            let mut row = event.fields.clone();
            row.resize(width, String::new());
            if let Some(idx) = time_idx {
                row[idx] = event.timestamp.format(TIMESTAMP_FORMAT).to_string();
            }
            row.push(event.date.format(DATE_FORMAT).to_string());
            row
        })
        .collect();

    Sheet {
        name: "Raw Data",
        file_stem: "raw_data",
        headers,
        rows,
    }
}

/// One row per daily record.
pub fn daily_summary_sheet(report: &PayrollReport) -> Sheet {
    let headers = [
        "Name",
        "Emp ID",
        "Date",
        "CheckIn",
        "CheckOut",
        "WorkHrs",
        "Overtime",
        "More/LessWorkHrs",
    ];

    let rows = report
        .daily_records
        .iter()
        .map(|record| {
            vec![
                record.name.clone(),
                record.employee_id.to_string(),
                record.date.format(DATE_FORMAT).to_string(),
                optional_timestamp(record.check_in),
                optional_timestamp(record.check_out),
                format_minutes(record.work_minutes),
                format_minutes(record.overtime_minutes),
                format_minutes(record.adjustment_minutes),
            ]
        })
        .collect();

    Sheet {
        name: "Daily Summary",
        file_stem: "daily_summary",
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

/// One row per monthly summary.
pub fn summary_sheet(report: &PayrollReport) -> Sheet {
    let headers = [
        "Emp ID",
        "Name",
        "Standard Monthly WorkHrs",
        "Biometric WorkHrs",
        "Off WorkHrs",
        "Total WorkHrs (with Off Hrs)",
        "Less/More WorkHrs",
        "Total Paid WorkHrs",
        "Overtime",
        "Paid Overtime Hrs",
        "Rate",
        "Overtime Amount",
        "Deducted Hrs",
        "Deducted Amount",
    ];

    let rows = report
        .summaries
        .iter()
        .map(|s| {
            vec![
                s.employee_id.to_string(),
                s.name.clone(),
                format_minutes(s.standard_monthly_minutes),
                format_minutes(s.biometric_minutes),
                format_minutes(s.off_minutes),
                format_minutes(s.total_with_off_minutes),
                format_minutes(s.adjustment_minutes),
                format_minutes(s.total_paid_minutes),
                format_minutes(s.overtime_minutes),
                format_minutes(s.excess_minutes),
                money(s.rate),
                money(s.overtime_amount),
                format_minutes(s.deducted_minutes),
                money(s.deducted_amount),
            ]
        })
        .collect();

    Sheet {
        name: "Summary",
        file_stem: "summary",
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

fn optional_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollConfig;
    use crate::models::RawTable;
    use crate::pipeline::process_attendance;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn report() -> PayrollReport {
        let table = RawTable {
            headers: strings(&["Device", "Name", "Emp ID", "Time", "Attendance State"]),
            rows: vec![
                strings(&["D2", "Ravi", "12", "03/04/2025 09:00 AM", "Check In"]),
                strings(&["D1", "Asha", "6", "2025-03-03 08:00", "Check In"]),
                strings(&["D1", "Asha", "6", "2025-03-03 18:16", "Check Out"]),
            ],
        };
        process_attendance(&table, &PayrollConfig::default()).unwrap()
    }

    #[test]
    fn test_workbook_order() {
        let names: Vec<&str> = workbook(&report()).iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Raw Data", "Daily Summary", "Summary"]);
    }

    #[test]
    fn test_raw_data_keeps_columns_and_adds_date() {
        let sheet = raw_data_sheet(&report());

        assert_eq!(
            sheet.headers,
            strings(&["Device", "Name", "Emp ID", "Time", "Attendance State", "Date"])
        );
        assert_eq!(
            sheet.rows[0],
            strings(&["D1", "Asha", "6", "2025-03-03 08:00:00", "Check In", "2025-03-03"])
        );
        assert_eq!(sheet.rows[2][3], "2025-03-04 09:00:00");
    }

    #[test]
    fn test_daily_summary_row() {
        let sheet = daily_summary_sheet(&report());

        assert_eq!(
            sheet.rows[0],
            strings(&[
                "Asha",
                "6",
                "2025-03-03",
                "2025-03-03 08:00:00",
                "2025-03-03 18:16:00",
                "10:16",
                "0:16",
                "0:16",
            ])
        );
        // Unpaired day
        assert_eq!(sheet.rows[1][4], "");
        assert_eq!(sheet.rows[1][5], "0:00");
    }

    #[test]
    fn test_summary_row_formats() {
        let sheet = summary_sheet(&report());
        let asha = &sheet.rows[0];

        assert_eq!(asha[0], "6");
        assert_eq!(asha[2], "240:00");
        assert_eq!(asha[3], "10:16");
        assert_eq!(asha[4], "26:00");
        assert_eq!(asha[5], "36:16");
        assert_eq!(asha[6], "0:16");
        assert_eq!(asha[7], "36:32");
        assert_eq!(asha[8], "0:16");
        assert_eq!(asha[9], "0:00");
        assert_eq!(asha[10], "500.00");
        assert_eq!(asha[11], "0.00");
        // 14400 - 2192 = 12208 minutes
        assert_eq!(asha[12], "203:28");
        // 500 × 12208 / 60 = 101733.33
        assert_eq!(asha[13], "101733.00");
    }

    #[test]
    fn test_unpaired_employee_summary() {
        let sheet = summary_sheet(&report());
        let ravi = &sheet.rows[1];
        assert_eq!(ravi[6], "0:00");
        assert_eq!(ravi[10], "250.00");
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(Decimal::new(417, 0)), "417.00");
        assert_eq!(money(Decimal::new(42050, 2)), "420.50");
    }
}
