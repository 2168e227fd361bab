//! Tabular input and output for the attendance payroll processor.
//!
//! This module reads the attendance export (a workbook or delimited text)
//! into a [`RawTable`] and renders a finished [`PayrollReport`] as the
//! "Raw Data", "Daily Summary" and "Summary" sheets, written as one
//! spreadsheet workbook, as CSV files or as a JSON document.
//!
//! [`RawTable`]: crate::models::RawTable
//! [`PayrollReport`]: crate::models::PayrollReport

mod reader;
mod sheets;
mod writer;

pub use reader::{
    DEFAULT_DELIMITER, WORKBOOK_EXTENSIONS, is_workbook_path, read_table, read_table_from,
    read_workbook,
};
pub use sheets::{
    DATE_FORMAT, Sheet, TIMESTAMP_FORMAT, daily_summary_sheet, raw_data_sheet, summary_sheet,
    workbook,
};
pub use writer::{
    JSON_REPORT_FILE, WORKBOOK_FILE, write_csv_workbook, write_json_report, write_sheet_csv,
    write_xlsx_workbook,
};
