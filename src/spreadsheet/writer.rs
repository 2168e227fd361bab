//! Report writing.
//!
//! Writes a finished [`PayrollReport`] as a spreadsheet workbook, as one CSV
//! file per sheet, or as a single JSON document. Files are staged under a
//! temporary name and swapped into place together: if any swap fails, the
//! files already replaced are restored and nothing new is left behind.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::error::{PayrollError, PayrollResult};
use crate::models::PayrollReport;

use super::sheets::{Sheet, workbook};

/// File name used for the spreadsheet workbook.
pub const WORKBOOK_FILE: &str = "processed_attendance.xlsx";

/// File name used for the JSON report.
pub const JSON_REPORT_FILE: &str = "report.json";

fn write_error(path: &Path, message: impl ToString) -> PayrollError {
    PayrollError::ReportWrite {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// A fully written temporary file waiting to replace its target.
#[derive(Debug)]
struct StagedFile {
    temp: PathBuf,
    target: PathBuf,
    backup: Option<PathBuf>,
}

impl StagedFile {
    fn new(target: PathBuf) -> Self {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            temp: target.with_file_name(format!(".{}.tmp", name)),
            target,
            backup: None,
        }
    }

    /// Moves an existing target aside, then renames the temp file over it.
    fn swap_in(&mut self) -> PayrollResult<()> {
        if self.target.is_file() {
            let backup = self.temp.with_extension("bak");
            fs::rename(&self.target, &backup).map_err(|e| write_error(&self.target, e))?;
            self.backup = Some(backup);
        }
        fs::rename(&self.temp, &self.target).map_err(|e| write_error(&self.target, e))
    }
}

/// Swaps every staged file into place, or none of them.
fn commit(mut staged: Vec<StagedFile>) -> PayrollResult<Vec<PathBuf>> {
    for i in 0..staged.len() {
        if let Err(err) = staged[i].swap_in() {
            roll_back(&staged[..i], &staged[i..]);
            return Err(err);
        }
    }

    for file in &staged {
        if let Some(backup) = &file.backup {
            let _ = fs::remove_file(backup);
        }
    }
    Ok(staged.into_iter().map(|file| file.target).collect())
}

fn roll_back(swapped: &[StagedFile], pending: &[StagedFile]) {
    for file in swapped {
        let _ = fs::remove_file(&file.target);
    }
    for file in pending {
        let _ = fs::remove_file(&file.temp);
    }
    for file in swapped.iter().chain(pending) {
        if let Some(backup) = &file.backup {
            let _ = fs::rename(backup, &file.target);
        }
    }
}

fn discard(staged: &[StagedFile]) {
    for file in staged {
        let _ = fs::remove_file(&file.temp);
    }
}

/// Writes a single sheet as CSV to `path`.
pub fn write_sheet_csv(sheet: &Sheet, path: &Path) -> PayrollResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(path, e))?;

    writer
        .write_record(&sheet.headers)
        .map_err(|e| write_error(path, e))?;
    for row in &sheet.rows {
        writer.write_record(row).map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| write_error(path, e))
}

/// Writes every sheet of the report into `dir` as `<file_stem>.csv`.
///
/// Returns the paths written, in workbook order.
///
/// # Errors
///
/// Returns [`PayrollError::ReportWrite`] if the directory can't be created or
/// any sheet fails to write. Previously existing reports are left untouched
/// in that case.
pub fn write_csv_workbook(report: &PayrollReport, dir: &Path) -> PayrollResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| write_error(dir, e))?;

    let sheets = workbook(report);
    let mut staged = Vec::with_capacity(sheets.len());

    for sheet in &sheets {
        let file = StagedFile::new(dir.join(format!("{}.csv", sheet.file_stem)));
        let result = write_sheet_csv(sheet, &file.temp);
        staged.push(file);

        if let Err(err) = result {
            discard(&staged);
            return Err(err);
        }
    }

    let written = commit(staged)?;

    info!(
        run_id = %report.run_id,
        dir = %dir.display(),
        sheets = written.len(),
        "Wrote CSV workbook"
    );
    Ok(written)
}

/// Writes the report as one spreadsheet workbook with a worksheet per sheet.
///
/// Cells are written as text exactly as rendered for the CSV output; empty
/// cells are left blank. Header rows are bold.
///
/// # Errors
///
/// Returns [`PayrollError::ReportWrite`] if the workbook can't be built or
/// saved. An existing file at `path` is left untouched in that case.
pub fn write_xlsx_workbook(report: &PayrollReport, path: &Path) -> PayrollResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    let sheets = workbook(report);
    let mut book = Workbook::new();
    let header_format = Format::new().set_bold();
    let to_error = |e: XlsxError| write_error(path, e);

    for sheet in &sheets {
        let worksheet = book.add_worksheet();
        worksheet.set_name(sheet.name).map_err(to_error)?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, column_number(col, path)?, header, &header_format)
                .map_err(to_error)?;
        }

        for (idx, row) in sheet.rows.iter().enumerate() {
            let row_number = u32::try_from(idx + 1)
                .map_err(|_| write_error(path, format!("sheet '{}' has too many rows", sheet.name)))?;
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(row_number, column_number(col, path)?, value)
                    .map_err(to_error)?;
            }
        }
    }

    let staged = StagedFile::new(path.to_path_buf());
    if let Err(err) = book.save(&staged.temp) {
        discard(std::slice::from_ref(&staged));
        return Err(to_error(err));
    }
    commit(vec![staged])?;

    info!(
        run_id = %report.run_id,
        path = %path.display(),
        sheets = sheets.len(),
        "Wrote spreadsheet workbook"
    );
    Ok(())
}

fn column_number(col: usize, path: &Path) -> PayrollResult<u16> {
    u16::try_from(col).map_err(|_| write_error(path, "too many columns"))
}

/// Writes the complete report, including the audit trace, as pretty JSON.
pub fn write_json_report(report: &PayrollReport, path: &Path) -> PayrollResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    let file = File::create(path).map_err(|e| write_error(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report).map_err(|e| write_error(path, e))?;

    info!(run_id = %report.run_id, path = %path.display(), "Wrote JSON report");
    Ok(())
}
