//! End-to-end processing of one attendance table.
//!
//! [`process_attendance`] runs the three stages in order and assembles a
//! [`PayrollReport`]. It is all-or-nothing: a fatal error in any stage is
//! returned before a report exists, so callers never see partial output.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate_monthly, normalize_events, reconcile_daily};
use crate::config::PayrollConfig;
use crate::error::PayrollResult;
use crate::models::{AuditTrace, PayrollReport, RawTable};

/// Processes an attendance table into a payroll report.
///
/// # Errors
///
/// Returns [`PayrollError::MissingColumn`] when a required column is absent.
///
/// [`PayrollError::MissingColumn`]: crate::error::PayrollError::MissingColumn
///
/// # Examples
///
/// ```
/// use attendance_payroll::config::PayrollConfig;
/// use attendance_payroll::models::RawTable;
/// use attendance_payroll::pipeline::process_attendance;
///
/// let row = |cells: [&str; 4]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
/// let table = RawTable {
///     headers: row(["Name", "Emp ID", "Time", "Attendance State"]),
///     rows: vec![
///         row(["Asha", "6", "2025-03-03 08:00:00", "Check In"]),
///         row(["Asha", "6", "2025-03-03 18:00:00", "Check Out"]),
///     ],
/// };
///
/// let report = process_attendance(&table, &PayrollConfig::default()).unwrap();
/// assert_eq!(report.daily_records.len(), 1);
/// assert_eq!(report.summaries[0].biometric_minutes, 600);
/// ```
pub fn process_attendance(table: &RawTable, config: &PayrollConfig) -> PayrollResult<PayrollReport> {
    let run_id = Uuid::new_v4();
    let start_time = Instant::now();
    info!(run_id = %run_id, rows = table.rows.len(), "Processing attendance table");

    let normalized = match normalize_events(table, config) {
        Ok(normalized) => normalized,
        Err(err) => {
            warn!(run_id = %run_id, error = %err, "Attendance table rejected");
            return Err(err);
        }
    };

    let reconciliation = reconcile_daily(&normalized.events, config, 1);
    let next_step = step_after(1, reconciliation.audit_steps.len());
    let aggregation = aggregate_monthly(&reconciliation.records, config, next_step);

    let period_start = normalized.events.iter().map(|e| e.date).min();
    let period_end = normalized.events.iter().map(|e| e.date).max();

    let mut steps = reconciliation.audit_steps;
    steps.extend(aggregation.audit_steps);

    let duration = start_time.elapsed();
    let report = PayrollReport {
        run_id,
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period_start,
        period_end,
        raw_headers: table.headers.clone(),
        excluded_rows: normalized.excluded_rows.len(),
        events: normalized.events,
        daily_records: reconciliation.records,
        summaries: aggregation.summaries,
        audit_trace: AuditTrace {
            steps,
            warnings: normalized.warning.into_iter().collect(),
            duration_us: micros(duration),
        },
    };

    info!(
        run_id = %run_id,
        events = report.events.len(),
        excluded = report.excluded_rows,
        days = report.daily_records.len(),
        employees = report.summaries.len(),
        duration_us = report.audit_trace.duration_us,
        "Processing completed successfully"
    );

    Ok(report)
}

/// The step number following `taken` steps numbered from `first`.
fn step_after(first: u32, taken: usize) -> u32 {
    first.saturating_add(u32::try_from(taken).unwrap_or(u32::MAX))
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
