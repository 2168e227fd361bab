//! Daily reconciliation.
//!
//! This module pairs the normalized events of each employee-day into a
//! [`DailyRecord`]. The first check-in and the first check-out of the group
//! are authoritative; everything else in the group is ignored.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::PayrollConfig;
use crate::models::{AttendanceEvent, AttendanceState, AuditStep, DailyRecord};

use super::daily_overtime::{DailyOvertimeDetection, detect_daily_overtime};
use super::overnight_correction::correct_overnight;

/// The result of reconciling a full set of events.
#[derive(Debug, Clone)]
pub struct DailyReconciliation {
    /// One record per (employee, date) group, in group order.
    pub records: Vec<DailyRecord>,
    /// Audit steps for every overnight correction applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Reconciles events sorted by (employee, date, timestamp) into daily records.
///
/// Events are grouped by consecutive runs of the same employee and date, so
/// the input must be sorted the way [`normalize_events`] leaves it.
///
/// [`normalize_events`]: super::normalize_events
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::reconcile_daily;
/// use attendance_payroll::config::PayrollConfig;
/// use attendance_payroll::models::{AttendanceEvent, AttendanceState, EmployeeId};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let event = |h: u32, m: u32, state: AttendanceState| AttendanceEvent {
///     employee_id: EmployeeId::Numeric(6),
///     name: "Asha".to_string(),
///     timestamp: day.and_hms_opt(h, m, 0).unwrap(),
///     date: day,
///     state,
///     source_row: 0,
///     fields: vec![],
/// };
///
/// let events = vec![
///     event(8, 0, AttendanceState::CheckIn),
///     event(18, 16, AttendanceState::CheckOut),
/// ];
///
/// let result = reconcile_daily(&events, &PayrollConfig::default(), 1);
/// let record = &result.records[0];
/// assert_eq!(record.work_minutes, 616);
/// assert_eq!(record.overtime_minutes, 16);
/// assert_eq!(record.adjustment_minutes, 16);
/// ```
pub fn reconcile_daily(
    events: &[AttendanceEvent],
    config: &PayrollConfig,
    start_step_number: u32,
) -> DailyReconciliation {
    let mut records = Vec::new();
    let mut audit_steps = Vec::new();
    let mut current_step = start_step_number;

    for group in events.chunk_by(|a, b| a.employee_id == b.employee_id && a.date == b.date) {
        let first = &group[0];

        let check_in = first_with_state(group, &AttendanceState::CheckIn);
        let mut check_out = first_with_state(group, &AttendanceState::CheckOut);
        let mut overnight_corrected = false;

        let detection = match (check_in, check_out) {
            (Some(check_in), Some(raw_out)) => {
                let correction = correct_overnight(check_in, raw_out, current_step);
                if let Some(step) = correction.audit_step {
                    debug!(
                        employee_id = %first.employee_id,
                        date = %first.date,
                        half_days = correction.half_days_added,
                        "Applied overnight correction"
                    );
                    audit_steps.push(step);
                    current_step = current_step.saturating_add(1);
                    overnight_corrected = true;
                }
                check_out = Some(correction.check_out);

                let work_minutes = (correction.check_out - check_in).num_minutes();
                detect_daily_overtime(
                    work_minutes,
                    config.daily_baseline_minutes,
                    config.overtime_suppression_threshold_minutes,
                )
            }
            _ => DailyOvertimeDetection::UNPAIRED,
        };

        if detection.suppressed_minutes > 0 {
            debug!(
                employee_id = %first.employee_id,
                date = %first.date,
                suppressed = detection.suppressed_minutes,
                "Suppressed overtime under threshold"
            );
        }

        records.push(DailyRecord {
            employee_id: first.employee_id.clone(),
            name: first.name.clone(),
            date: first.date,
            check_in,
            check_out,
            work_minutes: detection.work_minutes,
            overtime_minutes: detection.overtime_minutes,
            adjustment_minutes: detection.adjustment_minutes,
            overnight_corrected,
        });
    }

    DailyReconciliation {
        records,
        audit_steps,
    }
}

fn first_with_state(group: &[AttendanceEvent], state: &AttendanceState) -> Option<NaiveDateTime> {
    group
        .iter()
        .find(|event| &event.state == state)
        .map(|event| event.timestamp)
}
