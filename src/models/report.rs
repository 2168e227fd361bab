//! Payroll report models.
//!
//! This module contains the [`PayrollReport`] type that carries every output of
//! a processing run, together with the audit trace recording each rule
//! decision taken along the way.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttendanceEvent, DailyRecord, MonthlySummary};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during processing.
///
/// Warnings flag data-quality issues that don't stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a run.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during processing.
    pub warnings: Vec<AuditWarning>,
    /// The total processing duration in microseconds.
    pub duration_us: u64,
}

/// Everything a processing run produces.
///
/// A report only exists for a successful run; fatal errors abort before one
/// is built, so a report is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the processor that produced the report.
    pub engine_version: String,
    /// Earliest attendance date in the input, if any event survived.
    pub period_start: Option<NaiveDate>,
    /// Latest attendance date in the input, if any event survived.
    pub period_end: Option<NaiveDate>,
    /// Headers of the input table, in file order.
    pub raw_headers: Vec<String>,
    /// Normalized events sorted by employee, date and time.
    pub events: Vec<AttendanceEvent>,
    /// Number of input rows excluded for an unparseable timestamp.
    pub excluded_rows: usize,
    /// One record per employee per day.
    pub daily_records: Vec<DailyRecord>,
    /// One summary per employee.
    pub summaries: Vec<MonthlySummary>,
    /// Complete audit trace of rule decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_sample_step() -> AuditStep {
        AuditStep {
            step_number: 1,
            rule_id: "overnight_correction".to_string(),
            rule_name: "Overnight Correction".to_string(),
            input: serde_json::json!({"check_in": "2025-03-03T23:50:00"}),
            output: serde_json::json!({"half_days_added": 2}),
            reasoning: "check-out preceded check-in".to_string(),
        }
    }

    #[test]
    fn test_audit_step_round_trip() {
        let step = create_sample_step();
        let json = serde_json::to_string(&step).unwrap();
        let deserialized: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(step, deserialized);
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
        assert_eq!(trace.duration_us, 0);
    }

    #[test]
    fn test_report_serialization_contains_period() {
        let report = PayrollReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: "0.1.0".to_string(),
            period_start: NaiveDate::from_ymd_opt(2025, 3, 1),
            period_end: NaiveDate::from_ymd_opt(2025, 3, 31),
            raw_headers: vec![],
            events: vec![],
            excluded_rows: 2,
            daily_records: vec![],
            summaries: vec![],
            audit_trace: AuditTrace {
                steps: vec![create_sample_step()],
                warnings: vec![],
                duration_us: 10,
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"period_start\":\"2025-03-01\""));
        assert!(json.contains("\"excluded_rows\":2"));
        assert!(json.contains("\"rule_id\":\"overnight_correction\""));
    }
}
