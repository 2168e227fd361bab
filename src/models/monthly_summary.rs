//! Monthly payroll summary model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Per-employee totals for the uploaded period and the resulting pay outcome.
///
/// Exactly one of the two outcomes carries a value: either the employee is
/// owed overtime (`overtime_amount`) or owes a shortfall (`deducted_amount`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The employee identifier.
    pub employee_id: EmployeeId,
    /// The employee's display name.
    pub name: String,
    /// Number of daily records rolled into this summary.
    pub days_recorded: usize,
    /// Minutes an employee is expected to be paid for in the period.
    pub standard_monthly_minutes: i64,
    /// Sum of daily worked minutes.
    pub biometric_minutes: i64,
    /// Paid off-hours not captured by the biometric device.
    pub off_minutes: i64,
    /// `biometric_minutes + off_minutes`.
    pub total_with_off_minutes: i64,
    /// Signed sum of daily adjustment minutes.
    pub adjustment_minutes: i64,
    /// `total_with_off_minutes + adjustment_minutes`.
    pub total_paid_minutes: i64,
    /// Sum of daily overtime minutes.
    pub overtime_minutes: i64,
    /// Paid minutes above the standard, zero on the deduction path.
    pub excess_minutes: i64,
    /// Hourly rate applied to the employee.
    pub rate: Decimal,
    /// Amount owed to the employee for `excess_minutes`.
    pub overtime_amount: Decimal,
    /// Minutes short of the standard, zero on the overtime path.
    pub deducted_minutes: i64,
    /// Amount deducted for `deducted_minutes`.
    pub deducted_amount: Decimal,
}

impl MonthlySummary {
    /// Returns true when this summary took the overtime-pay path.
    pub fn is_overtime(&self) -> bool {
        self.total_paid_minutes > self.standard_monthly_minutes
    }
}
