//! Configuration types for payroll processing.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from the YAML configuration file. Every field has a default,
//! so an empty file (or no file at all) reproduces the standard policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::EmployeeId;

/// Minutes an employee is expected to be paid for per month (240 hours).
pub const STANDARD_MONTHLY_MINUTES: i64 = 14_400;

/// Paid off-hours per month not captured by the biometric device (26 hours).
pub const OFF_MINUTES: i64 = 1_560;

/// The daily baseline against which overtime and adjustments are measured (10 hours).
pub const DAILY_BASELINE_MINUTES: i64 = 600;

/// Daily overtime below this many minutes is reported as zero.
pub const OVERTIME_SUPPRESSION_THRESHOLD_MINUTES: i64 = 15;

/// Employees paid at [`HIGH_RATE`] by default.
pub const HIGH_RATE_EMPLOYEE_IDS: [i64; 2] = [6, 40];

/// Hourly rate for the employees in [`HIGH_RATE_EMPLOYEE_IDS`].
pub const HIGH_RATE: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Hourly rate for everyone else.
pub const DEFAULT_RATE: Decimal = Decimal::from_parts(250, 0, 0, false, 0);

/// Timestamp layouts tried in order when parsing the `Time` column.
///
/// Layouts without a time component parse as midnight.
pub const DEFAULT_TIMESTAMP_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d",
];

/// Which field identifies an employee when rolling days up into a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKey {
    /// Group by employee identifier; the name is a display attribute.
    #[default]
    EmployeeId,
    /// Group by display name, merging identifiers that share a name.
    Name,
}

/// An hourly rate override for a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRate {
    /// The employee the rate applies to.
    pub employee_id: EmployeeId,
    /// The hourly rate.
    pub hourly: Decimal,
}

/// Mapping from employee to hourly rate.
///
/// # Example
///
/// ```
/// use attendance_payroll::config::RateTable;
/// use attendance_payroll::models::EmployeeId;
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default();
/// assert_eq!(table.rate_for(&EmployeeId::Numeric(6)), Decimal::new(500, 0));
/// assert_eq!(table.rate_for(&EmployeeId::Numeric(7)), Decimal::new(250, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Rate used for employees without an override.
    pub default_rate: Decimal,
    /// Per-employee overrides.
    pub employees: Vec<EmployeeRate>,
}

impl RateTable {
    /// Returns the override for `employee_id`, if one is configured.
    pub fn override_for(&self, employee_id: &EmployeeId) -> Option<Decimal> {
        self.employees
            .iter()
            .find(|e| &e.employee_id == employee_id)
            .map(|e| e.hourly)
    }

    /// Returns the hourly rate for `employee_id`.
    pub fn rate_for(&self, employee_id: &EmployeeId) -> Decimal {
        self.override_for(employee_id).unwrap_or(self.default_rate)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_RATE,
            employees: HIGH_RATE_EMPLOYEE_IDS
                .iter()
                .map(|&id| EmployeeRate {
                    employee_id: EmployeeId::Numeric(id),
                    hourly: HIGH_RATE,
                })
                .collect(),
        }
    }
}

/// The complete payroll policy used for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Minutes expected per month.
    pub standard_monthly_minutes: i64,
    /// Paid off-hours added to every employee's biometric total.
    pub off_minutes: i64,
    /// The daily baseline for overtime and adjustments.
    pub daily_baseline_minutes: i64,
    /// Daily overtime under this threshold is reported as zero.
    pub overtime_suppression_threshold_minutes: i64,
    /// Hourly rates.
    pub rates: RateTable,
    /// Accepted layouts for the `Time` column, tried in order.
    pub timestamp_formats: Vec<String>,
    /// Grouping key for the monthly roll-up.
    pub aggregation_key: AggregationKey,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            standard_monthly_minutes: STANDARD_MONTHLY_MINUTES,
            off_minutes: OFF_MINUTES,
            daily_baseline_minutes: DAILY_BASELINE_MINUTES,
            overtime_suppression_threshold_minutes: OVERTIME_SUPPRESSION_THRESHOLD_MINUTES,
            rates: RateTable::default(),
            timestamp_formats: DEFAULT_TIMESTAMP_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            aggregation_key: AggregationKey::default(),
        }
    }
}
