//! Hourly rate lookup functionality.
//!
//! This module determines an employee's hourly rate from the configured
//! rate table, falling back to the table's default rate.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::{AuditStep, EmployeeId};

/// The result of a rate lookup, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct BaseRateLookupResult {
    /// The determined hourly rate.
    pub rate: Decimal,
    /// Whether the rate came from a per-employee override.
    pub is_override: bool,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Determines an employee's hourly rate.
///
/// Priority:
/// 1. A per-employee override in `rates.employees`
/// 2. Otherwise `rates.default_rate`
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::get_base_rate;
/// use attendance_payroll::config::RateTable;
/// use attendance_payroll::models::EmployeeId;
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default();
///
/// let high = get_base_rate(&EmployeeId::Numeric(40), &table, 1);
/// assert_eq!(high.rate, Decimal::new(500, 0));
/// assert!(high.is_override);
///
/// let standard = get_base_rate(&EmployeeId::Numeric(12), &table, 1);
/// assert_eq!(standard.rate, Decimal::new(250, 0));
/// assert!(!standard.is_override);
/// ```
pub fn get_base_rate(
    employee_id: &EmployeeId,
    rates: &RateTable,
    step_number: u32,
) -> BaseRateLookupResult {
    let (rate, is_override, reasoning) = match rates.override_for(employee_id) {
        Some(rate) => (
            rate,
            true,
            format!(
                "Employee {} has a configured rate of {}/hour",
                employee_id,
                rate.normalize()
            ),
        ),
        None => (
            rates.default_rate,
            false,
            format!(
                "Employee {} has no configured rate, using default of {}/hour",
                employee_id,
                rates.default_rate.normalize()
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_rate_lookup".to_string(),
        rule_name: "Base Rate Lookup".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id,
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "source": if is_override { "employee_override" } else { "default_rate" },
        }),
        reasoning,
    };

    BaseRateLookupResult {
        rate,
        is_override,
        audit_step,
    }
}
