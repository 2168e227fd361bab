//! Monthly pay rule.
//!
//! Compares an employee's paid minutes against the standard month. Above
//! the standard the excess is paid as overtime; at or below it the shortfall
//! is deducted. Both amounts are `rate × minutes / 60`, rounded to a whole
//! unit with halves going to the even neighbour.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// The outcome of the monthly pay rule. Exactly one side is non-zero
/// (or both are zero when paid minutes equal the standard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRuleOutcome {
    /// Paid minutes above the standard.
    pub excess_minutes: i64,
    /// Amount owed for `excess_minutes`.
    pub overtime_amount: Decimal,
    /// Minutes short of the standard.
    pub deducted_minutes: i64,
    /// Amount deducted for `deducted_minutes`.
    pub deducted_amount: Decimal,
    /// The audit step recording the decision.
    pub audit_step: AuditStep,
}

/// Prices `minutes` at an hourly `rate`, rounded to a whole unit.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::amount_for_minutes;
/// use rust_decimal::Decimal;
///
/// // 250 × 100 / 60 = 416.67
/// assert_eq!(amount_for_minutes(Decimal::new(250, 0), 100), Decimal::new(417, 0));
/// // 250 × 3 / 60 = 12.5, halves go to even
/// assert_eq!(amount_for_minutes(Decimal::new(250, 0), 3), Decimal::new(12, 0));
/// ```
pub fn amount_for_minutes(rate: Decimal, minutes: i64) -> Decimal {
    (rate * Decimal::from(minutes) / Decimal::from(60))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Applies the overtime/deduction rule.
///
/// # Arguments
///
/// * `total_paid_minutes` - Biometric minutes plus off minutes plus adjustments
/// * `standard_monthly_minutes` - The standard month (14400 by default)
/// * `rate` - The employee's hourly rate
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ## Overtime path
///
/// ```
/// use attendance_payroll::calculation::apply_pay_rule;
/// use rust_decimal::Decimal;
///
/// let outcome = apply_pay_rule(14_500, 14_400, Decimal::new(250, 0), 1);
/// assert_eq!(outcome.excess_minutes, 100);
/// assert_eq!(outcome.overtime_amount, Decimal::new(417, 0));
/// assert_eq!(outcome.deducted_amount, Decimal::ZERO);
/// ```
///
/// ## Deduction path
///
/// ```
/// use attendance_payroll::calculation::apply_pay_rule;
/// use rust_decimal::Decimal;
///
/// let outcome = apply_pay_rule(14_000, 14_400, Decimal::new(500, 0), 1);
/// assert_eq!(outcome.deducted_minutes, 400);
/// assert_eq!(outcome.deducted_amount, Decimal::new(3333, 0));
/// assert_eq!(outcome.overtime_amount, Decimal::ZERO);
/// ```
pub fn apply_pay_rule(
    total_paid_minutes: i64,
    standard_monthly_minutes: i64,
    rate: Decimal,
    step_number: u32,
) -> PayRuleOutcome {
    let (excess_minutes, overtime_amount, deducted_minutes, deducted_amount, reasoning) =
        if total_paid_minutes > standard_monthly_minutes {
            let excess = total_paid_minutes - standard_monthly_minutes;
            let amount = amount_for_minutes(rate, excess);
            (
                excess,
                amount,
                0,
                Decimal::ZERO,
                format!(
                    "{} paid minutes exceed the {} minute standard by {}, paying {} at {}/hour",
                    total_paid_minutes,
                    standard_monthly_minutes,
                    excess,
                    amount,
                    rate.normalize()
                ),
            )
        } else {
            let shortfall = standard_monthly_minutes - total_paid_minutes;
            let amount = amount_for_minutes(rate, shortfall);
            (
                0,
                Decimal::ZERO,
                shortfall,
                amount,
                format!(
                    "{} paid minutes fall {} short of the {} minute standard, deducting {} at {}/hour",
                    total_paid_minutes,
                    shortfall,
                    standard_monthly_minutes,
                    amount,
                    rate.normalize()
                ),
            )
        };

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_pay_rule".to_string(),
        rule_name: "Monthly Pay Rule".to_string(),
        input: serde_json::json!({
            "total_paid_minutes": total_paid_minutes,
            "standard_monthly_minutes": standard_monthly_minutes,
            "rate": rate.normalize().to_string(),
        }),
        output: serde_json::json!({
            "excess_minutes": excess_minutes,
            "overtime_amount": overtime_amount.to_string(),
            "deducted_minutes": deducted_minutes,
            "deducted_amount": deducted_amount.to_string(),
        }),
        reasoning,
    };

    PayRuleOutcome {
        excess_minutes,
        overtime_amount,
        deducted_minutes,
        deducted_amount,
        audit_step,
    }
}
