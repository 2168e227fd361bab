//! Calculation logic for the attendance payroll processor.
//!
//! This module contains the three pipeline stages and the rules they apply:
//! event normalization, daily reconciliation (overnight correction and daily
//! overtime detection), and monthly aggregation (rate lookup and the
//! overtime/deduction pay rule), plus the `H:MM` duration format shared by
//! every report.

mod aggregate;
mod base_rate;
mod daily_overtime;
mod duration;
mod normalize;
mod overnight_correction;
mod pay_rule;
mod reconcile;

pub use aggregate::{MonthlyAggregation, aggregate_monthly};
pub use base_rate::{BaseRateLookupResult, get_base_rate};
pub use daily_overtime::{DailyOvertimeDetection, detect_daily_overtime};
pub use duration::{format_minutes, parse_minutes};
pub use normalize::{
    EMPLOYEE_ID_COLUMN, NAME_COLUMN, NormalizationResult, REQUIRED_COLUMNS, STATE_COLUMN,
    TIME_COLUMN, normalize_events, parse_timestamp,
};
pub use overnight_correction::{
    HALF_DAY_HOURS, MAX_HALF_DAYS, OvernightCorrection, correct_overnight,
};
pub use pay_rule::{PayRuleOutcome, amount_for_minutes, apply_pay_rule};
pub use reconcile::{DailyReconciliation, reconcile_daily};
