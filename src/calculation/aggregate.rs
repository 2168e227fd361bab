//! Monthly payroll aggregation.
//!
//! This module rolls daily records up into one [`MonthlySummary`] per
//! employee and applies the monthly pay rule to each. The uploaded data is
//! taken to cover exactly one payroll month; no period boundary is checked.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{AggregationKey, PayrollConfig};
use crate::models::{AuditStep, DailyRecord, EmployeeId, MonthlySummary};

use super::base_rate::get_base_rate;
use super::pay_rule::apply_pay_rule;

/// The result of aggregating daily records.
#[derive(Debug, Clone)]
pub struct MonthlyAggregation {
    /// One summary per employee, in first-encountered order.
    pub summaries: Vec<MonthlySummary>,
    /// Rate lookup and pay rule steps, two per employee.
    pub audit_steps: Vec<AuditStep>,
}

/// Aggregates daily records into monthly summaries.
///
/// Records are grouped by `config.aggregation_key`. With
/// [`AggregationKey::EmployeeId`] the name comes from the group's first
/// record; with [`AggregationKey::Name`] the identifier does, and every
/// identifier sharing that name is merged into the one summary.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::aggregate_monthly;
/// use attendance_payroll::config::PayrollConfig;
/// use attendance_payroll::models::{DailyRecord, EmployeeId};
/// use chrono::NaiveDate;
///
/// let record = |day: u32, work: i64, overtime: i64| DailyRecord {
///     employee_id: EmployeeId::Numeric(12),
///     name: "Ravi".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
///     check_in: None,
///     check_out: None,
///     work_minutes: work,
///     overtime_minutes: overtime,
///     adjustment_minutes: work - 600,
///     overnight_corrected: false,
/// };
///
/// let result = aggregate_monthly(&[record(3, 480, 0), record(4, 650, 50)], &PayrollConfig::default(), 1);
/// let summary = &result.summaries[0];
///
/// assert_eq!(summary.biometric_minutes, 1130);
/// assert_eq!(summary.adjustment_minutes, -70);
/// assert_eq!(summary.total_paid_minutes, 2620);
/// assert_eq!(summary.deducted_minutes, 14_400 - 2620);
/// ```
pub fn aggregate_monthly(
    records: &[DailyRecord],
    config: &PayrollConfig,
    start_step_number: u32,
) -> MonthlyAggregation {
    let mut groups: Vec<Vec<&DailyRecord>> = Vec::new();
    let mut group_index: HashMap<GroupKey<'_>, usize> = HashMap::new();

    for record in records {
        let key = GroupKey::of(record, config.aggregation_key);
        match group_index.get(&key) {
            Some(&idx) => groups[idx].push(record),
            None => {
                group_index.insert(key, groups.len());
                groups.push(vec![record]);
            }
        }
    }

    let mut summaries = Vec::with_capacity(groups.len());
    let mut audit_steps = Vec::with_capacity(groups.len() * 2);
    let mut current_step = start_step_number;

    for group in groups {
        let first = group[0];

        let biometric_minutes: i64 = group.iter().map(|r| r.work_minutes).sum();
        let overtime_minutes: i64 = group.iter().map(|r| r.overtime_minutes).sum();
        let adjustment_minutes: i64 = group.iter().map(|r| r.adjustment_minutes).sum();

        let total_with_off_minutes = biometric_minutes + config.off_minutes;
        let total_paid_minutes = total_with_off_minutes + adjustment_minutes;

        let rate_lookup = get_base_rate(&first.employee_id, &config.rates, current_step);
        audit_steps.push(rate_lookup.audit_step);
        current_step = current_step.saturating_add(1);

        let outcome = apply_pay_rule(
            total_paid_minutes,
            config.standard_monthly_minutes,
            rate_lookup.rate,
            current_step,
        );
        audit_steps.push(outcome.audit_step);
        current_step = current_step.saturating_add(1);

        debug!(
            employee_id = %first.employee_id,
            days = group.len(),
            total_paid_minutes,
            "Aggregated monthly summary"
        );

        summaries.push(MonthlySummary {
            employee_id: first.employee_id.clone(),
            name: first.name.clone(),
            days_recorded: group.len(),
            standard_monthly_minutes: config.standard_monthly_minutes,
            biometric_minutes,
            off_minutes: config.off_minutes,
            total_with_off_minutes,
            adjustment_minutes,
            total_paid_minutes,
            overtime_minutes,
            excess_minutes: outcome.excess_minutes,
            rate: rate_lookup.rate,
            overtime_amount: outcome.overtime_amount,
            deducted_minutes: outcome.deducted_minutes,
            deducted_amount: outcome.deducted_amount,
        });
    }

    MonthlyAggregation {
        summaries,
        audit_steps,
    }
}

/// The value a record is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GroupKey<'a> {
    Id(&'a EmployeeId),
    Name(&'a str),
}

impl<'a> GroupKey<'a> {
    fn of(record: &'a DailyRecord, key: AggregationKey) -> Self {
        match key {
            AggregationKey::EmployeeId => Self::Id(&record.employee_id),
            AggregationKey::Name => Self::Name(&record.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(id: i64, name: &str, day: u32, work: i64, overtime: i64) -> DailyRecord {
        DailyRecord {
            employee_id: EmployeeId::Numeric(id),
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            check_in: None,
            check_out: None,
            work_minutes: work,
            overtime_minutes: overtime,
            adjustment_minutes: if work == 0 { 0 } else { work - 600 },
            overnight_corrected: false,
        }
    }

    fn aggregate(records: &[DailyRecord]) -> MonthlyAggregation {
        aggregate_monthly(records, &PayrollConfig::default(), 1)
    }

    #[test]
    fn test_two_day_rollup() {
        let result = aggregate(&[record(12, "Ravi", 3, 480, 0), record(12, "Ravi", 4, 650, 50)]);
        let summary = &result.summaries[0];

        assert_eq!(summary.days_recorded, 2);
        assert_eq!(summary.standard_monthly_minutes, 14_400);
        assert_eq!(summary.biometric_minutes, 1130);
        assert_eq!(summary.adjustment_minutes, -70);
        assert_eq!(summary.overtime_minutes, 50);
        assert_eq!(summary.off_minutes, 1560);
        assert_eq!(summary.total_with_off_minutes, 2690);
        assert_eq!(summary.total_paid_minutes, 2620);
        assert_eq!(summary.excess_minutes, 0);
        assert_eq!(summary.deducted_minutes, 11_780);
        assert_eq!(summary.rate, dec("250"));
        // 250 × 11780 / 60 = 49083.33
        assert_eq!(summary.deducted_amount, dec("49083"));
        assert_eq!(summary.overtime_amount, dec("0"));
    }

    #[test]
    fn test_overtime_path_for_full_month() {
        // 26 days of 10:30 each
        let records: Vec<DailyRecord> = (1..=26)
            .map(|day| record(6, "Asha", day, 630, 30))
            .collect();
        let summary = &aggregate(&records).summaries[0];

        // 16380 worked + 1560 off + 780 adjustment
        assert_eq!(summary.total_paid_minutes, 18_720);
        assert_eq!(summary.excess_minutes, 4_320);
        assert_eq!(summary.rate, dec("500"));
        assert_eq!(summary.overtime_amount, dec("36000"));
        assert_eq!(summary.deducted_minutes, 0);
        assert!(summary.is_overtime());
    }

    #[test]
    fn test_unpaired_days_contribute_nothing() {
        let result = aggregate(&[record(12, "Ravi", 3, 0, 0), record(12, "Ravi", 4, 600, 0)]);
        let summary = &result.summaries[0];
        assert_eq!(summary.biometric_minutes, 600);
        assert_eq!(summary.adjustment_minutes, 0);
        assert_eq!(summary.days_recorded, 2);
    }

    #[test]
    fn test_groups_by_employee_id_by_default() {
        let result = aggregate(&[
            record(1, "Sam", 3, 600, 0),
            record(2, "Sam", 3, 600, 0),
        ]);
        assert_eq!(result.summaries.len(), 2);
    }

    #[test]
    fn test_name_key_merges_shared_names() {
        let config = PayrollConfig {
            aggregation_key: AggregationKey::Name,
            ..PayrollConfig::default()
        };
        let result = aggregate_monthly(
            &[record(1, "Sam", 3, 600, 0), record(2, "Sam", 4, 660, 60)],
            &config,
            1,
        );

        assert_eq!(result.summaries.len(), 1);
        assert_eq!(result.summaries[0].employee_id, EmployeeId::Numeric(1));
        assert_eq!(result.summaries[0].biometric_minutes, 1260);
    }

    #[test]
    fn test_first_encountered_order() {
        let result = aggregate(&[
            record(40, "Zed", 3, 600, 0),
            record(6, "Asha", 3, 600, 0),
            record(40, "Zed", 4, 600, 0),
        ]);

        let ids: Vec<&EmployeeId> = result.summaries.iter().map(|s| &s.employee_id).collect();
        assert_eq!(ids, vec![&EmployeeId::Numeric(40), &EmployeeId::Numeric(6)]);
        assert_eq!(result.summaries[0].days_recorded, 2);
    }

    #[test]
    fn test_name_key_interleaved_records_keep_first_seen_order() {
        let config = PayrollConfig {
            aggregation_key: AggregationKey::Name,
            ..PayrollConfig::default()
        };
        let result = aggregate_monthly(
            &[
                record(1, "Sam", 3, 600, 0),
                record(2, "Bina", 3, 480, 0),
                record(3, "Sam", 4, 660, 60),
                record(4, "Bina", 4, 540, 0),
                record(5, "Sam", 5, 600, 0),
            ],
            &config,
            1,
        );

        let names: Vec<&str> = result.summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sam", "Bina"]);
        assert_eq!(result.summaries[0].days_recorded, 3);
        assert_eq!(result.summaries[0].biometric_minutes, 1860);
        assert_eq!(result.summaries[1].employee_id, EmployeeId::Numeric(2));
        assert_eq!(result.summaries[1].biometric_minutes, 1020);
    }

    #[test]
    fn test_many_employees_each_get_one_summary() {
        let records: Vec<DailyRecord> = (0..2_000)
            .map(|i| record(i % 500, "Staff", 1 + (i / 500) as u32, 600, 0))
            .collect();
        let result = aggregate(&records);

        assert_eq!(result.summaries.len(), 500);
        assert!(result.summaries.iter().all(|s| s.days_recorded == 4));
        assert_eq!(result.summaries[499].employee_id, EmployeeId::Numeric(499));
    }

    #[test]
    fn test_two_audit_steps_per_employee() {
        let result = aggregate_monthly(
            &[record(6, "Asha", 3, 600, 0), record(7, "Bina", 3, 600, 0)],
            &PayrollConfig::default(),
            5,
        );

        let rules: Vec<(u32, &str)> = result
            .audit_steps
            .iter()
            .map(|s| (s.step_number, s.rule_id.as_str()))
            .collect();
        assert_eq!(
            rules,
            vec![
                (5, "base_rate_lookup"),
                (6, "monthly_pay_rule"),
                (7, "base_rate_lookup"),
                (8, "monthly_pay_rule"),
            ]
        );
    }

    #[test]
    fn test_configured_off_minutes_and_standard() {
        let config = PayrollConfig {
            off_minutes: 0,
            standard_monthly_minutes: 600,
            ..PayrollConfig::default()
        };
        let result = aggregate_monthly(&[record(7, "Bina", 3, 660, 60)], &config, 1);
        let summary = &result.summaries[0];

        // 660 worked + 60 adjustment
        assert_eq!(summary.total_paid_minutes, 720);
        assert_eq!(summary.excess_minutes, 120);
        assert_eq!(summary.overtime_amount, dec("500"));
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[]);
        assert!(result.summaries.is_empty());
        assert!(result.audit_steps.is_empty());
    }
}
