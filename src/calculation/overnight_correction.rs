//! Overnight shift correction.
//!
//! Biometric devices record a check-out after midnight against the same
//! calendar date as the check-in, and some record afternoon times on a
//! 12-hour clock. Either way the check-out lands earlier in the day than the
//! check-in. The correction moves the check-out forward in half-day steps
//! until it is no longer before the check-in: one step fixes a 12-hour clock
//! reading, a second completes the midnight rollover.

use chrono::{NaiveDateTime, TimeDelta};

use crate::models::AuditStep;

/// Hours added per correction step.
pub const HALF_DAY_HOURS: i64 = 12;

/// Most half-days a correction will add. Both stamps share a calendar date,
/// so two steps always suffice.
pub const MAX_HALF_DAYS: u32 = 2;

/// The result of applying the overnight correction to a check-in/check-out pair.
#[derive(Debug, Clone)]
pub struct OvernightCorrection {
    /// The check-out after correction (unchanged when no correction applied).
    pub check_out: NaiveDateTime,
    /// Number of half-days added to the check-out.
    pub half_days_added: u32,
    /// The audit step recording the correction, present only when one applied.
    pub audit_step: Option<AuditStep>,
}

impl OvernightCorrection {
    /// Returns true when the check-out was moved.
    pub fn corrected(&self) -> bool {
        self.half_days_added > 0
    }
}

/// Corrects a check-out recorded earlier in the day than its check-in.
///
/// # Examples
///
/// ## 12-hour clock reading
///
/// ```
/// use attendance_payroll::calculation::correct_overnight;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let result = correct_overnight(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(6, 30, 0).unwrap(),
///     1,
/// );
/// assert_eq!(result.check_out, day.and_hms_opt(18, 30, 0).unwrap());
/// assert_eq!(result.half_days_added, 1);
/// ```
///
/// ## Shift crossing midnight
///
/// ```
/// use attendance_payroll::calculation::correct_overnight;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let result = correct_overnight(
///     day.and_hms_opt(23, 50, 0).unwrap(),
///     day.and_hms_opt(0, 10, 0).unwrap(),
///     1,
/// );
/// assert_eq!((result.check_out - day.and_hms_opt(23, 50, 0).unwrap()).num_minutes(), 20);
/// assert_eq!(result.half_days_added, 2);
/// ```
pub fn correct_overnight(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    step_number: u32,
) -> OvernightCorrection {
    let mut corrected = check_out;
    let mut half_days_added = 0;

    while corrected < check_in && half_days_added < MAX_HALF_DAYS {
        corrected += TimeDelta::hours(HALF_DAY_HOURS);
        half_days_added += 1;
    }

    let audit_step = (half_days_added > 0).then(|| AuditStep {
        step_number,
        rule_id: "overnight_correction".to_string(),
        rule_name: "Overnight Correction".to_string(),
        input: serde_json::json!({
            "check_in": check_in,
            "check_out": check_out,
        }),
        output: serde_json::json!({
            "check_out": corrected,
            "half_days_added": half_days_added,
        }),
        reasoning: format!(
            "Check-out {} precedes check-in {}, moved forward {} hours",
            check_out.time(),
            check_in.time(),
            i64::from(half_days_added) * HALF_DAY_HOURS
        ),
    });

    OvernightCorrection {
        check_out: corrected,
        half_days_added,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_ordered_pair_untouched() {
        let result = correct_overnight(at(3, 9, 0), at(3, 17, 0), 1);
        assert_eq!(result.check_out, at(3, 17, 0));
        assert!(!result.corrected());
        assert!(result.audit_step.is_none());
    }

    #[test]
    fn test_equal_stamps_untouched() {
        let result = correct_overnight(at(3, 9, 0), at(3, 9, 0), 1);
        assert_eq!(result.half_days_added, 0);
    }

    #[test]
    fn test_single_half_day() {
        let result = correct_overnight(at(3, 8, 0), at(3, 7, 0), 1);
        assert_eq!(result.check_out, at(3, 19, 0));
        assert_eq!(result.half_days_added, 1);
    }

    #[test]
    fn test_midnight_rollover_needs_two_half_days() {
        let result = correct_overnight(at(3, 23, 50), at(3, 0, 10), 1);
        assert_eq!(result.check_out, at(4, 0, 10));
        assert_eq!(result.half_days_added, 2);
    }

    #[test]
    fn test_night_shift() {
        let result = correct_overnight(at(3, 20, 0), at(3, 6, 0), 1);
        assert_eq!(result.check_out, at(4, 6, 0));
        assert_eq!((result.check_out - at(3, 20, 0)).num_minutes(), 600);
    }

    #[test]
    fn test_afternoon_to_after_midnight_rolls_over() {
        // One half-day leaves 00:30 + 12h = 12:30, still before 13:00
        let result = correct_overnight(at(3, 13, 0), at(3, 0, 30), 1);
        assert_eq!(result.check_out, at(4, 0, 30));
        assert_eq!(result.half_days_added, 2);
        assert_eq!((result.check_out - at(3, 13, 0)).num_minutes(), 690);
    }

    #[test]
    fn test_first_step_reaching_check_in_stops() {
        let result = correct_overnight(at(3, 13, 0), at(3, 1, 0), 1);
        assert_eq!(result.check_out, at(3, 13, 0));
        assert_eq!(result.half_days_added, 1);
    }

    #[test]
    fn test_audit_step_recorded_when_corrected() {
        let result = correct_overnight(at(3, 23, 50), at(3, 0, 10), 4);
        let step = result.audit_step.unwrap();

        assert_eq!(step.step_number, 4);
        assert_eq!(step.rule_id, "overnight_correction");
        assert_eq!(step.output["half_days_added"], 2);
        assert_eq!(step.output["check_out"], "2025-03-04T00:10:00");
        assert!(step.reasoning.contains("24 hours"));
    }
}
