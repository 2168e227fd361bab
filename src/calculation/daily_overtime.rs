//! Daily overtime detection functionality.
//!
//! This module measures a day's worked minutes against the daily baseline,
//! producing the clamped overtime and the signed adjustment. Overtime under
//! the suppression threshold is reported as zero; the adjustment is never
//! clamped or suppressed.

use serde::{Deserialize, Serialize};

/// The per-day minute figures derived from worked minutes.
///
/// # Example
///
/// ```
/// use attendance_payroll::calculation::{detect_daily_overtime, DailyOvertimeDetection};
///
/// let detection = detect_daily_overtime(614, 600, 15);
/// assert_eq!(
///     detection,
///     DailyOvertimeDetection {
///         work_minutes: 614,
///         overtime_minutes: 0,
///         adjustment_minutes: 14,
///         suppressed_minutes: 14,
///     }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOvertimeDetection {
    /// Worked minutes for the day.
    pub work_minutes: i64,
    /// Minutes beyond the baseline, zero when under the suppression threshold.
    pub overtime_minutes: i64,
    /// `work_minutes - baseline`, signed.
    pub adjustment_minutes: i64,
    /// Overtime that was computed but dropped by the suppression threshold.
    pub suppressed_minutes: i64,
}

impl DailyOvertimeDetection {
    /// The figures for a day without a check-in/check-out pair.
    pub const UNPAIRED: Self = Self {
        work_minutes: 0,
        overtime_minutes: 0,
        adjustment_minutes: 0,
        suppressed_minutes: 0,
    };
}

/// Splits a day's worked minutes into overtime and adjustment.
///
/// # Arguments
///
/// * `work_minutes` - Whole minutes between check-in and check-out
/// * `baseline_minutes` - The daily baseline (600 by default)
/// * `suppression_threshold_minutes` - Overtime below this is reported as zero (15 by default)
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::detect_daily_overtime;
///
/// let short = detect_daily_overtime(480, 600, 15);
/// assert_eq!(short.overtime_minutes, 0);
/// assert_eq!(short.adjustment_minutes, -120);
///
/// let long = detect_daily_overtime(616, 600, 15);
/// assert_eq!(long.overtime_minutes, 16);
/// assert_eq!(long.adjustment_minutes, 16);
/// ```
pub fn detect_daily_overtime(
    work_minutes: i64,
    baseline_minutes: i64,
    suppression_threshold_minutes: i64,
) -> DailyOvertimeDetection {
    let raw_overtime = (work_minutes - baseline_minutes).max(0);

    let (overtime_minutes, suppressed_minutes) = if raw_overtime < suppression_threshold_minutes {
        (0, raw_overtime)
    } else {
        (raw_overtime, 0)
    };

    DailyOvertimeDetection {
        work_minutes,
        overtime_minutes,
        adjustment_minutes: work_minutes - baseline_minutes,
        suppressed_minutes,
    }
}
