//! `H:MM` duration formatting.
//!
//! Every minute quantity in the reports is rendered as `[-]H:MM`: unsigned
//! hours without padding, two-digit minutes, and a single sign in front of
//! the whole value. [`parse_minutes`] is the exact inverse of
//! [`format_minutes`].

use crate::error::{PayrollError, PayrollResult};

/// Formats signed minutes as `[-]H:MM`.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::format_minutes;
///
/// assert_eq!(format_minutes(0), "0:00");
/// assert_eq!(format_minutes(616), "10:16");
/// assert_eq!(format_minutes(-135), "-2:15");
/// assert_eq!(format_minutes(-15), "-0:15");
/// ```
pub fn format_minutes(total_minutes: i64) -> String {
    let sign = if total_minutes < 0 { "-" } else { "" };
    let magnitude = total_minutes.unsigned_abs();
    format!("{}{}:{:02}", sign, magnitude / 60, magnitude % 60)
}

/// Parses a `[-]H:MM` string back into signed minutes.
///
/// Surrounding whitespace is ignored. The minutes part must be exactly two
/// digits below 60, and the sign may only appear once, in front.
///
/// # Errors
///
/// Returns [`PayrollError::InvalidDuration`] for anything else.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::parse_minutes;
///
/// assert_eq!(parse_minutes("10:16").unwrap(), 616);
/// assert_eq!(parse_minutes("-0:15").unwrap(), -15);
/// assert!(parse_minutes("2:-15").is_err());
/// ```
pub fn parse_minutes(value: &str) -> PayrollResult<i64> {
    let invalid = || PayrollError::InvalidDuration {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (hours, minutes) = body.split_once(':').ok_or_else(invalid)?;

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || minutes.len() != 2 || !all_digits(minutes) {
        return Err(invalid());
    }

    let hours: i64 = hours.parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    let magnitude = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(invalid)?;

    Ok(if negative { -magnitude } else { magnitude })
}
