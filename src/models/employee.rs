//! Employee identifier model.
//!
//! Biometric devices export the employee identifier as either a number or a
//! free-form code. This module defines [`EmployeeId`], which keeps numeric
//! identifiers numeric so that they sort and match the way a spreadsheet
//! user expects (2 before 10, and `6.0` equal to `6`).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies an employee in the attendance export.
///
/// Ordering places every numeric identifier before every textual one;
/// numeric identifiers compare numerically and textual ones lexically.
///
/// # Examples
///
/// ```
/// use attendance_payroll::models::EmployeeId;
///
/// let id: EmployeeId = " 40 ".parse().unwrap();
/// assert_eq!(id, EmployeeId::Numeric(40));
///
/// let code: EmployeeId = "EMP-7".parse().unwrap();
/// assert_eq!(code, EmployeeId::Text("EMP-7".to_string()));
/// assert!(id < code);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeId {
    /// A whole-number identifier.
    Numeric(i64),
    /// Any other identifier, stored trimmed.
    Text(String),
}

impl FromStr for EmployeeId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Self::Numeric(n));
        }

        // Spreadsheet exports often render integer cells as "6.0"
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                return Ok(Self::Numeric(f as i64));
            }
        }

        Ok(Self::Text(trimmed.to_string()))
    }
}

impl From<i64> for EmployeeId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}
