//! Configuration loading and management for the attendance payroll processor.
//!
//! This module provides the payroll policy (baseline hours, off-hours, rate
//! table, accepted timestamp layouts) and loads it from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use attendance_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./payroll.yaml").unwrap().into_config();
//! println!("Off minutes: {}", config.off_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AggregationKey, DAILY_BASELINE_MINUTES, DEFAULT_RATE, DEFAULT_TIMESTAMP_FORMATS,
    EmployeeRate, HIGH_RATE, HIGH_RATE_EMPLOYEE_IDS, OFF_MINUTES,
    OVERTIME_SUPPRESSION_THRESHOLD_MINUTES, PayrollConfig, RateTable, STANDARD_MONTHLY_MINUTES,
};
