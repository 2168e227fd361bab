//! Core data models for the attendance payroll processor.
//!
//! This module contains all the domain models that flow through the pipeline:
//! raw table → attendance events → daily records → monthly summaries.

mod daily_record;
mod employee;
mod event;
mod monthly_summary;
mod report;

pub use daily_record::DailyRecord;
pub use employee::EmployeeId;
pub use event::{AttendanceEvent, AttendanceState, RawTable};
pub use monthly_summary::MonthlySummary;
pub use report::{AuditStep, AuditTrace, AuditWarning, PayrollReport};
