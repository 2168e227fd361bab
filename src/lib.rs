//! Attendance Payroll Processor
//!
//! This crate reconstructs daily worked hours from a biometric attendance
//! export and produces a monthly payroll summary per employee: overtime pay
//! when paid hours exceed the standard month, a deduction when they fall short.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod spreadsheet;
