//! Error types for the attendance payroll processor.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every fatal condition that can abort a processing run. Rows with
//! unparseable timestamps are not errors; they are counted by the
//! normalizer instead.

use thiserror::Error;

/// The main error type for the attendance payroll processor.
///
/// Every variant is fatal for the run: no partial report is produced.
///
/// # Example
///
/// ```
/// use attendance_payroll::error::PayrollError;
///
/// let error = PayrollError::MissingColumn {
///     column: "Emp ID".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required column: Emp ID");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// A required column is absent from the input table.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// The input file could not be opened or parsed as a table.
    #[error("Error reading file '{path}': {message}")]
    FileRead {
        /// The path of the input file.
        path: String,
        /// The underlying cause.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A duration string was not in `[-]H:MM` form.
    #[error("Invalid duration '{value}': expected [-]H:MM")]
    InvalidDuration {
        /// The rejected input.
        value: String,
    },

    /// A report table could not be written.
    #[error("Failed to write report '{path}': {message}")]
    ReportWrite {
        /// The destination that failed.
        path: String,
        /// The underlying cause.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_displays_column() {
        let error = PayrollError::MissingColumn {
            column: "Attendance State".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing required column: Attendance State"
        );
    }

    #[test]
    fn test_file_read_displays_path_and_cause() {
        let error = PayrollError::FileRead {
            path: "march.csv".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Error reading file 'march.csv': No such file or directory"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = PayrollError::ConfigNotFound {
            path: "/missing/payroll.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/payroll.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = PayrollError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_duration_displays_value() {
        let error = PayrollError::InvalidDuration {
            value: "1:2:3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid duration '1:2:3': expected [-]H:MM"
        );
    }

    #[test]
    fn test_report_write_displays_path_and_message() {
        let error = PayrollError::ReportWrite {
            path: "out/summary.csv".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to write report 'out/summary.csv': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_column() -> PayrollResult<()> {
            Err(PayrollError::MissingColumn {
                column: "Time".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_missing_column()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
