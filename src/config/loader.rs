//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollConfig;

/// Loads and provides access to the payroll configuration.
///
/// Any field missing from the file keeps its default, so a file only needs
/// to name what it changes:
///
/// ```text
/// off_minutes: 1440
/// aggregation_key: name
/// rates:
///   default_rate: 300
///   employees:
///     - employee_id: 6
///       hourly: 550
///     - employee_id: "C-12"
///       hourly: 420.50
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./payroll.yaml").unwrap();
/// println!("Standard month: {} minutes", loader.config().standard_monthly_minutes);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file cannot be read (`ConfigNotFound`)
    /// - The file is not valid YAML for [`PayrollConfig`] (`ConfigParseError`)
    /// - The parsed policy is unusable (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text; `origin` names the source in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> PayrollResult<Self> {
        // An empty document means "all defaults"
        let config = if content.trim().is_empty() {
            PayrollConfig::default()
        } else {
            serde_yaml::from_str::<PayrollConfig>(content).map_err(|e| {
                PayrollError::ConfigParseError {
                    path: origin.to_string(),
                    message: e.to_string(),
                }
            })?
        };

        Self::validate(&config, origin)?;
        Ok(Self { config })
    }

    fn validate(config: &PayrollConfig, origin: &str) -> PayrollResult<()> {
        let invalid = |message: &str| PayrollError::ConfigParseError {
            path: origin.to_string(),
            message: message.to_string(),
        };

        if config.timestamp_formats.is_empty() {
            return Err(invalid("timestamp_formats must list at least one format"));
        }
        if config.standard_monthly_minutes < 0
            || config.off_minutes < 0
            || config.daily_baseline_minutes < 0
            || config.overtime_suppression_threshold_minutes < 0
        {
            return Err(invalid("minute settings must not be negative"));
        }
        if config.rates.default_rate.is_sign_negative()
            || config.rates.employees.iter().any(|e| e.hourly.is_sign_negative())
        {
            return Err(invalid("rates must not be negative"));
        }

        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AggregationKey;
    use crate::models::EmployeeId;
    use rust_decimal::Decimal;
    use std::io::Write;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_document_is_default() {
        let loader = ConfigLoader::from_yaml_str("", "inline").unwrap();
        assert_eq!(loader.config(), &PayrollConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let loader = ConfigLoader::from_yaml_str("off_minutes: 1440\n", "inline").unwrap();

        assert_eq!(loader.config().off_minutes, 1440);
        assert_eq!(loader.config().standard_monthly_minutes, 14_400);
        assert_eq!(
            loader.config().rates.rate_for(&EmployeeId::Numeric(40)),
            dec("500")
        );
    }

    #[test]
    fn test_rate_table_with_numeric_and_text_ids() {
        let yaml = r#"
aggregation_key: name
rates:
  default_rate: 300
  employees:
    - employee_id: 6
      hourly: 550
    - employee_id: "C-12"
      hourly: "420.50"
"#;
        let config = ConfigLoader::from_yaml_str(yaml, "inline")
            .unwrap()
            .into_config();

        assert_eq!(config.aggregation_key, AggregationKey::Name);
        assert_eq!(config.rates.rate_for(&EmployeeId::Numeric(6)), dec("550"));
        assert_eq!(
            config.rates.rate_for(&EmployeeId::Text("C-12".to_string())),
            dec("420.50")
        );
        // Replacing the employee list drops the default overrides
        assert_eq!(config.rates.rate_for(&EmployeeId::Numeric(40)), dec("300"));
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("off_minutes: [not, a, number]", "bad.yaml");

        match result {
            Err(PayrollError::ConfigParseError { path, .. }) => assert_eq!(path, "bad.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_timestamp_formats_rejected() {
        let result = ConfigLoader::from_yaml_str("timestamp_formats: []", "inline");
        assert!(matches!(result, Err(PayrollError::ConfigParseError { .. })));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let yaml = "rates:\n  default_rate: -1\n";
        let result = ConfigLoader::from_yaml_str(yaml, "inline");
        assert!(matches!(result, Err(PayrollError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "daily_baseline_minutes: 540").unwrap();

        let loader = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(loader.config().daily_baseline_minutes, 540);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/payroll.yaml");

        match result {
            Err(PayrollError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
