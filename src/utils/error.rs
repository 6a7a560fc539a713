use crate::domain::model::{InputField, Mode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML error: {message}")]
    TomlError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown field: {name}")]
    UnknownField { name: String },

    #[error("Unknown mode: {value}")]
    UnknownMode { value: String },

    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    #[error("Field '{field}' is derived in {mode} mode and cannot be edited")]
    FieldNotEditable { field: InputField, mode: Mode },

    #[error("Export error: {message}")]
    ExportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownField { .. }
            | Self::UnknownMode { .. }
            | Self::UnknownCommand { .. }
            | Self::FieldNotEditable { .. } => ErrorCategory::Input,
            Self::TomlError { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::CsvError(_) | Self::ExportError { .. } => ErrorCategory::Io,
            Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 輸入錯誤不影響目前狀態
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::UnknownField { .. } => format!(
                "Use one of: {}",
                InputField::ALL
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::UnknownMode { .. } => {
                "Use 'duration' (1) or 'instalment' (2)".to_string()
            }
            Self::UnknownCommand { .. } => "Type 'help' to list the available commands".to_string(),
            Self::FieldNotEditable { mode, .. } => format!(
                "Switch mode first, or edit '{}' instead",
                mode.free_field().name()
            ),
            Self::TomlError { .. } => "Check the configuration file for TOML syntax errors".to_string(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the reported configuration value and try again".to_string()
            }
            Self::IoError(_) | Self::ExportError { .. } | Self::CsvError(_) => {
                "Check that the path exists and is writable".to_string()
            }
            Self::SerializationError(_) => "This is a bug, please report it".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FieldNotEditable { field, mode } => format!(
                "'{}' is calculated automatically while the mode is {}",
                field, mode
            ),
            Self::UnknownCommand { command } => format!("'{}' is not a command", command),
            Self::IoError(e) => format!("Could not access a file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EstimatorError::UnknownField {
            name: "depth".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown field: depth");
    }

    #[test]
    fn test_severity_maps_to_exit_code() {
        let input = EstimatorError::UnknownMode {
            value: "weekly".to_string(),
        };
        assert_eq!(input.severity(), ErrorSeverity::Low);
        assert_eq!(input.exit_code(), 0);

        let config = EstimatorError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.exit_code(), 1);

        let io: EstimatorError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(io.exit_code(), 2);
    }

    #[test]
    fn test_not_editable_suggests_free_field() {
        let err = EstimatorError::FieldNotEditable {
            field: InputField::TargetMonthlyInstalment,
            mode: Mode::ByTargetDuration,
        };
        assert!(err.recovery_suggestion().contains("targetMonthDuration"));
    }
}
