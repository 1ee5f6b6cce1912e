use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern compilation failed: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::PatternError(_) => ErrorCategory::Configuration,
            EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::IoError(_) | EtlError::ZipError(_) | EtlError::SerializationError(_) => {
                ErrorCategory::Output
            }
            EtlError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::PatternError(_) => {
                "Check the [calibration] vocabularies for entries that break the generated patterns".to_string()
            }
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Review the command-line flags or the TOML configuration file".to_string()
            }
            EtlError::CsvError(_) => {
                "Make sure the input is a delimited file with a header row and the configured delimiter".to_string()
            }
            EtlError::IoError(_) => "Check that the input file exists and the output path is writable".to_string(),
            EtlError::ZipError(_) => "Retry without compression or free up disk space".to_string(),
            EtlError::SerializationError(_) => "Retry with csv or tsv output only".to_string(),
            EtlError::ProcessingError { .. } => "Run with --verbose to see which record failed".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read the input records: {}", self),
            ErrorCategory::Output => format!("Could not write the output: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
