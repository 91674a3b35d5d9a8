use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] mongodb::error::Error),

    #[error("BSON encoding error: {0}")]
    BsonError(#[from] mongodb::bson::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Step '{step}' failed: {details}")]
    StepError { step: String, details: String },
}

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Database,
    Configuration,
    Io,
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DemoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DemoError::DatabaseError(_) | DemoError::BsonError(_) => ErrorCategory::Database,
            DemoError::ConfigError { .. }
            | DemoError::MissingConfigError { .. }
            | DemoError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DemoError::IoError(_) | DemoError::SerializationError(_) => ErrorCategory::Io,
            DemoError::StepError { .. } => ErrorCategory::Step,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DemoError::DatabaseError(_) => ErrorSeverity::Medium,
            DemoError::ConfigError { .. }
            | DemoError::MissingConfigError { .. }
            | DemoError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
            DemoError::BsonError(_)
            | DemoError::IoError(_)
            | DemoError::SerializationError(_)
            | DemoError::StepError { .. } => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DemoError::DatabaseError(e) => format!("The database request failed: {}", e),
            DemoError::BsonError(e) => format!("A document could not be encoded: {}", e),
            DemoError::IoError(e) => format!("A file operation failed: {}", e),
            DemoError::SerializationError(e) => format!("The run report could not be built: {}", e),
            DemoError::ConfigError { message } => format!("Configuration problem: {}", message),
            DemoError::MissingConfigError { field } => {
                format!("The configuration field '{}' is required", field)
            }
            DemoError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => {
                format!("'{}' is not a valid value for {}: {}", value, field, reason)
            }
            DemoError::StepError { step, details } => {
                format!("The '{}' step failed: {}", step, details)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Database => {
                "Check that MongoDB is reachable at the configured URI and that the \
                 database/collection names are correct"
            }
            ErrorCategory::Configuration => {
                "Fix the configuration value and run again; --help lists every flag"
            }
            ErrorCategory::Io => "Check that the report directory exists and is writable",
            ErrorCategory::Step => {
                "Re-run with --verbose to see which query the step issued before failing"
            }
        }
    }
}
