use crate::domain::model::Campus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Campus alias '{alias}' is claimed by both {first} and {second}")]
    AliasConflict {
        alias: String,
        first: Campus,
        second: Campus,
    },

    #[error("Menu data error: {message}")]
    MenuDataError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::IoError(_) => ErrorCategory::Io,
            BotError::SerializationError(_) | BotError::MenuDataError { .. } => ErrorCategory::Data,
            BotError::ConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::AliasConflict { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BotError::MenuDataError { .. } => ErrorSeverity::Medium,
            BotError::IoError(_) | BotError::SerializationError(_) => ErrorSeverity::High,
            BotError::ConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::AliasConflict { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::IoError(e) => format!("Could not read a required file: {}", e),
            BotError::SerializationError(e) => format!("The menu file is not valid JSON: {}", e),
            BotError::ConfigError { message } => format!("The configuration is invalid: {}", message),
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            BotError::AliasConflict { alias, .. } => {
                format!("The campus alias '{}' is used for more than one campus", alias)
            }
            BotError::MenuDataError { message } => format!("The menu data is unusable: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the configuration file and command line flags, then restart"
            }
            ErrorCategory::Io => "Make sure the file exists and is readable",
            ErrorCategory::Data => "Regenerate the menu file and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
