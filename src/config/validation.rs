//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (backlog >= 1, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: TransportConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::TransportConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// Listener host is empty; resolution would fail before any bind.
    EmptyHost,
    /// Backlog must be at least 1 to queue any pending connection.
    InvalidBacklog(i32),
    /// Log level is not one of trace/debug/info/warn/error.
    UnknownLogLevel(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyHost => write!(f, "listener.host must not be empty"),
            ValidationError::InvalidBacklog(n) => {
                write!(f, "listener.backlog must be >= 1 (got {})", n)
            }
            ValidationError::UnknownLogLevel(level) => {
                write!(f, "log.level {:?} is not a known level", level)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a deserialized configuration for semantic problems.
pub fn validate_config(config: &TransportConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.listener.backlog < 1 {
        errors.push(ValidationError::InvalidBacklog(config.listener.backlog));
    }
    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.log.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
