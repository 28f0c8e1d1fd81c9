use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Validation error: {0}")]
    #[diagnostic(code(daily_prep::validation))]
    Validation(String),

    #[error("Email service not configured: {0}")]
    #[diagnostic(
        code(daily_prep::email_not_configured),
        help("set EMAILJS_SERVICE_ID, EMAILJS_TEMPLATE_ID and EMAILJS_PUBLIC_KEY")
    )]
    EmailNotConfigured(String),

    #[error("Transport error: {0}")]
    #[diagnostic(code(daily_prep::transport))]
    Transport(String),

    #[error("Provider error: {0}")]
    #[diagnostic(code(daily_prep::provider))]
    Provider(String),

    #[error("Permission error: {0}")]
    #[diagnostic(code(daily_prep::permission))]
    Permission(String),

    #[error("Invalid transition: {0}")]
    #[diagnostic(code(daily_prep::invalid_transition))]
    InvalidTransition(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(daily_prep::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(daily_prep::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(daily_prep::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(daily_prep::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(daily_prep::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(daily_prep::other))]
    Other(String),
}

// Implement From for TOML serialization errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type DashResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create provider errors
pub fn provider_error(message: &str) -> Error {
    Error::Provider(message.to_string())
}

/// Helper to create transport errors
pub fn transport_error(message: &str) -> Error {
    Error::Transport(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create transition errors for the calendar session
pub fn transition_error(message: &str) -> Error {
    Error::InvalidTransition(message.to_string())
}
