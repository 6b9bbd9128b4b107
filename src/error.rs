use thiserror::Error;

/// Errors raised by the compliance engine.
///
/// All of them are deterministic validation failures; nothing here is worth
/// retrying.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid assembly: {0}")]
    InvalidAssembly(String),

    #[error("Outside formula domain: {0}")]
    Domain(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<validator::ValidationErrors> for EnvelopeError {
    fn from(errors: validator::ValidationErrors) -> Self {
        EnvelopeError::InvalidInput(errors.to_string())
    }
}

impl From<toml::de::Error> for EnvelopeError {
    fn from(error: toml::de::Error) -> Self {
        EnvelopeError::Configuration(format!("malformed reference data: {}", error))
    }
}

/// Rejects NaN and infinities before they reach any formula.
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), EnvelopeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EnvelopeError::InvalidInput(format!(
            "{} is not finite: {}",
            field, value
        )))
    }
}
