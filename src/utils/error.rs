use thiserror::Error;

#[derive(Error, Debug)]
pub enum TravelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{provider} is unavailable: {message}")]
    UpstreamUnavailable { provider: String, message: String },

    #[error("{provider} authentication failed: {message}")]
    AuthFailed { provider: String, message: String },

    #[error("Malformed {source_name} record: {reason}")]
    MalformedRecord { source_name: String, reason: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Message delivery failed: {message}")]
    DeliveryFailure { message: String },

    #[error("Webhook signature rejected: {reason}")]
    SignatureMismatch { reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, TravelError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Data,
    Input,
    Delivery,
    Security,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TravelError {
    pub fn validation(field: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TravelError::Validation {
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(source_name: &str, reason: impl Into<String>) -> Self {
        TravelError::MalformedRecord {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn upstream(provider: &str, message: impl Into<String>) -> Self {
        TravelError::UpstreamUnavailable {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TravelError::Http(_)
            | TravelError::UpstreamUnavailable { .. }
            | TravelError::AuthFailed { .. } => ErrorCategory::Upstream,
            TravelError::MalformedRecord { .. } | TravelError::SerializationError(_) => {
                ErrorCategory::Data
            }
            TravelError::Validation { .. } => ErrorCategory::Input,
            TravelError::DeliveryFailure { .. } => ErrorCategory::Delivery,
            TravelError::SignatureMismatch { .. } => ErrorCategory::Security,
            TravelError::ConfigError { .. }
            | TravelError::InvalidConfigValueError { .. }
            | TravelError::MissingConfigError { .. }
            | TravelError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            TravelError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Upstream | ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::Security | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// JSON-RPC error code used by the MCP adapter.
    pub fn code(&self) -> i64 {
        match self.category() {
            ErrorCategory::Input => -32602,
            _ => -32603,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TravelError::Http(_) | TravelError::UpstreamUnavailable { .. } => {
                "Check network connectivity and the provider base URL; results fall back to mock inventory meanwhile".to_string()
            }
            TravelError::AuthFailed { .. } => {
                "Verify AMADEUS_API_KEY and AMADEUS_API_SECRET".to_string()
            }
            TravelError::MalformedRecord { .. } | TravelError::SerializationError(_) => {
                "The provider returned an unexpected payload; the record was skipped".to_string()
            }
            TravelError::Validation { field, .. } => {
                format!("Correct the '{}' parameter and retry", field)
            }
            TravelError::DeliveryFailure { .. } => {
                "Check WHATSAPP_ACCESS_TOKEN and WHATSAPP_PHONE_NUMBER_ID".to_string()
            }
            TravelError::SignatureMismatch { .. } => {
                "Make sure WHATSAPP_APP_SECRET matches the app secret in the Meta dashboard"
                    .to_string()
            }
            TravelError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            TravelError::ConfigError { .. }
            | TravelError::InvalidConfigValueError { .. }
            | TravelError::ConfigValidationError { .. } => {
                "Review the configuration file and environment variables".to_string()
            }
            TravelError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Upstream => format!("Travel provider problem: {}", self),
            ErrorCategory::Data => format!("Unexpected provider data: {}", self),
            ErrorCategory::Input => format!("Invalid request: {}", self),
            ErrorCategory::Delivery => format!("Could not deliver message: {}", self),
            ErrorCategory::Security => "Request signature could not be verified".to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        let err = TravelError::validation("cabin_class", "COACH", "unknown cabin class");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.code(), -32602);
        assert!(err.to_string().contains("COACH"));
    }

    #[test]
    fn signature_errors_do_not_leak_details() {
        let err = TravelError::SignatureMismatch {
            reason: "digest mismatch".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.user_friendly_message().contains("digest"));
    }
}
