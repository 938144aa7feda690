//! # LTI Launch Errors
//!
//! Error handling for the platform-side launch core.
//!
//! - Uses `thiserror` for structured error definitions
//! - Named fields on every variant so log lines carry context
//! - Malformed hints are intentionally absent from this module: hint decoding
//!   is lenient and yields empty values instead of failing

use thiserror::Error;

/// Errors raised by an external data service implementation.
#[derive(Debug, Error)]
pub enum DataServiceError {
    #[error("Data backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Query {operation} failed: {reason}")]
    QueryFailed { operation: String, reason: String },

    #[error("Query {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Stored record is corrupt: {entity}:{id}")]
    CorruptRecord { entity: String, id: String }
}

impl DataServiceError {
    pub fn query(operation: impl Into<String>, reason: impl ToString) -> Self {
        Self::QueryFailed {
            operation: operation.into(),
            reason: reason.to_string()
        }
    }
}

/// Errors surfaced by launch resolution and claims assembly.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Missing required {field} for {message_type} launch")]
    MissingRequiredContext {
        field: &'static str,
        message_type: String
    },

    #[error("Data service call {operation} failed: {source}")]
    UpstreamDataFailure {
        operation: &'static str,
        #[source]
        source: DataServiceError
    },

    #[error("Invalid launch scope: {reason}")]
    InvalidScope { reason: String },

    #[error("Unsupported message type: {message_type}")]
    UnsupportedMessageType { message_type: String },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid authorization request parameter {parameter}: {reason}")]
    InvalidAuthorizationRequest {
        parameter: &'static str,
        reason: String
    },

    #[error("Unknown client: {client_id}")]
    UnknownClient { client_id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error)
}

impl LaunchError {
    pub fn upstream(operation: &'static str, source: DataServiceError) -> Self {
        Self::UpstreamDataFailure { operation, source }
    }

    pub fn missing(field: &'static str, message_type: impl ToString) -> Self {
        Self::MissingRequiredContext {
            field,
            message_type: message_type.to_string()
        }
    }

    /// Short machine-readable kind, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingRequiredContext { .. } => "missing_required_context",
            Self::UpstreamDataFailure { .. } => "upstream_data_failure",
            Self::InvalidScope { .. } => "invalid_scope",
            Self::UnsupportedMessageType { .. } => "unsupported_message_type",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidAuthorizationRequest { .. } => "invalid_authorization_request",
            Self::UnknownClient { .. } => "unknown_client",
            Self::Serialization(_) => "serialization"
        }
    }

    /// Whether the caller may reasonably retry. The core itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamDataFailure {
                source: DataServiceError::Unavailable { .. } | DataServiceError::Timeout { .. },
                ..
            }
        )
    }

    /// Whether the error was caused by the tool or request rather than the platform.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAuthorizationRequest { .. }
                | Self::UnknownClient { .. }
                | Self::UnsupportedMessageType { .. }
        )
    }
}

/// Platform configuration errors, raised when a configuration value is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("Route template {route} is missing placeholder {placeholder}")]
    InvalidRouteTemplate {
        route: &'static str,
        placeholder: &'static str
    },

    #[error("Invalid value for environment variable {variable}: {value}")]
    InvalidEnvValue { variable: String, value: String }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_context_display() {
        let err = LaunchError::missing("resource_link", "LtiResourceLinkRequest");
        assert_eq!(
            err.to_string(),
            "Missing required resource_link for LtiResourceLinkRequest launch"
        );
        assert_eq!(err.kind(), "missing_required_context");
    }

    #[test]
    fn test_upstream_failure_keeps_source() {
        let err = LaunchError::upstream("get_context", DataServiceError::query("get_context", "boom"));
        assert!(err.to_string().contains("get_context"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_retryable_only_for_transient_upstream_errors() {
        let transient = LaunchError::upstream(
            "get_user",
            DataServiceError::Timeout {
                operation: "get_user".to_string(),
                timeout_ms: 500
            }
        );
        assert!(transient.is_retryable());

        let permanent = LaunchError::upstream("get_user", DataServiceError::query("get_user", "bad row"));
        assert!(!permanent.is_retryable());

        assert!(!LaunchError::missing("user", "LtiDeepLinkingRequest").is_retryable());
    }

    #[test]
    fn test_client_errors() {
        let err = LaunchError::UnknownClient {
            client_id: "abc".to_string()
        };
        assert!(err.is_client_error());
        assert!(!LaunchError::InvalidScope { reason: "x".to_string() }.is_client_error());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidRouteTemplate {
            route: "line_items",
            placeholder: "{context_id}"
        };
        assert_eq!(
            err.to_string(),
            "Route template line_items is missing placeholder {context_id}"
        );
    }
}
