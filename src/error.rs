use crate::error_code::UpstreamErrorCode;
use crate::transport::TransportError;
use crate::validation::ValidationError;
use thiserror::Error;

/// Structured error context for configuration problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Setting or field that caused the error (e.g., "GROQ_BASE_URL")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected format, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config", "completion_client")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the relay.
///
/// Three kinds reach the request handler: configuration (service degraded),
/// validation (the caller's fault) and upstream (the completion service's).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Completion service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    #[error("Upstream error [{code}]{}: {message}", format_status(.status))]
    Upstream {
        code: UpstreamErrorCode,
        status: Option<u16>,
        message: String,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" HTTP {}", s)).unwrap_or_default()
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Error::ServiceUnavailable {
            reason: reason.into(),
        }
    }

    pub fn upstream(code: UpstreamErrorCode, status: Option<u16>, msg: impl Into<String>) -> Self {
        Error::Upstream {
            code,
            status,
            message: msg.into(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Upstream classification, if this error came from the completion call.
    pub fn upstream_code(&self) -> Option<UpstreamErrorCode> {
        match self {
            Error::Upstream { code, .. } => Some(*code),
            Error::Transport(_) => Some(UpstreamErrorCode::Network),
            _ => None,
        }
    }

    /// HTTP status the relay answers with when this error ends a request.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }
}
