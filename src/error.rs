use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for configuration and structural failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key or payload path that caused the error (e.g., "apiKey", "choices[0].message.content")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "endpoint_normalizer", "buffered_dispatch")
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

/// Unified error type for translation calls.
///
/// Every fatal condition surfaces as one of these variants. Recoverable
/// conditions (a malformed stream line, unparseable `parameters`) are logged
/// and never reach the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing credential or endpoint, or an unusable endpoint URL. Raised before any request.
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Connection-level failure: no response, or the body could not be read.
    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    /// The endpoint answered with a non-success status (or an error payload).
    #[error("API error: HTTP {status}: {details}")]
    Api { status: u16, details: String },

    /// The response was well-formed HTTP but lacked the expected fields.
    #[error("Response structure error: {message} (payload: {payload})")]
    Structure { message: String, payload: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
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

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a structural error carrying the offending payload
    pub fn structure(msg: impl Into<String>, payload: impl Into<String>) -> Self {
        Error::Structure {
            message: msg.into(),
            payload: payload.into(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// HTTP status of an API failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }
}
