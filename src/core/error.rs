//! Error types for the log pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Malformed constructor or method input, raised at the point of misuse
    #[error("Invalid argument for {component}: {message}")]
    InvalidArgument { component: String, message: String },

    /// Failure during delivery or structural misuse detected at call time
    #[error("Runtime error: {message}")]
    Runtime {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Optional sink prerequisite missing at writer construction
    #[error("Writer '{writer}' requires the '{extension}' extension which is not available")]
    MissingExtension { writer: String, extension: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid argument error
    pub fn invalid_argument(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a runtime error without an underlying cause
    pub fn runtime(message: impl Into<String>) -> Self {
        LoggerError::Runtime {
            message: message.into(),
            source: None,
        }
    }

    /// Create a runtime error wrapping the low-level error that caused it
    pub fn runtime_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LoggerError::Runtime {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing extension error
    pub fn missing_extension(writer: impl Into<String>, extension: impl Into<String>) -> Self {
        LoggerError::MissingExtension {
            writer: writer.into(),
            extension: extension.into(),
        }
    }
}
