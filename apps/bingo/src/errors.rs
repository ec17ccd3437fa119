use thiserror::Error;

/// Application-level error type.
/// The CLI surfaces every variant through `code()` + `user_message()`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The combined pool cannot fill one card. Always caused by user data.
    #[error("Insufficient pool: {required} unique items required, {available} available")]
    InsufficientPool {
        required: usize,
        available: usize,
        center_pinned: bool,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, printed alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InsufficientPool { .. } => "INSUFFICIENT_POOL",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Deserialization(_) => "DESERIALIZATION_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the user. Internal detail is logged, not shown.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InsufficientPool {
                required,
                available,
                center_pinned,
            } => format!(
                "You need at least {required} unique items{} to generate the cards. Currently you have {available}.",
                if *center_pinned {
                    " (excluding the center space)"
                } else {
                    ""
                }
            ),
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Serialization(msg) => {
                tracing::error!("Serialization error: {msg}");
                "An error occurred while saving the session.".to_string()
            }
            AppError::Deserialization(msg) => {
                tracing::error!("Deserialization error: {msg}");
                "An error occurred while loading the session. The data may be corrupted."
                    .to_string()
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                "A card could not be rendered.".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                format!("A file operation failed: {e}")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
        }
    }
}
