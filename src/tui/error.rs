use crate::api::ApiError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, file writing).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A remote API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}
