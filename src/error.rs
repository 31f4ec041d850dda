//! Core error taxonomy.
//!
//! Only the pure recommendation and search code returns these. Everything
//! that touches the filesystem, a child process or the terminal uses
//! `anyhow::Result` and wraps these via `?`.

use thiserror::Error;

/// Errors raised by the core. None of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The liked track id does not exist in the catalog snapshot.
    #[error("Song not found: no track with id {0} in the catalog")]
    NotFound(i64),

    /// A call was made with an input the core refuses to compute on.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_id() {
        let err = CoreError::NotFound(99);
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = CoreError::InvalidArgument("top_n must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid argument: top_n must be positive");
    }

    #[test]
    fn test_converts_into_anyhow_and_back() {
        let err: anyhow::Error = CoreError::NotFound(7).into();
        assert_eq!(err.downcast_ref::<CoreError>(), Some(&CoreError::NotFound(7)));
    }
}
