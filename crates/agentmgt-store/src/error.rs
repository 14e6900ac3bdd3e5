//! Error types for the storage layer.

use thiserror::Error;

/// Storage operation errors.
///
/// Backends report failures through these variants; callers treat every
/// variant as an unexpected internal failure.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded.
    #[error("Corrupted record '{key}': {message}")]
    Corrupted {
        /// Key of the unreadable record.
        key: String,
        /// Decoder message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = StoreError::Unavailable("connection reset".to_string());
        assert_eq!(err.to_string(), "Store unavailable: connection reset");
    }

    #[test]
    fn test_corrupted_display() {
        let err = StoreError::Corrupted {
            key: "abc".to_string(),
            message: "eof".to_string(),
        };
        assert_eq!(err.to_string(), "Corrupted record 'abc': eof");
    }
}
