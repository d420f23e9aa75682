//! Error types for the pagination domain layer.
//!
//! This module defines two independent error types:
//!
//! - [`PaginationError`] - Configuration violations caught at call time
//! - [`CursorDecodeError`] - Strict cursor decoding failures
//!
//! Backend fetch and count errors are deliberately NOT represented here:
//! they stay the backend's own error type and travel through the
//! orchestrator unchanged, so `?` at the call site sees the original
//! error with no extra wrapping.
//!
//! [`CursorDecodeError`] only surfaces through
//! [`CursorCodec::try_decode`](crate::cursor::CursorCodec::try_decode).
//! The fail-open [`decode`](crate::cursor::CursorCodec::decode) path maps
//! every rejection to the empty cursor instead.

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid pagination configuration supplied by the caller.
///
/// These are programming or deployment errors, not request errors: a
/// malformed client cursor never lands here (that path fails open).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// Page-size ceiling was configured as zero.
    #[error("Pagination safe limit must be at least 1")]
    SafeLimitZero,
}

// =============================================================================
// Cursor Decode Errors
// =============================================================================

/// Strict cursor token rejection.
///
/// Any single failing field rejects the whole cursor; a partially
/// corrupted token never yields a partially decoded position.
#[derive(Debug, Error)]
pub enum CursorDecodeError {
    /// Token is not valid unpadded base64url.
    #[error("Invalid base64url token: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded payload is not valid UTF-8.
    #[error("Cursor payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A field's value is not valid JSON text.
    #[error("Cursor field `{field}` is not valid JSON text")]
    MalformedValue {
        /// Name of the offending field.
        field: String,
    },

    /// A field's value parsed to a non-scalar (array, object or null).
    #[error("Cursor field `{field}` is not a scalar value")]
    NonScalarValue {
        /// Name of the offending field.
        field: String,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration-checked pagination operations.
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type for strict cursor decoding.
pub type DecodeResult<T> = Result<T, CursorDecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: les messages d'erreur nomment le champ fautif
    // Indispensable pour diagnostiquer un curseur forgé
    #[test]
    fn test_decode_error_names_field() {
        let err = CursorDecodeError::MalformedValue {
            field: "sorting".into(),
        };
        assert!(err.to_string().contains("sorting"));

        let err = CursorDecodeError::NonScalarValue {
            field: "after".into(),
        };
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn test_base64_error_converts() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

        let decode_err = URL_SAFE_NO_PAD.decode("!!!").unwrap_err();
        let err: CursorDecodeError = decode_err.into();
        assert!(matches!(err, CursorDecodeError::Base64(_)));
    }

    #[test]
    fn test_safe_limit_message() {
        assert!(PaginationError::SafeLimitZero
            .to_string()
            .contains("at least 1"));
    }
}
