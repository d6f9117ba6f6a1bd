//! Error types for Datagen Core
//!
//! "Cannot construct" is not an error: synthesizers signal it with
//! `Ok(None)`. Only the cases below are raised:
//! - Strict-mode exhaustion
//! - Unsupported construction shapes
//! - Precondition violations
//! - Invalid configuration

use datagen_model::TypeDescriptor;

/// Main synthesis error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// No synthesizer could produce a value (strict mode only)
    #[error("unsupported type: {ty}")]
    Unsupported {
        /// Requested descriptor, in text form
        ty: String,
    },

    /// Type shape has no usable construction path
    #[error("unsupported construction of {ty}: {reason}")]
    UnsupportedConstruction {
        /// Requested descriptor, in text form
        ty: String,
        /// Why no construction path applies
        reason: String,
    },

    /// Caller violated a precondition
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SynthesisError {
    /// Create strict-mode exhaustion error
    #[inline]
    #[must_use]
    pub fn unsupported(ty: &TypeDescriptor) -> Self {
        Self::Unsupported { ty: ty.to_string() }
    }

    /// Create unsupported construction error
    #[inline]
    #[must_use]
    pub fn unsupported_construction(ty: &TypeDescriptor, reason: impl Into<String>) -> Self {
        Self::UnsupportedConstruction {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }

    /// Create precondition error
    #[inline]
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Check if error is strict-mode exhaustion
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if error is a precondition violation
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Size bounds are empty
    #[error("min_size ({min}) must be less than max_size ({max})")]
    EmptySizeRange {
        /// Configured lower bound
        min: usize,
        /// Configured upper bound
        max: usize,
    },

    /// Generated strings would be empty
    #[error("string_length must be greater than zero")]
    ZeroStringLength,

    /// Configuration text could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}
