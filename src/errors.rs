//! Error taxonomy for mixin remapping.
//!
//! Every failure falls in one of two categories:
//!
//! - **Illegal mixin**: a structural violation that makes the mixin invalid
//!   for any mixin implementation (malformed selectors, non-reference
//!   targets, conflicting annotations, torn mappings, interface member
//!   collisions, missing callback-info parameters). These are always
//!   raised and never pass through the diagnostics policy.
//! - **Missing feature**: the remapper met something it does not know how
//!   to interpret. These are reported through
//!   [`RemapPolicy::log_unimplemented_feature`](crate::policy::RemapPolicy::log_unimplemented_feature),
//!   whose default implementation turns them into [`RemapError::MissingFeature`].
//!
//! # Example
//!
//! ```rust
//! use mixin_remap::errors::RemapError;
//!
//! let err = RemapError::illegal("Mixin class a/B targets type I");
//! assert!(err.is_structural());
//! assert!(!RemapError::missing_feature("Unknown key").is_structural());
//! ```

use crate::model::DescriptorError;
use thiserror::Error;

/// Main error type for remapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemapError {
    /// Structural violation of the mixin.
    #[error("Illegal mixin: {0}")]
    IllegalMixin(String),

    /// Unrecognized or unimplemented feature, raised by the diagnostics policy.
    #[error("Missing feature: {0}")]
    MissingFeature(String),
}

impl RemapError {
    /// Create a structural violation.
    pub fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalMixin(message.into())
    }

    /// Create a missing feature error.
    pub fn missing_feature(description: impl Into<String>) -> Self {
        Self::MissingFeature(description.into())
    }

    /// Whether this error marks the mixin itself as invalid.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::IllegalMixin(_))
    }

    /// The message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::IllegalMixin(message) | Self::MissingFeature(message) => message,
        }
    }

    /// Prepend location context to the message, keeping the category.
    pub fn with_prefix(self, prefix: &str) -> Self {
        match self {
            Self::IllegalMixin(message) => Self::IllegalMixin(format!("{}{}", prefix, message)),
            Self::MissingFeature(message) => {
                Self::MissingFeature(format!("{}{}", prefix, message))
            }
        }
    }
}

impl From<DescriptorError> for RemapError {
    fn from(err: DescriptorError) -> Self {
        Self::IllegalMixin(format!("Malformed descriptor: {}", err))
    }
}

/// Result type alias using [`RemapError`].
pub type Result<T> = std::result::Result<T, RemapError>;

/// Extension trait for attaching location context to fallible results.
pub trait ResultExt<T> {
    /// Convert the error into a [`RemapError`] prefixed with `prefix`.
    fn context(self, prefix: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RemapError>,
{
    fn context(self, prefix: &str) -> Result<T> {
        self.map_err(|e| e.into().with_prefix(prefix))
    }
}
