//! Error types for the foreign-rc crate.
//!
//! The core handle surface never fails: absent or mistyped resources come
//! back as empty handles. These errors exist only for the opt-in checked
//! constructors on typed wrappers.

use thiserror::Error;

/// Result type alias for foreign-rc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the checked typed-wrapper constructors.
#[derive(Error, Debug)]
pub enum Error {
    /// Handle is null or empty.
    #[error("invalid handle")]
    InvalidHandle,

    /// Runtime type tag does not match the wrapper type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Tag the wrapper type requires.
        expected: String,
        /// Tag the handle actually carries.
        found: String,
    },
}

impl Error {
    /// Check if this is a type mismatch error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }
}
