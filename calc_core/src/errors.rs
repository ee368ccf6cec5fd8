//! # Error Types
//!
//! Structured error types for calc_core. Every failure the calculator can hit
//! is locally recoverable: input rejections are shown to the user, import and
//! persistence failures leave the in-memory session untouched.
//!
//! ## Taxonomy
//!
//! - **Input rejected**: [`CalcError::MissingField`], [`CalcError::InvalidInput`],
//!   [`CalcError::UnsupportedCombination`]
//! - **Import**: [`CalcError::MalformedImport`], [`CalcError::VersionMismatch`]
//! - **Persistence**: [`CalcError::PersistenceUnavailable`], [`CalcError::FileError`],
//!   [`CalcError::FileLocked`], [`CalcError::SerializationError`]
//! - **Named projects**: [`CalcError::ProjectExists`], [`CalcError::ProjectNotFound`]
//!
//! The floor-area sanity check is not an error; see
//! [`crate::validation::SanityWarning`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn check_area(area: f64) -> CalcResult<()> {
//!     if area <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "floor_area",
//!             area.to_string(),
//!             "Floor area must be greater than zero",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_area(-5.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, non-finite, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field was left unset
    #[error("Missing required field: {field} - {reason}")]
    MissingField { field: String, reason: String },

    /// The code version does not define a factor for the occupancy
    #[error("Unsupported combination: IBC {code_version} has no occupant load factor for '{occupancy}'")]
    UnsupportedCombination {
        code_version: String,
        occupancy: String,
    },

    /// An imported project document could not be accepted
    #[error("Malformed import: {reason}")]
    MalformedImport { reason: String },

    /// The local store could not be reached or returned corrupt data
    #[error("Persistence unavailable: {reason}")]
    PersistenceUnavailable { reason: String },

    /// A named project already exists and overwrite was not confirmed
    #[error("Project '{name}' already exists - confirm overwrite to replace it")]
    ProjectExists { name: String },

    /// No saved project with the given name
    #[error("Project not found: {name}")]
    ProjectNotFound { name: String },

    /// Building index outside the project's building list
    #[error("Building {index} does not exist (project has {count})")]
    BuildingNotFound { index: usize, count: usize },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// The store directory is locked by another process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Document format version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedCombination error
    pub fn unsupported_combination(code_version: impl Into<String>, occupancy: impl Into<String>) -> Self {
        CalcError::UnsupportedCombination {
            code_version: code_version.into(),
            occupancy: occupancy.into(),
        }
    }

    /// Create a MalformedImport error
    pub fn malformed_import(reason: impl Into<String>) -> Self {
        CalcError::MalformedImport { reason: reason.into() }
    }

    /// Create a PersistenceUnavailable error
    pub fn persistence_unavailable(reason: impl Into<String>) -> Self {
        CalcError::PersistenceUnavailable { reason: reason.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// True for validation failures that block a calculation but leave
    /// prior results untouched.
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::UnsupportedCombination { .. }
        )
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::FileLocked { .. } | CalcError::PersistenceUnavailable { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnsupportedCombination { .. } => "UNSUPPORTED_COMBINATION",
            CalcError::MalformedImport { .. } => "MALFORMED_IMPORT",
            CalcError::PersistenceUnavailable { .. } => "PERSISTENCE_UNAVAILABLE",
            CalcError::ProjectExists { .. } => "PROJECT_EXISTS",
            CalcError::ProjectNotFound { .. } => "PROJECT_NOT_FOUND",
            CalcError::BuildingNotFound { .. } => "BUILDING_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}
