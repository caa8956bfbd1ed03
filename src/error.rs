//! Error types for rosterdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

/// Unified error type for rosterdb operations
#[derive(Debug, Error)]
pub enum RosterError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data file not found: {path}")]
    FileNotFound { path: String },

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    #[error("Format violation: {0}")]
    Format(String),

    #[error("Record body id {found} does not match index id {expected}")]
    IdMismatch { expected: i32, found: i32 },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Record not found: id {id}")]
    RecordNotFound { id: i32 },

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Name too long: {len} bytes (max 65535)")]
    NameTooLong { len: usize },

    #[error("Duplicate record id: {id}")]
    DuplicateId { id: i32 },
}

impl RosterError {
    /// Whether the caller can recover by re-prompting (unknown id, bad
    /// input) rather than abandoning the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RosterError::RecordNotFound { .. })
    }
}
