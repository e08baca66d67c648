//! Error types for DocDB
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using DocDbError
pub type Result<T> = std::result::Result<T, DocDbError>;

/// Unified error type for DocDB operations
#[derive(Debug, Error)]
pub enum DocDbError {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Document {0} not found")]
    NotFound(i64),

    #[error("Document directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Metadata Store Errors
    // -------------------------------------------------------------------------
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid document name: {0:?}")]
    InvalidName(String),

    #[error("Unknown sort column: {0:?}")]
    InvalidSortColumn(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DocDbError {
    /// True for a lookup miss on a record id
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocDbError::NotFound(_))
    }

    /// True when a write collided with an existing id directory
    pub fn is_already_exists(&self) -> bool {
        matches!(self, DocDbError::AlreadyExists(_))
    }
}
