//! Error types for vizspec
//!
//! All fallible operations in the crate return [`Result`], which wraps
//! [`VizspecError`]. Variants mirror the crate's subsystems: parsing
//! (deserialization), validation, reading (I/O), and writing.

use thiserror::Error;

/// Errors produced by vizspec operations
#[derive(Error, Debug)]
pub enum VizspecError {
    /// A document could not be deserialized into the typed model
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A specification violates a structural rule (duplicate names,
    /// unresolvable references, malformed transforms)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A specification could not be read from its source
    #[error("Reader error: {0}")]
    ReaderError(String),

    /// A specification could not be serialized or emitted
    #[error("Writer error: {0}")]
    WriterError(String),

    /// An internal invariant failed
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, VizspecError>;
