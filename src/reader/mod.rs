//! Loading specifications from JSON documents
//!
//! The reader turns serialized Vega JSON back into the typed model.
//! Deserialization failures surface as [`VizspecError::ParseError`];
//! filesystem failures as [`VizspecError::ReaderError`]. Loading does
//! not validate; callers decide whether to run [`crate::validate`]
//! afterwards (the CLI always does).

use std::fs;
use std::path::Path;

use crate::error::{Result, VizspecError};
use crate::spec::Spec;

/// Parse a specification from a JSON string
pub fn from_json_str(json: &str) -> Result<Spec> {
    serde_json::from_str(json)
        .map_err(|e| VizspecError::ParseError(format!("Invalid specification JSON: {}", e)))
}

/// Load a specification from a JSON file
pub fn from_path(path: &Path) -> Result<Spec> {
    let json = fs::read_to_string(path).map_err(|e| {
        VizspecError::ReaderError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "loaded specification file");
    from_json_str(&json)
}
