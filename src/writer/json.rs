//! Vega JSON writer implementation
//!
//! Serializes a [`Spec`] to schema-conformant Vega JSON. Specifications
//! without a `$schema` tag get this writer's default; an explicit tag is
//! preserved verbatim.

use crate::error::{Result, VizspecError};
use crate::spec::{Spec, DEFAULT_SCHEMA_URL};
use crate::validate::validate;

use super::Writer;

/// Vega JSON writer
pub struct JsonWriter {
    /// Schema URL stamped onto specs that carry none
    schema: String,
    /// Emit pretty-printed JSON
    pretty: bool,
}

impl JsonWriter {
    /// Pretty-printing writer with the default schema
    pub fn new() -> Self {
        Self {
            schema: DEFAULT_SCHEMA_URL.to_string(),
            pretty: true,
        }
    }

    /// Single-line output variant
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::new()
        }
    }

    /// Override the default schema URL
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for JsonWriter {
    type Output = String;

    fn write(&self, spec: &Spec) -> Result<String> {
        self.validate(spec)?;

        let mut out = spec.clone();
        if out.schema.is_none() {
            out.schema = Some(self.schema.clone());
        }

        let serialize = if self.pretty {
            serde_json::to_string_pretty(&out)
        } else {
            serde_json::to_string(&out)
        };
        serialize
            .map_err(|e| VizspecError::WriterError(format!("Failed to serialize spec: {}", e)))
    }

    fn validate(&self, spec: &Spec) -> Result<()> {
        // Warnings are acceptable to this backend; hard errors are not.
        validate(spec).map(|_warnings| ())
    }
}
