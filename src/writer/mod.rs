//! Output backends for specifications
//!
//! All writers implement the [`Writer`] trait: validate a specification,
//! then emit it in the backend's output format. The JSON writer is the
//! canonical backend; the trait keeps the door open for alternative
//! encodings without touching the model.

mod json;

pub use json::JsonWriter;

use crate::error::Result;
use crate::spec::Spec;

/// A specification output backend
pub trait Writer {
    /// Emitted representation
    type Output;

    /// Validate, then emit the specification
    fn write(&self, spec: &Spec) -> Result<Self::Output>;

    /// Check that the specification is acceptable to this backend
    fn validate(&self, spec: &Spec) -> Result<()>;
}
