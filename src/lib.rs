//! Typed building blocks for Vega visualization specifications
//!
//! vizspec models the declarative core of the Vega grammar (signals,
//! data sources and transforms, scales, axes, legends, and marks) as
//! Rust types that serialize to schema-conformant Vega JSON. It builds,
//! loads, and validates specifications; evaluating them (dataflow,
//! transform execution, rendering) is the job of a Vega runtime and is
//! out of scope here.
//!
//! # Example
//!
//! ```rust
//! use vizspec::spec::{DataSet, Domain, Encode, Mark, Range, Scale, Spec, ValueRef};
//! use vizspec::writer::{JsonWriter, Writer};
//!
//! let spec = Spec::new()
//!     .with_width(400)
//!     .with_height(200)
//!     .add_data(DataSet::from_url("points", "data/points.json"))
//!     .add_scale(
//!         Scale::linear("xscale")
//!             .with_domain(Domain::field("points", "u"))
//!             .with_range(Range::width()),
//!     )
//!     .add_mark(
//!         Mark::symbol().from_data("points").with_encode(
//!             Encode::new().on_update("x", ValueRef::scaled_field("xscale", "u")),
//!         ),
//!     );
//!
//! let json = JsonWriter::new().write(&spec)?;
//! assert!(json.contains("\"$schema\""));
//! # Ok::<(), vizspec::VizspecError>(())
//! ```

pub mod error;
pub mod expr;
pub mod reader;
pub mod spec;
pub mod validate;
pub mod writer;

pub use error::{Result, VizspecError};
pub use spec::Spec;
pub use validate::{validate, ValidationWarning};
pub use writer::{JsonWriter, Writer};

/// Crate version, surfaced by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
