//! The specification root type
//!
//! [`Spec`] holds the full document: layout fields plus the named
//! collections (signals, data, scales, axes, legends, marks) that the
//! rest of the grammar cross-references.

use const_format::concatcp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validate::{validate, ValidationWarning};
use crate::writer::Writer;

use super::data::DataSet;
use super::guide::{Axis, Legend};
use super::mark::Mark;
use super::scale::Scale;
use super::signal::Signal;
use super::types::Padding;

/// Major version of the Vega schema emitted when a spec carries none
pub const DEFAULT_SCHEMA_VERSION: u32 = 5;

/// Schema URL emitted when a spec carries none
pub const DEFAULT_SCHEMA_URL: &str = concatcp!(
    "https://vega.github.io/schema/vega/v",
    DEFAULT_SCHEMA_VERSION,
    ".json"
);

/// A complete visualization specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// Schema version tag
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Chart body width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Chart body height in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<Autosize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<Signal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataSet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scales: Vec<Scale>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axes: Vec<Axis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legends: Vec<Legend>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

/// Automatic sizing behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Autosize {
    Pad,
    Fit,
    FitX,
    FitY,
    None,
}

impl Spec {
    /// Empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema tag
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the chart body width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the chart body height
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the padding
    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    /// Append a signal
    pub fn add_signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    /// Append a data set
    pub fn add_data(mut self, data: DataSet) -> Self {
        self.data.push(data);
        self
    }

    /// Append a scale
    pub fn add_scale(mut self, scale: Scale) -> Self {
        self.scales.push(scale);
        self
    }

    /// Append an axis
    pub fn add_axis(mut self, axis: Axis) -> Self {
        self.axes.push(axis);
        self
    }

    /// Append a legend
    pub fn add_legend(mut self, legend: Legend) -> Self {
        self.legends.push(legend);
        self
    }

    /// Append a mark
    pub fn add_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Find a data set by name
    pub fn lookup_data(&self, name: &str) -> Option<&DataSet> {
        self.data.iter().find(|d| d.name == name)
    }

    /// Find a scale by name
    pub fn lookup_scale(&self, name: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.name == name)
    }

    /// Find a signal by name
    pub fn lookup_signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Names of all data sets, in declaration order
    pub fn data_names(&self) -> Vec<&str> {
        self.data.iter().map(|d| d.name.as_str()).collect()
    }

    /// Names of all scales, in declaration order
    pub fn scale_names(&self) -> Vec<&str> {
        self.scales.iter().map(|s| s.name.as_str()).collect()
    }

    /// Names of all signals, in declaration order
    pub fn signal_names(&self) -> Vec<&str> {
        self.signals.iter().map(|s| s.name.as_str()).collect()
    }

    /// Validate cross-references, returning warnings on success
    pub fn validate(&self) -> Result<Vec<ValidationWarning>> {
        validate(self)
    }

    /// Render through a writer backend
    pub fn render<W: Writer>(&self, writer: &W) -> Result<W::Output> {
        writer.write(self)
    }
}
