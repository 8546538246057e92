//! Scale types for Vega specifications
//!
//! A scale is a named mapping from a data domain to a visual range. The
//! domain may reference fields of one or more data sets, a signal, or a
//! literal value list; the range may be a layout preset (`width`,
//! `height`), a signal, or a literal list such as a color palette.

use serde::{Deserialize, Serialize};

use super::types::{Num, Scalar, SignalRef};

/// A named domain-to-range mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Scale name, referenced by axes, legends, and mark encodings
    pub name: String,
    /// Scale kind; normalized to `linear` when absent on input
    #[serde(rename = "type", default)]
    pub kind: ScaleKind,
    /// Data domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    /// Visual range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    /// Extend the domain to human-friendly bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,
    /// Round range values to integers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<bool>,
    /// Force the domain to include zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,
    /// Flip the range direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    /// Range padding in pixels (continuous) or steps (band/point)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Num>,
}

impl Scale {
    /// Create a scale of the given kind with no domain or range
    pub fn new(name: impl Into<String>, kind: ScaleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            domain: None,
            range: None,
            nice: None,
            round: None,
            zero: None,
            reverse: None,
            padding: None,
        }
    }

    /// Linear scale
    pub fn linear(name: impl Into<String>) -> Self {
        Self::new(name, ScaleKind::Linear)
    }

    /// Ordinal scale
    pub fn ordinal(name: impl Into<String>) -> Self {
        Self::new(name, ScaleKind::Ordinal)
    }

    /// Band scale
    pub fn band(name: impl Into<String>) -> Self {
        Self::new(name, ScaleKind::Band)
    }

    /// Set the domain
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Set the range
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    /// Enable domain nicing
    pub fn nice(mut self) -> Self {
        self.nice = Some(true);
        self
    }

    /// Enable range rounding
    pub fn round(mut self) -> Self {
        self.round = Some(true);
        self
    }
}

/// Scale kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
    Sqrt,
    Pow,
    Symlog,
    Ordinal,
    Band,
    Point,
    Quantize,
    Threshold,
}

impl ScaleKind {
    /// True for kinds whose domain is a continuous numeric interval
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            ScaleKind::Linear
                | ScaleKind::Log
                | ScaleKind::Sqrt
                | ScaleKind::Pow
                | ScaleKind::Symlog
        )
    }

    /// True for kinds whose domain is a discrete value list
    pub fn is_discrete(&self) -> bool {
        matches!(self, ScaleKind::Ordinal | ScaleKind::Band | ScaleKind::Point)
    }
}

impl std::fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ScaleKind::Linear => "linear",
            ScaleKind::Log => "log",
            ScaleKind::Sqrt => "sqrt",
            ScaleKind::Pow => "pow",
            ScaleKind::Symlog => "symlog",
            ScaleKind::Ordinal => "ordinal",
            ScaleKind::Band => "band",
            ScaleKind::Point => "point",
            ScaleKind::Quantize => "quantize",
            ScaleKind::Threshold => "threshold",
        };
        write!(f, "{}", s)
    }
}

/// Reference to a field of a named data set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFieldRef {
    pub data: String,
    pub field: String,
}

impl DataFieldRef {
    pub fn new(data: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            field: field.into(),
        }
    }
}

/// Fields of several data sets combined into one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiFieldRef {
    pub fields: Vec<DataFieldRef>,
}

/// Scale domain
///
/// The single-field arm must precede the multi-field arm so objects with
/// `data`/`field` keys are not mistaken for the `fields` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Domain {
    /// Field of one data set: `{"data": ..., "field": ...}`
    Field(DataFieldRef),
    /// Fields of several data sets: `{"fields": [...]}`
    Fields(MultiFieldRef),
    /// Signal-computed domain
    Signal(SignalRef),
    /// Literal value list
    Values(Vec<Scalar>),
}

impl Domain {
    /// Domain over a field of one data set
    pub fn field(data: impl Into<String>, field: impl Into<String>) -> Self {
        Domain::Field(DataFieldRef::new(data, field))
    }

    /// Domain over fields of several data sets
    pub fn fields(refs: Vec<DataFieldRef>) -> Self {
        Domain::Fields(MultiFieldRef { fields: refs })
    }

    /// Literal discrete domain of strings
    pub fn discrete(values: &[&str]) -> Self {
        Domain::Values(values.iter().map(|s| Scalar::from(*s)).collect())
    }

    /// All data-field references this domain names
    pub fn field_refs(&self) -> Vec<&DataFieldRef> {
        match self {
            Domain::Field(r) => vec![r],
            Domain::Fields(m) => m.fields.iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Layout presets usable as a scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePreset {
    Width,
    Height,
    Category,
    Diverging,
    Ordinal,
    Ramp,
    Symbol,
}

/// Scale range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Range {
    /// Layout or palette preset keyword
    Preset(RangePreset),
    /// Signal-computed range
    Signal(SignalRef),
    /// Literal value list, e.g. a color palette
    Values(Vec<Scalar>),
}

impl Range {
    /// The `width` layout preset
    pub fn width() -> Self {
        Range::Preset(RangePreset::Width)
    }

    /// The `height` layout preset
    pub fn height() -> Self {
        Range::Preset(RangePreset::Height)
    }

    /// Literal range of strings (e.g. a color palette)
    pub fn palette(values: &[&str]) -> Self {
        Range::Values(values.iter().map(|s| Scalar::from(*s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_linear_scale_serialization() {
        let scale = Scale::linear("xscale")
            .with_domain(Domain::field("points", "u"))
            .with_range(Range::width())
            .nice();

        assert_eq!(
            serde_json::to_value(&scale).unwrap(),
            json!({
                "name": "xscale",
                "type": "linear",
                "range": "width",
                "domain": {"data": "points", "field": "u"},
                "nice": true
            })
        );
    }

    #[test]
    fn test_multi_field_domain_serialization() {
        let scale = Scale::linear("yscale")
            .with_domain(Domain::fields(vec![
                DataFieldRef::new("density", "density"),
                DataFieldRef::new("normal", "density"),
            ]))
            .with_range(Range::height())
            .round();

        assert_eq!(
            serde_json::to_value(&scale).unwrap(),
            json!({
                "name": "yscale",
                "type": "linear",
                "range": "height",
                "round": true,
                "domain": {
                    "fields": [
                        {"data": "density", "field": "density"},
                        {"data": "normal", "field": "density"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_ordinal_scale_with_palette() {
        let scale = Scale::ordinal("color")
            .with_domain(Domain::discrete(&["Normal Estimate", "Kernel Density Estimate"]))
            .with_range(Range::palette(&["#444", "steelblue"]));

        assert_eq!(
            serde_json::to_value(&scale).unwrap(),
            json!({
                "name": "color",
                "type": "ordinal",
                "domain": ["Normal Estimate", "Kernel Density Estimate"],
                "range": ["#444", "steelblue"]
            })
        );
    }

    #[test]
    fn test_domain_deserialize_arms() {
        let single: Domain =
            serde_json::from_value(json!({"data": "points", "field": "u"})).unwrap();
        assert_eq!(single, Domain::field("points", "u"));

        let multi: Domain =
            serde_json::from_value(json!({"fields": [{"data": "a", "field": "f"}]})).unwrap();
        assert_eq!(multi.field_refs().len(), 1);

        let signal: Domain = serde_json::from_value(json!({"signal": "extent"})).unwrap();
        assert_eq!(signal, Domain::Signal(SignalRef::new("extent")));

        let values: Domain = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(values, Domain::discrete(&["a", "b"]));
    }

    #[test]
    fn test_scale_kind_defaults_to_linear() {
        let scale: Scale = serde_json::from_value(json!({"name": "s"})).unwrap();
        assert_eq!(scale.kind, ScaleKind::Linear);
        assert!(scale.kind.is_continuous());
        assert!(!scale.kind.is_discrete());
    }

    #[test]
    fn test_range_preset_deserialize() {
        let range: Range = serde_json::from_value(json!("width")).unwrap();
        assert_eq!(range, Range::width());

        // Arbitrary strings are not presets; they land in the value-list arm
        // only when given as an array.
        assert!(serde_json::from_value::<Range>(json!("definitely-not-a-preset")).is_err());
    }
}
