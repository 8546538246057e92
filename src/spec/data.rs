//! Data source types for Vega specifications
//!
//! A data set is named and carries at most one origin: an external `url`,
//! another set via `source`, or inline `values`. A set with no origin and
//! a generator transform (such as `density`) produces its own rows. The
//! transform list describes derivations declaratively; vizspec never
//! executes them.

use serde::{Deserialize, Serialize};

use super::types::{Num, SignalOr};

/// A named data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Name referenced by scales, marks, and other data sets
    pub name: String,
    /// External resource to load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Name of the data set this one derives from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Inline rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<serde_json::Value>>,
    /// Parsing format for `url` data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,
    /// Derivation steps applied to the origin
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl DataSet {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            source: None,
            values: None,
            format: None,
            transform: Vec::new(),
        }
    }

    /// Data set loaded from an external resource
    pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::named(name)
        }
    }

    /// Data set derived from another named set
    pub fn derived(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::named(name)
        }
    }

    /// Data set with inline rows
    pub fn inline(name: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        Self {
            values: Some(values),
            ..Self::named(name)
        }
    }

    /// Data set with no origin, populated entirely by generator transforms
    pub fn generated(name: impl Into<String>) -> Self {
        Self::named(name)
    }

    /// Append a transform step
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }

    /// Set the parsing format
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Names of the origins set on this data set (url, source, values)
    pub fn origin_count(&self) -> usize {
        [
            self.url.is_some(),
            self.source.is_some(),
            self.values.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// Parsing format for external data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFormat {
    #[serde(rename = "type")]
    pub format_type: FormatType,
}

/// Supported external data encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    Json,
    Csv,
    Tsv,
}

/// A data transform step, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transform {
    /// Group-and-summarize. `fields`, `ops`, and `as` are parallel arrays;
    /// with none given the transform counts rows per group.
    Aggregate {
        #[serde(skip_serializing_if = "Option::is_none")]
        groupby: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ops: Option<Vec<AggregateOp>>,
        #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
        output: Option<Vec<String>>,
    },
    /// Density estimation over a distribution. Generates `value`/`density`
    /// rows; the extent, step count, and method may be signal-driven.
    Density {
        #[serde(skip_serializing_if = "Option::is_none")]
        extent: Option<SignalOr<(Num, Num)>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        steps: Option<SignalOr<u32>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        method: Option<SignalOr<DensityMethod>>,
        distribution: Distribution,
        #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
        output: Option<Vec<String>>,
    },
    /// Keep rows for which the expression is truthy
    Filter { expr: String },
    /// Compute a new field from an expression
    Formula {
        expr: String,
        #[serde(rename = "as")]
        output: String,
    },
}

impl Transform {
    /// Aggregate with parallel field/op/output arrays
    pub fn aggregate(fields: &[&str], ops: &[AggregateOp], output: &[&str]) -> Self {
        Transform::Aggregate {
            groupby: None,
            fields: Some(fields.iter().map(|s| s.to_string()).collect()),
            ops: Some(ops.to_vec()),
            output: Some(output.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// Density estimation over a distribution
    pub fn density(distribution: Distribution) -> Self {
        Transform::Density {
            extent: None,
            steps: None,
            method: None,
            distribution,
            output: None,
        }
    }

    /// Filter rows by expression
    pub fn filter(expr: impl Into<String>) -> Self {
        Transform::Filter { expr: expr.into() }
    }

    /// Derive a field by expression
    pub fn formula(expr: impl Into<String>, output: impl Into<String>) -> Self {
        Transform::Formula {
            expr: expr.into(),
            output: output.into(),
        }
    }

    /// Set the extent of a density transform to a signal expression
    pub fn with_extent_signal(self, expr: impl Into<String>) -> Self {
        match self {
            Transform::Density {
                steps,
                method,
                distribution,
                output,
                ..
            } => Transform::Density {
                extent: Some(SignalOr::signal(expr)),
                steps,
                method,
                distribution,
                output,
            },
            other => other,
        }
    }

    /// Set the step count of a density transform to a signal expression
    pub fn with_steps_signal(self, expr: impl Into<String>) -> Self {
        match self {
            Transform::Density {
                extent,
                method,
                distribution,
                output,
                ..
            } => Transform::Density {
                extent,
                steps: Some(SignalOr::signal(expr)),
                method,
                distribution,
                output,
            },
            other => other,
        }
    }

    /// Set the method of a density transform to a signal expression
    pub fn with_method_signal(self, expr: impl Into<String>) -> Self {
        match self {
            Transform::Density {
                extent,
                steps,
                distribution,
                output,
                ..
            } => Transform::Density {
                extent,
                steps,
                method: Some(SignalOr::signal(expr)),
                distribution,
                output,
            },
            other => other,
        }
    }
}

/// Aggregation operations for the `aggregate` transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Count,
    Valid,
    Missing,
    Distinct,
    Sum,
    Mean,
    Average,
    Variance,
    Stdev,
    Median,
    Min,
    Max,
}

/// Density estimation output: probability density or cumulative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityMethod {
    Pdf,
    Cdf,
}

/// Probability distribution for the `density` transform, tagged by
/// `function`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "lowercase")]
pub enum Distribution {
    /// Kernel density estimate over a field of the transformed data set
    Kde {
        field: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bandwidth: Option<SignalOr<Num>>,
    },
    /// Normal distribution with the given moments
    Normal {
        #[serde(skip_serializing_if = "Option::is_none")]
        mean: Option<SignalOr<Num>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stdev: Option<SignalOr<Num>>,
    },
    /// Uniform distribution over an interval
    Uniform {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<SignalOr<Num>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<SignalOr<Num>>,
    },
}

impl Distribution {
    /// Kernel density estimate with a signal-driven bandwidth
    pub fn kde(field: impl Into<String>, bandwidth: SignalOr<Num>) -> Self {
        Distribution::Kde {
            field: field.into(),
            from: None,
            bandwidth: Some(bandwidth),
        }
    }

    /// Normal distribution with signal-driven moments
    pub fn normal(mean: SignalOr<Num>, stdev: SignalOr<Num>) -> Self {
        Distribution::Normal {
            mean: Some(mean),
            stdev: Some(stdev),
        }
    }
}
