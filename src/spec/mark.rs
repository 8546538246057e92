//! Mark types for Vega specifications
//!
//! Marks are the visual primitives of a chart. Each mark draws from a
//! named data set and carries per-channel encoding rules grouped into
//! lifecycle stages (`enter` runs once per datum, `update` on every
//! re-evaluation).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{Num, Scalar, SignalOr};

/// A visual primitive bound to a data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Mark kind
    #[serde(rename = "type")]
    pub kind: MarkKind,
    /// Optional mark name, usable as an event/selection anchor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Data source binding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<MarkFrom>,
    /// Per-channel encoding rules by lifecycle stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode: Option<Encode>,
}

impl Mark {
    /// Create a mark of the given kind
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            name: None,
            from: None,
            encode: None,
        }
    }

    /// Area mark
    pub fn area() -> Self {
        Self::new(MarkKind::Area)
    }

    /// Line mark
    pub fn line() -> Self {
        Self::new(MarkKind::Line)
    }

    /// Rect mark
    pub fn rect() -> Self {
        Self::new(MarkKind::Rect)
    }

    /// Symbol mark
    pub fn symbol() -> Self {
        Self::new(MarkKind::Symbol)
    }

    /// Bind the mark to a named data set
    pub fn from_data(mut self, data: impl Into<String>) -> Self {
        self.from = Some(MarkFrom { data: data.into() });
        self
    }

    /// Set the mark name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the encoding block
    pub fn with_encode(mut self, encode: Encode) -> Self {
        self.encode = Some(encode);
        self
    }
}

/// Mark kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Area,
    Line,
    Rect,
    Symbol,
    Text,
    Rule,
    Group,
}

impl std::fmt::Display for MarkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MarkKind::Area => "area",
            MarkKind::Line => "line",
            MarkKind::Rect => "rect",
            MarkKind::Symbol => "symbol",
            MarkKind::Text => "text",
            MarkKind::Rule => "rule",
            MarkKind::Group => "group",
        };
        write!(f, "{}", s)
    }
}

/// Data source binding for a mark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkFrom {
    /// Name of the data set supplying this mark's tuples
    pub data: String,
}

/// Channel-name → encoding-rule map for one lifecycle stage
///
/// Ordered so emitted JSON is deterministic; channel order carries no
/// meaning in the grammar.
pub type EncodeEntry = BTreeMap<String, ValueRef>;

/// Encoding rules grouped by lifecycle stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter: Option<EncodeEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<EncodeEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<EncodeEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<EncodeEntry>,
}

impl Encode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an encoding rule to the `enter` stage
    pub fn on_enter(mut self, channel: impl Into<String>, value: ValueRef) -> Self {
        self.enter
            .get_or_insert_with(BTreeMap::new)
            .insert(channel.into(), value);
        self
    }

    /// Add an encoding rule to the `update` stage
    pub fn on_update(mut self, channel: impl Into<String>, value: ValueRef) -> Self {
        self.update
            .get_or_insert_with(BTreeMap::new)
            .insert(channel.into(), value);
        self
    }

    /// Add an encoding rule to the `hover` stage
    pub fn on_hover(mut self, channel: impl Into<String>, value: ValueRef) -> Self {
        self.hover
            .get_or_insert_with(BTreeMap::new)
            .insert(channel.into(), value);
        self
    }

    /// Iterate all (stage, channel, rule) triples
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &String, &ValueRef)> {
        [
            ("enter", &self.enter),
            ("update", &self.update),
            ("exit", &self.exit),
            ("hover", &self.hover),
        ]
        .into_iter()
        .filter_map(|(stage, entry)| entry.as_ref().map(|e| (stage, e)))
        .flat_map(|(stage, entry)| entry.iter().map(move |(channel, rule)| (stage, channel, rule)))
    }
}

/// A per-channel encoding rule
///
/// Combinations mirror the grammar: a literal `value`, a datum `field`,
/// either of those pushed through a `scale`, or a computed `signal`. The
/// optional `offset` shifts the resolved value and may itself be
/// signal-driven.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    /// Band-relative position for band scales, in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<Num>,
    /// Multiplier applied to the resolved value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mult: Option<Num>,
    /// Additive offset, literal or signal-driven
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<SignalOr<Num>>,
}

impl ValueRef {
    /// Literal value
    pub fn value(value: impl Into<Scalar>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Datum field
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    /// Datum field resolved through a scale
    pub fn scaled_field(scale: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            scale: Some(scale.into()),
            field: Some(field.into()),
            ..Self::default()
        }
    }

    /// Literal value resolved through a scale
    pub fn scaled_value(scale: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            scale: Some(scale.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Computed signal expression
    pub fn signal(expr: impl Into<String>) -> Self {
        Self {
            signal: Some(expr.into()),
            ..Self::default()
        }
    }

    /// Add a signal-driven offset
    pub fn with_signal_offset(mut self, expr: impl Into<String>) -> Self {
        self.offset = Some(SignalOr::signal(expr));
        self
    }

    /// Add a literal offset
    pub fn with_offset(mut self, offset: impl Into<Num>) -> Self {
        self.offset = Some(SignalOr::Value(offset.into()));
        self
    }
}
