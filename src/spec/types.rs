//! Shared value types for Vega specifications
//!
//! These primitives appear throughout the grammar: literal scalars, JSON
//! numbers that must round-trip without changing representation, signal
//! references, and the "literal or signal" union that most transform and
//! encoding parameters accept.

use serde::{Deserialize, Serialize};

/// A JSON number that preserves integer vs. float identity.
///
/// Vega documents draw a visible distinction between `0` and `0.0`; a
/// specification loaded and re-emitted must not migrate integers to
/// floats. `Num` keeps whichever representation the source used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Num {
    /// Integer-valued number, emitted without a fractional part
    Int(i64),
    /// Float-valued number
    Float(f64),
}

impl Num {
    /// Numeric value regardless of representation
    pub fn as_f64(&self) -> f64 {
        match self {
            Num::Int(n) => *n as f64,
            Num::Float(x) => *x,
        }
    }
}

impl From<i64> for Num {
    fn from(n: i64) -> Self {
        Num::Int(n)
    }
}

impl From<i32> for Num {
    fn from(n: i32) -> Self {
        Num::Int(n as i64)
    }
}

impl From<u32> for Num {
    fn from(n: u32) -> Self {
        Num::Int(n as i64)
    }
}

impl From<f64> for Num {
    fn from(x: f64) -> Self {
        Num::Float(x)
    }
}

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Num::Int(n) => write!(f, "{}", n),
            Num::Float(x) => write!(f, "{}", x),
        }
    }
}

/// A literal scalar value: bool, number, or string
///
/// Used wherever the grammar accepts a constant, e.g. signal initial
/// values, scale domain/range entries, and encoding `value` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Borrow the string content, if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value, if this is a numeric scalar
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(n) => Some(*n as f64),
            Scalar::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<Num> for Scalar {
    fn from(n: Num) -> Self {
        match n {
            Num::Int(i) => Scalar::Int(i),
            Num::Float(x) => Scalar::Float(x),
        }
    }
}

/// Reference to a signal by expression, the grammar's `{"signal": "..."}`
/// escape hatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRef {
    /// Expression evaluated against the signal namespace
    pub signal: String,
}

impl SignalRef {
    pub fn new(signal: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
        }
    }
}

/// Either a signal reference or a literal value
///
/// Most transform parameters and several encoding fields accept either
/// form; the signal arm must come first so `{"signal": ...}` objects are
/// not swallowed by a permissive literal arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalOr<T> {
    Signal(SignalRef),
    Value(T),
}

impl<T> SignalOr<T> {
    /// Construct the signal arm from an expression
    pub fn signal(expr: impl Into<String>) -> Self {
        SignalOr::Signal(SignalRef::new(expr))
    }

    /// Construct the literal arm
    pub fn value(value: impl Into<T>) -> Self {
        SignalOr::Value(value.into())
    }

    /// The signal expression, if this is the signal arm
    pub fn signal_expr(&self) -> Option<&str> {
        match self {
            SignalOr::Signal(r) => Some(r.signal.as_str()),
            SignalOr::Value(_) => None,
        }
    }
}

/// Chart padding: a uniform number or per-side object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(Num),
    PerSide {
        #[serde(skip_serializing_if = "Option::is_none")]
        left: Option<Num>,
        #[serde(skip_serializing_if = "Option::is_none")]
        right: Option<Num>,
        #[serde(skip_serializing_if = "Option::is_none")]
        top: Option<Num>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bottom: Option<Num>,
    },
}

impl From<i64> for Padding {
    fn from(n: i64) -> Self {
        Padding::Uniform(Num::Int(n))
    }
}

impl From<i32> for Padding {
    fn from(n: i32) -> Self {
        Padding::Uniform(Num::Int(n as i64))
    }
}

impl From<f64> for Padding {
    fn from(x: f64) -> Self {
        Padding::Uniform(Num::Float(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_num_roundtrip_preserves_representation() {
        let int: Num = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(int, Num::Int(0));
        assert_eq!(serde_json::to_value(int).unwrap(), json!(0));

        let float: Num = serde_json::from_value(json!(0.001)).unwrap();
        assert_eq!(float, Num::Float(0.001));
        assert_eq!(serde_json::to_value(float).unwrap(), json!(0.001));
    }

    #[test]
    fn test_scalar_deserialize_variants() {
        assert_eq!(
            serde_json::from_value::<Scalar>(json!("pdf")).unwrap(),
            Scalar::Str("pdf".to_string())
        );
        assert_eq!(
            serde_json::from_value::<Scalar>(json!(100)).unwrap(),
            Scalar::Int(100)
        );
        assert_eq!(
            serde_json::from_value::<Scalar>(json!(0.4)).unwrap(),
            Scalar::Float(0.4)
        );
        assert_eq!(
            serde_json::from_value::<Scalar>(json!(true)).unwrap(),
            Scalar::Bool(true)
        );
    }

    #[test]
    fn test_signal_or_prefers_signal_arm() {
        let v: SignalOr<Num> = serde_json::from_value(json!({"signal": "steps"})).unwrap();
        assert_eq!(v.signal_expr(), Some("steps"));

        let v: SignalOr<Num> = serde_json::from_value(json!(100)).unwrap();
        assert_eq!(v, SignalOr::Value(Num::Int(100)));
    }

    #[test]
    fn test_padding_uniform_serializes_bare() {
        let p: Padding = 5.into();
        assert_eq!(serde_json::to_value(&p).unwrap(), json!(5));

        let parsed: Padding = serde_json::from_value(json!({"left": 5, "top": 10})).unwrap();
        match parsed {
            Padding::PerSide { left, top, .. } => {
                assert_eq!(left, Some(Num::Int(5)));
                assert_eq!(top, Some(Num::Int(10)));
            }
            Padding::Uniform(_) => panic!("expected per-side padding"),
        }
    }
}
