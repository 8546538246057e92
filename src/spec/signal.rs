//! Signal types for Vega specifications
//!
//! Signals are named reactive parameters. A signal carries an optional
//! initial value, an optional update expression deriving its value from
//! other parts of the specification, and an optional UI binding.

use serde::{Deserialize, Serialize};

use super::types::{Num, Scalar};

/// A named reactive parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal name, referenced from expressions and `{"signal": ...}` objects
    pub name: String,
    /// Initial value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
    /// Expression re-evaluated when its dependencies change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
    /// UI input binding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<Bind>,
}

impl Signal {
    /// Create a signal with no value, update, or binding
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            update: None,
            bind: None,
        }
    }

    /// Set the initial value
    pub fn with_value(mut self, value: impl Into<Scalar>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the update expression
    pub fn with_update(mut self, expr: impl Into<String>) -> Self {
        self.update = Some(expr.into());
        self
    }

    /// Attach a UI binding
    pub fn with_bind(mut self, bind: Bind) -> Self {
        self.bind = Some(bind);
        self
    }
}

/// UI input binding for a signal, tagged by input element kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "lowercase")]
pub enum Bind {
    /// Slider over a numeric interval
    Range {
        min: Num,
        max: Num,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<Num>,
    },
    /// Radio-button selection from fixed options
    Radio { options: Vec<Scalar> },
    /// Drop-down selection from fixed options
    Select { options: Vec<Scalar> },
    /// Boolean checkbox
    Checkbox,
}

impl Bind {
    /// Range slider binding
    pub fn range(min: impl Into<Num>, max: impl Into<Num>, step: impl Into<Num>) -> Self {
        Bind::Range {
            min: min.into(),
            max: max.into(),
            step: Some(step.into()),
        }
    }

    /// Radio binding over string options
    pub fn radio(options: &[&str]) -> Self {
        Bind::Radio {
            options: options.iter().map(|s| Scalar::from(*s)).collect(),
        }
    }

    /// Select binding over string options
    pub fn select(options: &[&str]) -> Self {
        Bind::Select {
            options: options.iter().map(|s| Scalar::from(*s)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bound_signal_serialization() {
        let signal = Signal::new("bandwidth")
            .with_value(0)
            .with_bind(Bind::range(0, 0.1, 0.001));

        assert_eq!(
            serde_json::to_value(&signal).unwrap(),
            json!({
                "name": "bandwidth",
                "value": 0,
                "bind": {"input": "range", "min": 0, "max": 0.1, "step": 0.001}
            })
        );
    }

    #[test]
    fn test_radio_signal_serialization() {
        let signal = Signal::new("method")
            .with_value("pdf")
            .with_bind(Bind::radio(&["pdf", "cdf"]));

        assert_eq!(
            serde_json::to_value(&signal).unwrap(),
            json!({
                "name": "method",
                "value": "pdf",
                "bind": {"input": "radio", "options": ["pdf", "cdf"]}
            })
        );
    }

    #[test]
    fn test_derived_signal_omits_empty_fields() {
        let signal = Signal::new("summary").with_update("data('summary')[0]");
        let value = serde_json::to_value(&signal).unwrap();

        assert_eq!(
            value,
            json!({"name": "summary", "update": "data('summary')[0]"})
        );
        assert!(value.get("value").is_none());
        assert!(value.get("bind").is_none());
    }

    #[test]
    fn test_bind_deserialize_by_input_tag() {
        let bind: Bind =
            serde_json::from_value(json!({"input": "range", "min": 10, "max": 500, "step": 1}))
                .unwrap();
        assert_eq!(bind, Bind::range(10, 500, 1));

        let bind: Bind = serde_json::from_value(json!({"input": "checkbox"})).unwrap();
        assert_eq!(bind, Bind::Checkbox);
    }
}
