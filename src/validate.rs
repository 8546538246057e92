//! Cross-reference validation for specifications
//!
//! A specification is a web of named references: scales name data sets,
//! marks name scales and data sets, expressions name signals. Validation
//! resolves all of them. Structural problems (duplicate names, unknown
//! references in typed fields, malformed transforms) are hard errors;
//! findings that rest on lexical expression scanning or color heuristics
//! are warnings.

use std::collections::HashSet;

use crate::error::{Result, VizspecError};
use crate::expr;
use crate::spec::{
    Bind, DataSet, Distribution, Domain, Range, Scalar, SignalOr, Spec, Transform, ValueRef,
};

/// A non-fatal validation finding
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Location within the specification, e.g. `data[2].transform[0]`
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a specification
///
/// Returns the list of warnings on success; returns a
/// [`VizspecError::ValidationError`] on the first structural violation.
pub fn validate(spec: &Spec) -> Result<Vec<ValidationWarning>> {
    let mut warnings = Vec::new();

    check_duplicate_names(spec)?;

    let data_names: HashSet<&str> = spec.data.iter().map(|d| d.name.as_str()).collect();
    let scale_names: HashSet<&str> = spec.scales.iter().map(|s| s.name.as_str()).collect();
    let signal_names: HashSet<&str> = spec.signals.iter().map(|s| s.name.as_str()).collect();

    check_signals(spec)?;
    check_data(spec, &data_names, &mut warnings)?;
    check_scales(spec, &data_names, &mut warnings)?;
    check_guides(spec, &scale_names)?;
    check_marks(spec, &data_names, &scale_names, &mut warnings)?;

    for (path, expression) in collect_expressions(spec) {
        check_expression(
            &path,
            &expression,
            &data_names,
            &scale_names,
            &signal_names,
            &mut warnings,
        );
    }

    Ok(warnings)
}

fn check_duplicate_names(spec: &Spec) -> Result<()> {
    find_duplicate("signal", spec.signals.iter().map(|s| s.name.as_str()))?;
    find_duplicate("data set", spec.data.iter().map(|d| d.name.as_str()))?;
    find_duplicate("scale", spec.scales.iter().map(|s| s.name.as_str()))?;
    find_duplicate(
        "mark",
        spec.marks.iter().filter_map(|m| m.name.as_deref()),
    )?;
    Ok(())
}

fn find_duplicate<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(VizspecError::ValidationError(format!(
                "Duplicate {} name '{}'",
                kind, name
            )));
        }
    }
    Ok(())
}

fn check_signals(spec: &Spec) -> Result<()> {
    for (idx, signal) in spec.signals.iter().enumerate() {
        if let Some(Bind::Range { min, max, step }) = &signal.bind {
            if min.as_f64() >= max.as_f64() {
                return Err(VizspecError::ValidationError(format!(
                    "signals[{}] ('{}'): bind range requires min < max, got [{}, {}]",
                    idx, signal.name, min, max
                )));
            }
            if let Some(step) = step {
                if step.as_f64() <= 0.0 {
                    return Err(VizspecError::ValidationError(format!(
                        "signals[{}] ('{}'): bind range step must be positive, got {}",
                        idx, signal.name, step
                    )));
                }
            }
        }
    }
    Ok(())
}

fn check_data(
    spec: &Spec,
    data_names: &HashSet<&str>,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    for (idx, data) in spec.data.iter().enumerate() {
        let path = format!("data[{}]", idx);

        if data.origin_count() > 1 {
            return Err(VizspecError::ValidationError(format!(
                "{} ('{}'): at most one of url, source, values may be set",
                path, data.name
            )));
        }
        if data.origin_count() == 0 && data.transform.is_empty() {
            warnings.push(ValidationWarning::new(
                &path,
                format!("data set '{}' has no origin and no transforms", data.name),
            ));
        }

        if let Some(source) = &data.source {
            if !data_names.contains(source.as_str()) {
                return Err(VizspecError::ValidationError(format!(
                    "{} ('{}'): unknown source data set '{}'",
                    path, data.name, source
                )));
            }
        }
        check_source_cycle(spec, data)?;

        for (t_idx, transform) in data.transform.iter().enumerate() {
            let t_path = format!("{}.transform[{}]", path, t_idx);
            check_transform(&t_path, transform, data_names, warnings)?;
        }
    }
    Ok(())
}

/// Each data set has at most one `source` edge, so a cycle is a plain
/// revisit along the chain.
fn check_source_cycle(spec: &Spec, start: &DataSet) -> Result<()> {
    let mut visited = HashSet::new();
    visited.insert(start.name.as_str());
    let mut current = start.source.as_deref();
    while let Some(name) = current {
        if !visited.insert(name) {
            return Err(VizspecError::ValidationError(format!(
                "data set '{}' participates in a source cycle through '{}'",
                start.name, name
            )));
        }
        current = spec.lookup_data(name).and_then(|d| d.source.as_deref());
    }
    Ok(())
}

fn check_transform(
    path: &str,
    transform: &Transform,
    data_names: &HashSet<&str>,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    match transform {
        Transform::Aggregate {
            fields, ops, output, ..
        } => {
            let lengths: Vec<usize> = [
                fields.as_ref().map(Vec::len),
                ops.as_ref().map(Vec::len),
                output.as_ref().map(Vec::len),
            ]
            .into_iter()
            .flatten()
            .collect();
            if lengths.windows(2).any(|pair| pair[0] != pair[1]) {
                return Err(VizspecError::ValidationError(format!(
                    "{}: aggregate fields, ops, and as must be parallel arrays",
                    path
                )));
            }
        }
        Transform::Density {
            steps, distribution, ..
        } => {
            if let Some(SignalOr::Value(0)) = steps {
                warnings.push(ValidationWarning::new(
                    path,
                    "density steps of 0 produces no samples",
                ));
            }
            match distribution {
                Distribution::Kde { field, from, .. } => {
                    if field.is_empty() {
                        return Err(VizspecError::ValidationError(format!(
                            "{}: kde distribution requires a field",
                            path
                        )));
                    }
                    if let Some(from) = from {
                        if !data_names.contains(from.as_str()) {
                            return Err(VizspecError::ValidationError(format!(
                                "{}: kde distribution references unknown data set '{}'",
                                path, from
                            )));
                        }
                    }
                }
                Distribution::Normal { .. } | Distribution::Uniform { .. } => {}
            }
        }
        Transform::Filter { .. } | Transform::Formula { .. } => {}
    }
    Ok(())
}

fn check_scales(
    spec: &Spec,
    data_names: &HashSet<&str>,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    for (idx, scale) in spec.scales.iter().enumerate() {
        let path = format!("scales[{}]", idx);

        if let Some(domain) = &scale.domain {
            for field_ref in domain.field_refs() {
                if !data_names.contains(field_ref.data.as_str()) {
                    return Err(VizspecError::ValidationError(format!(
                        "{} ('{}'): domain references unknown data set '{}'",
                        path, scale.name, field_ref.data
                    )));
                }
            }
            if let Domain::Fields(multi) = domain {
                if multi.fields.is_empty() {
                    return Err(VizspecError::ValidationError(format!(
                        "{} ('{}'): multi-field domain must name at least one field",
                        path, scale.name
                    )));
                }
            }
        }

        if let Some(Range::Values(values)) = &scale.range {
            lint_color_range(&format!("{}.range", path), &scale.name, values, warnings);
        }
    }
    Ok(())
}

/// Flag unparseable entries in a range that looks like a color palette:
/// all entries are strings and at least one parses as a CSS color.
fn lint_color_range(
    path: &str,
    scale_name: &str,
    values: &[Scalar],
    warnings: &mut Vec<ValidationWarning>,
) {
    let strings: Vec<&str> = values.iter().filter_map(Scalar::as_str).collect();
    if strings.len() != values.len() {
        return;
    }
    let parseable = strings
        .iter()
        .filter(|s| csscolorparser::parse(s).is_ok())
        .count();
    if parseable == 0 {
        return;
    }
    for entry in &strings {
        if csscolorparser::parse(entry).is_err() {
            warnings.push(ValidationWarning::new(
                path,
                format!(
                    "scale '{}' range mixes colors with non-color '{}'",
                    scale_name, entry
                ),
            ));
        }
    }
}

fn check_guides(spec: &Spec, scale_names: &HashSet<&str>) -> Result<()> {
    for (idx, axis) in spec.axes.iter().enumerate() {
        if !scale_names.contains(axis.scale.as_str()) {
            return Err(VizspecError::ValidationError(format!(
                "axes[{}]: unknown scale '{}'",
                idx, axis.scale
            )));
        }
    }
    for (idx, legend) in spec.legends.iter().enumerate() {
        for (channel, scale) in legend.scale_refs() {
            if !scale_names.contains(scale) {
                return Err(VizspecError::ValidationError(format!(
                    "legends[{}].{}: unknown scale '{}'",
                    idx, channel, scale
                )));
            }
        }
    }
    Ok(())
}

fn check_marks(
    spec: &Spec,
    data_names: &HashSet<&str>,
    scale_names: &HashSet<&str>,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    for (idx, mark) in spec.marks.iter().enumerate() {
        let path = format!("marks[{}]", idx);

        if let Some(from) = &mark.from {
            if !data_names.contains(from.data.as_str()) {
                return Err(VizspecError::ValidationError(format!(
                    "{} ({}): unknown data set '{}'",
                    path, mark.kind, from.data
                )));
            }
        }

        if let Some(encode) = &mark.encode {
            for (stage, channel, rule) in encode.rules() {
                let rule_path = format!("{}.encode.{}.{}", path, stage, channel);
                check_value_ref(&rule_path, rule, scale_names, warnings)?;
            }
        }
    }
    Ok(())
}

fn check_value_ref(
    path: &str,
    rule: &ValueRef,
    scale_names: &HashSet<&str>,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    if let Some(scale) = &rule.scale {
        if !scale_names.contains(scale.as_str()) {
            return Err(VizspecError::ValidationError(format!(
                "{}: unknown scale '{}'",
                path, scale
            )));
        }
    }
    if rule.value.is_some() && rule.field.is_some() {
        warnings.push(ValidationWarning::new(
            path,
            "both value and field set; field takes precedence",
        ));
    }
    Ok(())
}

/// Gather every expression the specification embeds, with its location
fn collect_expressions(spec: &Spec) -> Vec<(String, String)> {
    let mut exprs = Vec::new();
    let mut push = |path: String, expr: &str| exprs.push((path, expr.to_string()));

    for (idx, signal) in spec.signals.iter().enumerate() {
        if let Some(update) = &signal.update {
            push(format!("signals[{}].update", idx), update);
        }
    }

    for (d_idx, data) in spec.data.iter().enumerate() {
        for (t_idx, transform) in data.transform.iter().enumerate() {
            let base = format!("data[{}].transform[{}]", d_idx, t_idx);
            if let Transform::Density {
                extent,
                steps,
                method,
                distribution,
                ..
            } = transform
            {
                if let Some(expr) = extent.as_ref().and_then(SignalOr::signal_expr) {
                    push(format!("{}.extent", base), expr);
                }
                if let Some(expr) = steps.as_ref().and_then(SignalOr::signal_expr) {
                    push(format!("{}.steps", base), expr);
                }
                if let Some(expr) = method.as_ref().and_then(SignalOr::signal_expr) {
                    push(format!("{}.method", base), expr);
                }
                match distribution {
                    Distribution::Kde { bandwidth, .. } => {
                        if let Some(expr) = bandwidth.as_ref().and_then(SignalOr::signal_expr) {
                            push(format!("{}.distribution.bandwidth", base), expr);
                        }
                    }
                    Distribution::Normal { mean, stdev } => {
                        if let Some(expr) = mean.as_ref().and_then(SignalOr::signal_expr) {
                            push(format!("{}.distribution.mean", base), expr);
                        }
                        if let Some(expr) = stdev.as_ref().and_then(SignalOr::signal_expr) {
                            push(format!("{}.distribution.stdev", base), expr);
                        }
                    }
                    Distribution::Uniform { min, max } => {
                        if let Some(expr) = min.as_ref().and_then(SignalOr::signal_expr) {
                            push(format!("{}.distribution.min", base), expr);
                        }
                        if let Some(expr) = max.as_ref().and_then(SignalOr::signal_expr) {
                            push(format!("{}.distribution.max", base), expr);
                        }
                    }
                }
            }
        }
    }

    for (idx, scale) in spec.scales.iter().enumerate() {
        if let Some(Domain::Signal(signal_ref)) = &scale.domain {
            push(format!("scales[{}].domain", idx), &signal_ref.signal);
        }
        if let Some(Range::Signal(signal_ref)) = &scale.range {
            push(format!("scales[{}].range", idx), &signal_ref.signal);
        }
    }

    for (idx, mark) in spec.marks.iter().enumerate() {
        if let Some(encode) = &mark.encode {
            for (stage, channel, rule) in encode.rules() {
                let base = format!("marks[{}].encode.{}.{}", idx, stage, channel);
                if let Some(expr) = &rule.signal {
                    push(base.clone(), expr);
                }
                if let Some(expr) = rule.offset.as_ref().and_then(SignalOr::signal_expr) {
                    push(format!("{}.offset", base), expr);
                }
            }
        }
    }

    exprs
}

fn check_expression(
    path: &str,
    expression: &str,
    data_names: &HashSet<&str>,
    scale_names: &HashSet<&str>,
    signal_names: &HashSet<&str>,
    warnings: &mut Vec<ValidationWarning>,
) {
    for name in expr::data_refs(expression) {
        if !data_names.contains(name.as_str()) {
            warnings.push(ValidationWarning::new(
                path,
                format!("expression references unknown data set '{}'", name),
            ));
        }
    }
    for name in expr::scale_refs(expression) {
        if !scale_names.contains(name.as_str()) {
            warnings.push(ValidationWarning::new(
                path,
                format!("expression references unknown scale '{}'", name),
            ));
        }
    }
    for name in expr::signal_idents(expression) {
        if !expr::is_builtin(&name) && !signal_names.contains(name.as_str()) {
            warnings.push(ValidationWarning::new(
                path,
                format!("expression references unknown signal '{}'", name),
            ));
        }
    }
}
