//! Lexical scanning of grammar expressions
//!
//! Specifications embed an expression language in signal updates and
//! `{"signal": ...}` references, e.g. `data('summary')[0] || {mean: 0}`
//! or `scale('color', 'Kernel Density Estimate')`. vizspec does not
//! evaluate these; it scans them for the names they mention so that
//! validation can resolve references. Scanning is lexical and
//! intentionally permissive; its findings feed warnings only.

use std::sync::OnceLock;

use regex::Regex;

/// Names predefined by the expression language or the chart layout.
/// References to these never count as unresolved.
const BUILTINS: &[&str] = &[
    "width",
    "height",
    "padding",
    "datum",
    "event",
    "item",
    "parent",
    "group",
    "cursor",
    "now",
    "PI",
    "E",
    "LN2",
    "LN10",
    "LOG2E",
    "LOG10E",
    "SQRT1_2",
    "SQRT2",
    "MAX_VALUE",
    "MIN_VALUE",
];

/// Expression-language literals, never identifier references
const LITERALS: &[&str] = &["true", "false", "null", "undefined", "NaN", "Infinity"];

/// True if `name` is predefined by the expression language
pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

fn data_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bdata\(\s*(?:'([^']*)'|"([^"]*)")"#).expect("data-call pattern is valid")
    })
}

fn scale_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\b(?:scale|domain|range|bandwidth)\(\s*(?:'([^']*)'|"([^"]*)")"#)
            .expect("scale-call pattern is valid")
    })
}

fn string_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#).expect("string pattern is valid")
    })
}

fn ident_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").expect("ident pattern is valid"))
}

/// Data-set names passed to `data(...)` calls
pub fn data_refs(expr: &str) -> Vec<String> {
    capture_names(data_call_re(), expr)
}

/// Scale names passed to `scale(...)`, `domain(...)`, `range(...)`, or
/// `bandwidth(...)` calls
pub fn scale_refs(expr: &str) -> Vec<String> {
    capture_names(scale_call_re(), expr)
}

fn capture_names(re: &Regex, expr: &str) -> Vec<String> {
    let mut names = Vec::new();
    for caps in re.captures_iter(expr) {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string());
        if let Some(name) = name {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Bare identifiers that plausibly reference signals
///
/// Excluded: string-literal contents, function-call names, member
/// accesses after `.` (dotted paths resolve to their head), object keys,
/// and expression-language literals. Results are deduplicated in order
/// of first appearance.
pub fn signal_idents(expr: &str) -> Vec<String> {
    // Blank out string literals in place so match offsets stay valid.
    let stripped = string_literal_re().replace_all(expr, |caps: &regex::Captures| {
        " ".repeat(caps[0].len())
    });
    let bytes = stripped.as_bytes();

    let mut idents = Vec::new();
    for m in ident_re().find_iter(&stripped) {
        let name = m.as_str();
        if LITERALS.contains(&name) {
            continue;
        }
        // Member access: `summary.mean` contributes only `summary`.
        if preceded_by(bytes, m.start(), b'.') {
            continue;
        }
        let next = next_significant(bytes, m.end());
        // Function-call name: `data(...)`, `sqrt(...)`.
        if next == Some(b'(') {
            continue;
        }
        // Object key: `{mean: 0, stdev: 0}`. A `:` after a ternary branch
        // is not preceded by `{` or `,`.
        if next == Some(b':') {
            let prev = prev_significant(bytes, m.start());
            if prev == Some(b'{') || prev == Some(b',') {
                continue;
            }
        }
        if !idents.iter().any(|existing| existing == name) {
            idents.push(name.to_string());
        }
    }
    idents
}

fn preceded_by(bytes: &[u8], start: usize, wanted: u8) -> bool {
    prev_significant(bytes, start) == Some(wanted)
}

fn prev_significant(bytes: &[u8], start: usize) -> Option<u8> {
    bytes[..start]
        .iter()
        .rev()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
}

fn next_significant(bytes: &[u8], end: usize) -> Option<u8> {
    bytes[end..]
        .iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_data_refs() {
        assert_eq!(
            data_refs("data('summary')[0] || {mean: 0, stdev: 0}"),
            vec!["summary"]
        );
        assert_eq!(data_refs(r#"data("points").length"#), vec!["points"]);
        assert!(data_refs("domain('xscale')").is_empty());
    }

    #[test]
    fn test_scale_refs() {
        assert_eq!(scale_refs("domain('xscale')"), vec!["xscale"]);
        assert_eq!(
            scale_refs("scale('color', 'Kernel Density Estimate')"),
            vec!["color"]
        );
        assert_eq!(
            scale_refs("scale('color', domain('xscale')[0])"),
            vec!["color", "xscale"]
        );
    }

    #[test]
    fn test_signal_idents_skip_calls_and_strings() {
        // `data` is a call, `summary` is quoted, `mean`/`stdev` are keys
        assert!(signal_idents("data('summary')[0] || {mean: 0, stdev: 0}").is_empty());
        assert_eq!(signal_idents("steps"), vec!["steps"]);
        assert_eq!(signal_idents("summary.mean"), vec!["summary"]);
        assert_eq!(
            signal_idents("bandwidth * 2 + offset"),
            vec!["bandwidth", "offset"]
        );
    }

    #[test]
    fn test_signal_idents_ternary_branch_is_kept() {
        // `b` sits before `:` but is a ternary branch, not an object key
        assert_eq!(signal_idents("a ? b : c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_signal_idents_literals_excluded() {
        assert_eq!(signal_idents("flag ? width : null"), vec!["flag", "width"]);
        assert!(signal_idents("true || false").is_empty());
    }

    #[test]
    fn test_signal_idents_dedupe_in_order() {
        assert_eq!(
            signal_idents("steps + steps * method"),
            vec!["steps", "method"]
        );
    }

    #[test]
    fn test_is_builtin() {
        assert!(is_builtin("height"));
        assert!(is_builtin("datum"));
        assert!(!is_builtin("bandwidth"));
    }

    proptest! {
        #[test]
        fn prop_bare_ident_is_found(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
            prop_assume!(!super::LITERALS.contains(&name.as_str()));
            prop_assert_eq!(signal_idents(&name), vec![name.clone()]);
        }

        #[test]
        fn prop_data_call_is_extracted(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
            let expr = format!("data('{}')[0]", name);
            prop_assert_eq!(data_refs(&expr), vec![name.clone()]);
            // The quoted name never leaks into the identifier scan.
            prop_assert!(signal_idents(&expr).is_empty());
        }

        #[test]
        fn prop_scan_never_panics(expr in ".{0,64}") {
            let _ = data_refs(&expr);
            let _ = scale_refs(&expr);
            let _ = signal_idents(&expr);
        }
    }
}
