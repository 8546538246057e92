//! End-to-end test against the canonical density-plot specification
//!
//! Builds the kernel-density example chart with the typed API, checks it
//! serializes to exactly the reference document, loads the document back,
//! and validates it cleanly.

use serde_json::{json, Value};

use vizspec::reader;
use vizspec::spec::{
    AggregateOp, Axis, Bind, DataFieldRef, DataSet, Distribution, Domain, Encode, Legend,
    LegendOrient, Mark, Range, Scale, Signal, SignalOr, Spec, Transform, ValueRef,
};
use vizspec::writer::{JsonWriter, Writer};

/// The reference document: a density estimate over a 2-d point cloud,
/// with a normal-distribution overlay and a rug of the raw samples.
fn reference_document() -> Value {
    json!({
        "$schema": "https://vega.github.io/schema/vega/v4.json",
        "width": 500,
        "height": 100,
        "padding": 5,

        "signals": [
            { "name": "bandwidth", "value": 0,
              "bind": {"input": "range", "min": 0, "max": 0.1, "step": 0.001} },
            { "name": "steps", "value": 100,
              "bind": {"input": "range", "min": 10, "max": 500, "step": 1} },
            { "name": "method", "value": "pdf",
              "bind": {"input": "radio", "options": ["pdf", "cdf"]} },
            { "name": "summary",
              "update": "data('summary')[0] || {mean: 0, stdev: 0}" }
        ],

        "data": [
            {
                "name": "points",
                "url": "data/normal-2d.json"
            },
            {
                "name": "summary",
                "source": "points",
                "transform": [
                    {
                        "type": "aggregate",
                        "fields": ["u", "u"],
                        "ops": ["mean", "stdev"],
                        "as": ["mean", "stdev"]
                    }
                ]
            },
            {
                "name": "density",
                "source": "points",
                "transform": [
                    {
                        "type": "density",
                        "extent": {"signal": "domain('xscale')"},
                        "steps": {"signal": "steps"},
                        "method": {"signal": "method"},
                        "distribution": {
                            "function": "kde",
                            "field": "u",
                            "bandwidth": {"signal": "bandwidth"}
                        }
                    }
                ]
            },
            {
                "name": "normal",
                "transform": [
                    {
                        "type": "density",
                        "extent": {"signal": "domain('xscale')"},
                        "steps": {"signal": "steps"},
                        "method": {"signal": "method"},
                        "distribution": {
                            "function": "normal",
                            "mean": {"signal": "summary.mean"},
                            "stdev": {"signal": "summary.stdev"}
                        }
                    }
                ]
            }
        ],

        "scales": [
            {
                "name": "xscale",
                "type": "linear",
                "range": "width",
                "domain": {"data": "points", "field": "u"},
                "nice": true
            },
            {
                "name": "yscale",
                "type": "linear",
                "range": "height", "round": true,
                "domain": {
                    "fields": [
                        {"data": "density", "field": "density"},
                        {"data": "normal", "field": "density"}
                    ]
                }
            },
            {
                "name": "color",
                "type": "ordinal",
                "domain": ["Normal Estimate", "Kernel Density Estimate"],
                "range": ["#444", "steelblue"]
            }
        ],

        "axes": [
            {"orient": "bottom", "scale": "xscale", "zindex": 1}
        ],

        "legends": [
            {"orient": "top-left", "fill": "color", "offset": 0, "zindex": 1}
        ],

        "marks": [
            {
                "type": "area",
                "from": {"data": "density"},
                "encode": {
                    "update": {
                        "x": {"scale": "xscale", "field": "value"},
                        "y": {"scale": "yscale", "field": "density"},
                        "y2": {"scale": "yscale", "value": 0},
                        "fill": {"signal": "scale('color', 'Kernel Density Estimate')"}
                    }
                }
            },
            {
                "type": "line",
                "from": {"data": "normal"},
                "encode": {
                    "update": {
                        "x": {"scale": "xscale", "field": "value"},
                        "y": {"scale": "yscale", "field": "density"},
                        "stroke": {"signal": "scale('color', 'Normal Estimate')"},
                        "strokeWidth": {"value": 2}
                    }
                }
            },
            {
                "type": "rect",
                "from": {"data": "points"},
                "encode": {
                    "enter": {
                        "x": {"scale": "xscale", "field": "u"},
                        "width": {"value": 1},
                        "y": {"value": 25, "offset": {"signal": "height"}},
                        "height": {"value": 5},
                        "fill": {"value": "steelblue"},
                        "fillOpacity": {"value": 0.4}
                    }
                }
            }
        ]
    })
}

/// The same chart, built with the typed API.
fn build_density_chart() -> Spec {
    Spec::new()
        .with_schema("https://vega.github.io/schema/vega/v4.json")
        .with_width(500)
        .with_height(100)
        .with_padding(5)
        .add_signal(
            Signal::new("bandwidth")
                .with_value(0)
                .with_bind(Bind::range(0, 0.1, 0.001)),
        )
        .add_signal(
            Signal::new("steps")
                .with_value(100)
                .with_bind(Bind::range(10, 500, 1)),
        )
        .add_signal(
            Signal::new("method")
                .with_value("pdf")
                .with_bind(Bind::radio(&["pdf", "cdf"])),
        )
        .add_signal(Signal::new("summary").with_update("data('summary')[0] || {mean: 0, stdev: 0}"))
        .add_data(DataSet::from_url("points", "data/normal-2d.json"))
        .add_data(
            DataSet::derived("summary", "points").with_transform(Transform::aggregate(
                &["u", "u"],
                &[AggregateOp::Mean, AggregateOp::Stdev],
                &["mean", "stdev"],
            )),
        )
        .add_data(
            DataSet::derived("density", "points").with_transform(
                Transform::density(Distribution::kde("u", SignalOr::signal("bandwidth")))
                .with_extent_signal("domain('xscale')")
                .with_steps_signal("steps")
                .with_method_signal("method"),
            ),
        )
        .add_data(
            DataSet::generated("normal").with_transform(
                Transform::density(Distribution::normal(
                    SignalOr::signal("summary.mean"),
                    SignalOr::signal("summary.stdev"),
                ))
                .with_extent_signal("domain('xscale')")
                .with_steps_signal("steps")
                .with_method_signal("method"),
            ),
        )
        .add_scale(
            Scale::linear("xscale")
                .with_domain(Domain::field("points", "u"))
                .with_range(Range::width())
                .nice(),
        )
        .add_scale(
            Scale::linear("yscale")
                .with_domain(Domain::fields(vec![
                    DataFieldRef::new("density", "density"),
                    DataFieldRef::new("normal", "density"),
                ]))
                .with_range(Range::height())
                .round(),
        )
        .add_scale(
            Scale::ordinal("color")
                .with_domain(Domain::discrete(&[
                    "Normal Estimate",
                    "Kernel Density Estimate",
                ]))
                .with_range(Range::palette(&["#444", "steelblue"])),
        )
        .add_axis(Axis::bottom("xscale").with_zindex(1))
        .add_legend(
            Legend::fill("color")
                .with_orient(LegendOrient::TopLeft)
                .with_offset(0)
                .with_zindex(1),
        )
        .add_mark(
            Mark::area().from_data("density").with_encode(
                Encode::new()
                    .on_update("x", ValueRef::scaled_field("xscale", "value"))
                    .on_update("y", ValueRef::scaled_field("yscale", "density"))
                    .on_update("y2", ValueRef::scaled_value("yscale", 0))
                    .on_update(
                        "fill",
                        ValueRef::signal("scale('color', 'Kernel Density Estimate')"),
                    ),
            ),
        )
        .add_mark(
            Mark::line().from_data("normal").with_encode(
                Encode::new()
                    .on_update("x", ValueRef::scaled_field("xscale", "value"))
                    .on_update("y", ValueRef::scaled_field("yscale", "density"))
                    .on_update("stroke", ValueRef::signal("scale('color', 'Normal Estimate')"))
                    .on_update("strokeWidth", ValueRef::value(2)),
            ),
        )
        .add_mark(
            Mark::rect().from_data("points").with_encode(
                Encode::new()
                    .on_enter("x", ValueRef::scaled_field("xscale", "u"))
                    .on_enter("width", ValueRef::value(1))
                    .on_enter("y", ValueRef::value(25).with_signal_offset("height"))
                    .on_enter("height", ValueRef::value(5))
                    .on_enter("fill", ValueRef::value("steelblue"))
                    .on_enter("fillOpacity", ValueRef::value(0.4)),
            ),
        )
}

#[test]
fn built_chart_serializes_to_reference_document() {
    let built = serde_json::to_value(build_density_chart()).unwrap();
    assert_eq!(built, reference_document());
}

#[test]
fn reference_document_loads_to_built_value() {
    let document = serde_json::to_string(&reference_document()).unwrap();
    let loaded = reader::from_json_str(&document).unwrap();
    assert_eq!(loaded, build_density_chart());
}

#[test]
fn density_chart_validates_without_findings() {
    let warnings = build_density_chart().validate().unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
}

#[test]
fn writer_output_roundtrips() {
    let spec = build_density_chart();
    let json = JsonWriter::new().write(&spec).unwrap();
    let reloaded = reader::from_json_str(&json).unwrap();
    assert_eq!(reloaded, spec);
}

#[test]
fn writer_preserves_pinned_schema() {
    let json = JsonWriter::new().write(&build_density_chart()).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["$schema"], "https://vega.github.io/schema/vega/v4.json");
}
