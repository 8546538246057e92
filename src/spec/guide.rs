//! Axis and legend types for Vega specifications
//!
//! Guides are visual aids bound to a scale: axes for positional scales,
//! legends for color/size/shape scales. Both carry an orientation and a
//! `zindex` draw-order attribute.

use serde::{Deserialize, Serialize};

use super::types::Num;

/// An axis bound to a positional scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Placement relative to the chart body
    pub orient: AxisOrient,
    /// Name of the scale this axis visualizes
    pub scale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Tick label format string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
    #[serde(rename = "tickCount", skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<u32>,
    /// Pixel offset from the chart edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Num>,
    /// Draw order relative to marks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zindex: Option<u32>,
}

impl Axis {
    /// Axis on the given side of the chart
    pub fn new(orient: AxisOrient, scale: impl Into<String>) -> Self {
        Self {
            orient,
            scale: scale.into(),
            title: None,
            format: None,
            grid: None,
            tick_count: None,
            offset: None,
            zindex: None,
        }
    }

    /// Bottom axis
    pub fn bottom(scale: impl Into<String>) -> Self {
        Self::new(AxisOrient::Bottom, scale)
    }

    /// Left axis
    pub fn left(scale: impl Into<String>) -> Self {
        Self::new(AxisOrient::Left, scale)
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the draw order
    pub fn with_zindex(mut self, zindex: u32) -> Self {
        self.zindex = Some(zindex);
        self
    }
}

/// Axis placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrient {
    Top,
    Bottom,
    Left,
    Right,
}

/// A legend bound to one or more non-positional scales
///
/// Each channel field (`fill`, `stroke`, `size`, ...) names the scale
/// whose mapping the legend explains. At least one must be set for the
/// legend to be meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<LegendOrient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Pixel offset from its anchor position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Num>,
    /// Draw order relative to marks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zindex: Option<u32>,
}

impl Legend {
    /// Legend for a fill-color scale
    pub fn fill(scale: impl Into<String>) -> Self {
        Self {
            fill: Some(scale.into()),
            ..Self::default()
        }
    }

    /// Legend for a stroke-color scale
    pub fn stroke(scale: impl Into<String>) -> Self {
        Self {
            stroke: Some(scale.into()),
            ..Self::default()
        }
    }

    /// Set the placement
    pub fn with_orient(mut self, orient: LegendOrient) -> Self {
        self.orient = Some(orient);
        self
    }

    /// Set the anchor offset
    pub fn with_offset(mut self, offset: impl Into<Num>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Set the draw order
    pub fn with_zindex(mut self, zindex: u32) -> Self {
        self.zindex = Some(zindex);
        self
    }

    /// Scale names referenced by this legend's channels
    pub fn scale_refs(&self) -> Vec<(&'static str, &str)> {
        [
            ("fill", &self.fill),
            ("stroke", &self.stroke),
            ("size", &self.size),
            ("shape", &self.shape),
            ("opacity", &self.opacity),
        ]
        .into_iter()
        .filter_map(|(channel, scale)| scale.as_deref().map(|s| (channel, s)))
        .collect()
    }
}

/// Legend placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendOrient {
    None,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_axis_serialization() {
        let axis = Axis::bottom("xscale").with_zindex(1);
        assert_eq!(
            serde_json::to_value(&axis).unwrap(),
            json!({"orient": "bottom", "scale": "xscale", "zindex": 1})
        );
    }

    #[test]
    fn test_legend_serialization() {
        let legend = Legend::fill("color")
            .with_orient(LegendOrient::TopLeft)
            .with_offset(0)
            .with_zindex(1);

        assert_eq!(
            serde_json::to_value(&legend).unwrap(),
            json!({"orient": "top-left", "fill": "color", "offset": 0, "zindex": 1})
        );
    }

    #[test]
    fn test_legend_scale_refs() {
        let legend = Legend::fill("color");
        assert_eq!(legend.scale_refs(), vec![("fill", "color")]);

        let empty = Legend::default();
        assert!(empty.scale_refs().is_empty());
    }

    #[test]
    fn test_legend_orient_kebab_case() {
        assert_eq!(
            serde_json::to_value(LegendOrient::BottomRight).unwrap(),
            json!("bottom-right")
        );
        let orient: LegendOrient = serde_json::from_value(json!("top-left")).unwrap();
        assert_eq!(orient, LegendOrient::TopLeft);
    }
}
