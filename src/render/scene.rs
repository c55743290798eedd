use serde::{Deserialize, Serialize};

use crate::core::{CandleClass, ValueRange, Viewport};
use crate::error::{ChartError, ChartResult};

pub const SCENE_JSON_SCHEMA_V1: u32 = 1;

/// Semantic class a renderer styles a shape by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeClass {
    Bull,
    Bear,
    Grid,
    Label,
}

impl From<CandleClass> for ShapeClass {
    fn from(class: CandleClass) -> Self {
        match class {
            CandleClass::Bull => Self::Bull,
            CandleClass::Bear => Self::Bear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Price,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WickPart {
    Upper,
    Lower,
}

/// Horizontal text alignment relative to the label's `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One drawable element of a scene, in plot pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    GridLine {
        axis: Axis,
        segment: Segment,
    },
    CandleBody {
        index: usize,
        class: CandleClass,
        rect: Rect,
    },
    Wick {
        index: usize,
        class: CandleClass,
        part: WickPart,
        segment: Segment,
    },
    TickLabel {
        axis: Axis,
        text: String,
        x: f64,
        y: f64,
        align: TextHAlign,
    },
}

impl Shape {
    #[must_use]
    pub fn class(&self) -> ShapeClass {
        match self {
            Self::GridLine { .. } => ShapeClass::Grid,
            Self::CandleBody { class, .. } | Self::Wick { class, .. } => (*class).into(),
            Self::TickLabel { .. } => ShapeClass::Label,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::GridLine { segment, .. } | Self::Wick { segment, .. } => segment.validate(),
            Self::CandleBody { rect, .. } => rect.validate(),
            Self::TickLabel { text, x, y, .. } => {
                if text.is_empty() {
                    return Err(ChartError::InvalidData(
                        "tick label must not be empty".to_owned(),
                    ));
                }
                if !x.is_finite() || !y.is_finite() {
                    return Err(ChartError::InvalidData(
                        "label coordinates must be finite".to_owned(),
                    ));
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Hover details for one candle, laid out to the right of its body.
///
/// The renderer decides when a tooltip is visible and sizes its backdrop from
/// the measured text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub index: usize,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub lines: Vec<TooltipLine>,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub title: Option<String>,
    /// Full container, including axis reservations.
    pub extent: Viewport,
    /// Candle area at the container's top-left corner.
    pub plot: Viewport,
    pub range: ValueRange,
    pub price_step: f64,
    pub time_spacing: usize,
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub tooltips: Vec<Tooltip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneJsonContractV1 {
    pub schema_version: u32,
    pub scene: Scene,
}

impl Scene {
    pub fn validate(&self) -> ChartResult<()> {
        self.extent.ensure_valid()?;
        self.plot.ensure_valid()?;
        for shape in &self.shapes {
            shape.validate()?;
        }
        for tooltip in &self.tooltips {
            if !tooltip.anchor_x.is_finite() || !tooltip.anchor_y.is_finite() {
                return Err(ChartError::InvalidData(
                    "tooltip anchor must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }

    pub fn candle_bodies(&self) -> impl Iterator<Item = (usize, CandleClass, Rect)> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::CandleBody { index, class, rect } => Some((*index, *class, *rect)),
            _ => None,
        })
    }

    pub fn wicks(&self) -> impl Iterator<Item = (usize, WickPart, Segment)> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Wick {
                index,
                part,
                segment,
                ..
            } => Some((*index, *part, *segment)),
            _ => None,
        })
    }

    pub fn grid_lines(&self, axis: Axis) -> impl Iterator<Item = Segment> + '_ {
        self.shapes.iter().filter_map(move |shape| match shape {
            Shape::GridLine {
                axis: line_axis,
                segment,
            } if *line_axis == axis => Some(*segment),
            _ => None,
        })
    }

    pub fn labels(&self, axis: Axis) -> impl Iterator<Item = &str> + '_ {
        self.shapes.iter().filter_map(move |shape| match shape {
            Shape::TickLabel {
                axis: label_axis,
                text,
                ..
            } if *label_axis == axis => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = SceneJsonContractV1 {
            schema_version: SCENE_JSON_SCHEMA_V1,
            scene: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize scene contract v1: {e}"))
        })
    }

    /// Accepts either a bare scene or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(scene) = serde_json::from_str::<Scene>(input) {
            return Ok(scene);
        }
        let payload: SceneJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse scene json payload: {e}"))
        })?;
        if payload.schema_version != SCENE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported scene schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.scene)
    }
}
