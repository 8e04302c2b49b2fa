//! Drawable shapes and their stroke lengths
//!
//! A [`Primitive`] is one stroked element of an icon or connector. Its
//! [`ShapeKind`] decides how the length is computed when the host cannot
//! measure it natively.

pub mod builtin;
pub mod icon;
pub mod prepare;
pub mod svg;

use kurbo::{BezPath, Shape as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;
use crate::scene::ElementId;

pub use icon::{GradientDef, GradientStop, Icon};
pub use prepare::{prepare_icon, prepare_line, LengthPolicy, PathSpec, PreparedIcon};

/// Why a shape could not be measured
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("unsupported shape <{0}>")]
    Unsupported(String),

    #[error("invalid {attribute} on <{tag}>: {value}")]
    InvalidAttribute {
        tag: String,
        attribute: String,
        value: f64,
    },

    #[error("malformed path data: {0}")]
    PathData(String),
}

/// Tolerance for curve and ellipse arc lengths
const PERIMETER_ACCURACY: f64 = 1e-4;

/// Geometry of a drawable primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { r: f64 },
    Ellipse { rx: f64, ry: f64 },
    Rect { width: f64, height: f64 },
    /// `<polyline>` (open) or `<polygon>` (closed)
    Polyline { points: Vec<Point>, closed: bool },
    /// `<path>` with its `d` attribute
    Path { data: String },
    Unknown { tag: String },
}

impl ShapeKind {
    /// Element name this shape came from
    pub fn tag(&self) -> &str {
        match self {
            ShapeKind::Line { .. } => "line",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Ellipse { .. } => "ellipse",
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::Polyline { closed: false, .. } => "polyline",
            ShapeKind::Polyline { closed: true, .. } => "polygon",
            ShapeKind::Path { .. } => "path",
            ShapeKind::Unknown { tag } => tag,
        }
    }

    /// Geometric stroke length
    pub fn length(&self) -> Result<f64, ShapeError> {
        match self {
            ShapeKind::Line { x1, y1, x2, y2 } => {
                Ok(kurbo::Line::new((*x1, *y1), (*x2, *y2)).perimeter(PERIMETER_ACCURACY))
            }
            ShapeKind::Circle { r } => {
                self.non_negative("r", *r)?;
                Ok(kurbo::Circle::new((0.0, 0.0), *r).perimeter(PERIMETER_ACCURACY))
            }
            ShapeKind::Ellipse { rx, ry } => {
                self.non_negative("rx", *rx)?;
                self.non_negative("ry", *ry)?;
                Ok(kurbo::Ellipse::new((0.0, 0.0), (*rx, *ry), 0.0).perimeter(PERIMETER_ACCURACY))
            }
            ShapeKind::Rect { width, height } => {
                self.non_negative("width", *width)?;
                self.non_negative("height", *height)?;
                Ok(kurbo::Rect::new(0.0, 0.0, *width, *height).perimeter(PERIMETER_ACCURACY))
            }
            ShapeKind::Polyline { points, closed } => {
                let mut path = BezPath::new();
                for (i, p) in points.iter().enumerate() {
                    if i == 0 {
                        path.move_to((p.x, p.y));
                    } else {
                        path.line_to((p.x, p.y));
                    }
                }
                if *closed && !points.is_empty() {
                    path.close_path();
                }
                Ok(path.perimeter(PERIMETER_ACCURACY))
            }
            ShapeKind::Path { data } => Ok(parse_path(data)?.perimeter(PERIMETER_ACCURACY)),
            ShapeKind::Unknown { tag } => Err(ShapeError::Unsupported(tag.clone())),
        }
    }

    fn non_negative(&self, attribute: &str, value: f64) -> Result<(), ShapeError> {
        if value < 0.0 {
            return Err(ShapeError::InvalidAttribute {
                tag: self.tag().to_string(),
                attribute: attribute.to_string(),
                value,
            });
        }
        Ok(())
    }
}

/// Parse SVG path data; it must open with a moveto
pub fn parse_path(data: &str) -> Result<BezPath, ShapeError> {
    let trimmed = data.trim_start();
    if !trimmed.starts_with(['M', 'm']) {
        return Err(ShapeError::PathData(format!(
            "path must start with a moveto: '{}'",
            trimmed.chars().take(16).collect::<String>()
        )));
    }
    BezPath::from_svg(trimmed).map_err(|e| ShapeError::PathData(e.to_string()))
}

/// A stroked element owned by the host view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub id: ElementId,
    pub shape: ShapeKind,
    /// Length reported by the host's own measurement, when it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_length: Option<f64>,
}

impl Primitive {
    pub fn new(id: ElementId, shape: ShapeKind) -> Self {
        Self {
            id,
            shape,
            native_length: None,
        }
    }

    pub fn with_native_length(mut self, length: f64) -> Self {
        self.native_length = Some(length);
        self
    }

    /// Measured length: the native measurement when it is usable, otherwise the shape formula
    pub fn measure(&self) -> Result<f64, ShapeError> {
        match self.native_length {
            Some(length) if length.is_finite() => Ok(length),
            _ => self.shape.length(),
        }
    }
}
