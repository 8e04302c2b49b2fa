use serde::{Deserialize, Serialize};

use super::Primitive;

/// Gradient start (cyan-400)
pub const GRADIENT_CYAN: &str = "#22d3ee";
/// Gradient middle (sky-400)
pub const GRADIENT_SKY: &str = "#38bdf8";
/// Gradient end (purple-500)
pub const GRADIENT_PURPLE: &str = "#a855f7";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient vector, 0.0..=1.0
    pub offset: f64,
    pub color: String,
}

/// A `<linearGradient>` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDef {
    pub id: String,
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
    pub stops: Vec<GradientStop>,
}

impl GradientDef {
    /// The diagonal cyan -> sky -> purple gradient used for icon strokes
    pub fn feature(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x1: "0%".to_string(),
            y1: "0%".to_string(),
            x2: "100%".to_string(),
            y2: "100%".to_string(),
            stops: vec![
                GradientStop { offset: 0.0, color: GRADIENT_CYAN.to_string() },
                GradientStop { offset: 0.5, color: GRADIENT_SKY.to_string() },
                GradientStop { offset: 1.0, color: GRADIENT_PURPLE.to_string() },
            ],
        }
    }

    /// Paint reference for a stroke attribute
    pub fn paint(&self) -> String {
        format!("url(#{})", self.id)
    }
}

/// A composite vector icon: its definitions plus the drawable primitives in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub name: String,
    pub view_box: Option<[f64; 4]>,
    pub defs: Vec<GradientDef>,
    pub primitives: Vec<Primitive>,
}

impl Icon {
    pub fn has_gradient(&self, id: &str) -> bool {
        self.defs.iter().any(|d| d.id == id)
    }

    /// Install a gradient unless one with the same id already exists.
    /// Returns whether anything was added.
    pub fn install_gradient(&mut self, gradient: GradientDef) -> bool {
        if self.has_gradient(&gradient.id) {
            return false;
        }
        // Definitions go first so later references resolve
        self.defs.insert(0, gradient);
        true
    }
}
