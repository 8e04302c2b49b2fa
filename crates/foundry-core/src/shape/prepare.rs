//! Puts stroked shapes into their "about to be drawn" state.
//!
//! Measurement never fails from the caller's point of view: an unusable
//! length is replaced by [`LengthPolicy::default_length`] and logged.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{GradientDef, ShapeError};
use crate::config::SequenceConfig;
use crate::scene::{ElementId, LineCap, Property, Stage, StrokeStyle};

/// Width of prepared icon strokes
pub const ICON_STROKE_WIDTH: f64 = 2.0;

/// How raw measurements turn into dash lengths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthPolicy {
    /// Used whenever a length is missing, non-finite or not positive
    pub default_length: f64,
    /// Applied to icon strokes so the dash never clips at the end cap
    pub inflation: f64,
}

impl Default for LengthPolicy {
    fn default() -> Self {
        Self {
            default_length: 500.0,
            inflation: 1.02,
        }
    }
}

impl From<&SequenceConfig> for LengthPolicy {
    fn from(config: &SequenceConfig) -> Self {
        Self {
            default_length: config.default_length,
            inflation: config.length_inflation,
        }
    }
}

impl LengthPolicy {
    fn sanitize(&self, length: f64) -> f64 {
        if length.is_finite() && length > 0.0 {
            length
        } else {
            self.default_length
        }
    }
}

/// A prepared stroke: its dash length and the offset it starts from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    pub target: ElementId,
    pub length: f64,
    /// Undrawn portion; starts equal to `length`
    pub offset: f64,
}

impl PathSpec {
    fn hidden(target: ElementId, length: f64) -> Self {
        Self {
            target,
            length,
            offset: length,
        }
    }
}

/// Result of [`prepare_icon`]: the icon's primitives in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparedIcon {
    pub paths: Vec<PathSpec>,
}

impl PreparedIcon {
    pub fn targets(&self) -> Vec<ElementId> {
        self.paths.iter().map(|p| p.target).collect()
    }
}

fn measure(stage: &dyn Stage, target: ElementId) -> Result<f64, ShapeError> {
    match stage.primitive(target) {
        Some(primitive) => primitive.measure(),
        None => Err(ShapeError::Unsupported(format!("missing element {}", target))),
    }
}

/// Measure a connector line and hide it: full dash offset, zero opacity.
pub fn prepare_line(stage: &mut dyn Stage, target: ElementId, policy: &LengthPolicy) -> PathSpec {
    let length = match measure(stage, target) {
        Ok(length) => policy.sanitize(length),
        Err(e) => {
            warn!("Could not measure line {}: {}", target, e);
            policy.default_length
        }
    };

    stage.set(target, Property::StrokeDasharray, length);
    stage.set(target, Property::StrokeDashoffset, length);
    stage.set(target, Property::Opacity, 0.0);

    PathSpec::hidden(target, length)
}

/// Prepare every drawable primitive of a composite icon for a stroke draw.
///
/// Installs the gradient `gradient_id` once, measures each primitive
/// (inflated by the policy factor), and styles it as a hidden gradient
/// stroke with the given cap.
pub fn prepare_icon(
    stage: &mut dyn Stage,
    icon: ElementId,
    gradient_id: &str,
    cap: LineCap,
    policy: &LengthPolicy,
) -> PreparedIcon {
    let gradient = GradientDef::feature(gradient_id);
    let paint = gradient.paint();

    let targets: Vec<ElementId> = match stage.icon_mut(icon) {
        Some(icon) => {
            if icon.install_gradient(gradient) {
                debug!("Installed gradient {} on icon {}", gradient_id, icon.name);
            }
            icon.primitives.iter().map(|p| p.id).collect()
        }
        None => {
            warn!("Icon {} not found, nothing to prepare", icon);
            return PreparedIcon::default();
        }
    };

    let mut paths = Vec::with_capacity(targets.len());
    for target in targets {
        let length = match measure(stage, target) {
            Ok(length) => policy.sanitize(length * policy.inflation),
            Err(e) => {
                warn!("Could not calculate length for primitive {}: {}", target, e);
                policy.default_length
            }
        };

        stage.set_stroke(
            target,
            StrokeStyle {
                fill: None,
                stroke: paint.clone(),
                width: ICON_STROKE_WIDTH,
                line_cap: cap,
                line_join: LineCap::Round,
            },
        );
        stage.set(target, Property::StrokeDasharray, length);
        stage.set(target, Property::StrokeDashoffset, length);

        paths.push(PathSpec::hidden(target, length));
    }

    PreparedIcon { paths }
}
