//! L4 Atomic Layer: Pure easing functions
//!
//! Maps input progress [0, 1] to output [0, 1] with various acceleration
//! curves. Used by both timeline tweens and programmatic scroll jumps.

use serde::{Deserialize, Serialize};

/// Easing curve selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end value when complete
    None,
    Linear,
    /// Cubic ease-out
    #[default]
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Quadratic ease-out
    Power1Out,
    /// Quadratic ease-in-out
    Power1InOut,
    /// Cubic ease-in-out
    Power2InOut,
}

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => if t < 1.0 { 0.0 } else { 1.0 },
            EasingType::Linear => t,
            EasingType::Cubic => power_ease_out(t, 3),
            EasingType::Quintic => power_ease_out(t, 5),
            EasingType::EaseOut => exponential_ease_out(t),
            EasingType::Power1Out => power_ease_out(t, 2),
            EasingType::Power1InOut => power_ease_in_out(t, 2),
            EasingType::Power2InOut => power_ease_in_out(t, 3),
        }
    }
}

/// Power ease-out: f(t) = 1 - (1-t)^n
#[inline]
fn power_ease_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// Power ease-in-out, symmetric around t = 0.5
#[inline]
fn power_ease_in_out(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(n) / 2.0
    } else {
        1.0 - (2.0 - 2.0 * t).powi(n) / 2.0
    }
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}
