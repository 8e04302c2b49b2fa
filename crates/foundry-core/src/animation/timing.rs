//! L4 Atomic Layer: Time calculation utilities
//!
//! Pure functions for progress, interpolation and frame-rate independent
//! damping. Time is always passed in explicitly so callers stay deterministic.

use std::time::Duration;

/// Calculate progress (0.0 to 1.0) from elapsed time and total duration
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation of `duration` is complete after `elapsed`
#[inline]
pub fn is_complete(elapsed: Duration, duration: Duration) -> bool {
    elapsed >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Inverse of [`lerp`]: where `value` sits between `from` and `to`, clamped to [0, 1]
#[inline]
pub fn inverse_lerp(from: f64, to: f64, value: f64) -> f64 {
    if (to - from).abs() < f64::EPSILON {
        return if value >= to { 1.0 } else { 0.0 };
    }
    ((value - from) / (to - from)).clamp(0.0, 1.0)
}

/// Frame-rate independent exponential approach of `current` towards `target`.
///
/// `lambda` is the per-second decay rate; a per-frame lerp factor `f` at
/// 60 Hz corresponds to `lambda = f * 60`.
#[inline]
pub fn damp(current: f64, target: f64, lambda: f64, dt: Duration) -> f64 {
    lerp(current, target, 1.0 - (-lambda * dt.as_secs_f64()).exp())
}
