//! L3 Molecular Layer: a single declarative tween record

use serde::{Deserialize, Serialize};

use super::easing::EasingType;
use super::timing::lerp;
use crate::scene::{ElementId, Property};

/// One property of one element moving from `from` to `to` over
/// `[start, start + duration]` in timeline units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub target: ElementId,
    pub property: Property,
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub duration: f64,
    pub easing: EasingType,
}

impl Tween {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Whether the tween has begun at `time`
    #[inline]
    pub fn has_started(&self, time: f64) -> bool {
        time >= self.start
    }

    /// Local progress in [0, 1]; zero-length tweens finish the moment they start
    pub fn progress_at(&self, time: f64) -> f64 {
        if self.duration <= 0.0 {
            return if time >= self.start { 1.0 } else { 0.0 };
        }
        ((time - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated value at `time`, clamped to the endpoints outside the tween
    pub fn value_at(&self, time: f64) -> f64 {
        let t = self.easing.apply(self.progress_at(time));
        lerp(self.from, self.to, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween(easing: EasingType) -> Tween {
        Tween {
            target: ElementId(1),
            property: Property::Opacity,
            from: 0.3,
            to: 1.0,
            start: 1.0,
            duration: 0.5,
            easing,
        }
    }

    #[test]
    fn test_value_clamps_outside_range() {
        let t = tween(EasingType::Linear);
        assert_eq!(t.value_at(0.0), 0.3);
        assert_eq!(t.value_at(5.0), 1.0);
        assert!((t.value_at(1.25) - 0.65).abs() < 1e-12);
        assert_eq!(t.end(), 1.5);
    }

    #[test]
    fn test_zero_duration() {
        let t = Tween {
            duration: 0.0,
            ..tween(EasingType::Power1Out)
        };
        assert!(!t.has_started(0.99));
        assert_eq!(t.value_at(1.0), 1.0);
    }
}
