//! L3 Molecular Layer: time-driven yoyo pulse
//!
//! Unlike the scroll-bound timeline this advances with wall-clock frames and
//! repeats forever until killed. A killed pulse never writes again.

use std::time::Duration;

use super::easing::EasingType;
use super::timing::lerp;
use crate::config::SequenceConfig;
use crate::scene::{ElementId, Property, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseState {
    Running,
    Killed,
}

#[derive(Debug, Clone)]
pub struct Pulse {
    target: ElementId,
    rest: f64,
    peak: f64,
    /// One grow or one shrink
    half_period: Duration,
    easing: EasingType,
    elapsed: Duration,
    state: PulseState,
}

impl Pulse {
    pub fn new(target: ElementId, peak: f64, half_period: Duration) -> Self {
        Self {
            target,
            rest: Property::Scale.initial(),
            peak,
            half_period,
            easing: EasingType::Power1InOut,
            elapsed: Duration::ZERO,
            state: PulseState::Running,
        }
    }

    pub fn from_config(target: ElementId, config: &SequenceConfig) -> Self {
        let half_period = Duration::try_from_secs_f64(config.pulse_period_secs).unwrap_or(Duration::ZERO);
        Self::new(target, config.pulse_scale, half_period)
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn state(&self) -> PulseState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PulseState::Running
    }

    pub fn rest(&self) -> f64 {
        self.rest
    }

    /// Current scale: even half-cycles grow, odd ones shrink
    pub fn value(&self) -> f64 {
        if self.half_period.is_zero() {
            return self.rest;
        }
        let cycles = self.elapsed.as_secs_f64() / self.half_period.as_secs_f64();
        let frac = cycles.fract();
        let t = if (cycles.floor() as u64) % 2 == 0 { frac } else { 1.0 - frac };
        lerp(self.rest, self.peak, self.easing.apply(t))
    }

    /// Advance by one frame and write the scale. Returns whether anything was written.
    pub fn tick(&mut self, dt: Duration, stage: &mut dyn Stage) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed += dt;
        stage.set(self.target, Property::Scale, self.value());
        true
    }

    /// Stop for good. Returns true if the pulse was still running.
    pub fn kill(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = PulseState::Killed;
        was_running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    fn pulse(target: ElementId) -> Pulse {
        Pulse::new(target, 1.02, Duration::from_millis(1200))
    }

    #[test]
    fn test_yoyo_shape() {
        let mut scene = Scene::new();
        let button = scene.add_block("button");
        let mut p = pulse(button);

        assert_eq!(p.value(), 1.0);
        p.tick(Duration::from_millis(600), &mut scene);
        assert!((scene.value(button, Property::Scale) - 1.01).abs() < 1e-9);
        p.tick(Duration::from_millis(600), &mut scene);
        assert!((p.value() - 1.02).abs() < 1e-9);
        p.tick(Duration::from_millis(1200), &mut scene);
        assert!((p.value() - 1.0).abs() < 1e-9);
        assert!(p.value() <= 1.02 + 1e-12);
    }

    #[test]
    fn test_killed_pulse_stops_writing() {
        let mut scene = Scene::new();
        let button = scene.add_block("button");
        let mut p = pulse(button);

        assert!(p.tick(Duration::from_millis(16), &mut scene));
        assert!(p.kill());
        assert!(!p.kill());
        let writes = scene.write_count();
        assert!(!p.tick(Duration::from_millis(16), &mut scene));
        assert_eq!(scene.write_count(), writes);
        assert_eq!(p.state(), PulseState::Killed);
    }
}
