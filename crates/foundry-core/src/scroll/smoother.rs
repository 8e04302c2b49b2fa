//! L3 Molecular Layer: damped scroll controller
//!
//! Raw wheel and key input moves a target offset; every frame the visible
//! offset approaches the target by exponential damping. Programmatic jumps
//! use an eased animation instead. Time is passed in per frame.

use std::time::Duration;

use crate::animation::timing::{damp, lerp, progress};
use crate::config::ScrollConfig;

/// Distance below which the damped offset snaps onto its target
const SNAP_EPSILON: f64 = 0.01;

#[derive(Debug, Clone)]
struct Jump {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
}

#[derive(Debug, Clone)]
pub struct SmoothScroller {
    config: ScrollConfig,
    current: f64,
    target: f64,
    limit: f64,
    /// Deltas received since the last frame
    pending_delta: f64,
    jump: Option<Jump>,
}

impl Default for SmoothScroller {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl SmoothScroller {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            current: 0.0,
            target: 0.0,
            limit: f64::INFINITY,
            pending_delta: 0.0,
            jump: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    /// Visible offset
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Offset the scroller is heading to
    pub fn target(&self) -> f64 {
        self.jump.as_ref().map(|j| j.to).unwrap_or(self.target)
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Set the maximum offset (document height minus viewport height)
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.clamp(self.target);
        self.current = self.clamp(self.current);
    }

    /// Whether another frame is needed to settle
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.jump.is_some() || self.pending_delta != 0.0 || (self.target - self.current).abs() > SNAP_EPSILON
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.limit)
    }

    /// Jump without animation
    pub fn set_scroll(&mut self, offset: f64) {
        let offset = self.clamp(offset);
        self.current = offset;
        self.target = offset;
        self.pending_delta = 0.0;
        self.jump = None;
    }

    /// Animate to `offset` with the configured easing and duration
    pub fn scroll_to(&mut self, offset: f64) {
        let to = self.clamp(offset);
        if !self.config.smooth_enabled || self.config.jump_duration_ms == 0 {
            self.set_scroll(to);
            return;
        }
        self.pending_delta = 0.0;
        self.target = to;
        self.jump = if (to - self.current).abs() > SNAP_EPSILON {
            Some(Jump {
                from: self.current,
                to,
                elapsed: Duration::ZERO,
                duration: Duration::from_millis(self.config.jump_duration_ms),
            })
        } else {
            None
        };
    }

    /// Move the target by `delta`; deltas within one frame are batched
    pub fn scroll_by(&mut self, delta: f64) {
        if !self.config.smooth_enabled {
            let offset = self.current + delta;
            self.set_scroll(offset);
            return;
        }
        self.pending_delta += delta;
    }

    /// Raw wheel input, scaled by the wheel multiplier
    pub fn on_wheel(&mut self, delta: f64) {
        self.scroll_by(delta * self.config.wheel_multiplier);
    }

    /// Scroll by a number of steps of `lines_per_step` rows
    pub fn scroll_steps(&mut self, steps: i32) {
        self.scroll_by(steps as f64 * self.config.lines_per_step as f64);
    }

    pub fn scroll_half_page(&mut self, viewport_height: f64, down: bool) {
        let half = (viewport_height / 2.0).max(1.0);
        self.scroll_by(if down { half } else { -half });
    }

    pub fn scroll_page(&mut self, viewport_height: f64, down: bool) {
        let page = viewport_height.max(1.0);
        self.scroll_by(if down { page } else { -page });
    }

    /// Advance one frame and return the visible offset
    pub fn update(&mut self, dt: Duration) -> f64 {
        if self.pending_delta != 0.0 {
            // A wheel or key step interrupts a programmatic jump
            let base = self.target();
            self.jump = None;
            self.target = self.clamp(base + self.pending_delta);
            self.pending_delta = 0.0;
        }

        if let Some(jump) = self.jump.as_mut() {
            jump.elapsed += dt;
            let t = progress(jump.elapsed, jump.duration);
            self.current = lerp(jump.from, jump.to, self.config.easing.apply(t));
            if t >= 1.0 {
                self.current = jump.to;
                self.jump = None;
            }
            return self.current;
        }

        let lambda = self.config.lerp * 60.0;
        self.current = damp(self.current, self.target, lambda, dt);
        if (self.target - self.current).abs() <= SNAP_EPSILON {
            self.current = self.target;
        }
        self.current
    }

    /// Stop where we are
    pub fn cancel(&mut self) {
        self.jump = None;
        self.pending_delta = 0.0;
        self.target = self.current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_instant_scroll_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut scroller = SmoothScroller::new(config);
        scroller.set_limit(200.0);

        scroller.scroll_to(100.0);
        assert_eq!(scroller.current(), 100.0);
        scroller.on_wheel(400.0);
        assert_eq!(scroller.current(), 200.0);
        assert!(!scroller.needs_update());
    }

    #[test]
    fn test_wheel_deltas_batch_and_scale() {
        let mut scroller = SmoothScroller::default();
        scroller.on_wheel(10.0);
        scroller.on_wheel(10.0);
        scroller.on_wheel(10.0);
        assert_eq!(scroller.current(), 0.0);

        scroller.update(FRAME);
        assert_eq!(scroller.target(), 15.0);
        assert!(scroller.current() > 0.0 && scroller.current() < 15.0);
    }

    #[test]
    fn test_damping_settles_on_target() {
        let mut scroller = SmoothScroller::default();
        scroller.scroll_by(100.0);
        let mut frames = 0;
        while scroller.needs_update() && frames < 10_000 {
            scroller.update(FRAME);
            frames += 1;
        }
        assert_eq!(scroller.current(), 100.0);
        // Roughly 5% per frame: far more than one frame, well under ten seconds
        assert!(frames > 30 && frames < 600);
    }

    #[test]
    fn test_scroll_to_is_eased_and_finishes() {
        let mut scroller = SmoothScroller::default();
        scroller.set_limit(1000.0);
        scroller.scroll_to(5000.0);
        assert_eq!(scroller.target(), 1000.0);

        scroller.update(Duration::from_millis(300));
        let mid = scroller.current();
        assert!(mid > 500.0 && mid < 1000.0, "cubic ease-out front-loads motion: {}", mid);

        scroller.update(Duration::from_millis(300));
        assert_eq!(scroller.current(), 1000.0);
        assert!(!scroller.needs_update());
    }

    #[test]
    fn test_wheel_interrupts_jump() {
        let mut scroller = SmoothScroller::default();
        scroller.scroll_to(100.0);
        scroller.on_wheel(-40.0);
        scroller.update(FRAME);
        assert_eq!(scroller.target(), 80.0);
    }

    #[test]
    fn test_clamped_to_limit() {
        let mut scroller = SmoothScroller::default();
        scroller.set_scroll(50.0);
        scroller.set_limit(20.0);
        assert_eq!(scroller.current(), 20.0);
        scroller.scroll_by(-100.0);
        scroller.update(FRAME);
        assert_eq!(scroller.target(), 0.0);
    }
}
