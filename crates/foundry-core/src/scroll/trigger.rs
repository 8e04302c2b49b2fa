//! Maps a scroll offset onto the progress of a pinned, scrubbed section.

use serde::{Deserialize, Serialize};

use crate::animation::timing::inverse_lerp;
use crate::config::SequenceConfig;

/// Scroll range bound to a section
///
/// The range starts `start_offset_vh` percent of a viewport before the
/// section's top reaches the top of the viewport and lasts `distance_vh`
/// percent of a viewport. The section stays pinned while inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollTrigger {
    start: f64,
    end: f64,
}

impl ScrollTrigger {
    /// `section_top` is the section's top in document coordinates
    pub fn new(section_top: f64, viewport_height: f64, config: &SequenceConfig) -> Self {
        let start = section_top - viewport_height * config.start_offset_vh / 100.0;
        let distance = (viewport_height * config.distance_vh / 100.0).max(0.0);
        Self::from_range(start, start + distance)
    }

    pub fn from_range(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn distance(&self) -> f64 {
        self.end - self.start
    }

    /// Progress in [0, 1]; linear in the offset
    pub fn progress(&self, offset: f64) -> f64 {
        inverse_lerp(self.start, self.end, offset)
    }

    /// Whether the section is held in place at `offset`
    pub fn is_pinned(&self, offset: f64) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// How far the pinned section has been held back, i.e. the spacer height consumed so far
    pub fn pin_shift(&self, offset: f64) -> f64 {
        (offset - self.start).clamp(0.0, self.distance())
    }

    /// Offset that produces `progress`
    pub fn offset_for(&self, progress: f64) -> f64 {
        self.start + self.distance() * progress.clamp(0.0, 1.0)
    }
}
