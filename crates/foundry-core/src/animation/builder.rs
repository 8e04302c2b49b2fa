//! Fluent construction of a declarative tween list
//!
//! The builder keeps a running "end" (latest tween end) and the start of the
//! most recently added group, and resolves each [`Placement`] against them.
//! `from` values are taken from the last value queued for the same channel,
//! so a chain of `to` calls reads like a script.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::easing::EasingType;
use super::timeline::{Label, Timeline};
use super::tween::Tween;
use crate::scene::{ElementId, Property};

/// Where a new group of tweens starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    /// At the current end of the timeline
    End,
    /// Offset from the end; negative values overlap the previous group
    FromEnd(f64),
    /// Offset from the previous group's start
    WithPrevious(f64),
    /// Absolute time
    At(f64),
}

/// Timing options shared by every tween in a group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenVars {
    pub duration: f64,
    pub easing: EasingType,
    /// Delay between consecutive targets
    pub stagger: f64,
}

impl TweenVars {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            easing: EasingType::Power1Out,
            stagger: 0.0,
        }
    }

    pub fn ease(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }
}

#[derive(Debug, Default)]
pub struct TimelineBuilder {
    tweens: Vec<Tween>,
    labels: Vec<Label>,
    current: HashMap<(ElementId, Property), f64>,
    end: f64,
    previous_start: f64,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the value a channel holds before the timeline touches it
    pub fn set(&mut self, target: ElementId, property: Property, value: f64) -> &mut Self {
        self.current.insert((target, property), value);
        self
    }

    /// Current end of the timeline
    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn label_time(&self, name: &str) -> Option<f64> {
        self.labels.iter().find(|l| l.name == name).map(|l| l.time)
    }

    /// Record a label; returns its resolved time
    pub fn add_label(&mut self, name: &str, placement: Placement) -> f64 {
        let time = self.resolve(&placement);
        self.labels.retain(|l| l.name != name);
        self.labels.push(Label {
            name: name.to_string(),
            time,
        });
        time
    }

    /// Tween `properties` of every target to the given values.
    ///
    /// With a stagger, target `k` starts `k * stagger` after the group start.
    /// An empty target list still occupies its slot in the timeline.
    pub fn to(
        &mut self,
        targets: &[ElementId],
        properties: &[(Property, f64)],
        vars: TweenVars,
        placement: Placement,
    ) -> &mut Self {
        let start = self.resolve(&placement);
        let duration = vars.duration.max(0.0);

        for (k, target) in targets.iter().enumerate() {
            let target_start = start + vars.stagger * k as f64;
            for &(property, to) in properties {
                let from = self
                    .current
                    .get(&(*target, property))
                    .copied()
                    .unwrap_or_else(|| property.initial());
                self.current.insert((*target, property), to);
                self.tweens.push(Tween {
                    target: *target,
                    property,
                    from,
                    to,
                    start: target_start,
                    duration,
                    easing: vars.easing,
                });
            }
        }

        let span = vars.stagger * targets.len().saturating_sub(1) as f64 + duration;
        self.previous_start = start;
        self.end = self.end.max(start + span);
        self
    }

    fn resolve(&self, placement: &Placement) -> f64 {
        let time = match placement {
            Placement::End => self.end,
            Placement::FromEnd(delta) => self.end + delta,
            Placement::WithPrevious(delta) => self.previous_start + delta,
            Placement::At(time) => *time,
        };
        time.max(0.0)
    }

    pub fn build(self) -> Timeline {
        Timeline::new(self.tweens, self.labels, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ElementId = ElementId(1);
    const B: ElementId = ElementId(2);
    const C: ElementId = ElementId(3);

    #[test]
    fn test_relative_positions() {
        let mut b = TimelineBuilder::new();
        b.to(&[A], &[(Property::Opacity, 1.0)], TweenVars::new(0.3), Placement::End)
            .to(&[B], &[(Property::Opacity, 1.0)], TweenVars::new(2.0), Placement::WithPrevious(0.1))
            .to(&[C], &[(Property::YPercent, -25.0)], TweenVars::new(0.8), Placement::FromEnd(-0.5))
            .to(&[A], &[(Property::Scale, 2.0)], TweenVars::new(0.8), Placement::WithPrevious(0.0));
        let tl = b.build();
        let starts: Vec<f64> = tl.tweens().iter().map(|t| t.start).collect();

        assert_eq!(starts.len(), 4);
        assert!((starts[1] - 0.1).abs() < 1e-12);
        assert!((starts[2] - 1.6).abs() < 1e-12);
        assert!((starts[3] - 1.6).abs() < 1e-12);
        assert!((tl.duration() - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_stagger_expands_per_target() {
        let mut b = TimelineBuilder::new();
        b.to(
            &[A, B, C],
            &[(Property::StrokeDashoffset, 0.0)],
            TweenVars::new(2.0).stagger(0.15).ease(EasingType::Power2InOut),
            Placement::At(1.0),
        );
        let tl = b.build();
        let starts: Vec<f64> = tl.tweens().iter().map(|t| t.start).collect();
        for (start, expected) in starts.iter().zip([1.0, 1.15, 1.3]) {
            assert!((start - expected).abs() < 1e-12);
        }
        assert!((tl.duration() - 3.3).abs() < 1e-12);
        assert!(tl.tweens().iter().all(|t| t.easing == EasingType::Power2InOut));
    }

    #[test]
    fn test_from_values_follow_the_chain() {
        let mut b = TimelineBuilder::new();
        b.set(A, Property::ScaleX, 0.0);
        b.to(&[A], &[(Property::ScaleX, 0.5)], TweenVars::new(1.0), Placement::End)
            .to(&[A], &[(Property::ScaleX, 1.0)], TweenVars::new(1.0), Placement::End)
            .to(&[B], &[(Property::Opacity, 0.0)], TweenVars::new(1.0), Placement::End);
        let tl = b.build();
        let froms: Vec<f64> = tl.tweens().iter().map(|t| t.from).collect();
        assert_eq!(froms, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_labels_and_empty_groups() {
        let mut b = TimelineBuilder::new();
        b.to(&[], &[(Property::Opacity, 1.0)], TweenVars::new(1.0), Placement::End);
        assert_eq!(b.add_label("mid", Placement::End), 1.0);
        b.to(&[A], &[(Property::Opacity, 1.0)], TweenVars::new(1.0), Placement::FromEnd(-0.5));
        assert_eq!(b.label_time("mid"), Some(1.0));

        // Re-adding a label moves it
        assert_eq!(b.add_label("mid", Placement::At(1.5)), 1.5);

        let tl = b.build();
        assert_eq!(tl.tweens().len(), 1);
        assert_eq!(tl.tweens()[0].start, 0.5);
        assert_eq!(tl.labels().len(), 1);
        assert_eq!(tl.label("mid"), Some(1.5));
    }

    #[test]
    fn test_negative_start_clamps_to_zero() {
        let mut b = TimelineBuilder::new();
        b.to(&[A], &[(Property::Opacity, 1.0)], TweenVars::new(0.3), Placement::FromEnd(-1.0));
        assert_eq!(b.build().tweens()[0].start, 0.0);
    }
}
