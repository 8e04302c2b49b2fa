//! L2 Organism Layer: a built, seekable timeline
//!
//! Seeking is stateless. Each `(target, property)` channel resolves to the
//! value of its most recently started tween, or to its first tween's `from`
//! when none has started yet, so scrubbing backwards restores earlier state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tween::Tween;
use crate::scene::{ElementId, Property, Stage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub time: f64,
}

type Channel = (ElementId, Property);

#[derive(Debug, Clone, Default, Serialize)]
pub struct Timeline {
    tweens: Vec<Tween>,
    labels: Vec<Label>,
    duration: f64,
    /// Tween indices per channel, ordered by start time
    #[serde(skip)]
    channels: BTreeMap<Channel, Vec<usize>>,
}

impl Timeline {
    pub fn new(tweens: Vec<Tween>, labels: Vec<Label>, duration: f64) -> Self {
        let mut channels: BTreeMap<Channel, Vec<usize>> = BTreeMap::new();
        for (index, tween) in tweens.iter().enumerate() {
            channels
                .entry((tween.target, tween.property))
                .or_default()
                .push(index);
        }
        for indices in channels.values_mut() {
            // Stable sort keeps insertion order for equal starts
            indices.sort_by(|a, b| tweens[*a].start.total_cmp(&tweens[*b].start));
        }

        Self {
            tweens,
            labels,
            duration: duration.max(0.0),
            channels,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn label(&self, name: &str) -> Option<f64> {
        self.labels.iter().find(|l| l.name == name).map(|l| l.time)
    }

    /// Where a label sits on the [0, 1] progress scale
    pub fn label_progress(&self, name: &str) -> Option<f64> {
        let time = self.label(name)?;
        Some(self.progress_of(time))
    }

    pub fn progress_of(&self, time: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (time / self.duration).clamp(0.0, 1.0)
    }

    pub fn time_at(&self, progress: f64) -> f64 {
        progress.clamp(0.0, 1.0) * self.duration
    }

    /// Value of a channel at `time`, `None` if the timeline never animates it
    pub fn value_at(&self, target: ElementId, property: Property, time: f64) -> Option<f64> {
        let indices = self.channels.get(&(target, property))?;
        Some(self.channel_value(indices, time))
    }

    fn channel_value(&self, indices: &[usize], time: f64) -> f64 {
        let active = indices
            .iter()
            .rev()
            .map(|i| &self.tweens[*i])
            .find(|t| t.has_started(time));
        match active {
            Some(tween) => tween.value_at(time),
            None => self.tweens[indices[0]].from,
        }
    }

    /// Write every animated channel's value at `time`
    pub fn render(&self, stage: &mut dyn Stage, time: f64) {
        for (&(target, property), indices) in &self.channels {
            stage.set(target, property, self.channel_value(indices, time));
        }
    }

    /// Write every animated channel's value at `progress` in [0, 1]
    pub fn render_progress(&self, stage: &mut dyn Stage, progress: f64) {
        self.render(stage, self.time_at(progress));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::builder::{Placement, TimelineBuilder, TweenVars};
    use crate::animation::easing::EasingType;
    use crate::scene::Scene;

    fn fill_timeline(fill: ElementId) -> Timeline {
        let mut b = TimelineBuilder::new();
        b.set(fill, Property::ScaleX, 0.0);
        for step in 1..=3 {
            b.to(
                &[fill],
                &[(Property::ScaleX, step as f64 / 3.0)],
                TweenVars::new(1.0).ease(EasingType::Linear),
                Placement::FromEnd(0.5),
            );
        }
        b.build()
    }

    #[test]
    fn test_seek_before_during_after() {
        let fill = ElementId(7);
        let tl = fill_timeline(fill);
        assert!((tl.duration() - 4.5).abs() < 1e-12);
        // Three steps on one channel
        assert_eq!(tl.tweens().len(), 3);
        assert_eq!(tl.channel_count(), 1);

        assert_eq!(tl.value_at(fill, Property::ScaleX, 0.0), Some(0.0));
        // Gap between tweens holds the previous end value
        assert!((tl.value_at(fill, Property::ScaleX, 1.7).unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert!((tl.value_at(fill, Property::ScaleX, 2.5).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(tl.value_at(fill, Property::ScaleX, 4.5), Some(1.0));
        assert_eq!(tl.value_at(ElementId(8), Property::ScaleX, 1.0), None);
    }

    #[test]
    fn test_scrub_back_restores_state() {
        let mut scene = Scene::new();
        let fill = scene.add_block("fill");
        let tl = fill_timeline(fill);

        tl.render_progress(&mut scene, 1.0);
        assert_eq!(scene.value(fill, Property::ScaleX), 1.0);
        tl.render_progress(&mut scene, 0.0);
        assert_eq!(scene.value(fill, Property::ScaleX), 0.0);
    }

    #[test]
    fn test_fill_is_monotonic_forward() {
        let tl = fill_timeline(ElementId(1));
        let mut previous = 0.0;
        for i in 0..=200 {
            let v = tl.value_at(ElementId(1), Property::ScaleX, tl.time_at(i as f64 / 200.0)).unwrap();
            assert!(v + 1e-12 >= previous);
            previous = v;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_label_progress() {
        let mut b = TimelineBuilder::new();
        b.to(&[ElementId(1)], &[(Property::Opacity, 1.0)], TweenVars::new(2.0), Placement::End);
        b.add_label("half", Placement::At(1.0));
        let tl = b.build();
        assert_eq!(tl.label_progress("half"), Some(0.5));
        assert_eq!(tl.label_progress("missing"), None);
        assert_eq!(Timeline::default().progress_of(3.0), 1.0);
    }
}
