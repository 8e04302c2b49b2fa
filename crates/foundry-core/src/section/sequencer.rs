//! Scroll-scrubbed sequencing of the feature tiles.
//!
//! Per tile, in order: reveal the icon, draw its strokes, slide the title
//! block up while the description fades in, draw the tile's connector and
//! advance the scroll button fill by a third. A pulse on the scroll button
//! runs on frame time until the sequence reaches the end.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::handles::{SectionHandles, TileHandles};
use crate::animation::{EasingType, Placement, Pulse, Timeline, TimelineBuilder, TweenVars};
use crate::config::SequenceConfig;
use crate::geometry::Viewport;
use crate::scene::{ElementId, Property, Stage};
use crate::scroll::{HostEvents, ScrollEvent, ScrollTrigger, Subscription};
use crate::shape::{prepare_icon, prepare_line, LengthPolicy, PathSpec, PreparedIcon};

/// Tiles the sequence needs
pub const REQUIRED_TILES: usize = 3;

/// Opacity of an icon before its reveal
pub const ICON_REST_OPACITY: f64 = 0.3;

const REVEAL_DURATION: f64 = 0.3;
const TITLE_DURATION: f64 = 0.8;
const DESCRIPTION_DURATION: f64 = 0.8;
const CONNECTOR_DURATION: f64 = 1.2;
const FILL_DURATION: f64 = 1.0;

pub fn reveal_label(index: usize) -> String {
    format!("tile-{}-reveal", index)
}

pub fn end_label(index: usize) -> String {
    format!("tile-{}-end", index)
}

/// Stroke lengths measured at mount
#[derive(Debug, Clone, Default, Serialize)]
pub struct Prepared {
    pub connectors: Vec<PathSpec>,
    pub icons: Vec<PreparedIcon>,
}

/// Build the scrubbed timeline for the first [`REQUIRED_TILES`] tiles.
///
/// `icons` and `connectors` are indexed like `tiles`. Tile `i + 1` is
/// revealed `tile_lead` before tile `i` finishes, but never before tile `i`
/// was revealed.
pub fn build_timeline(
    tiles: &[TileHandles],
    icons: &[PreparedIcon],
    connectors: &[PathSpec],
    fill: ElementId,
    config: &SequenceConfig,
) -> Timeline {
    let mut b = TimelineBuilder::new();
    b.set(fill, Property::ScaleX, 0.0);

    let count = tiles.len().min(REQUIRED_TILES);
    let mut previous_reveal = 0.0;

    for (i, tile) in tiles.iter().take(count).enumerate() {
        let strokes: Vec<ElementId> = icons.get(i).map(|p| p.targets()).unwrap_or_default();
        let icon: Vec<ElementId> = tile.icon.into_iter().collect();
        let title: Vec<ElementId> = tile.title_block.into_iter().collect();
        let description: Vec<ElementId> = tile.description.into_iter().collect();
        let connector: Vec<ElementId> = connectors.get(i).map(|c| c.target).into_iter().collect();

        if let Some(id) = tile.icon {
            b.set(id, Property::Opacity, ICON_REST_OPACITY);
        }
        if let Some(prepared) = icons.get(i) {
            for path in &prepared.paths {
                b.set(path.target, Property::StrokeDashoffset, path.length);
            }
        }
        if let Some(id) = tile.title_block {
            b.set(id, Property::YPercent, 0.0);
        }
        if let Some(id) = tile.description {
            b.set(id, Property::Opacity, 0.0);
        }
        if let Some(spec) = connectors.get(i) {
            b.set(spec.target, Property::StrokeDashoffset, spec.length);
            b.set(spec.target, Property::Opacity, 0.0);
        }

        let reveal = if i == 0 {
            b.end()
        } else {
            (b.end() - config.tile_lead).max(previous_reveal)
        };
        previous_reveal = b.add_label(&reveal_label(i), Placement::At(reveal));

        b.to(&icon, &[(Property::Opacity, 1.0)], TweenVars::new(REVEAL_DURATION), Placement::At(reveal))
            .to(
                &strokes,
                &[(Property::StrokeDashoffset, 0.0)],
                TweenVars::new(config.stroke_duration)
                    .stagger(config.stagger)
                    .ease(EasingType::Power2InOut),
                Placement::WithPrevious(config.reveal_lead),
            )
            .to(
                &title,
                &[(Property::YPercent, config.title_shift_percent)],
                TweenVars::new(TITLE_DURATION),
                Placement::FromEnd(-config.title_overlap),
            )
            .to(
                &description,
                &[(Property::Opacity, 1.0)],
                TweenVars::new(DESCRIPTION_DURATION),
                Placement::WithPrevious(0.0),
            )
            .to(
                &connector,
                &[(Property::StrokeDashoffset, 0.0), (Property::Opacity, 1.0)],
                TweenVars::new(CONNECTOR_DURATION),
                Placement::FromEnd(-config.connector_overlap),
            )
            .to(
                &[fill],
                &[(Property::ScaleX, (i + 1) as f64 / REQUIRED_TILES as f64)],
                TweenVars::new(FILL_DURATION),
                Placement::WithPrevious(0.0),
            );

        b.add_label(&end_label(i), Placement::End);
    }

    b.build()
}

/// Live animation state shared with the registered listeners
#[derive(Debug)]
struct Animation {
    timeline: Rc<Timeline>,
    trigger: ScrollTrigger,
    pulse: Pulse,
    section: ElementId,
    progress: f64,
    config: SequenceConfig,
    prepared: Prepared,
}

impl Animation {
    fn apply(&mut self, progress: f64, stage: &mut dyn Stage) {
        self.progress = progress.clamp(0.0, 1.0);
        self.timeline.render_progress(stage, self.progress);
        if self.progress >= 1.0 {
            self.stop_pulse(stage);
        }
    }

    fn on_scroll(&mut self, event: &ScrollEvent, stage: &mut dyn Stage) {
        let progress = self.trigger.progress(event.offset);
        self.apply(progress, stage);
    }

    fn on_resize(&mut self, viewport: Viewport, offset: f64, stage: &mut dyn Stage) {
        let top = section_top(stage, self.section, offset - self.trigger.pin_shift(offset));
        self.trigger = ScrollTrigger::new(top, viewport.height, &self.config);
        debug!(
            "Scroll range refreshed: {:.1}..{:.1}",
            self.trigger.start(),
            self.trigger.end()
        );
        let progress = self.trigger.progress(offset);
        self.apply(progress, stage);
    }

    fn on_frame(&mut self, dt: Duration, stage: &mut dyn Stage) {
        self.pulse.tick(dt, stage);
    }

    fn stop_pulse(&mut self, stage: &mut dyn Stage) {
        if self.pulse.kill() {
            stage.set(self.pulse.target(), Property::Scale, self.pulse.rest());
            info!("Scroll button pulse stopped");
        }
    }
}

/// Section top in document coordinates
fn section_top(stage: &dyn Stage, section: ElementId, offset: f64) -> f64 {
    match stage.bounding_box(section) {
        Some(bounds) => bounds.top + offset,
        None => {
            debug!("Section {} has no layout yet, assuming document top", section);
            0.0
        }
    }
}

struct Mounted {
    animation: Rc<RefCell<Animation>>,
    subscriptions: Vec<Subscription>,
}

/// The mounted feature-section sequencer.
///
/// Dropping it releases every listener; [`FeatureSequencer::unmount`] also
/// settles the scroll button before releasing.
pub struct FeatureSequencer {
    mounted: Option<Mounted>,
}

impl FeatureSequencer {
    /// Prepare the section and bind its timeline to the host's scroll events.
    ///
    /// With fewer than [`REQUIRED_TILES`] tiles or a missing connector, fill
    /// or button the section is left static and nothing is registered.
    pub fn mount(
        stage: &mut dyn Stage,
        events: &HostEvents,
        handles: &SectionHandles,
        config: &SequenceConfig,
    ) -> Self {
        if handles.tiles.len() < REQUIRED_TILES {
            warn!(
                "Expected {} feature tiles, found: {}",
                REQUIRED_TILES,
                handles.tiles.len()
            );
            return Self::static_section();
        }

        let (Some(left), Some(middle), Some(right), Some(fill), Some(button)) = (
            handles.connectors[0],
            handles.connectors[1],
            handles.connectors[2],
            handles.fill,
            handles.button,
        ) else {
            warn!("Feature section is missing a connector, fill or button; leaving it static");
            return Self::static_section();
        };

        let policy = LengthPolicy::from(config);
        let pulse = Pulse::from_config(button, config);

        let connectors: Vec<PathSpec> = [left, middle, right]
            .into_iter()
            .map(|c| prepare_line(stage, c, &policy))
            .collect();
        stage.set(fill, Property::ScaleX, 0.0);

        let tiles = &handles.tiles[..REQUIRED_TILES];
        for tile in tiles {
            if let Some(icon) = tile.icon {
                stage.set(icon, Property::Opacity, ICON_REST_OPACITY);
            }
            if let Some(title) = tile.title_block {
                stage.set(title, Property::YPercent, 0.0);
            }
            if let Some(description) = tile.description {
                stage.set(description, Property::Opacity, 0.0);
            }
        }

        let icons: Vec<PreparedIcon> = tiles
            .iter()
            .map(|tile| match tile.icon {
                Some(icon) => prepare_icon(stage, icon, &tile.gradient_id, tile.line_cap, &policy),
                None => PreparedIcon::default(),
            })
            .collect();

        let timeline = build_timeline(tiles, &icons, &connectors, fill, config);

        let offset = events.offset();
        let top = section_top(stage, handles.section, offset);
        let trigger = ScrollTrigger::new(top, stage.viewport().height, config);

        let animation = Rc::new(RefCell::new(Animation {
            timeline: Rc::new(timeline),
            trigger,
            pulse,
            section: handles.section,
            progress: 0.0,
            config: config.clone(),
            prepared: Prepared { connectors, icons },
        }));
        animation.borrow_mut().apply(trigger.progress(offset), stage);

        let subscriptions = vec![
            events.scroll.subscribe({
                let animation = Rc::clone(&animation);
                move |event, stage| animation.borrow_mut().on_scroll(event, stage)
            }),
            events.resize.subscribe({
                let animation = Rc::clone(&animation);
                let events = events.clone();
                move |viewport, stage| {
                    let offset = events.offset();
                    animation.borrow_mut().on_resize(*viewport, offset, stage)
                }
            }),
            events.frame.subscribe({
                let animation = Rc::clone(&animation);
                move |dt, stage| animation.borrow_mut().on_frame(*dt, stage)
            }),
        ];

        info!(
            "Feature sequence mounted: {} tweens over {:.2} units, scroll {:.0}..{:.0}",
            animation.borrow().timeline.tweens().len(),
            animation.borrow().timeline.duration(),
            trigger.start(),
            trigger.end()
        );

        Self {
            mounted: Some(Mounted {
                animation,
                subscriptions,
            }),
        }
    }

    fn static_section() -> Self {
        Self { mounted: None }
    }

    /// Whether a timeline is bound to scroll
    pub fn is_animated(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn progress(&self) -> Option<f64> {
        self.mounted.as_ref().map(|m| m.animation.borrow().progress)
    }

    pub fn timeline(&self) -> Option<Rc<Timeline>> {
        self.mounted
            .as_ref()
            .map(|m| Rc::clone(&m.animation.borrow().timeline))
    }

    pub fn trigger(&self) -> Option<ScrollTrigger> {
        self.mounted.as_ref().map(|m| m.animation.borrow().trigger)
    }

    pub fn prepared(&self) -> Option<Prepared> {
        self.mounted
            .as_ref()
            .map(|m| m.animation.borrow().prepared.clone())
    }

    pub fn pulse_running(&self) -> bool {
        self.mounted
            .as_ref()
            .map(|m| m.animation.borrow().pulse.is_running())
            .unwrap_or(false)
    }

    /// Scrub directly to `progress`, as if the scroll offset had moved there
    pub fn seek(&self, progress: f64, stage: &mut dyn Stage) {
        if let Some(m) = &self.mounted {
            m.animation.borrow_mut().apply(progress, stage);
        }
    }

    /// Stop the pulse, detach from scroll, resize and frame events, and drop the timeline.
    /// Nothing is written to the stage afterwards.
    pub fn unmount(&mut self, stage: &mut dyn Stage) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        mounted.animation.borrow_mut().stop_pulse(stage);
        let released = mounted.subscriptions.len();
        drop(mounted);
        info!("Feature sequence unmounted, released {} listeners", released);
    }
}

impl Drop for FeatureSequencer {
    fn drop(&mut self) {
        if self.mounted.is_some() {
            debug!("Feature sequencer dropped while mounted, releasing listeners");
        }
    }
}

impl std::fmt::Debug for FeatureSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureSequencer")
            .field("animated", &self.is_animated())
            .field("progress", &self.progress())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::section::tiles::default_tiles;

    const VIEWPORT: Viewport = Viewport {
        width: 1200.0,
        height: 800.0,
    };

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "expected {}, got {}", expected, actual);
    }

    /// Section placed half a viewport down, so the scroll range starts at offset 0
    fn setup(config: &SequenceConfig) -> (Scene, HostEvents, SectionHandles, FeatureSequencer) {
        let mut scene = Scene::new();
        let handles = SectionHandles::build(&mut scene, &default_tiles());
        handles.arrange(&mut scene, VIEWPORT, VIEWPORT.height / 2.0);
        let events = HostEvents::new();
        let sequencer = FeatureSequencer::mount(&mut scene, &events, &handles, config);
        (scene, events, handles, sequencer)
    }

    fn stroke_targets(sequencer: &FeatureSequencer) -> Vec<Vec<ElementId>> {
        sequencer
            .prepared()
            .unwrap()
            .icons
            .iter()
            .map(|icon| icon.targets())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let (scene, events, handles, sequencer) = setup(&SequenceConfig::default());

        assert!(sequencer.is_animated());
        assert_eq!(sequencer.progress(), Some(0.0));
        assert_eq!(events.listener_count(), 3);

        for tile in &handles.tiles {
            assert_eq!(scene.value(tile.icon.unwrap(), Property::Opacity), ICON_REST_OPACITY);
            assert_eq!(scene.value(tile.description.unwrap(), Property::Opacity), 0.0);
            assert_eq!(scene.value(tile.title_block.unwrap(), Property::YPercent), 0.0);
        }
        for strokes in stroke_targets(&sequencer) {
            assert!(!strokes.is_empty());
            assert!(strokes.iter().all(|s| scene.drawn_fraction(*s) == 0.0));
        }
        for connector in handles.connectors.iter().flatten() {
            assert_eq!(scene.drawn_fraction(*connector), 0.0);
            assert_eq!(scene.value(*connector, Property::Opacity), 0.0);
        }
        assert_eq!(scene.value(handles.fill.unwrap(), Property::ScaleX), 0.0);
        assert!(sequencer.pulse_running());
    }

    #[test]
    fn test_tile_zero_complete() {
        let (mut scene, _events, handles, sequencer) = setup(&SequenceConfig::default());
        let timeline = sequencer.timeline().unwrap();
        let progress = timeline.label_progress(&end_label(0)).unwrap();

        sequencer.seek(progress, &mut scene);

        assert_close(scene.value(handles.fill.unwrap(), Property::ScaleX), 1.0 / 3.0);
        let left = handles.connector(0).unwrap();
        assert_close(scene.drawn_fraction(left), 1.0);
        assert_close(scene.value(left, Property::Opacity), 1.0);
        assert_close(scene.value(handles.tiles[0].icon.unwrap(), Property::Opacity), 1.0);
        assert_close(scene.value(handles.tiles[0].title_block.unwrap(), Property::YPercent), -25.0);
        for stroke in &stroke_targets(&sequencer)[0] {
            assert_close(scene.drawn_fraction(*stroke), 1.0);
        }
        // The last tile has not started
        assert_eq!(scene.drawn_fraction(handles.connector(2).unwrap()), 0.0);
        assert_eq!(scene.value(handles.tiles[2].icon.unwrap(), Property::Opacity), ICON_REST_OPACITY);
    }

    #[test]
    fn test_end_of_range() {
        let (mut scene, events, handles, sequencer) = setup(&SequenceConfig::default());
        let trigger = sequencer.trigger().unwrap();
        assert_eq!(trigger.start(), 0.0);

        events.publish_scroll(trigger.end(), &mut scene);

        assert_eq!(sequencer.progress(), Some(1.0));
        assert_eq!(scene.value(handles.fill.unwrap(), Property::ScaleX), 1.0);
        for connector in handles.connectors.iter().flatten() {
            assert_eq!(scene.drawn_fraction(*connector), 1.0);
        }
        for strokes in stroke_targets(&sequencer) {
            assert!(strokes.iter().all(|s| scene.drawn_fraction(*s) == 1.0));
        }
        assert!(!sequencer.pulse_running());
        assert_eq!(scene.value(handles.button.unwrap(), Property::Scale), 1.0);
    }

    #[test]
    fn test_fill_monotonic_over_forward_scroll() {
        let (mut scene, events, handles, sequencer) = setup(&SequenceConfig::default());
        let end = sequencer.trigger().unwrap().end();
        let fill = handles.fill.unwrap();

        let mut previous = 0.0;
        for step in 0..=720 {
            events.publish_scroll(end * step as f64 / 720.0, &mut scene);
            let value = scene.value(fill, Property::ScaleX);
            assert!(value + 1e-12 >= previous, "fill went back at step {}", step);
            previous = value;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_scrubbing_back_restores_state() {
        let (mut scene, events, handles, sequencer) = setup(&SequenceConfig::default());
        let end = sequencer.trigger().unwrap().end();

        events.publish_scroll(end, &mut scene);
        events.publish_scroll(0.0, &mut scene);

        assert_eq!(scene.value(handles.fill.unwrap(), Property::ScaleX), 0.0);
        assert_eq!(scene.drawn_fraction(handles.connector(1).unwrap()), 0.0);
        assert_eq!(scene.value(handles.tiles[1].icon.unwrap(), Property::Opacity), ICON_REST_OPACITY);
        // A finished pulse stays stopped
        assert!(!sequencer.pulse_running());
    }

    #[test]
    fn test_reveals_are_strictly_ordered() {
        for tile_lead in [0.2, 3.0, 100.0] {
            let config = SequenceConfig {
                tile_lead,
                ..Default::default()
            };
            let (_scene, _events, _handles, sequencer) = setup(&config);
            let timeline = sequencer.timeline().unwrap();
            let reveals: Vec<f64> = (0..3).map(|i| timeline.label(&reveal_label(i)).unwrap()).collect();
            assert!(reveals.windows(2).all(|w| w[1] >= w[0]), "{:?}", reveals);
        }

        let (_scene, _events, _handles, sequencer) = setup(&SequenceConfig::default());
        let timeline = sequencer.timeline().unwrap();
        let end0 = timeline.label(&end_label(0)).unwrap();
        let reveal1 = timeline.label(&reveal_label(1)).unwrap();
        assert_close(end0 - reveal1, 0.2);
    }

    #[test]
    fn test_reveal_order_holds_while_scrolling() {
        for tile_lead in [0.2, 100.0] {
            let config = SequenceConfig {
                tile_lead,
                ..Default::default()
            };
            let (mut scene, events, handles, sequencer) = setup(&config);
            let trigger = sequencer.trigger().unwrap();
            let icons: Vec<ElementId> = handles.tiles.iter().map(|t| t.icon.unwrap()).collect();
            let fill = handles.fill.unwrap();
            let mut last_fill = 0.0;

            let steps = 600;
            for step in 0..=steps {
                let offset = trigger.offset_for(step as f64 / steps as f64);
                events.publish_scroll(offset, &mut scene);

                let revealed: Vec<bool> = icons
                    .iter()
                    .map(|icon| scene.value(*icon, Property::Opacity) > ICON_REST_OPACITY)
                    .collect();
                for i in 1..revealed.len() {
                    assert!(
                        !revealed[i] || revealed[i - 1],
                        "tile_lead {}: icon {} revealed before icon {} at offset {}",
                        tile_lead,
                        i,
                        i - 1,
                        offset
                    );
                }

                let fill_value = scene.value(fill, Property::ScaleX);
                assert!(fill_value >= last_fill - 1e-12, "fill went back at offset {}", offset);
                last_fill = fill_value;
            }

            assert_close(last_fill, 1.0);
            for icon in &icons {
                assert_close(scene.value(*icon, Property::Opacity), 1.0);
            }
        }
    }

    #[test]
    fn test_pulse_runs_on_frames_until_complete() {
        let (mut scene, events, handles, sequencer) = setup(&SequenceConfig::default());
        let button = handles.button.unwrap();

        events.publish_frame(Duration::from_millis(600), &mut scene);
        assert_close(scene.value(button, Property::Scale), 1.01);

        sequencer.seek(1.0, &mut scene);
        let writes = scene.write_count();
        events.publish_frame(Duration::from_millis(600), &mut scene);
        assert_eq!(scene.write_count(), writes);
        assert_eq!(scene.value(button, Property::Scale), 1.0);
    }

    #[test]
    fn test_resize_refreshes_scroll_range() {
        let (mut scene, events, _handles, sequencer) = setup(&SequenceConfig::default());
        assert_eq!(sequencer.trigger().unwrap().end(), 7200.0);

        let smaller = Viewport::new(1200.0, 400.0);
        scene.set_viewport(smaller);
        events.publish_resize(smaller, &mut scene);

        let trigger = sequencer.trigger().unwrap();
        assert_eq!(trigger.start(), 200.0);
        assert_eq!(trigger.end(), 3800.0);
    }

    #[test]
    fn test_unmount_stops_everything() {
        for progress in [0.0, 0.5, 1.0] {
            let (mut scene, events, _handles, mut sequencer) = setup(&SequenceConfig::default());
            sequencer.seek(progress, &mut scene);

            sequencer.unmount(&mut scene);
            assert!(!sequencer.is_animated());
            assert_eq!(events.listener_count(), 0);

            let writes = scene.write_count();
            events.publish_scroll(3600.0, &mut scene);
            events.publish_frame(Duration::from_millis(16), &mut scene);
            events.publish_resize(VIEWPORT, &mut scene);
            sequencer.seek(0.25, &mut scene);
            assert_eq!(scene.write_count(), writes);

            sequencer.unmount(&mut scene);
        }
    }

    #[test]
    fn test_drop_releases_listeners() {
        let (_scene, events, _handles, sequencer) = setup(&SequenceConfig::default());
        assert_eq!(events.listener_count(), 3);
        drop(sequencer);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_too_few_tiles_stays_static() {
        for count in 0..REQUIRED_TILES {
            let mut scene = Scene::new();
            let handles = SectionHandles::build(&mut scene, &default_tiles()[..count]);
            let events = HostEvents::new();
            let writes = scene.write_count();

            let sequencer = FeatureSequencer::mount(&mut scene, &events, &handles, &SequenceConfig::default());

            assert!(!sequencer.is_animated());
            assert_eq!(sequencer.progress(), None);
            assert_eq!(events.listener_count(), 0);
            assert_eq!(scene.write_count(), writes);
        }
    }

    #[test]
    fn test_missing_fill_stays_static() {
        let mut scene = Scene::new();
        let mut handles = SectionHandles::build(&mut scene, &default_tiles());
        handles.fill = None;
        let events = HostEvents::new();

        let sequencer = FeatureSequencer::mount(&mut scene, &events, &handles, &SequenceConfig::default());
        assert!(!sequencer.is_animated());
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_tile_without_icon_keeps_timing() {
        let mut scene = Scene::new();
        let mut handles = SectionHandles::build(&mut scene, &default_tiles());
        handles.tiles[1].icon = None;
        handles.arrange(&mut scene, VIEWPORT, VIEWPORT.height / 2.0);
        let events = HostEvents::new();

        let sequencer = FeatureSequencer::mount(&mut scene, &events, &handles, &SequenceConfig::default());
        assert!(sequencer.is_animated());
        let timeline = sequencer.timeline().unwrap();
        assert!(timeline.label(&reveal_label(2)).unwrap() > timeline.label(&reveal_label(1)).unwrap());

        sequencer.seek(1.0, &mut scene);
        assert_eq!(scene.drawn_fraction(handles.connector(1).unwrap()), 1.0);
    }

    #[test]
    fn test_build_timeline_tweens() {
        let (_scene, _events, handles, sequencer) = setup(&SequenceConfig::default());
        let timeline = sequencer.timeline().unwrap();
        let fill = handles.fill.unwrap();

        let fill_targets: Vec<f64> = timeline
            .tweens()
            .iter()
            .filter(|t| t.target == fill)
            .map(|t| t.to)
            .collect();
        assert_eq!(fill_targets, vec![1.0 / 3.0, 2.0 / 3.0, 1.0]);

        let brain_strokes = timeline
            .tweens()
            .iter()
            .filter(|t| t.property == Property::StrokeDashoffset && t.easing == EasingType::Power2InOut)
            .take(9)
            .map(|t| t.start)
            .collect::<Vec<_>>();
        assert_close(brain_strokes[0], 0.1);
        assert_close(brain_strokes[8], 0.1 + 8.0 * 0.15);
    }
}
