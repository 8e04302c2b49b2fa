//! The landing page's feature section
//!
//! [`FeatureSection`] mounts the two cooperating pieces: the
//! [`LayoutProber`] that reports tile positions, and the
//! [`FeatureSequencer`] that scrubs the tile animations with scroll.

pub mod handles;
pub mod sequencer;
pub mod tiles;

use tracing::info;

use crate::config::SequenceConfig;
use crate::geometry::Position;
use crate::layout::LayoutProber;
use crate::scene::Stage;
use crate::scroll::HostEvents;

pub use handles::{SectionHandles, TileHandles};
pub use sequencer::{build_timeline, end_label, reveal_label, FeatureSequencer, Prepared};
pub use tiles::{default_tiles, Connector, Tile};

#[derive(Debug)]
pub struct FeatureSection {
    prober: Option<LayoutProber>,
    sequencer: FeatureSequencer,
}

impl FeatureSection {
    /// Mount the section. `on_positions` receives tile positions now and after every resize.
    pub fn mount(
        stage: &mut dyn Stage,
        events: &HostEvents,
        handles: &SectionHandles,
        config: &SequenceConfig,
        on_positions: impl FnMut(&[Position]) + 'static,
    ) -> Self {
        let cards = handles.tiles.iter().map(|t| t.card).collect();
        let prober = LayoutProber::mount(stage, events, cards, config.position_divisor, on_positions);
        let sequencer = FeatureSequencer::mount(stage, events, handles, config);
        info!(
            "Feature section mounted ({})",
            if sequencer.is_animated() { "animated" } else { "static" }
        );
        Self {
            prober: Some(prober),
            sequencer,
        }
    }

    pub fn sequencer(&self) -> &FeatureSequencer {
        &self.sequencer
    }

    /// Release every listener and stop all animation
    pub fn unmount(&mut self, stage: &mut dyn Stage) {
        self.prober = None;
        self.sequencer.unmount(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;
    use crate::scene::Scene;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_mount_reports_positions_and_unmounts_cleanly() {
        let mut scene = Scene::new();
        let handles = SectionHandles::build(&mut scene, &default_tiles());
        handles.arrange(&mut scene, Viewport::new(1200.0, 800.0), 400.0);
        let events = HostEvents::new();
        let positions: Rc<RefCell<Vec<Position>>> = Rc::default();

        let sink = Rc::clone(&positions);
        let mut section = FeatureSection::mount(
            &mut scene,
            &events,
            &handles,
            &SequenceConfig::default(),
            move |p| *sink.borrow_mut() = p.to_vec(),
        );

        assert_eq!(positions.borrow().len(), 3);
        assert!(positions.borrow().iter().all(|p| p.z == 0.0));
        assert!(section.sequencer().is_animated());
        assert_eq!(events.listener_count(), 4);

        section.unmount(&mut scene);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_two_tiles_probe_but_stay_static() {
        let mut scene = Scene::new();
        let handles = SectionHandles::build(&mut scene, &default_tiles()[..2]);
        handles.arrange(&mut scene, Viewport::new(800.0, 600.0), 0.0);
        let events = HostEvents::new();
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let section = FeatureSection::mount(
            &mut scene,
            &events,
            &handles,
            &SequenceConfig::default(),
            move |p| *sink.borrow_mut() = p.len(),
        );

        assert_eq!(*count.borrow(), 2);
        assert!(!section.sequencer().is_animated());
        assert_eq!(events.listener_count(), 1);
    }
}
