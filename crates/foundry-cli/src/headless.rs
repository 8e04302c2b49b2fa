//! The feature section mounted on an in-memory scene, for the inspection commands.

use foundry_core::config::SequenceConfig;
use foundry_core::geometry::Viewport;
use foundry_core::scroll::HostEvents;
use foundry_core::section::default_tiles;
use foundry_core::{FeatureSection, Scene, SectionHandles};

/// Desktop-sized viewport the inspection commands lay the page out in
pub const VIEWPORT_WIDTH: f64 = 1440.0;
pub const VIEWPORT_HEIGHT: f64 = 900.0;

pub struct Headless {
    pub scene: Scene,
    pub events: HostEvents,
    pub handles: SectionHandles,
    pub section: FeatureSection,
}

impl Headless {
    /// Mount the default section one screen below the top of the page
    pub fn mount(config: &SequenceConfig) -> Self {
        let mut scene = Scene::new();
        let handles = SectionHandles::build(&mut scene, &default_tiles());
        handles.arrange(
            &mut scene,
            Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            VIEWPORT_HEIGHT,
        );
        let events = HostEvents::new();
        let section = FeatureSection::mount(&mut scene, &events, &handles, config, |_| {});
        Self {
            scene,
            events,
            handles,
            section,
        }
    }

    /// Scroll the page to `offset`
    pub fn scroll_to(&mut self, offset: f64) {
        self.events.publish_scroll(offset, &mut self.scene);
    }
}

impl Drop for Headless {
    fn drop(&mut self) {
        self.section.unmount(&mut self.scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_core::Property;

    #[test]
    fn test_scroll_to_end_fills_the_bar() {
        let mut headless = Headless::mount(&SequenceConfig::default());
        let trigger = headless.section.sequencer().trigger().unwrap();
        assert_eq!(trigger.start(), VIEWPORT_HEIGHT - VIEWPORT_HEIGHT * 0.5);

        headless.scroll_to(trigger.offset_for(1.0));
        let fill = headless.handles.fill.unwrap();
        assert!((headless.scene.value(fill, Property::ScaleX) - 1.0).abs() < 1e-9);
        assert!(!headless.section.sequencer().pulse_running());
    }
}
