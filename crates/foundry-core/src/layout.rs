//! Reports where the feature tiles sit, for an overlay scene that lines its
//! own objects up with them.

use tracing::debug;

use crate::geometry::Position;
use crate::scene::{ElementId, Stage};
use crate::scroll::{HostEvents, Subscription};

/// Only the first tiles of the section are probed
pub const PROBED_TILES: usize = 3;

/// Centers of the first [`PROBED_TILES`] tiles relative to the viewport
/// center, scaled down by `divisor`, y pointing up, z always 0.
///
/// Fewer tiles yield a shorter list. A tile the host has not laid out yet
/// counts as an empty box at the viewport origin.
pub fn compute_positions(stage: &dyn Stage, tiles: &[ElementId], divisor: f64) -> Vec<Position> {
    let center = stage.viewport().center();
    tiles
        .iter()
        .take(PROBED_TILES)
        .map(|tile| {
            let bounds = stage.bounding_box(*tile).unwrap_or_default();
            let c = bounds.center();
            Position {
                x: (c.x - center.x) / divisor,
                y: -(c.y - center.y) / divisor,
                z: 0.0,
            }
        })
        .collect()
}

/// Emits tile positions on mount and after every resize until dropped
#[derive(Debug)]
pub struct LayoutProber {
    _resize: Subscription,
}

impl LayoutProber {
    pub fn mount(
        stage: &mut dyn Stage,
        events: &HostEvents,
        tiles: Vec<ElementId>,
        divisor: f64,
        mut on_positions: impl FnMut(&[Position]) + 'static,
    ) -> Self {
        let mut probe = move |stage: &dyn Stage| {
            let positions = compute_positions(stage, &tiles, divisor);
            debug!("Probed {} tile positions", positions.len());
            on_positions(&positions);
        };

        probe(&*stage);
        let resize = events.resize.subscribe(move |_, stage| probe(&*stage));

        Self { _resize: resize }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, Viewport};
    use crate::scene::Scene;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scene_with_tiles(count: usize) -> (Scene, Vec<ElementId>) {
        let mut scene = Scene::new();
        scene.set_viewport(Viewport::new(1200.0, 800.0));
        let tiles = (0..count)
            .map(|i| {
                let tile = scene.add_block(&format!("tile-{}", i));
                scene.set_box(tile, BoundingBox::new(i as f64 * 400.0, 200.0, 400.0, 400.0));
                tile
            })
            .collect();
        (scene, tiles)
    }

    #[test]
    fn test_positions_are_centered_and_inverted() {
        let (scene, tiles) = scene_with_tiles(3);
        let positions = compute_positions(&scene, &tiles, 100.0);

        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0], Position { x: -4.0, y: 0.0, z: 0.0 });
        assert_eq!(positions[1], Position { x: 0.0, y: 0.0, z: 0.0 });
        assert_eq!(positions[2], Position { x: 4.0, y: 0.0, z: 0.0 });

        let mut scene = scene;
        scene.set_box(tiles[0], BoundingBox::new(0.0, 0.0, 200.0, 200.0));
        let moved = compute_positions(&scene, &tiles, 100.0);
        assert_eq!(moved[0], Position { x: -5.0, y: 3.0, z: 0.0 });
    }

    #[test]
    fn test_fewer_tiles_yield_shorter_list() {
        for count in 0..3 {
            let (scene, tiles) = scene_with_tiles(count);
            assert_eq!(compute_positions(&scene, &tiles, 100.0).len(), count);
        }
        let (scene, tiles) = scene_with_tiles(5);
        assert_eq!(compute_positions(&scene, &tiles, 100.0).len(), 3);
    }

    #[test]
    fn test_emits_on_mount_and_resize() {
        let (mut scene, tiles) = scene_with_tiles(3);
        let events = HostEvents::new();
        let seen: Rc<RefCell<Vec<Vec<Position>>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let prober = LayoutProber::mount(&mut scene, &events, tiles.clone(), 100.0, move |p| {
            sink.borrow_mut().push(p.to_vec())
        });
        assert_eq!(seen.borrow().len(), 1);

        scene.set_viewport(Viewport::new(800.0, 800.0));
        scene.set_box(tiles[2], BoundingBox::new(0.0, 600.0, 400.0, 400.0));
        events.publish_resize(Viewport::new(800.0, 800.0), &mut scene);

        let last = seen.borrow().last().cloned().unwrap();
        assert_eq!(last[0], Position { x: -2.0, y: 0.0, z: 0.0 });
        assert_eq!(last[2], Position { x: -2.0, y: -4.0, z: 0.0 });

        drop(prober);
        assert_eq!(events.listener_count(), 0);
        events.publish_resize(Viewport::new(100.0, 100.0), &mut scene);
        assert_eq!(seen.borrow().len(), 2);
    }
}
