//! Logical element ids of the feature section, as handed out by the host.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::tiles::{Connector, Tile};
use crate::geometry::{BoundingBox, Viewport};
use crate::scene::{ElementId, LineCap, Scene};
use crate::shape::ShapeKind;

/// Handles for one tile. Only the card is mandatory; missing parts are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileHandles {
    pub card: ElementId,
    /// The stroked icon drawn over the silhouette
    pub icon: Option<ElementId>,
    /// Block holding the icon and title, slid upwards on reveal
    pub title_block: Option<ElementId>,
    pub description: Option<ElementId>,
    pub line_cap: LineCap,
    pub gradient_id: String,
}

/// Everything the sequencer animates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionHandles {
    pub section: ElementId,
    pub tiles: Vec<TileHandles>,
    /// Left, middle and right connector
    pub connectors: [Option<ElementId>; 3],
    /// Scroll button fill bar (scaled horizontally from the left)
    pub fill: Option<ElementId>,
    /// Scroll button (pulses)
    pub button: Option<ElementId>,
}

impl SectionHandles {
    /// Create the section's elements in a scene
    pub fn build(scene: &mut Scene, tiles: &[Tile]) -> Self {
        let section = scene.add_block("features");

        let tiles = tiles
            .iter()
            .map(|tile| {
                let i = tile.index;
                let card = scene.add_block(&format!("card-{}", i));
                let icon = match scene.add_icon_markup(&format!("icon-{}", i), tile.icon.markup()) {
                    Ok(icon) => Some(icon),
                    Err(e) => {
                        warn!("Could not load icon {}: {}", tile.icon, e);
                        None
                    }
                };
                TileHandles {
                    card,
                    icon,
                    title_block: Some(scene.add_block(&format!("title-{}", i))),
                    description: Some(scene.add_block(&format!("description-{}", i))),
                    line_cap: tile.icon.line_cap(),
                    gradient_id: tile.gradient_id(),
                }
            })
            .collect();

        let connectors = Connector::ALL.map(|c| {
            Some(scene.add_shape(
                &format!("connector-{}", c.name()),
                ShapeKind::Path {
                    data: c.path_data().to_string(),
                },
            ))
        });

        Self {
            section,
            tiles,
            connectors,
            fill: Some(scene.add_block("scroll-fill")),
            button: Some(scene.add_block("scroll-button")),
        }
    }

    /// Place the cards in one row of the viewport with the section's top at `top`
    pub fn arrange(&self, scene: &mut Scene, viewport: Viewport, top: f64) {
        scene.set_viewport(viewport);
        scene.set_box(self.section, BoundingBox::new(0.0, top, viewport.width, viewport.height));

        let count = self.tiles.len().max(1) as f64;
        let gap = viewport.width * 0.02;
        let width = (viewport.width - gap * (count + 1.0)) / count;
        for (i, tile) in self.tiles.iter().enumerate() {
            let left = gap + i as f64 * (width + gap);
            scene.set_box(tile.card, BoundingBox::new(left, top + gap, width, width));
        }
    }

    pub fn connector(&self, index: usize) -> Option<ElementId> {
        self.connectors.get(index).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Stage;
    use crate::section::tiles::default_tiles;

    #[test]
    fn test_build_default_section() {
        let mut scene = Scene::new();
        let handles = SectionHandles::build(&mut scene, &default_tiles());

        assert_eq!(handles.tiles.len(), 3);
        assert!(handles.tiles.iter().all(|t| t.icon.is_some()));
        assert_eq!(handles.tiles[0].line_cap, LineCap::Round);
        assert_eq!(handles.tiles[1].gradient_id, "iconGrad1");
        assert_eq!(scene.lookup("connector-middle"), handles.connector(1));
        assert!(handles.fill.is_some() && handles.button.is_some());
    }

    #[test]
    fn test_arrange_row() {
        let mut scene = Scene::new();
        let handles = SectionHandles::build(&mut scene, &default_tiles());
        handles.arrange(&mut scene, Viewport::new(1000.0, 800.0), 0.0);

        let boxes: Vec<BoundingBox> = handles
            .tiles
            .iter()
            .map(|t| scene.bounding_box(t.card).unwrap())
            .collect();
        assert!(boxes[0].left < boxes[1].left && boxes[1].left < boxes[2].left);
        assert!((boxes[1].center().x - 500.0).abs() < 1e-9);
    }
}
