//! Vertical layout of the home page, measured in terminal cells.
//!
//! The document is a hero screen, the feature section, the pin spacer the
//! section consumes while it is held in place, and a footer.

use foundry_core::config::SequenceConfig;
use foundry_core::geometry::{BoundingBox, Viewport};
use ratatui::layout::Rect;

/// Smallest section height that still fits cards, connectors and button
const MIN_SECTION_HEIGHT: f64 = 12.0;
pub const FOOTER_HEIGHT: f64 = 4.0;
const CONNECTOR_ROWS: f64 = 4.0;
const BUTTON_ROWS: f64 = 3.0;
/// Narrower terminals stack the cards
const ROW_MIN_WIDTH: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub viewport: Viewport,
    /// Section top in document rows
    pub section_top: f64,
    pub section_height: f64,
    /// Rows of scroll consumed while the section is pinned
    pub pin_distance: f64,
}

impl PageLayout {
    /// `animated` is false when the section was left static and never pins
    pub fn new(viewport: Viewport, config: &SequenceConfig, animated: bool) -> Self {
        let pinned_top = viewport.height * config.start_offset_vh / 100.0;
        let section_height = (viewport.height - pinned_top).max(MIN_SECTION_HEIGHT);
        let pin_distance = if animated {
            (viewport.height * config.distance_vh / 100.0).max(0.0)
        } else {
            0.0
        };
        Self {
            viewport,
            section_top: viewport.height,
            section_height,
            pin_distance,
        }
    }

    pub fn document_height(&self) -> f64 {
        self.section_top + self.section_height + self.pin_distance + FOOTER_HEIGHT
    }

    /// Largest scroll offset
    pub fn scroll_limit(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    /// Section top relative to the viewport
    pub fn section_screen_top(&self, offset: f64, pin_shift: f64) -> f64 {
        self.section_top - offset + pin_shift
    }

    /// Box of the whole section relative to the viewport
    pub fn section_box(&self, offset: f64, pin_shift: f64) -> BoundingBox {
        BoundingBox::new(
            0.0,
            self.section_screen_top(offset, pin_shift),
            self.viewport.width,
            self.section_height,
        )
    }
}

/// Where the parts of the section go inside its box
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub cards: Vec<BoundingBox>,
    pub connectors: BoundingBox,
    pub button: BoundingBox,
    pub stacked: bool,
}

impl SectionLayout {
    pub fn new(section: BoundingBox, tiles: usize) -> Self {
        let count = tiles.max(1) as f64;
        let inner_left = section.left + 1.0;
        let inner_width = (section.width - 2.0).max(0.0);
        let cards_height = (section.height - CONNECTOR_ROWS - BUTTON_ROWS).max(3.0);
        let stacked = section.width < ROW_MIN_WIDTH;

        let cards = (0..tiles)
            .map(|i| {
                let i = i as f64;
                if stacked {
                    let h = (cards_height / count).floor();
                    BoundingBox::new(inner_left, section.top + i * h, inner_width, h)
                } else {
                    let w = ((inner_width - (count - 1.0)) / count).floor();
                    BoundingBox::new(inner_left + i * (w + 1.0), section.top, w, cards_height)
                }
            })
            .collect();

        let connectors_top = section.top + cards_height;
        let button_width = 24.0_f64.min(inner_width);
        Self {
            cards,
            connectors: BoundingBox::new(inner_left, connectors_top, inner_width, CONNECTOR_ROWS),
            button: BoundingBox::new(
                section.left + (section.width - button_width) / 2.0,
                connectors_top + CONNECTOR_ROWS,
                button_width,
                BUTTON_ROWS,
            ),
            stacked,
        }
    }
}

/// Clip a viewport-relative box to the drawable area
pub fn clip(bounds: BoundingBox, area: Rect) -> Option<Rect> {
    let (x, y) = (f64::from(area.x), f64::from(area.y));
    let left = (bounds.left.round() + x).max(x);
    let top = (bounds.top.round() + y).max(y);
    let right = ((bounds.left + bounds.width).round() + x).min(x + f64::from(area.width));
    let bottom = ((bounds.top + bounds.height).round() + y).min(y + f64::from(area.height));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}
