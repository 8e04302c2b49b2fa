use serde::{Deserialize, Serialize};

use crate::shape::builtin::IconKind;

/// One feature unit of the section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Display index; drives sequencing order
    pub index: usize,
    pub icon: IconKind,
    pub title: String,
    pub description: String,
}

impl Tile {
    /// Id of the stroke gradient installed into this tile's icon
    pub fn gradient_id(&self) -> String {
        format!("iconGrad{}", self.index)
    }
}

/// The three features of the landing page, in sequencing order
pub fn default_tiles() -> Vec<Tile> {
    vec![
        Tile {
            index: 0,
            icon: IconKind::Brain,
            title: "AI Breakdown".to_string(),
            description: "Intelligent analysis that transforms your big idea into structured, \
                actionable steps with comprehensive BRD/PRD (Business Requirements \
                Document/Product Requirements Document) generation"
                .to_string(),
        },
        Tile {
            index: 1,
            icon: IconKind::Globe,
            title: "Website Generation".to_string(),
            description: "Professional websites created instantly, tailored to your startup's \
                needs. Generate modern, responsive designs with optimized layouts, compelling \
                copy, and seamless user experience. From landing pages to full multi-page sites, \
                get production-ready code in minutes with built-in SEO best practices and \
                mobile-first design."
                .to_string(),
        },
        Tile {
            index: 2,
            icon: IconKind::Share2,
            title: "Marketing".to_string(),
            description: "Auto-post engaging content to Instagram and Twitter with AI-generated \
                visuals and copy. Integrated call management system for customer engagement \
                with smart routing and automated responses."
                .to_string(),
        },
    ]
}

/// View box shared by the three connector paths
pub const CONNECTOR_VIEW_BOX: [f64; 4] = [0.0, 0.0, 1000.0, 220.0];

/// Every connector drops this far before turning horizontal
pub const CONNECTOR_DROP: f64 = 110.0;

/// Pipe drawn between the cards and the scroll button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connector {
    Left,
    Middle,
    Right,
}

impl Connector {
    pub const ALL: [Connector; 3] = [Connector::Left, Connector::Middle, Connector::Right];

    /// Connector drawn once tile `index` completes
    pub fn for_tile(index: usize) -> Option<Connector> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Connector::Left => "left",
            Connector::Middle => "middle",
            Connector::Right => "right",
        }
    }

    /// Horizontal start and end of the connector, in view box units
    pub fn span(&self) -> (f64, f64) {
        match self {
            Connector::Left => (0.0, 430.0),
            Connector::Middle => (500.0, 0.0),
            Connector::Right => (1000.0, 570.0),
        }
    }

    pub fn path_data(&self) -> &'static str {
        match self {
            Connector::Left => "M0 0 V110 H430",
            Connector::Middle => "M500 0 V110 H0",
            Connector::Right => "M1000 0 V110 H570",
        }
    }
}
