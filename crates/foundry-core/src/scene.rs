//! Host view abstraction
//!
//! The animation core never touches a concrete view tree. It writes numeric
//! properties and stroke styles through the [`Stage`] trait using opaque
//! [`ElementId`] handles that the host hands out. [`Scene`] is the in-memory
//! stage used by the terminal host, the CLI and tests.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Viewport};
use crate::shape::{svg, Icon, Primitive, ShapeKind};

/// Opaque handle to a host view element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out unique element handles
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> ElementId {
        self.next += 1;
        ElementId(self.next)
    }
}

/// Animatable numeric property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    StrokeDasharray,
    StrokeDashoffset,
    /// Vertical translation as a percentage of the element's own height
    YPercent,
    /// Horizontal scale with a left transform origin
    ScaleX,
    /// Uniform scale
    Scale,
}

impl Property {
    /// Value an element has before anything writes the property
    pub fn initial(&self) -> f64 {
        match self {
            Property::Opacity | Property::ScaleX | Property::Scale => 1.0,
            Property::StrokeDasharray | Property::StrokeDashoffset | Property::YPercent => 0.0,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Opacity => "opacity",
            Property::StrokeDasharray => "strokeDasharray",
            Property::StrokeDashoffset => "strokeDashoffset",
            Property::YPercent => "yPercent",
            Property::ScaleX => "scaleX",
            Property::Scale => "scale",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Round,
    Butt,
    Square,
}

/// Stroke presentation applied when a primitive is prepared for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// `None` means no fill
    pub fill: Option<String>,
    pub stroke: String,
    pub width: f64,
    pub line_cap: LineCap,
    pub line_join: LineCap,
}

/// Everything the animation core needs from a view layer
pub trait Stage {
    /// Write a numeric property
    fn set(&mut self, target: ElementId, property: Property, value: f64);

    /// Read back the last written value
    fn get(&self, target: ElementId, property: Property) -> Option<f64>;

    /// Apply stroke presentation to a primitive
    fn set_stroke(&mut self, target: ElementId, style: StrokeStyle);

    /// Whether the handle refers to a live element
    fn contains(&self, target: ElementId) -> bool;

    /// Look up a standalone or icon-owned primitive
    fn primitive(&self, target: ElementId) -> Option<&Primitive>;

    /// Mutable access to a composite icon
    fn icon_mut(&mut self, target: ElementId) -> Option<&mut Icon>;

    /// Current viewport size
    fn viewport(&self) -> Viewport;

    /// Box of an element relative to the viewport, as last laid out by the host
    fn bounding_box(&self, target: ElementId) -> Option<BoundingBox>;
}

#[derive(Debug, Clone)]
enum Element {
    Block,
    Shape(Primitive),
    Icon(Icon),
}

/// In-memory stage
#[derive(Debug, Default)]
pub struct Scene {
    ids: IdAllocator,
    elements: HashMap<ElementId, Element>,
    names: BTreeMap<String, ElementId>,
    /// Icon-owned primitive -> (icon, index)
    owners: HashMap<ElementId, (ElementId, usize)>,
    values: HashMap<(ElementId, Property), f64>,
    strokes: HashMap<ElementId, StrokeStyle>,
    boxes: HashMap<ElementId, BoundingBox>,
    viewport: Viewport,
    writes: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain box (card, text block, button)
    pub fn add_block(&mut self, name: &str) -> ElementId {
        let id = self.ids.next_id();
        self.elements.insert(id, Element::Block);
        self.names.insert(name.to_string(), id);
        id
    }

    /// Add a standalone stroked shape
    pub fn add_shape(&mut self, name: &str, shape: ShapeKind) -> ElementId {
        let id = self.ids.next_id();
        self.elements.insert(id, Element::Shape(Primitive::new(id, shape)));
        self.names.insert(name.to_string(), id);
        id
    }

    /// Add a standalone shape whose length the host measured itself
    pub fn add_measured_shape(&mut self, name: &str, shape: ShapeKind, length: f64) -> ElementId {
        let id = self.add_shape(name, shape);
        if let Some(Element::Shape(p)) = self.elements.get_mut(&id) {
            p.native_length = Some(length);
        }
        id
    }

    /// Parse SVG markup and add it as a composite icon
    pub fn add_icon_markup(&mut self, name: &str, markup: &str) -> crate::Result<ElementId> {
        let icon = svg::parse_icon(markup, &mut self.ids)?;
        Ok(self.add_icon(name, icon))
    }

    /// Load an SVG file as a composite icon named after the file
    pub fn add_icon_file(&mut self, path: &std::path::Path) -> crate::Result<ElementId> {
        let icon = svg::parse_icon_file(path, &mut self.ids)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.add_icon(&name, icon))
    }

    /// Add an already parsed icon; its primitives keep their handles
    pub fn add_icon(&mut self, name: &str, mut icon: Icon) -> ElementId {
        if icon.name.is_empty() {
            icon.name = name.to_string();
        }
        let id = self.ids.next_id();
        for (index, primitive) in icon.primitives.iter().enumerate() {
            self.owners.insert(primitive.id, (id, index));
        }
        self.elements.insert(id, Element::Icon(icon));
        self.names.insert(name.to_string(), id);
        id
    }

    /// Allocate a fresh handle without registering an element (for icon primitives)
    pub fn allocate(&mut self) -> ElementId {
        self.ids.next_id()
    }

    /// Remove an element; later writes to it are ignored
    pub fn remove(&mut self, target: ElementId) {
        if let Some(Element::Icon(icon)) = self.elements.remove(&target) {
            for p in &icon.primitives {
                self.owners.remove(&p.id);
            }
        }
        self.names.retain(|_, id| *id != target);
        self.boxes.remove(&target);
    }

    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        self.names.get(name).copied()
    }

    /// Readable name: the registered name, `icon[i]` for icon primitives, else the id
    pub fn label(&self, target: ElementId) -> String {
        if let Some((name, _)) = self.names.iter().find(|(_, id)| **id == target) {
            return name.clone();
        }
        match self.owners.get(&target) {
            Some(&(icon, index)) => format!("{}[{}]", self.label(icon), index),
            None => target.to_string(),
        }
    }

    pub fn icon(&self, target: ElementId) -> Option<&Icon> {
        match self.elements.get(&target) {
            Some(Element::Icon(icon)) => Some(icon),
            _ => None,
        }
    }

    pub fn stroke(&self, target: ElementId) -> Option<&StrokeStyle> {
        self.strokes.get(&target)
    }

    /// Current value, falling back to the property's initial value
    pub fn value(&self, target: ElementId, property: Property) -> f64 {
        self.get(target, property).unwrap_or_else(|| property.initial())
    }

    /// Fraction of a primitive's stroke that is visible (0 = hidden, 1 = fully drawn)
    pub fn drawn_fraction(&self, target: ElementId) -> f64 {
        let dash = self.value(target, Property::StrokeDasharray);
        if dash <= 0.0 {
            return 1.0;
        }
        let offset = self.value(target, Property::StrokeDashoffset);
        (1.0 - offset / dash).clamp(0.0, 1.0)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Record where the host laid an element out
    pub fn set_box(&mut self, target: ElementId, bounds: BoundingBox) {
        if self.contains(target) {
            self.boxes.insert(target, bounds);
        }
    }

    /// Number of property and stroke writes so far
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl Stage for Scene {
    fn set(&mut self, target: ElementId, property: Property, value: f64) {
        if !self.contains(target) {
            return;
        }
        self.writes += 1;
        self.values.insert((target, property), value);
    }

    fn get(&self, target: ElementId, property: Property) -> Option<f64> {
        self.values.get(&(target, property)).copied()
    }

    fn set_stroke(&mut self, target: ElementId, style: StrokeStyle) {
        if !self.contains(target) {
            return;
        }
        self.writes += 1;
        self.strokes.insert(target, style);
    }

    fn contains(&self, target: ElementId) -> bool {
        self.elements.contains_key(&target) || self.owners.contains_key(&target)
    }

    fn primitive(&self, target: ElementId) -> Option<&Primitive> {
        match self.elements.get(&target) {
            Some(Element::Shape(p)) => Some(p),
            Some(_) => None,
            None => {
                let (icon, index) = self.owners.get(&target)?;
                match self.elements.get(icon) {
                    Some(Element::Icon(icon)) => icon.primitives.get(*index),
                    _ => None,
                }
            }
        }
    }

    fn icon_mut(&mut self, target: ElementId) -> Option<&mut Icon> {
        match self.elements.get_mut(&target) {
            Some(Element::Icon(icon)) => Some(icon),
            _ => None,
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounding_box(&self, target: ElementId) -> Option<BoundingBox> {
        self.boxes.get(&target).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_and_lookup() {
        let mut scene = Scene::new();
        let card = scene.add_block("card-0");
        assert_eq!(scene.lookup("card-0"), Some(card));
        assert!(scene.contains(card));
        assert_eq!(scene.value(card, Property::Opacity), 1.0);

        scene.set(card, Property::Opacity, 0.3);
        assert_eq!(scene.get(card, Property::Opacity), Some(0.3));
        assert_eq!(scene.write_count(), 1);
        assert_eq!(scene.label(card), "card-0");
        assert_eq!(scene.label(ElementId(99)), "#99");
    }

    #[test]
    fn test_removed_elements_ignore_writes() {
        let mut scene = Scene::new();
        let card = scene.add_block("card");
        scene.remove(card);
        scene.set(card, Property::Opacity, 0.0);
        assert_eq!(scene.write_count(), 0);
        assert!(scene.lookup("card").is_none());
    }

    #[test]
    fn test_icon_primitives_are_addressable() {
        let mut scene = Scene::new();
        let icon = scene
            .add_icon_markup(
                "share",
                r#"<svg viewBox="0 0 24 24"><circle cx="6" cy="12" r="3"/><line x1="0" y1="0" x2="3" y2="4"/></svg>"#,
            )
            .unwrap();
        let ids: Vec<_> = scene.icon(icon).unwrap().primitives.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(scene.contains(ids[1]));
        assert_eq!(scene.primitive(ids[1]).unwrap().shape.tag(), "line");
        assert!(scene.primitive(icon).is_none());
        assert_eq!(scene.label(ids[0]), "share[0]");
    }

    #[test]
    fn test_icon_from_file() {
        let path = std::env::temp_dir().join(format!("foundry-sparkle-{}.svg", std::process::id()));
        std::fs::write(
            &path,
            r#"<svg viewBox="0 0 24 24"><path d="M0 0 h10"/><rect width="2" height="3"/></svg>"#,
        )
        .unwrap();

        let mut scene = Scene::new();
        let before = scene.add_block("card");
        let icon = scene.add_icon_file(&path).unwrap();
        let name = path.file_stem().unwrap().to_string_lossy().to_string();
        assert_eq!(scene.lookup(&name), Some(icon));

        let ids: Vec<_> = scene.icon(icon).unwrap().primitives.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&before) && !ids.contains(&icon));
        assert_eq!(scene.primitive(ids[1]).unwrap().measure().unwrap(), 10.0);

        std::fs::remove_file(&path).ok();
        assert!(scene.add_icon_file(&path).is_err());
    }

    #[test]
    fn test_drawn_fraction() {
        let mut scene = Scene::new();
        let line = scene.add_shape("pipe", ShapeKind::Line { x1: 0.0, y1: 0.0, x2: 10.0, y2: 0.0 });
        scene.set(line, Property::StrokeDasharray, 10.0);
        scene.set(line, Property::StrokeDashoffset, 10.0);
        assert_eq!(scene.drawn_fraction(line), 0.0);
        scene.set(line, Property::StrokeDashoffset, 2.5);
        assert!((scene.drawn_fraction(line) - 0.75).abs() < 1e-12);
    }
}
