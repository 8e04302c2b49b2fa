//! Reads icon markup into an [`Icon`].
//!
//! Only what stroke drawing needs is kept: the view box, linear gradient
//! definitions and the drawable primitives
//! (`path, line, polyline, polygon, circle, rect, ellipse`) in document order.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{GradientDef, GradientStop, Icon, Primitive, ShapeKind};
use crate::geometry::Point;
use crate::scene::IdAllocator;
use crate::{Error, Result};

/// Parse an SVG file from disk
pub fn parse_icon_file(path: &Path, ids: &mut IdAllocator) -> Result<Icon> {
    let content = std::fs::read_to_string(path)?;
    parse_icon(&content, ids)
}

/// Parse SVG markup, giving every primitive a fresh handle
pub fn parse_icon(markup: &str, ids: &mut IdAllocator) -> Result<Icon> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut icon = Icon::default();
    let mut seen_root = false;
    let mut gradient: Option<GradientDef> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"svg" => {
                seen_root = true;
                icon.name = icon_name(&e);
                icon.view_box = attr(&e, b"viewBox").and_then(|v| parse_view_box(&v));
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"linearGradient" => {
                gradient = Some(gradient_def(&e));
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"linearGradient" => {
                icon.defs.push(gradient_def(&e));
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"linearGradient" => {
                if let Some(def) = gradient.take() {
                    icon.defs.push(def);
                }
            }
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"stop" => {
                if let Some(def) = gradient.as_mut() {
                    def.stops.push(GradientStop {
                        offset: attr(&e, b"offset").map(|v| parse_offset(&v)).unwrap_or(0.0),
                        color: attr(&e, b"stop-color")
                            .or_else(|| attr(&e, b"stopColor"))
                            .unwrap_or_else(|| "black".to_string()),
                    });
                }
            }
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if let Some(shape) = drawable(&e) {
                    icon.primitives.push(Primitive::new(ids.next_id(), shape));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Svg(format!(
                    "Failed to parse icon at byte {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::Svg("no <svg> element found".to_string()));
    }

    Ok(icon)
}

fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Numeric attribute: missing reads as 0, garbage as NaN
fn number(e: &BytesStart, key: &[u8]) -> f64 {
    match attr(e, key) {
        Some(value) => parse_float(&value),
        None => 0.0,
    }
}

/// Longest leading decimal number, ignoring units such as `px`
pub(crate) fn parse_float(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let digits_start = end;
    while matches!(bytes.get(end), Some(b'0'..=b'9')) {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while matches!(bytes.get(end), Some(b'0'..=b'9')) {
            end += 1;
        }
    }
    if end == digits_start || &s[digits_start..end] == "." {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_digits = exp;
        while matches!(bytes.get(exp), Some(b'0'..=b'9')) {
            exp += 1;
        }
        if exp > exp_digits {
            end = exp;
        }
    }
    s[..end].parse().unwrap_or(f64::NAN)
}

fn parse_points(value: &str) -> Vec<Point> {
    let numbers: Vec<f64> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_float)
        .collect();
    numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

fn parse_view_box(value: &str) -> Option<[f64; 4]> {
    let parts: Vec<f64> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_float)
        .collect();
    match parts.as_slice() {
        [x, y, w, h] if parts.iter().all(|v| v.is_finite()) => Some([*x, *y, *w, *h]),
        _ => None,
    }
}

/// `"50%"` -> 0.5, `"0.5"` -> 0.5
fn parse_offset(value: &str) -> f64 {
    let value = value.trim();
    match value.strip_suffix('%') {
        Some(percent) => parse_float(percent) / 100.0,
        None => parse_float(value),
    }
}

/// `class="lucide lucide-brain"` -> `brain`
fn icon_name(e: &BytesStart) -> String {
    attr(e, b"class")
        .and_then(|class| {
            class
                .split_whitespace()
                .find_map(|c| c.strip_prefix("lucide-").map(str::to_string))
        })
        .unwrap_or_default()
}

fn gradient_def(e: &BytesStart) -> GradientDef {
    let get = |key: &[u8], default: &str| attr(e, key).unwrap_or_else(|| default.to_string());
    GradientDef {
        id: get(b"id", ""),
        x1: get(b"x1", "0%"),
        y1: get(b"y1", "0%"),
        x2: get(b"x2", "100%"),
        y2: get(b"y2", "0%"),
        stops: Vec::new(),
    }
}

fn drawable(e: &BytesStart) -> Option<ShapeKind> {
    let shape = match e.name().as_ref() {
        b"path" => ShapeKind::Path {
            data: attr(e, b"d").unwrap_or_default(),
        },
        b"line" => ShapeKind::Line {
            x1: number(e, b"x1"),
            y1: number(e, b"y1"),
            x2: number(e, b"x2"),
            y2: number(e, b"y2"),
        },
        b"circle" => ShapeKind::Circle { r: number(e, b"r") },
        b"ellipse" => ShapeKind::Ellipse {
            rx: number(e, b"rx"),
            ry: number(e, b"ry"),
        },
        b"rect" => ShapeKind::Rect {
            width: number(e, b"width"),
            height: number(e, b"height"),
        },
        b"polyline" => ShapeKind::Polyline {
            points: parse_points(&attr(e, b"points").unwrap_or_default()),
            closed: false,
        },
        b"polygon" => ShapeKind::Polyline {
            points: parse_points(&attr(e, b"points").unwrap_or_default()),
            closed: true,
        },
        _ => return None,
    };
    Some(shape)
}
