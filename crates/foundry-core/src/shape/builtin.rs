//! The three feature icons, as 24x24 stroke outlines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scene::LineCap;

const BRAIN: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="lucide lucide-brain" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
  <path d="M12 5a3 3 0 1 0-5.997.125 4 4 0 0 0-2.526 5.77 4 4 0 0 0 .556 6.588A4 4 0 1 0 12 18Z"/>
  <path d="M12 5a3 3 0 1 1 5.997.125 4 4 0 0 1 2.526 5.77 4 4 0 0 1-.556 6.588A4 4 0 1 1 12 18Z"/>
  <path d="M15 13a4.5 4.5 0 0 1-3-4 4.5 4.5 0 0 1-3 4"/>
  <path d="M17.599 6.5a3 3 0 0 0 .399-1.375"/>
  <path d="M6.003 5.125A3 3 0 0 0 6.401 6.5"/>
  <path d="M3.477 10.896a4 4 0 0 1 .585-.396"/>
  <path d="M19.938 10.5a4 4 0 0 1 .585.396"/>
  <path d="M6 18a4 4 0 0 1-1.967-.516"/>
  <path d="M19.967 17.484A4 4 0 0 1 18 18"/>
</svg>"#;

const GLOBE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="lucide lucide-globe" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
  <circle cx="12" cy="12" r="10"/>
  <path d="M12 2a14.5 14.5 0 0 0 0 20 14.5 14.5 0 0 0 0-20"/>
  <path d="M2 12h20"/>
</svg>"#;

const SHARE_2: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="lucide lucide-share-2" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
  <circle cx="18" cy="5" r="3"/>
  <circle cx="6" cy="12" r="3"/>
  <circle cx="18" cy="19" r="3"/>
  <line x1="8.59" x2="15.42" y1="13.51" y2="17.49"/>
  <line x1="15.41" x2="8.59" y1="6.51" y2="10.49"/>
</svg>"#;

/// Built-in feature icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    Brain,
    Globe,
    #[serde(rename = "share-2")]
    Share2,
}

impl IconKind {
    pub const ALL: [IconKind; 3] = [IconKind::Brain, IconKind::Globe, IconKind::Share2];

    pub fn name(&self) -> &'static str {
        match self {
            IconKind::Brain => "brain",
            IconKind::Globe => "globe",
            IconKind::Share2 => "share-2",
        }
    }

    pub fn markup(&self) -> &'static str {
        match self {
            IconKind::Brain => BRAIN,
            IconKind::Globe => GLOBE,
            IconKind::Share2 => SHARE_2,
        }
    }

    /// Brain strokes read best with round caps; the geometric icons use butt caps
    pub fn line_cap(&self) -> LineCap {
        match self {
            IconKind::Brain => LineCap::Round,
            IconKind::Globe | IconKind::Share2 => LineCap::Butt,
        }
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IconKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brain" => Ok(IconKind::Brain),
            "globe" => Ok(IconKind::Globe),
            "share-2" | "share2" | "share" => Ok(IconKind::Share2),
            other => Err(crate::Error::Other(format!("unknown icon '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::IdAllocator;
    use crate::shape::svg::parse_icon;
    use std::f64::consts::PI;

    #[test]
    fn test_builtin_icons_parse() {
        let mut ids = IdAllocator::default();
        let counts: Vec<usize> = IconKind::ALL
            .iter()
            .map(|kind| parse_icon(kind.markup(), &mut ids).unwrap().primitives.len())
            .collect();
        assert_eq!(counts, vec![9, 3, 5]);
    }

    #[test]
    fn test_builtin_lengths_are_measurable() {
        let mut ids = IdAllocator::default();
        for kind in IconKind::ALL {
            let icon = parse_icon(kind.markup(), &mut ids).unwrap();
            assert_eq!(icon.name, kind.name());
            for primitive in &icon.primitives {
                let length = primitive.measure().unwrap();
                assert!(length.is_finite() && length > 0.0, "{} {:?}", kind, primitive.shape);
            }
        }

        let globe = parse_icon(IconKind::Globe.markup(), &mut ids).unwrap();
        assert!((globe.primitives[0].measure().unwrap() - 20.0 * PI).abs() < 1e-9);
        assert_eq!(globe.primitives[2].measure().unwrap(), 20.0);
    }

    #[test]
    fn test_icon_names_round_trip() {
        for kind in IconKind::ALL {
            assert_eq!(kind.name().parse::<IconKind>().unwrap(), kind);
        }
        assert!("sparkles".parse::<IconKind>().is_err());
        assert_eq!(IconKind::Brain.line_cap(), LineCap::Round);
        assert_eq!(IconKind::Share2.line_cap(), LineCap::Butt);
    }
}
