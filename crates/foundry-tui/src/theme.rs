use foundry_core::config::{ThemeColorOverrides, ThemeConfig};
use foundry_core::shape::icon::{GRADIENT_CYAN, GRADIENT_PURPLE, GRADIENT_SKY};
use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub card: Color,
    pub fg: Color,
    pub dim: Color,

    // Stroke gradient
    pub cyan: Color,
    pub sky: Color,
    pub purple: Color,

    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        light()
    }
}

impl Theme {
    /// Gradient color at `t` in 0.0..=1.0
    pub fn gradient(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.5 {
            mix(self.cyan, self.sky, t * 2.0)
        } else {
            mix(self.sky, self.purple, (t - 0.5) * 2.0)
        }
    }

    /// `color` faded towards the card background; `alpha` 1.0 keeps it unchanged
    pub fn fade(&self, color: Color, alpha: f64) -> Color {
        mix(self.card, color, alpha.clamp(0.0, 1.0))
    }
}

fn mix(a: Color, b: Color, t: f64) -> Color {
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let channel = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
            Color::Rgb(channel(r1, r2), channel(g1, g2), channel(b1, b2))
        }
        _ if t < 0.5 => a,
        _ => b,
    }
}

fn gradient_stop(hex: &str) -> Color {
    parse_hex_color(hex).unwrap_or(Color::White)
}

/// Black page, slate cards
pub fn dark() -> Theme {
    Theme {
        bg: Color::Rgb(0x00, 0x00, 0x00),
        card: Color::Rgb(0x11, 0x18, 0x27),
        fg: Color::Rgb(0xf9, 0xfa, 0xfb),
        dim: Color::Rgb(0x4b, 0x55, 0x63),
        cyan: gradient_stop(GRADIENT_CYAN),
        sky: gradient_stop(GRADIENT_SKY),
        purple: gradient_stop(GRADIENT_PURPLE),
        error: Color::Rgb(0xf8, 0x71, 0x71),
        success: Color::Rgb(0x4a, 0xde, 0x80),
    }
}

pub fn light() -> Theme {
    Theme {
        bg: Color::Rgb(0xf9, 0xfa, 0xfb),
        card: Color::Rgb(0xff, 0xff, 0xff),
        fg: Color::Rgb(0x11, 0x18, 0x27),
        dim: Color::Rgb(0xd1, 0xd5, 0xdb),
        cyan: Color::Rgb(0x06, 0xb6, 0xd4),
        sky: Color::Rgb(0x0e, 0xa5, 0xe9),
        purple: Color::Rgb(0x93, 0x33, 0xea),
        error: Color::Rgb(0xdc, 0x26, 0x26),
        success: Color::Rgb(0x16, 0xa3, 0x4a),
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config, unknown names fall back to the light theme
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "foundry-light" | "light" => light(),
        "foundry-dark" | "dark" => dark(),
        other => {
            tracing::warn!("Unknown theme '{}', using foundry-light", other);
            light()
        }
    };

    apply_overrides(base, &config.colors)
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 9] = [
        (&overrides.bg, &mut theme.bg),
        (&overrides.card, &mut theme.card),
        (&overrides.fg, &mut theme.fg),
        (&overrides.dim, &mut theme.dim),
        (&overrides.cyan, &mut theme.cyan),
        (&overrides.sky, &mut theme.sky),
        (&overrides.purple, &mut theme.purple),
        (&overrides.error, &mut theme.error),
        (&overrides.success, &mut theme.success),
    ];
    for (hex, slot) in slots {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }

    theme
}

pub fn available_themes() -> Vec<&'static str> {
    vec!["foundry-dark", "foundry-light"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert!(matches!(parse_hex_color("#ff5500"), Some(Color::Rgb(255, 85, 0))));
        assert!(matches!(parse_hex_color("f50"), Some(Color::Rgb(255, 85, 0))));
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
    }

    #[test]
    fn test_load_theme_default_is_light() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.bg, Color::Rgb(0xf9, 0xfa, 0xfb)));

        let theme = load_theme(&ThemeConfig {
            name: "foundry-dark".to_string(),
            colors: ThemeColorOverrides::default(),
        });
        assert!(matches!(theme.cyan, Color::Rgb(0x22, 0xd3, 0xee)));
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "foundry-dark".to_string(),
            colors: ThemeColorOverrides {
                purple: Some("#ff0000".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.purple, Color::Rgb(255, 0, 0)));
        assert!(matches!(theme.bg, Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn test_gradient_endpoints() {
        let theme = dark();
        assert_eq!(theme.gradient(0.0), theme.cyan);
        assert_eq!(theme.gradient(0.5), theme.sky);
        assert_eq!(theme.gradient(1.0), theme.purple);
        assert_eq!(theme.fade(theme.fg, 0.0), theme.card);
    }
}
