use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::animation::easing::EasingType;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub sequence: SequenceConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (logs live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Smooth scrolling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smoothing; when off, scroll input is applied immediately
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Fraction of the remaining distance covered per 60 Hz frame (lower = smoother)
    #[serde(default = "default_lerp")]
    pub lerp: f64,
    /// Multiplier applied to raw wheel deltas
    #[serde(default = "default_wheel_multiplier")]
    pub wheel_multiplier: f64,
    /// Frame rate used while an animation is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Easing for programmatic `scroll_to` jumps
    #[serde(default)]
    pub easing: EasingType,
    /// Duration of programmatic jumps in milliseconds
    #[serde(default = "default_jump_duration")]
    pub jump_duration_ms: u64,
    /// Rows scrolled per wheel notch / key press
    #[serde(default = "default_lines_per_step")]
    pub lines_per_step: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            lerp: default_lerp(),
            wheel_multiplier: default_wheel_multiplier(),
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
            jump_duration_ms: default_jump_duration(),
            lines_per_step: default_lines_per_step(),
        }
    }
}

/// Tuning values for the feature-section timeline.
///
/// Durations and offsets are in timeline units; the whole timeline is
/// normalised onto the scroll range, so only their ratios matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// How far before the section's top the trigger starts, in % of viewport height
    #[serde(default = "default_start_offset_vh")]
    pub start_offset_vh: f64,
    /// Length of the pinned scroll range, in % of viewport height
    #[serde(default = "default_distance_vh")]
    pub distance_vh: f64,
    /// Delay between consecutive icon strokes
    #[serde(default = "default_stagger")]
    pub stagger: f64,
    /// Duration of a single icon stroke draw
    #[serde(default = "default_stroke_duration")]
    pub stroke_duration: f64,
    /// Delay between the icon reveal and its first stroke
    #[serde(default = "default_reveal_lead")]
    pub reveal_lead: f64,
    /// Vertical shift of the icon/title block, in % of its height
    #[serde(default = "default_title_shift_percent")]
    pub title_shift_percent: f64,
    /// How far the title slide overlaps the end of the stroke draw
    #[serde(default = "default_title_overlap")]
    pub title_overlap: f64,
    /// How far the connector draw overlaps the description fade
    #[serde(default = "default_connector_overlap")]
    pub connector_overlap: f64,
    /// How far the next tile's reveal overlaps the previous connector draw
    #[serde(default = "default_tile_lead")]
    pub tile_lead: f64,
    /// Peak scale of the pulsing scroll button
    #[serde(default = "default_pulse_scale")]
    pub pulse_scale: f64,
    /// Seconds for one half of a pulse (grow or shrink)
    #[serde(default = "default_pulse_period")]
    pub pulse_period_secs: f64,
    /// Stroke length used when a shape cannot be measured
    #[serde(default = "default_length")]
    pub default_length: f64,
    /// Factor applied to measured icon strokes so the dash never clips
    #[serde(default = "default_length_inflation")]
    pub length_inflation: f64,
    /// Divisor converting pixel offsets into scene units
    #[serde(default = "default_position_divisor")]
    pub position_divisor: f64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            start_offset_vh: default_start_offset_vh(),
            distance_vh: default_distance_vh(),
            stagger: default_stagger(),
            stroke_duration: default_stroke_duration(),
            reveal_lead: default_reveal_lead(),
            title_shift_percent: default_title_shift_percent(),
            title_overlap: default_title_overlap(),
            connector_overlap: default_connector_overlap(),
            tile_lead: default_tile_lead(),
            pulse_scale: default_pulse_scale(),
            pulse_period_secs: default_pulse_period(),
            default_length: default_length(),
            length_inflation: default_length_inflation(),
            position_divisor: default_position_divisor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Endpoint accepting `{html_content, project_name}`
    #[serde(default = "default_deploy_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_deploy_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g. "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
    /// Prefix for generated project names
    #[serde(default = "default_project_prefix")]
    pub project_prefix: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            endpoint: default_deploy_endpoint(),
            request_timeout_secs: default_deploy_timeout(),
            proxy_url: None,
            project_prefix: default_project_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name ("foundry-light" or "foundry-dark")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "foundry-light".to_string()
}

/// Optional color overrides, each a hex string ("#22d3ee" or "22d3ee")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub bg: Option<String>,
    /// Card background
    pub card: Option<String>,
    /// Primary foreground
    pub fg: Option<String>,
    /// Dimmed foreground (undrawn strokes, silhouettes)
    pub dim: Option<String>,
    /// Gradient start
    pub cyan: Option<String>,
    /// Gradient middle
    pub sky: Option<String>,
    /// Gradient end
    pub purple: Option<String>,
    /// Error color
    pub error: Option<String>,
    /// Success color
    pub success: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "G" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Scroll down one step
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    /// Scroll up one step
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    /// Scroll half page down
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    /// Scroll half page up
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    /// Scroll full page down
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    /// Scroll full page up
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    /// Jump to top
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to bottom
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Switch to the next page in the route table
    #[serde(default = "default_key_next_route")]
    pub next_route: String,
    /// Switch to the previous page in the route table
    #[serde(default = "default_key_prev_route")]
    pub prev_route: String,
    /// Toggle the HTML preview
    #[serde(default = "default_key_preview")]
    pub preview: String,
    /// Deploy the previewed HTML
    #[serde(default = "default_key_deploy")]
    pub deploy: String,
    /// Open the deployed URL in the browser
    #[serde(default = "default_key_open_url")]
    pub open_url: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_route: default_key_next_route(),
            prev_route: default_key_prev_route(),
            preview: default_key_preview(),
            deploy: default_key_deploy(),
            open_url: default_key_open_url(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_route() -> String { "<Tab>".to_string() }
fn default_key_prev_route() -> String { "<S-Tab>".to_string() }
fn default_key_preview() -> String { "p".to_string() }
fn default_key_deploy() -> String { "D".to_string() }
fn default_key_open_url() -> String { "o".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("foundry")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_lerp() -> f64 {
    0.05
}

fn default_wheel_multiplier() -> f64 {
    0.5
}

fn default_animation_fps() -> u32 {
    60
}

fn default_jump_duration() -> u64 {
    600
}

fn default_lines_per_step() -> u32 {
    3
}

fn default_start_offset_vh() -> f64 {
    50.0
}

fn default_distance_vh() -> f64 {
    900.0
}

fn default_stagger() -> f64 {
    0.15
}

fn default_stroke_duration() -> f64 {
    2.0
}

fn default_reveal_lead() -> f64 {
    0.1
}

fn default_title_shift_percent() -> f64 {
    -25.0
}

fn default_title_overlap() -> f64 {
    0.5
}

fn default_connector_overlap() -> f64 {
    0.2
}

fn default_tile_lead() -> f64 {
    0.2
}

fn default_pulse_scale() -> f64 {
    1.02
}

fn default_pulse_period() -> f64 {
    1.2
}

fn default_length() -> f64 {
    500.0
}

fn default_length_inflation() -> f64 {
    1.02
}

fn default_position_divisor() -> f64 {
    100.0
}

fn default_deploy_endpoint() -> String {
    "http://localhost:8000/deploy_to_vercel".to_string()
}

fn default_deploy_timeout() -> u64 {
    60
}

fn default_project_prefix() -> String {
    "campaign".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from an explicit path, falling back to defaults when absent
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to `path`, creating its directory
    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/foundry/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("foundry")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("foundry.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sequence_config() {
        let config = SequenceConfig::default();
        assert_eq!(config.start_offset_vh, 50.0);
        assert_eq!(config.distance_vh, 900.0);
        assert_eq!(config.stagger, 0.15);
        assert_eq!(config.default_length, 500.0);
        assert_eq!(config.length_inflation, 1.02);
        assert_eq!(config.position_divisor, 100.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
[sequence]
stagger = 0.3

[deploy]
endpoint = "https://deploy.example.com/api"
"#,
        )
        .unwrap();

        assert_eq!(config.sequence.stagger, 0.3);
        assert_eq!(config.sequence.distance_vh, 900.0);
        assert_eq!(config.deploy.endpoint, "https://deploy.example.com/api");
        assert_eq!(config.deploy.project_prefix, "campaign");
        assert!(config.scroll.smooth_enabled);
    }

    #[test]
    fn test_theme_as_string_or_table() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"foundry-dark\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "foundry-dark");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"foundry-light\"\n[ui.theme.colors]\ncyan = \"#00ffff\"\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "foundry-light");
        assert_eq!(config.ui.theme.colors.cyan.as_deref(), Some("#00ffff"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[sequence\nstagger = ").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_expand_tilde() {
        let plain = expand_tilde(std::path::Path::new("/tmp/foundry"));
        assert_eq!(plain, PathBuf::from("/tmp/foundry"));
    }

    #[test]
    fn test_save_and_load_back() {
        let dir = std::env::temp_dir().join(format!("foundry-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.sequence.distance_vh = 600.0;
        config.deploy.project_prefix = "launch".to_string();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.sequence.distance_vh, 600.0);
        assert_eq!(loaded.deploy.project_prefix, "launch");
        assert_eq!(loaded.ui.theme.name, config.ui.theme.name);

        std::fs::remove_dir_all(&dir).ok();
    }
}
