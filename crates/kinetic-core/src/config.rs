use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub scramble: ScrambleConfig,
    #[serde(default)]
    pub spring: SpringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Accent color as a hex string (e.g., "#22d3ee")
    #[serde(default = "default_accent")]
    pub accent: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            accent: default_accent(),
        }
    }
}

/// Easing curve applied to a normalized progress value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the end value
    None,
    Linear,
    Cubic,
    Quintic,
    /// Exponential ease-out
    #[default]
    EaseOut,
    EaseInOut,
}

impl std::str::FromStr for EasingType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Self::None),
            "linear" => Ok(Self::Linear),
            "cubic" => Ok(Self::Cubic),
            "quintic" => Ok(Self::Quintic),
            "ease_out" | "easeout" | "exponential" => Ok(Self::EaseOut),
            "ease_in_out" | "easeinout" => Ok(Self::EaseInOut),
            other => Err(crate::Error::InvalidArgument(format!(
                "unknown easing '{}'",
                other
            ))),
        }
    }
}

/// Smooth page scrolling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable eased scrolling (instant jumps when disabled)
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one scroll animation in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines moved per scroll step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Multiplier applied to mouse wheel deltas
    #[serde(default = "default_wheel_multiplier")]
    pub wheel_multiplier: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            wheel_multiplier: default_wheel_multiplier(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrambleConfig {
    /// Noise characters. "nav" and "extended" select the built-in sets.
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    /// Resolved-prefix growth per tick, in characters
    #[serde(default = "default_step_per_tick")]
    pub step_per_tick: f64,
    /// Timer interval between ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// How long each rotating headline word stays before the next one
    #[serde(default = "default_headline_interval")]
    pub headline_interval_ms: u64,
    #[serde(default = "default_headline_words")]
    pub headline_words: Vec<String>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            alphabet: default_alphabet(),
            step_per_tick: default_step_per_tick(),
            tick_interval_ms: default_tick_interval(),
            headline_interval_ms: default_headline_interval(),
            headline_words: default_headline_words(),
        }
    }
}

/// Spring parameters for smoothed values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Distance from target under which the spring may come to rest
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_delta: default_rest_delta(),
            rest_speed: default_rest_speed(),
        }
    }
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Default::default()
        }
    }

    /// Damping ratio; values >= 1.0 never overshoot
    pub fn damping_ratio(&self) -> f64 {
        let critical = 2.0 * (self.stiffness * self.mass).sqrt();
        if critical <= 0.0 {
            f64::INFINITY
        } else {
            self.damping / critical
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kinetic")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_accent() -> String {
    "#22d3ee".to_string()
}

fn default_scroll_duration() -> u64 {
    1200
}

fn default_scroll_lines() -> u16 {
    3
}

fn default_wheel_multiplier() -> f64 {
    1.0
}

fn default_alphabet() -> String {
    "nav".to_string()
}

fn default_step_per_tick() -> f64 {
    0.4
}

fn default_tick_interval() -> u64 {
    40
}

fn default_headline_interval() -> u64 {
    4000
}

fn default_headline_words() -> Vec<String> {
    [
        "Extraordinary.",
        "The Future.",
        "Innovation.",
        "Excellence.",
        "Digital Dreams.",
        "Modern Brands.",
    ]
    .iter()
    .map(|w| w.to_string())
    .collect()
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_damping() -> f64 {
    30.0
}

fn default_mass() -> f64 {
    1.0
}

fn default_rest_delta() -> f64 {
    0.001
}

fn default_rest_speed() -> f64 {
    0.01
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
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it is missing
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config = Self::from_toml(&content)?;
            tracing::debug!(path = %path.display(), "Loaded configuration");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Reject values no animation can run with
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.scramble.step_per_tick.is_finite() && self.scramble.step_per_tick > 0.0) {
            return Err(crate::Error::Config(format!(
                "scramble.step_per_tick must be positive, got {}",
                self.scramble.step_per_tick
            )));
        }
        if self.scramble.tick_interval_ms == 0 {
            return Err(crate::Error::Config(
                "scramble.tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.spring.mass <= 0.0 || self.spring.stiffness <= 0.0 || self.spring.damping < 0.0 {
            return Err(crate::Error::Config(
                "spring requires positive mass and stiffness and non-negative damping".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/kinetic/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("kinetic")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("kinetic.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
