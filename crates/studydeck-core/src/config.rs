use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
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
pub struct ServerConfig {
    /// Base URL of the Study Habits Recommender service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Scroll-reveal animation configuration
    #[serde(default)]
    pub reveal: RevealConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

/// Easing curve for scroll and reveal animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth scrolling animations
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing function for scroll animations
    #[serde(default = "default_easing")]
    pub easing: EasingType,
    /// Lines per scroll step when smoothing is disabled
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Target frame rate while animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: true,
            animation_duration_ms: default_scroll_duration(),
            easing: default_easing(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Enable scroll-reveal animation for dashboard sections
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Fraction of a section that must be visible before it reveals
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Rows subtracted from the bottom of the viewport when observing
    #[serde(default = "default_reveal_margin")]
    pub bottom_margin_rows: u16,
    /// Reveal animation duration in milliseconds
    #[serde(default = "default_reveal_duration")]
    pub duration_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: default_reveal_threshold(),
            bottom_margin_rows: default_reveal_margin(),
            duration_ms: default_reveal_duration(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studydeck")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_tick_rate() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_easing() -> EasingType {
    EasingType::Cubic
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u16 {
    60
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_margin() -> u16 {
    2
}

fn default_reveal_duration() -> u64 {
    600
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
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/studydeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("studydeck")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_defaults() {
        let config = ScrollConfig::default();
        assert!(config.smooth_enabled);
        assert_eq!(config.animation_duration_ms, 150);
        assert_eq!(config.easing, EasingType::Cubic);
        assert_eq!(config.scroll_lines, 1);
        assert_eq!(config.animation_fps, 60);
    }

    #[test]
    fn reveal_defaults_match_observer_options() {
        let config = RevealConfig::default();
        assert!(config.enabled);
        assert!((config.threshold - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.bottom_margin_rows, 2);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            base_url = "http://habits.example.edu"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://habits.example.edu");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn easing_round_trips_kebab_case() {
        let toml_str = toml::to_string(&ScrollConfig::default()).unwrap();
        assert!(toml_str.contains("cubic"));
        let parsed: ScrollConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.easing, EasingType::Cubic);
    }
}
