use crate::{Error, Result};
use planb_engine::DEFAULT_CAROUSEL_BREAKPOINT_PX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Bundled sample dataset, used when no endpoint is configured
pub const DEFAULT_ENDPOINT: &str = "./plans.example.json";

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "PLANB_ENDPOINT";

/// Resolve the plan endpoint based on priority:
/// 1. Explicit value (CLI flag / embedding attribute)
/// 2. PLANB_ENDPOINT environment variable
/// 3. Endpoint from the config file
/// 4. Bundled sample dataset
pub fn resolve_endpoint(explicit: Option<&str>, configured: Option<&str>) -> String {
    let from_env = std::env::var(ENDPOINT_ENV).ok();
    pick_endpoint(explicit, from_env.as_deref(), configured)
}

fn pick_endpoint(explicit: Option<&str>, from_env: Option<&str>, configured: Option<&str>) -> String {
    [explicit, from_env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|endpoint| !endpoint.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long scroll-driven updates are ignored after a programmatic scroll
    #[serde(default = "default_suppress_window_ms")]
    pub suppress_window_ms: u64,

    /// Quiet period after the last scroll sample before it is evaluated
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_suppress_window_ms() -> u64 {
    180
}

fn default_settle_delay_ms() -> u64 {
    120
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            suppress_window_ms: default_suppress_window_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl TimingConfig {
    pub fn suppress_window(&self) -> Duration {
        Duration::from_millis(self.suppress_window_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Plan to activate when the payload names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_plan: Option<String>,

    #[serde(default = "default_breakpoint")]
    pub carousel_breakpoint_px: f64,

    #[serde(default)]
    pub timing: TimingConfig,
}

fn default_breakpoint() -> f64 {
    DEFAULT_CAROUSEL_BREAKPOINT_PX
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            default_plan: None,
            carousel_breakpoint_px: default_breakpoint(),
            timing: TimingConfig::default(),
        }
    }
}

impl WidgetConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_default_plan(mut self, name: impl Into<String>) -> Self {
        self.default_plan = Some(name.into());
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Endpoint the widget fetches from, falling back to the bundled sample.
    pub fn endpoint_or_default(&self) -> &str {
        self.endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: WidgetConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("planb").join("config.toml"))
            .ok_or_else(|| {
                Error::Config("Could not determine config directory".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = WidgetConfig::default();
        assert_eq!(config.endpoint, None);
        assert_eq!(config.endpoint_or_default(), DEFAULT_ENDPOINT);
        assert_eq!(config.timing.suppress_window(), Duration::from_millis(180));
        assert_eq!(config.timing.settle_delay(), Duration::from_millis(120));
        assert_eq!(config.carousel_breakpoint_px, 960.0);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = WidgetConfig::default()
            .with_endpoint("https://example.com/plans")
            .with_default_plan("Pro")
            .with_timing(TimingConfig {
                suppress_window_ms: 150,
                settle_delay_ms: 100,
            });

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = WidgetConfig::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "default_plan = \"Team\"\n[timing]\nsettle_delay_ms = 90\n")?;

        let config = WidgetConfig::load_from(&config_path)?;
        assert_eq!(config.default_plan.as_deref(), Some("Team"));
        assert_eq!(config.timing.settle_delay_ms, 90);
        assert_eq!(config.timing.suppress_window_ms, 180);
        assert_eq!(config.carousel_breakpoint_px, 960.0);

        Ok(())
    }

    #[test]
    fn test_invalid_file_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "timing = 3")?;

        let err = WidgetConfig::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = WidgetConfig::load_from(&config_path)?;
        assert_eq!(config, WidgetConfig::default());

        Ok(())
    }

    #[test]
    fn test_endpoint_priority() {
        assert_eq!(
            pick_endpoint(Some("flag.json"), Some("env.json"), Some("file.json")),
            "flag.json"
        );
        assert_eq!(pick_endpoint(None, Some("env.json"), Some("file.json")), "env.json");
        assert_eq!(pick_endpoint(Some("  "), None, Some("file.json")), "file.json");
        assert_eq!(pick_endpoint(None, None, None), DEFAULT_ENDPOINT);
    }
}
