//! Configuration file support for vigil.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/vigil/config.toml` (lowest priority)
//! - Project-local: `.vigil.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Detection thresholds and durations.
    pub detection: DetectionSection,
    /// Event channel settings.
    pub channel: ChannelSection,
}

/// Detection configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionSection {
    /// Eye aspect ratio threshold (eyes closed below this).
    pub ear_threshold: Option<f32>,
    /// Mouth aspect ratio threshold (mouth open at or above this).
    pub mar_threshold: Option<f32>,
    /// Blink blend-shape score threshold (0.0-1.0).
    pub blink_score_threshold: Option<f32>,
    /// Jaw-open blend-shape score threshold (0.0-1.0).
    pub jaw_open_score_threshold: Option<f32>,
    /// Seconds of sustained eye closure before a drowsy event.
    pub drowsy_sustain: Option<f64>,
    /// Seconds of sustained mouth opening before a yawn event.
    pub yawn_sustain: Option<f64>,
    /// Minimum seconds between alert side effects.
    pub alert_cooldown: Option<f64>,
}

/// Event channel configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelSection {
    /// Named pipe path for event broadcast.
    pub pipe_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/vigil/config.toml`
    /// 2. Project-local: `.vigil.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.detection.ear_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!("detection.ear_threshold must be 0.0-1.0, got {t}"));
            }
        }
        if let Some(t) = self.detection.mar_threshold {
            if t <= 0.0 {
                return Err(format!("detection.mar_threshold must be positive, got {t}"));
            }
        }
        if let Some(t) = self.detection.blink_score_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!(
                    "detection.blink_score_threshold must be 0.0-1.0, got {t}"
                ));
            }
        }
        if let Some(t) = self.detection.jaw_open_score_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!(
                    "detection.jaw_open_score_threshold must be 0.0-1.0, got {t}"
                ));
            }
        }
        for (name, value) in [
            ("detection.drowsy_sustain", self.detection.drowsy_sustain),
            ("detection.yawn_sustain", self.detection.yawn_sustain),
            ("detection.alert_cooldown", self.detection.alert_cooldown),
        ] {
            if let Some(secs) = value {
                if secs <= 0.0 || !secs.is_finite() {
                    return Err(format!("{name} must be positive seconds, got {secs}"));
                }
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Detection
        self.detection.ear_threshold = other
            .detection
            .ear_threshold
            .or(self.detection.ear_threshold);
        self.detection.mar_threshold = other
            .detection
            .mar_threshold
            .or(self.detection.mar_threshold);
        self.detection.blink_score_threshold = other
            .detection
            .blink_score_threshold
            .or(self.detection.blink_score_threshold);
        self.detection.jaw_open_score_threshold = other
            .detection
            .jaw_open_score_threshold
            .or(self.detection.jaw_open_score_threshold);
        self.detection.drowsy_sustain = other
            .detection
            .drowsy_sustain
            .or(self.detection.drowsy_sustain);
        self.detection.yawn_sustain = other
            .detection
            .yawn_sustain
            .or(self.detection.yawn_sustain);
        self.detection.alert_cooldown = other
            .detection
            .alert_cooldown
            .or(self.detection.alert_cooldown);

        // Channel
        self.channel.pipe_path = other
            .channel
            .pipe_path
            .or_else(|| self.channel.pipe_path.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vigil").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.vigil.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".vigil.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.detection.ear_threshold.is_none());
        assert!(config.detection.drowsy_sustain.is_none());
        assert!(config.channel.pipe_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: AppConfig = toml::from_str(toml).expect("parse empty config");
        assert!(config.detection.ear_threshold.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[detection]
ear_threshold = 0.2
mar_threshold = 0.65
blink_score_threshold = 0.6
jaw_open_score_threshold = 0.4
drowsy_sustain = 1.5
yawn_sustain = 0.8
alert_cooldown = 5.0

[channel]
pipe_path = "/tmp/my_pipe"
"#;
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.detection.ear_threshold, Some(0.2));
        assert_eq!(config.detection.mar_threshold, Some(0.65));
        assert_eq!(config.detection.blink_score_threshold, Some(0.6));
        assert_eq!(config.detection.drowsy_sustain, Some(1.5));
        assert_eq!(config.detection.alert_cooldown, Some(5.0));
        assert_eq!(
            config.channel.pipe_path,
            Some(PathBuf::from("/tmp/my_pipe"))
        );
    }

    #[test]
    fn test_partial_detection_section() {
        let toml = r"
[detection]
ear_threshold = 0.18
";
        let config: AppConfig = toml::from_str(toml).expect("parse partial detection");

        assert_eq!(config.detection.ear_threshold, Some(0.18));
        assert!(config.detection.mar_threshold.is_none());
        assert!(config.detection.drowsy_sustain.is_none());
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[detection]
ear_threshold = 0.2
drowsy_sustain = 2.0
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r#"
[detection]
ear_threshold = 0.25

[channel]
pipe_path = "/tmp/other"
"#,
        )
        .expect("parse override");

        base.merge(override_config);

        // Threshold overridden
        assert_eq!(base.detection.ear_threshold, Some(0.25));
        // Sustain preserved from base
        assert_eq!(base.detection.drowsy_sustain, Some(2.0));
        // Pipe path added from override
        assert_eq!(base.channel.pipe_path, Some(PathBuf::from("/tmp/other")));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[detection]
mar_threshold = 0.7
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.detection.mar_threshold, Some(0.7));
    }

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let toml = r"
[detection
ear_threshold = 0.2
"; // Missing closing bracket
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_validate_ear_threshold_out_of_range() {
        let mut config = AppConfig::default();
        config.detection.ear_threshold = Some(1.5);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("detection.ear_threshold"));
    }

    #[test]
    fn test_validate_negative_duration() {
        let mut config = AppConfig::default();
        config.detection.drowsy_sustain = Some(-1.0);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("detection.drowsy_sustain"));
    }

    #[test]
    fn test_validate_zero_cooldown_rejected() {
        let mut config = AppConfig::default();
        config.detection.alert_cooldown = Some(0.0);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_all_valid_passes() {
        let config: AppConfig = toml::from_str(
            r"
[detection]
ear_threshold = 0.22
mar_threshold = 0.6
drowsy_sustain = 2.0
yawn_sustain = 1.0
alert_cooldown = 3.0
",
        )
        .expect("parse valid config");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_config_passes() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }
}
