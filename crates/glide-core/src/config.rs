use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::Domain;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlideConfig {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub animator: AnimatorConfig,
    #[serde(default)]
    pub input: InputConfig,
    /// Explicit domain for virtual hosts; `None` lets the driver decide
    #[serde(default)]
    pub domain: Option<Domain>,
    /// Grid snapping after settle; `None` disables it
    #[serde(default)]
    pub snap: Option<SnapConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Position changes below this are not reported by the signal
    #[serde(default = "default_signal_epsilon")]
    pub signal_epsilon: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            signal_epsilon: default_signal_epsilon(),
        }
    }
}

/// Easing curve used by the tween animator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the duration
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Which stepping policy drives the frame loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatorKind {
    /// Frame-rate independent exponential approach
    #[default]
    Exponential,
    /// Fixed-duration eased tween, restarted when the target moves
    Tween,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimatorConfig {
    /// Animate at all; when off every motion lands on the next tick
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default)]
    pub kind: AnimatorKind,
    /// Fraction of the remaining distance covered per reference frame
    #[serde(default = "default_lerp")]
    pub lerp: f64,
    /// Reference frame rate the lerp coefficient is expressed in
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Remaining distance under which motion counts as settled
    #[serde(default = "default_settle_threshold")]
    pub settle_threshold: f64,
    /// Tween duration
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Tween easing curve
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            kind: AnimatorKind::default(),
            lerp: default_lerp(),
            frame_rate: default_frame_rate(),
            settle_threshold: default_settle_threshold(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Pixels per wheel line (line delta mode)
    #[serde(default = "default_line_height")]
    pub wheel_line_height: f64,
    /// Pixels per wheel page (page delta mode)
    #[serde(default = "default_page_size")]
    pub wheel_page_size: f64,
    #[serde(default = "default_multiplier")]
    pub wheel_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub touch_multiplier: f64,
    /// Distance of one arrow key or wheel notch in the terminal
    #[serde(default = "default_key_step")]
    pub key_step: f64,
    /// Distance of Page Up/Down in the terminal
    #[serde(default = "default_page_size")]
    pub page_step: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_line_height: default_line_height(),
            wheel_page_size: default_page_size(),
            wheel_multiplier: default_multiplier(),
            touch_multiplier: default_multiplier(),
            key_step: default_key_step(),
            page_step: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Distance between snap points
    pub grid: f64,
    /// Only snap when the settled position is this close to a snap point
    #[serde(default = "default_snap_radius")]
    pub radius: f64,
}

fn default_true() -> bool {
    true
}

fn default_signal_epsilon() -> f64 {
    crate::signal::DEFAULT_EPSILON
}

fn default_lerp() -> f64 {
    0.1
}

fn default_frame_rate() -> u32 {
    60
}

fn default_settle_threshold() -> f64 {
    0.5
}

fn default_animation_duration() -> u64 {
    150
}

fn default_line_height() -> f64 {
    40.0
}

fn default_page_size() -> f64 {
    800.0
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_key_step() -> f64 {
    40.0
}

fn default_snap_radius() -> f64 {
    200.0
}

impl GlideConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/glide/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("glide")
            .join("config.toml")
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(domain) = &self.domain {
            domain.validate()?;
        }

        let animator = &self.animator;
        if !(animator.lerp > 0.0 && animator.lerp < 1.0) {
            return Err(crate::Error::InvalidAnimator(format!(
                "lerp must be in (0, 1), got {}",
                animator.lerp
            )));
        }
        if !(animator.settle_threshold > 0.0) {
            return Err(crate::Error::InvalidAnimator(format!(
                "settle_threshold must be positive, got {}",
                animator.settle_threshold
            )));
        }

        if !(self.engine.signal_epsilon >= 0.0) {
            return Err(crate::Error::Config(format!(
                "signal_epsilon must not be negative, got {}",
                self.engine.signal_epsilon
            )));
        }

        if let Some(snap) = &self.snap {
            if !(snap.grid > 0.0) {
                return Err(crate::Error::Config(format!(
                    "snap grid must be positive, got {}",
                    snap.grid
                )));
            }
        }

        Ok(())
    }
}
