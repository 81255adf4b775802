mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::renderer::Renderer;
use crate::scene::{Axis, Camera, HitResolution, Scene};

pub use loader::load_config;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// Output grid and camera plane
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Character cell height over width; 1.0 for square pixels
    #[serde(default = "default_pixel_aspect")]
    pub pixel_aspect: f32,
    /// Rays start on the plane z = -camera_distance
    #[serde(default = "default_camera_distance")]
    pub camera_distance: f32,
}

fn default_width() -> usize {
    40
}

fn default_height() -> usize {
    20
}

fn default_pixel_aspect() -> f32 {
    2.0
}

fn default_camera_distance() -> f32 {
    30.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            pixel_aspect: default_pixel_aspect(),
            camera_distance: default_camera_distance(),
        }
    }
}

/// How the built-in molecule is turned and resolved.
///
/// Geometry, light and glyph ramp are fixed in `Scene::hydroxymethylene`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default)]
    pub rotation_axis: Axis,
    #[serde(default)]
    pub hit_resolution: HitResolution,
}

/// Frame pacing and length of the run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimationConfig {
    /// 628 frames at 100 steps per radian is two full turns
    #[serde(default = "default_frame_count")]
    pub frame_count: u32,
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
    #[serde(default = "default_steps_per_radian")]
    pub steps_per_radian: f64,
}

fn default_frame_count() -> u32 {
    628
}

fn default_frame_delay_ms() -> u64 {
    17
}

fn default_steps_per_radian() -> f64 {
    100.0
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_count: default_frame_count(),
            frame_delay_ms: default_frame_delay_ms(),
            steps_per_radian: default_steps_per_radian(),
        }
    }
}

impl AnimationConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load from `config_path` if given, otherwise use the built-in scene
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the renderer cannot draw
    pub fn validate(&self) -> Result<(), ConfigError> {
        let viewport = &self.viewport;
        if viewport.width == 0 || viewport.height == 0 {
            return Err(ConfigError::Validation(format!(
                "viewport must be at least 1x1, got {}x{}",
                viewport.width, viewport.height
            )));
        }
        if !(viewport.pixel_aspect.is_finite() && viewport.pixel_aspect > 0.0) {
            return Err(ConfigError::Validation(format!(
                "pixel_aspect must be positive, got {}",
                viewport.pixel_aspect
            )));
        }
        if !viewport.camera_distance.is_finite() {
            return Err(ConfigError::Validation(
                "camera_distance must be finite".to_string(),
            ));
        }

        let steps = self.animation.steps_per_radian;
        if !(steps.is_finite() && steps > 0.0) {
            return Err(ConfigError::Validation(format!(
                "steps_per_radian must be positive, got {}",
                steps
            )));
        }

        Ok(())
    }

    /// Validate and build the scene this config describes
    pub fn build_scene(&self) -> Result<Scene, ConfigError> {
        self.validate()?;

        let mut scene = Scene::hydroxymethylene();
        scene.camera = Camera {
            pixel_aspect: self.viewport.pixel_aspect,
            distance: self.viewport.camera_distance,
            ..scene.camera
        };
        scene.axis = self.scene.rotation_axis;
        scene.resolution = self.scene.hit_resolution;

        Ok(scene)
    }

    /// Renderer sized to the viewport
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.viewport.width, self.viewport.height)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_builtin_scene() {
        let config = AppConfig::default();
        let scene = config.build_scene().unwrap();
        let builtin = Scene::hydroxymethylene();

        assert_eq!(scene.atoms, builtin.atoms);
        assert_eq!(scene.light, builtin.light);
        assert_eq!(scene.glyphs, builtin.glyphs);
        assert_eq!(scene.camera, builtin.camera);
        assert_eq!(scene.axis, Axis::Y);
    }

    #[test]
    fn test_animation_defaults() {
        let config = AnimationConfig::default();
        assert_eq!(config.frame_count, 628);
        assert_eq!(config.frame_delay(), Duration::from_millis(17));
        assert_eq!(config.steps_per_radian, 100.0);
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.viewport.width, 40);
        assert_eq!(config.viewport.height, 20);
        assert_eq!(config.scene.rotation_axis, Axis::Y);
    }

    #[test]
    fn test_overrides_keep_builtin_molecule() {
        let mut config = AppConfig::default();
        config.scene.rotation_axis = Axis::X;
        config.scene.hit_resolution = HitResolution::Nearest;
        config.viewport.pixel_aspect = 1.0;

        let scene = config.build_scene().unwrap();
        let builtin = Scene::hydroxymethylene();
        assert_eq!(scene.atoms, builtin.atoms);
        assert_eq!(scene.light, builtin.light);
        assert_eq!(scene.glyphs, builtin.glyphs);
        assert_eq!(scene.axis, Axis::X);
        assert_eq!(scene.resolution, HitResolution::Nearest);
        assert_eq!(scene.camera.pixel_aspect, 1.0);
        assert_eq!(scene.camera.direction, builtin.camera.direction);
    }

    #[test]
    fn test_validate_rejects_bad_aspect() {
        let mut config = AppConfig::default();
        config.viewport.pixel_aspect = -2.0;
        assert!(matches!(config.build_scene(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_viewport() {
        let mut config = AppConfig::default();
        config.viewport.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_bad_steps() {
        let mut config = AppConfig::default();
        config.animation.steps_per_radian = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_renderer_uses_viewport() {
        let mut config = AppConfig::default();
        config.viewport.width = 64;
        config.viewport.height = 32;
        let renderer = config.renderer();
        assert_eq!(renderer.width(), 64);
        assert_eq!(renderer.height(), 32);
    }
}
