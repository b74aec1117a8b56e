//! Tunable settings with TOML file support.
//!
//! Every section uses `#[serde(default)]`, so a file that only overrides
//! `[bounce]` keeps the defaults for everything else.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::BounceParams;
use crate::color::Color;
use crate::error::CubeError;

/// The palette of the original cube demo.
pub const DEFAULT_PALETTE: [Color; 20] = [
    Color::from_rgb_hex(0xFF5733),
    Color::from_rgb_hex(0x33FF57),
    Color::from_rgb_hex(0x3357FF),
    Color::from_rgb_hex(0xF333FF),
    Color::from_rgb_hex(0x33FFF3),
    Color::from_rgb_hex(0xFFC300),
    Color::from_rgb_hex(0xC70039),
    Color::from_rgb_hex(0x900C3F),
    Color::from_rgb_hex(0x581845),
    Color::from_rgb_hex(0x1A5276),
    Color::from_rgb_hex(0x28B463),
    Color::from_rgb_hex(0xD35400),
    Color::from_rgb_hex(0x8E44AD),
    Color::from_rgb_hex(0x16A085),
    Color::from_rgb_hex(0x2C3E50),
    Color::from_rgb_hex(0xE74C3C),
    Color::from_rgb_hex(0x3498DB),
    Color::from_rgb_hex(0x9B59B6),
    Color::from_rgb_hex(0x1ABC9C),
    Color::from_rgb_hex(0xF39C12),
];

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    pub scene: SceneOptions,
    pub bounce: BounceOptions,
    pub highlight: HighlightOptions,
    pub rotation: RotationOptions,
    pub camera: CameraOptions,
    pub panel: PanelOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CubeError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| CubeError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CubeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CubeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that would make the scene or an animation ill-formed.
    pub fn validate(&self) -> Result<(), CubeError> {
        self.scene.validate()?;
        self.bounce.params().validate()?;
        if !(self.highlight.scale.is_finite() && self.highlight.scale > 0.0) {
            return Err(CubeError::InvalidParameter(format!(
                "highlight scale must be positive, got {}",
                self.highlight.scale
            )));
        }
        if !self.rotation.step.is_finite() {
            return Err(CubeError::InvalidParameter(
                "rotation step must be finite".to_owned(),
            ));
        }
        if !(self.panel.notice_secs.is_finite() && self.panel.notice_secs >= 0.0) {
            return Err(CubeError::InvalidParameter(format!(
                "notice_secs must be finite and not negative, got {}",
                self.panel.notice_secs
            )));
        }
        self.camera.validate()
    }
}

/// Scene generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Number of cubes created per randomize.
    pub cube_count: usize,
    /// Inclusive lower corner of the spawn box.
    pub spawn_min: [f32; 3],
    /// Exclusive upper corner of the spawn box.
    pub spawn_max: [f32; 3],
    /// Smallest edge length.
    pub size_min: f32,
    /// Largest edge length (exclusive).
    pub size_max: f32,
    pub palette: Vec<Color>,
    /// Fixed RNG seed for reproducible scenes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            cube_count: 20,
            spawn_min: [-10.0, -3.0, -10.0],
            spawn_max: [10.0, 7.0, 10.0],
            size_min: 0.5,
            size_max: 2.5,
            palette: DEFAULT_PALETTE.to_vec(),
            seed: None,
        }
    }
}

impl SceneOptions {
    pub fn validate(&self) -> Result<(), CubeError> {
        if self.palette.is_empty() {
            return Err(CubeError::InvalidParameter(
                "palette must contain at least one color".to_owned(),
            ));
        }
        if u32::try_from(self.cube_count).is_err() {
            return Err(CubeError::InvalidParameter(format!(
                "cube count {} is too large",
                self.cube_count
            )));
        }
        let spawn_ok = self
            .spawn_min
            .iter()
            .zip(&self.spawn_max)
            .all(|(lo, hi)| lo.is_finite() && hi.is_finite() && lo < hi);
        if !spawn_ok {
            return Err(CubeError::InvalidParameter(
                "spawn_min must be below spawn_max on every axis".to_owned(),
            ));
        }
        if !(self.size_min > 0.0 && self.size_min < self.size_max && self.size_max.is_finite()) {
            return Err(CubeError::InvalidParameter(format!(
                "size range {}..{} is empty or non-positive",
                self.size_min, self.size_max
            )));
        }
        Ok(())
    }
}

/// Bounce played on the picked cube.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BounceOptions {
    pub amplitude: f32,
    /// Amplitude multiplier per tick, in `(0, 1)`.
    pub decay: f32,
    /// The bounce ends once the amplitude drops to this or below.
    pub threshold: f32,
}

impl Default for BounceOptions {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            decay: 0.7,
            threshold: 0.01,
        }
    }
}

impl BounceOptions {
    pub fn params(&self) -> BounceParams {
        BounceParams {
            amplitude: self.amplitude,
            decay: self.decay,
            threshold: self.threshold,
        }
    }
}

/// Look of the selected cube.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HighlightOptions {
    pub color: Color,
    pub emissive: Color,
    /// Uniform scale applied while selected.
    pub scale: f32,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::from_rgb_hex(0x444444),
            scale: 1.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RotationOptions {
    /// Radians added to the x and y rotation of idle cubes every frame.
    pub step: f32,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self { step: 0.005 }
    }
}

/// Camera projection and orbit parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Orbit speed in radians per second while a WASD key is held.
    pub orbit_speed: f32,
    /// Fraction of the distance removed per wheel line.
    pub zoom_step: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            eye: [0.0, 5.0, 15.0],
            target: [0.0, 0.0, 0.0],
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            min_distance: 5.0,
            max_distance: 50.0,
            orbit_speed: 1.5,
            zoom_step: 0.1,
        }
    }
}

impl CameraOptions {
    fn validate(&self) -> Result<(), CubeError> {
        if !(self.fovy > 0.0 && self.fovy < 180.0) {
            return Err(CubeError::InvalidParameter(format!(
                "fovy must be within (0, 180) degrees, got {}",
                self.fovy
            )));
        }
        if !(self.znear > 0.0 && self.znear < self.zfar) {
            return Err(CubeError::InvalidParameter(
                "znear must be positive and below zfar".to_owned(),
            ));
        }
        if !(self.min_distance > 0.0 && self.min_distance <= self.max_distance) {
            return Err(CubeError::InvalidParameter(
                "min_distance must be positive and not above max_distance"
                    .to_owned(),
            ));
        }
        if !(0.0..1.0).contains(&self.zoom_step) {
            return Err(CubeError::InvalidParameter(format!(
                "zoom_step must be within [0, 1), got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }
}

/// Info panel behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelOptions {
    /// How long the "no cube selected" notice stays up.
    pub notice_secs: f32,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self { notice_secs: 2.0 }
    }
}
