//! Scene configuration and TOML loading.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::{hex_rgb, BodyId, CelestialBody, GeometrySpec, MaterialSpec, MeshHandle};
use crate::validation;

/// Default angular speed (speed units) for a body at `orbital_radius`: K / r
pub fn default_speed(orbital_radius: f64, speed_constant: f64) -> f64 {
    speed_constant / orbital_radius
}

/// Full scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub speed: SpeedConfig,
    pub bodies: Vec<BodyConfig>,
    pub ring: RingConfig,
    pub starfield: StarfieldConfig,
    pub camera: CameraConfig,
    /// Reduce orbital angles modulo 2π before taking cos/sin.
    /// Off by default: the angle grows without bound with elapsed time.
    pub wrap_orbital_angle: bool,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            speed: SpeedConfig::default(),
            bodies: default_bodies(),
            ring: RingConfig::default(),
            starfield: StarfieldConfig::default(),
            camera: CameraConfig::default(),
            wrap_orbital_angle: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// K in default_speed = K / orbital_radius
    pub constant: f64,
    /// rad/s per speed unit
    pub angular_factor: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            constant: SPEED_CONSTANT,
            angular_factor: ANGULAR_SPEED_FACTOR,
            min: MIN_SPEED,
            max: MAX_SPEED,
        }
    }
}

impl SpeedConfig {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// Emissive glow, colour as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlowConfig {
    pub color: u32,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub id: BodyId,
    #[serde(default)]
    pub orbital_radius: f64,
    pub rotation_rate_x: f64,
    pub rotation_rate_y: f64,
    pub display_radius: f32,
    pub segments: u32,
    pub texture: String,
    #[serde(default)]
    pub glow: Option<GlowConfig>,
}

impl BodyConfig {
    fn planet(id: BodyId, orbital_radius: f64, display_radius: f32, segments: u32) -> Self {
        Self {
            id,
            orbital_radius,
            rotation_rate_x: 0.2,
            rotation_rate_y: 0.02,
            display_radius,
            segments,
            texture: format!("img/{}_hd.jpg", id.name()),
            glow: None,
        }
    }

    /// Registry record for this body once the renderer has handed out its mesh
    pub fn to_body(&self, mesh: MeshHandle) -> CelestialBody {
        CelestialBody {
            id: self.id,
            orbital_radius: self.orbital_radius,
            rotation_rate_x: self.rotation_rate_x,
            rotation_rate_y: self.rotation_rate_y,
            mesh,
        }
    }

    pub fn geometry(&self) -> GeometrySpec {
        GeometrySpec::Sphere {
            radius: self.display_radius,
            segments: self.segments,
        }
    }

    pub fn material(&self) -> MaterialSpec {
        let mut material = MaterialSpec::textured(self.texture.clone());
        material.emissive = self.glow.map(|g| (hex_rgb(g.color), g.intensity));
        material
    }
}

fn default_bodies() -> Vec<BodyConfig> {
    let mut sun = BodyConfig::planet(BodyId::Sun, 0.0, 10.0, 45);
    sun.rotation_rate_x = 0.02;
    sun.rotation_rate_y = 0.01;
    sun.glow = Some(GlowConfig {
        color: 0xffff00,
        intensity: 2.0,
    });

    let mut mars = BodyConfig::planet(BodyId::Mars, 55.0, 5.0, 40);
    mars.rotation_rate_x = 0.3;
    mars.rotation_rate_y = 0.32;

    vec![
        sun,
        BodyConfig::planet(BodyId::Mercury, 15.0, 2.0, 32),
        BodyConfig::planet(BodyId::Venus, 25.0, 3.0, 40),
        BodyConfig::planet(BodyId::Earth, 35.0, 3.0, 40),
        mars,
        BodyConfig::planet(BodyId::Jupiter, 75.0, 3.0, 35),
        BodyConfig::planet(BodyId::Saturn, 95.0, 3.0, 35),
        BodyConfig::planet(BodyId::Uranus, 115.0, 3.0, 35),
        BodyConfig::planet(BodyId::Neptune, 135.0, 3.0, 35),
    ]
}

/// Saturn's ring, attached as a child of Saturn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: u32,
    pub color: u32,
    pub opacity: f32,
    /// Local rotation about X; π/2 lays the ring flat in the orbital plane
    pub tilt_x: f64,
    /// Local offset from Saturn's centre
    pub offset: [f64; 3],
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            inner_radius: RING_INNER_RADIUS,
            outer_radius: RING_OUTER_RADIUS,
            segments: RING_SEGMENTS,
            color: 0x888888,
            opacity: 0.5,
            tilt_x: std::f64::consts::FRAC_PI_2,
            offset: [0.0; 3],
        }
    }
}

impl RingConfig {
    pub fn geometry(&self) -> GeometrySpec {
        GeometrySpec::Ring {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            segments: self.segments,
        }
    }

    pub fn material(&self) -> MaterialSpec {
        let [r, g, b] = hex_rgb(self.color);
        MaterialSpec {
            texture: None,
            base_color: [r, g, b, self.opacity],
            emissive: None,
            double_sided: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: u32,
    pub half_extent: f32,
    pub seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            half_extent: STARFIELD_HALF_EXTENT,
            seed: STARFIELD_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance along +Z from the sun
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 50.0,
        }
    }
}

impl OrreryConfig {
    pub fn body(&self, id: BodyId) -> Option<&BodyConfig> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Parse a TOML document, falling back to defaults for missing fields,
    /// then validate. Any validation failure is fatal.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: OrreryConfig = toml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)
    }

    /// Load and validate a config file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Parse(format!("failed to read {}: {e}", path.display()))
        })?;

        let config = Self::from_toml_str(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config: explicit path, then `ORRERY_CONFIG`, then built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        match path {
            Some(path) => Self::load_from_path(&path),
            None => {
                info!("no config file given, using built-in defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }
}
