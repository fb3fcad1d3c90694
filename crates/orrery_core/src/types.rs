use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The nine bodies of the scene, ordered by distance from the sun
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyId {
    Sun = 0,
    Mercury = 1,
    Venus = 2,
    Earth = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
}

impl BodyId {
    pub const ALL: [BodyId; 9] = [
        Self::Sun,
        Self::Mercury,
        Self::Venus,
        Self::Earth,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
    ];

    /// Bodies that orbit the sun (everything but the sun itself)
    pub const PLANETS: [BodyId; 8] = [
        Self::Mercury,
        Self::Venus,
        Self::Earth,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Earth => "earth",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
        }
    }

    /// Capitalised name for UI labels
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }

    /// Whether this body moves on a circular orbit around the sun
    pub fn orbits(&self) -> bool {
        !matches!(self, Self::Sun)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name() == lower)
            .ok_or_else(|| format!("unknown body '{s}'"))
    }
}

/// Opaque handle to a mesh owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

/// Static per-body parameters. Only the transform of `mesh` changes after assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub id: BodyId,
    /// Circular orbit radius around the sun; 0 for the sun
    pub orbital_radius: f64,
    /// Self-rotation about X (rad/s)
    pub rotation_rate_x: f64,
    /// Self-rotation about Y (rad/s)
    pub rotation_rate_y: f64,
    pub mesh: MeshHandle,
}

/// Geometry a renderer is asked to build
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometrySpec {
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus in the local XY plane
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
    },
}

/// Material a renderer is asked to build. All bodies are unlit.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSpec {
    /// Asset path of a colour texture, if any
    pub texture: Option<String>,
    /// sRGB colour [r, g, b, a]; alpha < 1 means blended
    pub base_color: [f32; 4],
    /// Emissive sRGB colour and intensity
    pub emissive: Option<([f32; 3], f32)>,
    pub double_sided: bool,
}

impl MaterialSpec {
    pub fn textured(path: impl Into<String>) -> Self {
        Self {
            texture: Some(path.into()),
            base_color: [1.0, 1.0, 1.0, 1.0],
            emissive: None,
            double_sided: false,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.base_color[3] < 1.0
    }
}

/// Convert a 0xRRGGBB colour to sRGB floats
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
