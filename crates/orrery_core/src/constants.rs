// Scene units are arbitrary: 1 unit is roughly the sun's display radius / 10.
// Angles are radians, times are seconds of simulated (pausable) clock.

/// Angular velocity contributed by one speed unit (rad/s per unit)
pub const ANGULAR_SPEED_FACTOR: f64 = 0.01;

/// Default speeds are SPEED_CONSTANT / orbital_radius
pub const SPEED_CONSTANT: f64 = 1000.0;

/// Lowest speed a UI control may request
pub const MIN_SPEED: f64 = 1.0;

/// Highest speed a UI control may request
pub const MAX_SPEED: f64 = 100.0;

/// Step of one click on a speed control
pub const SPEED_STEP: f64 = 1.0;

/// Number of background stars
pub const STAR_COUNT: u32 = 5000;

/// Stars are drawn from Uniform(-STARFIELD_HALF_EXTENT, STARFIELD_HALF_EXTENT) per axis
pub const STARFIELD_HALF_EXTENT: f32 = 1000.0;

/// Seed for the starfield RNG
pub const STARFIELD_SEED: u64 = 42;

/// Saturn ring inner radius
pub const RING_INNER_RADIUS: f32 = 4.0;

/// Saturn ring outer radius
pub const RING_OUTER_RADIUS: f32 = 7.0;

/// Saturn ring tessellation
pub const RING_SEGMENTS: u32 = 64;

/// Env var consulted for a config file path when none is passed explicitly
pub const CONFIG_ENV_VAR: &str = "ORRERY_CONFIG";
