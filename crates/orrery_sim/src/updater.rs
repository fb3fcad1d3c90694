//! Per-tick orbit and self-rotation.
//!
//! Every transform is a function of absolute elapsed time and the current
//! speed only. Nothing is integrated frame to frame, so a speed change lands
//! exactly (as a jump in position) and there is no drift.

use bevy::log::warn;
use bevy::math::DVec3;
use orrery_core::{CelestialBody, OrreryConfig, SimError};
use std::f64::consts::TAU;

use crate::scene::BodyTransform;
use crate::speed::SpeedState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// rad/s per speed unit
    pub angular_factor: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Reduce the angle modulo 2π before cos/sin
    pub wrap_angle: bool,
}

impl OrbitParams {
    pub fn from_config(config: &OrreryConfig) -> Self {
        Self {
            angular_factor: config.speed.angular_factor,
            min_speed: config.speed.min,
            max_speed: config.speed.max,
            wrap_angle: config.wrap_orbital_angle,
        }
    }
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self::from_config(&OrreryConfig::default())
    }
}

/// Orbital angle at `elapsed` seconds. Unbounded unless `wrap` is set.
pub fn orbital_angle(elapsed: f64, speed: f64, angular_factor: f64, wrap: bool) -> f64 {
    let angle = elapsed * speed * angular_factor;
    if wrap { angle.rem_euclid(TAU) } else { angle }
}

/// Self-rotation Euler angles at `elapsed` seconds
pub fn spin(body: &CelestialBody, elapsed: f64) -> DVec3 {
    DVec3::new(
        elapsed * body.rotation_rate_x,
        elapsed * body.rotation_rate_y,
        0.0,
    )
}

/// The sun spins in place at the origin
pub fn sun_transform(body: &CelestialBody, elapsed: f64) -> BodyTransform {
    BodyTransform {
        translation: DVec3::ZERO,
        rotation: spin(body, elapsed),
    }
}

/// Circular orbit in the XZ plane plus self-rotation
pub fn orbiting_transform(
    body: &CelestialBody,
    elapsed: f64,
    speed: f64,
    params: &OrbitParams,
) -> BodyTransform {
    let angle = orbital_angle(elapsed, speed, params.angular_factor, params.wrap_angle);
    let r = body.orbital_radius;
    BodyTransform {
        translation: DVec3::new(r * angle.cos(), 0.0, r * angle.sin()),
        rotation: spin(body, elapsed),
    }
}

/// Transform of one body for the given snapshot.
///
/// A missing speed entry is an internal invariant violation and fails with
/// `StateDesync`. A stored speed outside the bounds is clamped with a warning.
pub fn update_body(
    body: &CelestialBody,
    speeds: &SpeedState,
    elapsed: f64,
    params: &OrbitParams,
) -> Result<BodyTransform, SimError> {
    if !body.id.orbits() {
        return Ok(sun_transform(body, elapsed));
    }

    let stored = speeds
        .get_speed(body.id)
        .map_err(|_| SimError::StateDesync(body.id))?;

    let speed = if (params.min_speed..=params.max_speed).contains(&stored) {
        stored
    } else {
        let clamped = if stored.is_nan() {
            params.min_speed
        } else {
            stored.clamp(params.min_speed, params.max_speed)
        };
        warn!(
            "{} speed {} outside [{}, {}], clamping to {}",
            body.id, stored, params.min_speed, params.max_speed, clamped
        );
        clamped
    };

    Ok(orbiting_transform(body, elapsed, speed, params))
}
