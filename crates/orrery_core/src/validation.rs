//! Configuration validation.
//!
//! Collects every problem before failing so one run reports them all.

use crate::config::{default_speed, OrreryConfig};
use crate::constants::{MAX_SPEED, MIN_SPEED};
use crate::error::ConfigError;
use crate::types::BodyId;

pub fn validate(config: &OrreryConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_speed(&mut errors, config);
    validate_bodies(&mut errors, config);

    let ring = &config.ring;
    if !(ring.inner_radius > 0.0 && ring.inner_radius < ring.outer_radius) {
        errors.push(format!(
            "ring radii must satisfy 0 < inner < outer (got {} / {})",
            ring.inner_radius, ring.outer_radius
        ));
    }
    if ring.segments < 3 {
        errors.push(format!("ring.segments must be >= 3 (got {})", ring.segments));
    }
    validate_range_f32(&mut errors, "ring.opacity", ring.opacity, 0.0, 1.0);
    if !ring.tilt_x.is_finite() || ring.offset.iter().any(|v| !v.is_finite()) {
        errors.push("ring tilt and offset must be finite".into());
    }

    if !(config.starfield.half_extent.is_finite() && config.starfield.half_extent > 0.0) {
        errors.push(format!(
            "starfield.half_extent must be > 0 (got {})",
            config.starfield.half_extent
        ));
    }

    let camera = &config.camera;
    validate_range_f32(&mut errors, "camera.fov_degrees", camera.fov_degrees, 1.0, 179.0);
    if !(camera.near > 0.0 && camera.near < camera.far) {
        errors.push(format!(
            "camera planes must satisfy 0 < near < far (got {} / {})",
            camera.near, camera.far
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(errors.join("; ")))
    }
}

fn validate_speed(errors: &mut Vec<String>, config: &OrreryConfig) {
    let speed = &config.speed;
    if !(speed.constant.is_finite() && speed.constant > 0.0) {
        errors.push(format!("speed.constant must be > 0 (got {})", speed.constant));
    }
    if !(speed.angular_factor.is_finite() && speed.angular_factor > 0.0) {
        errors.push(format!(
            "speed.angular_factor must be > 0 (got {})",
            speed.angular_factor
        ));
    }
    // Speed units never leave the control range [1, 100]
    if !(speed.min >= MIN_SPEED && speed.min < speed.max && speed.max <= MAX_SPEED) {
        errors.push(format!(
            "speed bounds must satisfy {MIN_SPEED} <= min < max <= {MAX_SPEED} (got {} / {})",
            speed.min, speed.max
        ));
    }
}

fn validate_bodies(errors: &mut Vec<String>, config: &OrreryConfig) {
    for id in BodyId::ALL {
        let count = config.bodies.iter().filter(|b| b.id == id).count();
        if count != 1 {
            errors.push(format!("expected exactly one entry for {id}, found {count}"));
        }
    }

    for body in &config.bodies {
        let id = body.id;
        if id.orbits() {
            if !(body.orbital_radius.is_finite() && body.orbital_radius > 0.0) {
                errors.push(format!(
                    "{id}.orbital_radius must be > 0 (got {})",
                    body.orbital_radius
                ));
            } else {
                let speed = default_speed(body.orbital_radius, config.speed.constant);
                if !config.speed.contains(speed) {
                    errors.push(format!(
                        "{id} default speed {speed:.2} outside [{}, {}]",
                        config.speed.min, config.speed.max
                    ));
                }
            }
        } else if body.orbital_radius != 0.0 {
            errors.push(format!(
                "{id}.orbital_radius must be 0 (got {})",
                body.orbital_radius
            ));
        }

        if !body.rotation_rate_x.is_finite() || !body.rotation_rate_y.is_finite() {
            errors.push(format!("{id} rotation rates must be finite"));
        }
        if !(body.display_radius > 0.0) {
            errors.push(format!(
                "{id}.display_radius must be > 0 (got {})",
                body.display_radius
            ));
        }
        if body.segments < 3 {
            errors.push(format!("{id}.segments must be >= 3 (got {})", body.segments));
        }
    }
}

fn validate_range_f32(errors: &mut Vec<String>, field: &str, value: f32, min: f32, max: f32) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{field} must be in [{min}, {max}] (got {value})"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_invalid(config: &OrreryConfig, needle: &str) {
        match validate(config) {
            Err(ConfigError::Invalid(msg)) => {
                assert!(msg.contains(needle), "'{msg}' does not mention '{needle}'")
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_valid() {
        assert!(validate(&OrreryConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_radius_rejected() {
        let mut config = OrreryConfig::default();
        config.bodies[3].orbital_radius = 0.0;
        expect_invalid(&config, "earth.orbital_radius");
    }

    #[test]
    fn test_sun_must_not_orbit() {
        let mut config = OrreryConfig::default();
        config.bodies[0].orbital_radius = 5.0;
        expect_invalid(&config, "sun.orbital_radius must be 0");
    }

    #[test]
    fn test_duplicate_body_rejected() {
        let mut config = OrreryConfig::default();
        let dup = config.bodies[2].clone();
        config.bodies.push(dup);
        expect_invalid(&config, "exactly one entry for venus");
    }

    #[test]
    fn test_default_speed_out_of_bounds_rejected() {
        let mut config = OrreryConfig::default();
        // 1000 / 5 = 200 > 100
        config.bodies[1].orbital_radius = 5.0;
        expect_invalid(&config, "mercury default speed");
    }

    #[test]
    fn test_speed_max_above_range_rejected() {
        let mut config = OrreryConfig::default();
        config.speed.max = 500.0;
        expect_invalid(&config, "speed bounds");

        let err = OrreryConfig::from_toml_str("[speed]\nmax = 500.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn test_speed_min_below_range_rejected() {
        let mut config = OrreryConfig::default();
        config.speed.min = 0.5;
        expect_invalid(&config, "speed bounds");
    }

    #[test]
    fn test_narrower_speed_range_allowed() {
        let mut config = OrreryConfig::default();
        config.speed.min = 5.0;
        config.speed.max = 80.0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_non_finite_rotation_rejected() {
        let mut config = OrreryConfig::default();
        config.bodies[4].rotation_rate_y = f64::INFINITY;
        expect_invalid(&config, "mars rotation rates");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = OrreryConfig::default();
        config.ring.inner_radius = 9.0;
        config.starfield.half_extent = 0.0;
        config.speed.angular_factor = 0.0;
        let Err(ConfigError::Invalid(msg)) = validate(&config) else {
            panic!("expected Invalid");
        };
        assert!(msg.contains("ring radii"));
        assert!(msg.contains("starfield.half_extent"));
        assert!(msg.contains("speed.angular_factor"));
    }
}
