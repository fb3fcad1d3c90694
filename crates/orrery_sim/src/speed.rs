use orrery_core::{default_speed, BodyId, CelestialBody, SimError, SpeedConfig};
use std::collections::BTreeMap;

/// Angular speed (speed units) per orbiting body.
///
/// Holds an entry for every orbiting body from construction on; entries are
/// overwritten but never removed. Stored values always lie in [min, max].
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedState {
    speeds: BTreeMap<BodyId, f64>,
    min: f64,
    max: f64,
}

impl SpeedState {
    /// Seed every orbiting body with K / orbital_radius.
    /// The caller guarantees the defaults are in range (config validation does).
    pub fn with_defaults(bodies: &[CelestialBody], bounds: &SpeedConfig) -> Self {
        let speeds = bodies
            .iter()
            .filter(|b| b.id.orbits())
            .map(|b| (b.id, default_speed(b.orbital_radius, bounds.constant)))
            .collect();
        Self {
            speeds,
            min: bounds.min,
            max: bounds.max,
        }
    }

    /// Store a new speed. Out-of-range values are rejected, not clamped.
    pub fn set_speed(&mut self, body: BodyId, value: f64) -> Result<(), SimError> {
        let Some(slot) = self.speeds.get_mut(&body) else {
            return Err(SimError::NotFound(body));
        };
        if !(self.min..=self.max).contains(&value) {
            return Err(SimError::InputOutOfRange {
                body,
                value,
                min: self.min,
                max: self.max,
            });
        }
        *slot = value;
        Ok(())
    }

    pub fn get_speed(&self, body: BodyId) -> Result<f64, SimError> {
        self.speeds
            .get(&body)
            .copied()
            .ok_or(SimError::NotFound(body))
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Entries in body order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, f64)> + '_ {
        self.speeds.iter().map(|(id, speed)| (*id, *speed))
    }

    #[cfg(test)]
    pub(crate) fn remove_for_test(&mut self, body: BodyId) {
        self.speeds.remove(&body);
    }

    #[cfg(test)]
    pub(crate) fn force_for_test(&mut self, body: BodyId, value: f64) {
        self.speeds.insert(body, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{MeshHandle, OrreryConfig};

    fn registry() -> Vec<CelestialBody> {
        OrreryConfig::default()
            .bodies
            .iter()
            .map(|b| b.to_body(MeshHandle(b.id as u32)))
            .collect()
    }

    fn state() -> SpeedState {
        SpeedState::with_defaults(&registry(), &SpeedConfig::default())
    }

    #[test]
    fn test_defaults_cover_every_planet() {
        let speeds = state();
        for id in BodyId::PLANETS {
            assert!(speeds.get_speed(id).is_ok(), "{id} missing");
        }
        assert_eq!(speeds.get_speed(BodyId::Sun), Err(SimError::NotFound(BodyId::Sun)));
        assert_eq!(speeds.iter().count(), 8);
    }

    #[test]
    fn test_default_values() {
        let speeds = state();
        let mercury = speeds.get_speed(BodyId::Mercury).unwrap();
        let neptune = speeds.get_speed(BodyId::Neptune).unwrap();
        assert!((mercury - 1000.0 / 15.0).abs() < 1e-9);
        assert!((neptune - 1000.0 / 135.0).abs() < 1e-9);
        assert!(mercury > neptune);
    }

    #[test]
    fn test_defaults_non_increasing_by_radius() {
        let speeds = state();
        let values: Vec<f64> = speeds.iter().map(|(_, s)| s).collect();
        // iter() is in body order, which is ascending orbital radius
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_set_speed_in_range() {
        let mut speeds = state();
        speeds.set_speed(BodyId::Earth, 1.0).unwrap();
        assert_eq!(speeds.get_speed(BodyId::Earth), Ok(1.0));
        speeds.set_speed(BodyId::Earth, 100.0).unwrap();
        assert_eq!(speeds.get_speed(BodyId::Earth), Ok(100.0));
    }

    #[test]
    fn test_set_speed_out_of_range_leaves_state() {
        let mut speeds = state();
        let before = speeds.get_speed(BodyId::Mars).unwrap();
        for bad in [0.0, 0.99, 100.01, -3.0, f64::NAN, f64::INFINITY] {
            let err = speeds.set_speed(BodyId::Mars, bad).unwrap_err();
            assert!(matches!(err, SimError::InputOutOfRange { body: BodyId::Mars, .. }));
        }
        assert_eq!(speeds.get_speed(BodyId::Mars), Ok(before));
    }

    #[test]
    fn test_set_speed_unregistered() {
        let mut speeds = state();
        assert_eq!(
            speeds.set_speed(BodyId::Sun, 10.0),
            Err(SimError::NotFound(BodyId::Sun))
        );
    }
}
