use orrery_core::StarfieldConfig;
use rand::{Rng, SeedableRng};

/// Static decorative point cloud, generated once and never touched again
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    points: Vec<[f32; 3]>,
    half_extent: f32,
}

impl Starfield {
    /// Deterministic starfield from the configured seed
    pub fn generate(config: &StarfieldConfig) -> Self {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(config.seed);
        Self::generate_with(config.count, config.half_extent, &mut rng)
    }

    /// Every coordinate drawn independently from Uniform(-half_extent, half_extent)
    pub fn generate_with(count: u32, half_extent: f32, rng: &mut impl Rng) -> Self {
        let points = (0..count)
            .map(|_| {
                [
                    rng.gen_range(-half_extent..half_extent),
                    rng.gen_range(-half_extent..half_extent),
                    rng.gen_range(-half_extent..half_extent),
                ]
            })
            .collect();
        Self {
            points,
            half_extent,
        }
    }

    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_count_and_bounds() {
        let stars = Starfield::generate(&StarfieldConfig::default());
        assert_eq!(stars.len(), 5000);
        for p in stars.points() {
            for c in p {
                assert!((-1000.0..1000.0).contains(c), "{c} out of bounds");
            }
        }
    }

    #[test]
    fn test_deterministic_per_seed() {
        let config = StarfieldConfig::default();
        assert_eq!(Starfield::generate(&config), Starfield::generate(&config));

        let other = StarfieldConfig {
            seed: config.seed + 1,
            ..config.clone()
        };
        assert_ne!(Starfield::generate(&config), Starfield::generate(&other));
    }

    #[test]
    fn test_roughly_uniform_octants() {
        let stars = Starfield::generate(&StarfieldConfig::default());
        let mut octants = [0u32; 8];
        let mut sum = [0.0f64; 3];
        for p in stars.points() {
            let idx = (p[0] >= 0.0) as usize | ((p[1] >= 0.0) as usize) << 1 | ((p[2] >= 0.0) as usize) << 2;
            octants[idx] += 1;
            for i in 0..3 {
                sum[i] += p[i] as f64;
            }
        }
        // 625 expected per octant
        for count in octants {
            assert!((500..750).contains(&count), "octants = {:?}", octants);
        }
        for s in sum {
            let mean = s / stars.len() as f64;
            assert!(mean.abs() < 40.0, "mean = {mean}");
        }
    }

    #[test]
    fn test_empty_starfield() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        let stars = Starfield::generate_with(0, 10.0, &mut rng);
        assert!(stars.is_empty());
    }
}
