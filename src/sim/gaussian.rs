//! Normally distributed sampling
//!
//! Box-Muller transform over two uniform draws. Used to time grazing pauses and
//! size search circles, so results are allowed to go negative; callers clamp.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A normal distribution described by its mean and standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub mean: f32,
    pub standard_deviation: f32,
}

impl Gaussian {
    pub const fn new(mean: f32, standard_deviation: f32) -> Self {
        Self {
            mean,
            standard_deviation,
        }
    }

    /// Draw one value from `Normal(mean, standard_deviation)`.
    ///
    /// `u1` is redrawn while it is exactly zero so `ln(u1)` stays finite.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let mut u1: f32 = rng.random();
        while u1 == 0.0 {
            u1 = rng.random();
        }
        let u2: f32 = rng.random();
        self.standard_deviation
            * (-2.0 * u1.ln()).sqrt()
            * (std::f32::consts::TAU * u2).sin()
            + self.mean
    }

    /// Finite parameters with a non-negative spread
    pub fn is_valid(&self) -> bool {
        self.mean.is_finite()
            && self.standard_deviation.is_finite()
            && self.standard_deviation >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// Replays a fixed list of `u32` draws, then repeats the last one
    struct ScriptedRng {
        draws: Vec<u32>,
        pos: usize,
    }

    impl ScriptedRng {
        fn new(draws: Vec<u32>) -> Self {
            Self { draws, pos: 0 }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let v = self.draws[self.pos.min(self.draws.len() - 1)];
            self.pos += 1;
            v
        }

        fn next_u64(&mut self) -> u64 {
            ((self.next_u32() as u64) << 32) | self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    #[test]
    fn test_standard_normal_moments() {
        let g = Gaussian::new(0.0, 1.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let n = 100_000;
        let samples: Vec<f64> = (0..n).map(|_| g.sample(&mut rng) as f64).collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var.sqrt() - 1.0).abs() < 0.05, "std {}", var.sqrt());
    }

    #[test]
    fn test_zero_draw_is_redrawn() {
        // u1 = 0.0 (rejected), u1 = 0.5, u2 = 0.25 -> sin(pi/2) = 1
        let mut rng = ScriptedRng::new(vec![0, 1 << 31, 1 << 30]);
        let g = Gaussian::new(3.0, 2.0);
        let z = g.sample(&mut rng);

        let expected = 2.0 * (-2.0 * 0.5f32.ln()).sqrt() + 3.0;
        assert!(z.is_finite());
        assert!((z - expected).abs() < 1e-4, "{z} vs {expected}");
        assert_eq!(rng.pos, 3);
    }

    #[test]
    fn test_negative_values_are_not_clamped() {
        // u2 = 0.75 -> sin(3pi/2) = -1
        let mut rng = ScriptedRng::new(vec![1 << 31, 3 << 30]);
        let z = Gaussian::new(0.5, 1.0).sample(&mut rng);
        assert!(z < 0.0);
    }

    #[test]
    fn test_zero_spread_returns_mean() {
        let mut rng = Pcg32::seed_from_u64(1);
        let g = Gaussian::new(4.0, 0.0);
        for _ in 0..100 {
            assert_eq!(g.sample(&mut rng), 4.0);
        }
    }

    #[test]
    fn test_validity() {
        assert!(Gaussian::new(1.0, 0.0).is_valid());
        assert!(!Gaussian::new(1.0, -0.1).is_valid());
        assert!(!Gaussian::new(f32::NAN, 1.0).is_valid());
    }
}
