//! Collision-free spawn placement
//!
//! Rejection sampling inside a disc: a candidate is kept only if it is at least
//! `min_separation` away from every point accepted so far.

use glam::Vec2;
use rand::Rng;

use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::error::PlacementError;
use crate::polar_to_cartesian;

/// Uniform point inside a disc of `radius` centered at the origin
pub fn random_in_disc<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec2 {
    // sqrt keeps the density uniform over area rather than over radius
    let r = radius * rng.random::<f32>().sqrt();
    let theta = rng.random::<f32>() * std::f32::consts::TAU;
    polar_to_cartesian(r, theta)
}

/// Place `count` points in a disc of radius `range`, pairwise `>= min_separation` apart.
///
/// Each point gets `MAX_PLACEMENT_ATTEMPTS` candidate draws; running out means
/// the disc is too crowded and placement is reported as infeasible.
pub fn place_agents<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    range: f32,
    min_separation: f32,
) -> Result<Vec<Vec2>, PlacementError> {
    if !range.is_finite() || range < 0.0 {
        return Err(PlacementError::InvalidRange(range));
    }
    if !min_separation.is_finite() || min_separation < 0.0 {
        return Err(PlacementError::InvalidSeparation(min_separation));
    }

    let mut positions: Vec<Vec2> = Vec::with_capacity(count);
    while positions.len() < count {
        let mut accepted = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = random_in_disc(rng, range);
            if positions
                .iter()
                .all(|p| p.distance(candidate) >= min_separation)
            {
                accepted = Some(candidate);
                break;
            }
        }

        match accepted {
            Some(p) => positions.push(p),
            None => {
                log::warn!(
                    "Spawn placement gave up after {} of {} sheep (range {}, separation {})",
                    positions.len(),
                    count,
                    range,
                    min_separation
                );
                return Err(PlacementError::Infeasible {
                    placed: positions.len(),
                    requested: count,
                    range,
                    min_separation,
                });
            }
        }
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_MIN_SEPARATION;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = Pcg32::seed_from_u64(1);
        let points = place_agents(&mut rng, 0, 5.0, 1.0).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_crowded_disc_is_infeasible() {
        let mut rng = Pcg32::seed_from_u64(1);
        // A disc of radius 0.4 cannot hold two points 1.0 apart
        let err = place_agents(&mut rng, 2, 0.4, 1.0).unwrap_err();
        assert_eq!(
            err,
            PlacementError::Infeasible {
                placed: 1,
                requested: 2,
                range: 0.4,
                min_separation: 1.0,
            }
        );
    }

    #[test]
    fn test_negative_range_rejected() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            place_agents(&mut rng, 3, -1.0, 1.0),
            Err(PlacementError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_bad_separation_rejected() {
        let mut rng = Pcg32::seed_from_u64(1);
        for sep in [f32::NAN, f32::INFINITY, -0.5] {
            assert!(matches!(
                place_agents(&mut rng, 3, 5.0, sep),
                Err(PlacementError::InvalidSeparation(_))
            ));
        }
        // Zero separation only means points may coincide
        assert_eq!(place_agents(&mut rng, 3, 5.0, 0.0).unwrap().len(), 3);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = place_agents(&mut Pcg32::seed_from_u64(42), 10, 6.0, 1.0).unwrap();
        let b = place_agents(&mut Pcg32::seed_from_u64(42), 10, 6.0, 1.0).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_separation_and_containment(
            seed in any::<u64>(),
            count in 0usize..=20,
            range in 5.0f32..50.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let points = place_agents(&mut rng, count, range, DEFAULT_MIN_SEPARATION).unwrap();

            prop_assert_eq!(points.len(), count);
            for (i, p) in points.iter().enumerate() {
                prop_assert!(p.length() <= range + 1e-4);
                for q in &points[i + 1..] {
                    prop_assert!(p.distance(*q) >= DEFAULT_MIN_SEPARATION);
                }
            }
        }

        #[test]
        fn prop_disc_samples_inside(seed in any::<u64>(), radius in 0.0f32..100.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..32 {
                prop_assert!(random_in_disc(&mut rng, radius).length() <= radius + 1e-4);
            }
        }
    }
}
