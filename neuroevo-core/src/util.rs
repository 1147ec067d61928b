//! Utilities for stochastic policies and score statistics.
use crate::error::EvoError;
use rand::{distributions::WeightedIndex, Rng};

/// Tolerance on the total of a probability vector.
const PROB_SUM_TOLERANCE: f32 = 1e-3;

/// Draws an action index from a probability vector.
///
/// The vector must be a valid distribution: non-empty, every entry finite and
/// non-negative, summing to one. Anything else is reported as
/// [`EvoError::InvalidDistribution`] instead of falling back to some action.
pub fn sample_action_index<R: Rng + ?Sized>(probs: &[f32], rng: &mut R) -> Result<usize, EvoError> {
    if probs.is_empty() {
        return Err(EvoError::InvalidDistribution("empty".to_string()));
    }
    if let Some(p) = probs.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(EvoError::InvalidDistribution(format!(
            "entry {} in {:?}",
            p, probs
        )));
    }
    let total: f32 = probs.iter().sum();
    if (total - 1.0).abs() > PROB_SUM_TOLERANCE {
        return Err(EvoError::InvalidDistribution(format!(
            "entries sum to {}",
            total
        )));
    }

    let dist =
        WeightedIndex::new(probs).map_err(|e| EvoError::InvalidDistribution(e.to_string()))?;
    Ok(rng.sample(dist))
}

/// Standard normal sample by the Box-Muller transform.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    const TWO_PI: f32 = std::f32::consts::TAU;
    let u1 = rng.gen::<f32>().max(f32::MIN_POSITIVE);
    let u2 = rng.gen::<f32>();
    (-2.0 * u1.ln()).sqrt() * (TWO_PI * u2).cos()
}

/// Mean of the values, `0` for an empty slice.
pub fn mean(vs: &[f32]) -> f32 {
    if vs.is_empty() {
        0.0
    } else {
        vs.iter().sum::<f32>() / vs.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_sample_follows_distribution() {
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(sample_action_index(&[0.0, 1.0], &mut rng), Ok(1));
        assert_eq!(sample_action_index(&[1.0, 0.0, 0.0], &mut rng), Ok(0));

        let n = 10_000;
        let ones = (0..n)
            .filter(|_| sample_action_index(&[0.25, 0.75], &mut rng) == Ok(1))
            .count();
        let ratio = ones as f32 / n as f32;
        assert!((ratio - 0.75).abs() < 0.03, "ratio = {}", ratio);
    }

    #[test]
    fn test_invalid_distributions_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);
        for probs in [
            vec![],
            vec![f32::NAN, 1.0],
            vec![-0.5, 1.5],
            vec![0.0, 0.0],
            vec![0.3, 0.3],
            vec![f32::INFINITY, 0.0],
        ]
        .iter()
        {
            let res = sample_action_index(probs, &mut rng);
            assert!(
                matches!(res, Err(EvoError::InvalidDistribution(_))),
                "{:?} -> {:?}",
                probs,
                res
            );
        }
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = SmallRng::seed_from_u64(7);
        let xs: Vec<f32> = (0..20_000).map(|_| gaussian(&mut rng)).collect();
        let m = mean(&xs);
        let var = xs.iter().map(|x| (x - m) * (x - m)).sum::<f32>() / xs.len() as f32;
        assert!(m.abs() < 0.05, "mean = {}", m);
        assert!((var - 1.0).abs() < 0.05, "var = {}", var);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }
}
