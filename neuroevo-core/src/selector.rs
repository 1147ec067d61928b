//! Ranking of agents and selection of the parent pool.
use crate::error::EvoError;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Returns the indices of `scores`, from the highest score to the lowest.
///
/// The sort is stable: agents with equal scores keep their population order.
pub fn rank(scores: &[f32]) -> Vec<usize> {
    let mut ixs: Vec<usize> = (0..scores.len()).collect();
    ixs.sort_by_key(|&i| Reverse(OrderedFloat(scores[i])));
    ixs
}

/// Returns the first `top_limit` indices of a ranking.
///
/// `top_limit` must be in `1..=ranked.len()`.
pub fn select_parent_pool(ranked: &[usize], top_limit: usize) -> Result<Vec<usize>, EvoError> {
    if top_limit == 0 || top_limit > ranked.len() {
        return Err(EvoError::InvalidConfig(format!(
            "top_limit must be in 1..={}, got {}",
            ranked.len(),
            top_limit
        )));
    }
    Ok(ranked[..top_limit].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_is_descending() {
        assert_eq!(rank(&[3.0, 9.0, 1.0, 5.0]), vec![1, 3, 0, 2]);
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn test_ties_keep_population_order() {
        let scores = [2.0, 7.0, 2.0, 7.0, 2.0];
        assert_eq!(rank(&scores), vec![1, 3, 0, 2, 4]);
        assert_eq!(select_parent_pool(&rank(&scores), 3), Ok(vec![1, 3, 0]));
    }

    #[test]
    fn test_parent_pool_holds_top_scores() {
        let scores = [10.0, 200.0, 35.0, 35.0, 12.0, 200.0, 9.0, 101.0];
        let ranked = rank(&scores);
        for top_limit in 1..=scores.len() {
            let pool = select_parent_pool(&ranked, top_limit).unwrap();
            assert_eq!(pool.len(), top_limit);

            // No agent left out of the pool beats an agent in it.
            let worst_in = pool.iter().map(|&i| scores[i]).fold(f32::MAX, f32::min);
            for i in (0..scores.len()).filter(|i| !pool.contains(i)) {
                assert!(scores[i] <= worst_in);
            }
        }
    }

    #[test]
    fn test_invalid_top_limit() {
        let ranked = rank(&[1.0, 2.0]);
        assert!(select_parent_pool(&ranked, 0).is_err());
        assert!(select_parent_pool(&ranked, 3).is_err());
        assert_eq!(select_parent_pool(&ranked, 2), Ok(vec![1, 0]));
    }
}
