//! Selection of the elite, the agent carried unchanged to the next generation.
use crate::{error::EvoError, Agent, Env, Evaluator};
use anyhow::Result;
use log::{debug, info};
use rand::Rng;

/// The best agent of a generation after re-validation.
#[derive(Clone, Debug)]
pub struct Elite<A> {
    /// Deep copy of the winning agent.
    pub agent: A,

    /// Mean return of the agent over the re-validation episodes.
    pub score: f32,

    /// Index of the agent in the population it was selected from.
    pub index: usize,
}

/// Picks the elite among the best parents and the previous elite.
///
/// Generation-wide scores come from few episodes and are noisy, so the
/// candidates are evaluated again with more episodes before one of them is
/// promoted.
#[derive(Clone, Debug)]
pub struct EliteSelector {
    /// How many of the best parents are candidates.
    candidate_cap: usize,

    /// Episodes per candidate re-evaluation.
    n_episodes: usize,

    /// Score a candidate must strictly exceed to be selected.
    min_score: f32,
}

impl EliteSelector {
    /// Constructs an [`EliteSelector`].
    pub fn new(candidate_cap: usize, n_episodes: usize, min_score: f32) -> Self {
        Self {
            candidate_cap,
            n_episodes,
            min_score,
        }
    }

    /// Candidate indices: the first `candidate_cap` entries of `parent_pool`,
    /// then `previous_elite` unless it is already among them.
    pub fn candidates(&self, parent_pool: &[usize], previous_elite: Option<usize>) -> Vec<usize> {
        let mut ixs: Vec<usize> = parent_pool.iter().take(self.candidate_cap).copied().collect();
        if let Some(ix) = previous_elite {
            if !ixs.contains(&ix) {
                ixs.push(ix);
            }
        }
        ixs
    }

    /// Re-evaluates the candidates and returns a copy of the best one.
    ///
    /// Returns `None` when no candidate strictly beats the minimum score.
    /// Among candidates with equal re-validated scores, the first one wins.
    pub fn select<E, A, V, R>(
        &self,
        population: &[A],
        parent_pool: &[usize],
        previous_elite: Option<usize>,
        evaluator: &mut V,
        rng: &mut R,
    ) -> Result<Option<Elite<A>>>
    where
        E: Env,
        A: Agent<E>,
        V: Evaluator<E>,
        R: Rng + ?Sized,
    {
        let mut top_score = self.min_score;
        let mut top_index = None;

        for ix in self.candidates(parent_pool, previous_elite) {
            let agent = population.get(ix).ok_or(EvoError::IndexOutOfRange {
                index: ix,
                len: population.len(),
            })?;
            let score = evaluator.evaluate(agent, self.n_episodes, rng)?;
            debug!("Score for elite candidate {} is {}", ix, score);

            if score > top_score {
                top_score = score;
                top_index = Some(ix);
            }
        }

        match top_index {
            Some(ix) => {
                info!("Elite selected with index {} and score {}", ix, top_score);
                Ok(Some(Elite {
                    agent: population[ix].clone(),
                    score: top_score,
                    index: ix,
                }))
            }
            None => {
                info!("No candidate scored above {}, no elite", self.min_score);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::{DummyAgent, DummyEnv, DummyEnvConfig},
        DefaultEvaluator,
    };
    use rand::{rngs::SmallRng, SeedableRng};

    fn evaluator() -> Result<DefaultEvaluator<DummyEnv>> {
        DefaultEvaluator::new(&DummyEnvConfig::default().max_len(50), 0, 250)
    }

    #[test]
    fn test_candidates_are_deduplicated() {
        let selector = EliteSelector::new(2, 5, 0.0);
        assert_eq!(selector.candidates(&[4, 1, 3], None), vec![4, 1]);
        assert_eq!(selector.candidates(&[4, 1, 3], Some(3)), vec![4, 1, 3]);
        assert_eq!(selector.candidates(&[4, 1, 3], Some(1)), vec![4, 1]);
        assert_eq!(selector.candidates(&[0], Some(0)), vec![0]);
    }

    #[test]
    fn test_previous_elite_competes() -> Result<()> {
        // The previous elite (index 2) is outside of the parent pool but is the
        // only agent lasting more than one step.
        let population = vec![
            DummyAgent::new(-100.0),
            DummyAgent::new(-100.0),
            DummyAgent::new(100.0),
        ];
        let selector = EliteSelector::new(10, 5, 0.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let elite = selector
            .select(&population, &[0, 1], Some(2), &mut evaluator()?, &mut rng)?
            .unwrap();
        assert_eq!(elite.index, 2);
        assert_eq!(elite.score, 50.0);
        assert_eq!(elite.agent, population[2]);
        Ok(())
    }

    #[test]
    fn test_no_elite_below_min_score() -> Result<()> {
        let population = vec![DummyAgent::new(-100.0), DummyAgent::new(-100.0)];
        let mut rng = SmallRng::seed_from_u64(0);

        // Every candidate scores exactly 1, which does not beat 1.
        let selector = EliteSelector::new(10, 5, 1.0);
        let elite = selector.select(&population, &[0, 1], None, &mut evaluator()?, &mut rng)?;
        assert!(elite.is_none());

        // The first of the tied candidates wins.
        let selector = EliteSelector::new(10, 5, 0.0);
        let elite = selector.select(&population, &[1, 0], None, &mut evaluator()?, &mut rng)?;
        assert_eq!(elite.map(|e| e.index), Some(1));
        Ok(())
    }

    #[test]
    fn test_invalid_previous_elite() -> Result<()> {
        let population = vec![DummyAgent::new(0.0)];
        let selector = EliteSelector::new(10, 5, 0.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let res = selector.select(&population, &[0], Some(3), &mut evaluator()?, &mut rng);
        assert!(res.is_err());
        Ok(())
    }
}
