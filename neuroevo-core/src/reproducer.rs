//! Generation of the next population.
use crate::{error::EvoError, Agent, Elite, EliteSelector, Env, Evaluator};
use anyhow::Result;
use log::warn;
use rand::Rng;

/// The next population and its elite.
#[derive(Clone, Debug)]
pub struct Offspring<A> {
    /// Agents of the next generation, as many as in the parent generation.
    pub population: Vec<A>,

    /// Index of the elite in [`Offspring::population`], always the last slot.
    /// `None` when no elite was selected.
    pub elite_index: Option<usize>,

    /// Re-validated score of the elite.
    pub elite_score: Option<f32>,
}

/// Builds the next generation from mutated copies of parents plus one elite.
#[derive(Clone, Debug)]
pub struct Reproducer {
    /// Standard deviation of the noise added to every parameter.
    mutation_power: f32,

    elite_selector: EliteSelector,
}

impl Reproducer {
    /// Constructs a [`Reproducer`].
    pub fn new(mutation_power: f32, elite_selector: EliteSelector) -> Self {
        Self {
            mutation_power,
            elite_selector,
        }
    }

    /// Produces a population of the same size as `population`.
    ///
    /// The first `N - 1` agents are children: each copies a parent drawn
    /// uniformly, with replacement, from `parent_pool` and perturbs the copy.
    /// The last slot holds the elite selected among the best parents and
    /// `previous_elite`. If no elite is selected, the last slot holds an
    /// unmutated copy of the best parent, `parent_pool[0]`, and the returned
    /// elite index is `None`.
    pub fn reproduce<E, A, V, R>(
        &self,
        population: &[A],
        parent_pool: &[usize],
        previous_elite: Option<usize>,
        evaluator: &mut V,
        rng: &mut R,
    ) -> Result<Offspring<A>>
    where
        E: Env,
        A: Agent<E>,
        V: Evaluator<E>,
        R: Rng + ?Sized,
    {
        let n = population.len();
        let best_parent = *parent_pool
            .first()
            .ok_or_else(|| EvoError::InvalidConfig("empty parent pool".to_string()))?;
        if let Some(&ix) = parent_pool.iter().find(|&&ix| ix >= n) {
            return Err(EvoError::IndexOutOfRange { index: ix, len: n }.into());
        }

        let mut children = Vec::with_capacity(n);
        for _ in 0..n - 1 {
            let parent = parent_pool[rng.gen_range(0..parent_pool.len())];
            children.push(population[parent].mutate(self.mutation_power, rng));
        }

        let elite = self.elite_selector.select::<E, _, _, _>(
            population,
            parent_pool,
            previous_elite,
            evaluator,
            rng,
        )?;
        let (elite_index, elite_score) = match elite {
            Some(Elite { agent, score, .. }) => {
                children.push(agent);
                (Some(children.len() - 1), Some(score))
            }
            None => {
                warn!("No elite; agent {} is carried over instead", best_parent);
                children.push(population[best_parent].clone());
                (None, None)
            }
        };

        Ok(Offspring {
            population: children,
            elite_index,
            elite_score,
        })
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
        DefaultEvaluator::new(&DummyEnvConfig::default().max_len(20), 0, 250)
    }

    fn population(n: usize) -> Vec<DummyAgent> {
        (0..n).map(|i| DummyAgent::new(i as f32 - 2.0)).collect()
    }

    #[test]
    fn test_children_come_from_parent_pool() -> Result<()> {
        let population = population(8);
        let before = population.clone();
        let reproducer = Reproducer::new(0.0, EliteSelector::new(2, 5, 0.0));
        let mut rng = SmallRng::seed_from_u64(1);
        let mut evaluator = evaluator()?;
        let offspring = reproducer.reproduce(&population, &[5, 7], None, &mut evaluator, &mut rng)?;

        assert_eq!(offspring.population.len(), 8);
        // Zero mutation power makes children exact copies of their parents.
        for child in &offspring.population[..7] {
            assert!(*child == population[5] || *child == population[7]);
        }
        assert_eq!(population, before);
        Ok(())
    }

    #[test]
    fn test_elite_is_last_and_unmutated() -> Result<()> {
        let population = population(6);
        let reproducer = Reproducer::new(0.5, EliteSelector::new(1, 5, 0.0));
        let mut rng = SmallRng::seed_from_u64(2);
        let offspring = reproducer.reproduce(&population, &[3], None, &mut evaluator()?, &mut rng)?;

        assert_eq!(offspring.elite_index, Some(5));
        assert_eq!(offspring.population[5], population[3]);
        assert!(offspring.elite_score.unwrap() > 0.0);
        Ok(())
    }

    #[test]
    fn test_no_elite_carries_best_parent() -> Result<()> {
        let population = population(4);
        // Scores never exceed 20 steps.
        let reproducer = Reproducer::new(0.1, EliteSelector::new(4, 5, 1000.0));
        let mut rng = SmallRng::seed_from_u64(3);
        let offspring =
            reproducer.reproduce(&population, &[2, 0], Some(3), &mut evaluator()?, &mut rng)?;

        assert_eq!(offspring.elite_index, None);
        assert_eq!(offspring.elite_score, None);
        assert_eq!(offspring.population.len(), 4);
        assert_eq!(offspring.population[3], population[2]);
        Ok(())
    }

    #[test]
    fn test_single_agent_population() -> Result<()> {
        let population = vec![DummyAgent::new(3.0)];
        let reproducer = Reproducer::new(0.02, EliteSelector::new(10, 5, 0.0));
        let mut rng = SmallRng::seed_from_u64(4);
        let mut evaluator = evaluator()?;

        let offspring = reproducer.reproduce(&population, &[0], None, &mut evaluator, &mut rng)?;
        assert_eq!(offspring.population, population);
        assert_eq!(offspring.elite_index, Some(0));

        let offspring = reproducer.reproduce(
            &offspring.population,
            &[0],
            offspring.elite_index,
            &mut evaluator,
            &mut rng,
        )?;
        assert_eq!(offspring.population.len(), 1);
        assert_eq!(offspring.elite_index, Some(0));
        Ok(())
    }

    #[test]
    fn test_empty_or_invalid_parent_pool() -> Result<()> {
        let population = population(3);
        let reproducer = Reproducer::new(0.02, EliteSelector::new(10, 5, 0.0));
        let mut rng = SmallRng::seed_from_u64(5);
        let mut evaluator = evaluator()?;
        assert!(reproducer
            .reproduce(&population, &[], None, &mut evaluator, &mut rng)
            .is_err());
        assert!(reproducer
            .reproduce(&population, &[1, 3], None, &mut evaluator, &mut rng)
            .is_err());
        Ok(())
    }
}
