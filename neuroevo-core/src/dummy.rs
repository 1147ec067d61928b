//! Minimal environment and agent, used for tests.
//!
//! [`DummyEnv`] pays a reward of 1 per step. Action `0` keeps the episode
//! going, action `1` ends it, and the episode is truncated after `max_len`
//! steps. [`DummyAgent`] has a single parameter, a logit: the probability of
//! continuing is `sigmoid(logit)`, so the expected episode length of an agent
//! is fixed by its parameter and grows as the logit does.
//!
//! [`FixedLenAgent`] removes the chance: it plays exactly
//! [`FixedLenAgent::episode_len`] steps, a length fixed by its parameter, so its
//! score is that length. Randomly initialized from a seeded generator, it
//! gives a population with a seeded mapping from agents to episode lengths.
use crate::{util::sample_action_index, Agent, Env, Policy, Step};
use anyhow::{bail, Result};
use rand::Rng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Dummy observation, the number of steps taken so far.
#[derive(Clone, Debug)]
pub struct DummyObs(Vec<f32>);

impl crate::Obs for DummyObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[f32]> for DummyObs {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Dummy action.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyAct(pub usize);

impl crate::Act for DummyAct {}

impl From<usize> for DummyAct {
    fn from(ix: usize) -> Self {
        Self(ix)
    }
}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    max_len: usize,
    fail_on_reset: bool,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self {
            max_len: 100,
            fail_on_reset: false,
        }
    }
}

impl DummyEnvConfig {
    /// Sets the step after which episodes are truncated.
    pub fn max_len(mut self, v: usize) -> Self {
        self.max_len = v;
        self
    }

    /// Makes every reset fail.
    pub fn fail_on_reset(mut self, v: bool) -> Self {
        self.fail_on_reset = v;
        self
    }
}

/// Dummy env.
pub struct DummyEnv {
    config: DummyEnvConfig,
    t: usize,
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Act = DummyAct;
    type Obs = DummyObs;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            t: 0,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        if self.config.fail_on_reset {
            bail!("DummyEnv failed to reset");
        }
        self.t = 0;
        Ok(DummyObs(vec![0.0]))
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        if a.0 >= 2 {
            bail!("Invalid action {:?}", a);
        }
        self.t += 1;
        let is_terminated = a.0 == 1;
        let is_truncated = self.t >= self.config.max_len;
        let obs = DummyObs(vec![self.t as f32]);
        Ok(Step::new(obs, a.clone(), 1.0, is_terminated, is_truncated, ()))
    }

    fn obs_dim(&self) -> usize {
        1
    }

    fn n_actions(&self) -> usize {
        2
    }
}

/// Dummy agent with a single parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DummyAgent {
    logit: f32,
}

impl DummyAgent {
    /// Creates an agent with the given logit of continuing.
    pub fn new(logit: f32) -> Self {
        Self { logit }
    }

    /// Logit of continuing.
    pub fn logit(&self) -> f32 {
        self.logit
    }

    /// Probabilities of continuing and stopping.
    pub fn probs(&self) -> [f32; 2] {
        [sigmoid(self.logit), sigmoid(-self.logit)]
    }
}

impl Policy<DummyEnv> for DummyAgent {
    fn sample<R: Rng + ?Sized>(&self, _obs: &DummyObs, rng: &mut R) -> Result<DummyAct> {
        Ok(DummyAct(sample_action_index(&self.probs(), rng)?))
    }
}

impl Agent<DummyEnv> for DummyAgent {
    /// Half width of the uniform distribution of initial logits.
    type Config = f32;

    fn random<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self {
        Self::new(rng.gen_range(-*config..=*config))
    }

    fn mutate<R: Rng + ?Sized>(&self, power: f32, rng: &mut R) -> Self {
        Self::new(self.logit + power * crate::util::gaussian(rng))
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        save_yaml(self, path)
    }

    fn load_params(path: &Path) -> Result<Self> {
        load_yaml(path)
    }
}

/// Longest episode of a [`FixedLenAgent`].
pub const FIXED_LEN_MAX: usize = 50;

/// Deterministic agent whose every episode lasts [`FixedLenAgent::episode_len`] steps.
///
/// The environment must truncate no earlier than [`FIXED_LEN_MAX`] steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedLenAgent {
    logit: f32,
}

impl FixedLenAgent {
    /// Creates an agent from its parameter.
    pub fn new(logit: f32) -> Self {
        Self { logit }
    }

    /// Episode length, from 1 to [`FIXED_LEN_MAX`], increasing with the parameter.
    pub fn episode_len(&self) -> usize {
        1 + (sigmoid(self.logit) * (FIXED_LEN_MAX - 1) as f32).round() as usize
    }
}

impl Policy<DummyEnv> for FixedLenAgent {
    /// Continues until the `episode_len()`-th step, then stops.
    fn sample<R: Rng + ?Sized>(&self, obs: &DummyObs, _rng: &mut R) -> Result<DummyAct> {
        let n_steps_taken = obs.0[0] as usize;
        Ok(DummyAct((n_steps_taken + 1 >= self.episode_len()) as usize))
    }
}

impl Agent<DummyEnv> for FixedLenAgent {
    /// Half width of the uniform distribution of initial parameters.
    type Config = f32;

    fn random<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self {
        Self::new(rng.gen_range(-*config..=*config))
    }

    fn mutate<R: Rng + ?Sized>(&self, power: f32, rng: &mut R) -> Self {
        Self::new(self.logit + power * crate::util::gaussian(rng))
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        save_yaml(self, path)
    }

    fn load_params(path: &Path) -> Result<Self> {
        load_yaml(path)
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn save_yaml<T: Serialize>(v: &T, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_yaml::to_writer(file, v)?;
    Ok(())
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let rdr = BufReader::new(File::open(path)?);
    Ok(serde_yaml::from_reader(rdr)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefaultEvaluator, Evaluator};
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_fixed_len_agent_plays_exactly_len_steps() -> Result<()> {
        let config = DummyEnvConfig::default();
        let mut evaluator = DefaultEvaluator::<DummyEnv>::new(&config, 0, 250)?;
        let mut rng = SmallRng::seed_from_u64(0);
        for logit in [-100.0, -1.0, 0.0, 0.7, 3.0, 100.0].iter() {
            let agent = FixedLenAgent::new(*logit);
            let k = agent.episode_len();
            assert!((1..=FIXED_LEN_MAX).contains(&k));
            assert_eq!(evaluator.evaluate(&agent, 3, &mut rng)?, k as f32);
        }
        assert_eq!(FixedLenAgent::new(-100.0).episode_len(), 1);
        assert_eq!(FixedLenAgent::new(100.0).episode_len(), FIXED_LEN_MAX);
        let (short, long) = (FixedLenAgent::new(0.0), FixedLenAgent::new(1.0));
        assert!(long.episode_len() > short.episode_len());
        Ok(())
    }

    #[test]
    fn test_seeded_population_has_seeded_lengths() {
        let lens = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..10)
                .map(|_| <FixedLenAgent as Agent<DummyEnv>>::random(&4.0, &mut rng))
                .map(|agent| agent.episode_len())
                .collect::<Vec<_>>()
        };
        assert_eq!(lens(1), lens(1));
        assert_ne!(lens(1), lens(2));
    }
}
