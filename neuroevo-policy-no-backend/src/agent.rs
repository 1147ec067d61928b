use crate::{Mlp, MlpConfig};
use anyhow::Result;
use log::info;
use neuroevo_core::{util::sample_action_index, Agent, Env, Policy};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Evolvable policy network.
///
/// Works with any environment whose observations are `f32` slices and whose
/// actions are built from an action index.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MlpAgent {
    mlp: Mlp,
}

impl MlpAgent {
    /// Creates an agent with Xavier-uniform weights and zero biases.
    pub fn random<R: Rng + ?Sized>(config: &MlpConfig, rng: &mut R) -> Self {
        Self {
            mlp: Mlp::xavier(config, rng),
        }
    }

    /// Returns a mutated copy of the agent; `self` is left untouched.
    pub fn mutate<R: Rng + ?Sized>(&self, power: f32, rng: &mut R) -> Self {
        Self {
            mlp: self.mlp.perturbed(power, rng),
        }
    }

    /// The underlying network.
    pub fn mlp(&self) -> &Mlp {
        &self.mlp
    }

    /// Action probabilities for an observation.
    pub fn forward(&self, obs: &[f32]) -> Result<Vec<f32>> {
        Ok(self.mlp.forward(obs)?)
    }

    /// Saves the agent with bincode.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut file, self)?;
        file.flush()?;
        info!("Saved the agent in {:?}", path);
        Ok(())
    }

    /// Loads an agent saved with [`MlpAgent::save`].
    ///
    /// Fails if the layers in the file do not agree with the network
    /// configuration stored next to them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rdr = BufReader::new(File::open(path)?);
        let agent: Self = bincode::deserialize_from(rdr)?;
        agent.mlp.validate()?;
        info!("Loaded the agent from {:?}", path);
        Ok(agent)
    }
}

impl<E> Policy<E> for MlpAgent
where
    E: Env,
    E::Obs: AsRef<[f32]>,
    E::Act: From<usize>,
{
    fn sample<R: Rng + ?Sized>(&self, obs: &E::Obs, rng: &mut R) -> Result<E::Act> {
        let probs = self.forward(obs.as_ref())?;
        Ok(sample_action_index(&probs, rng)?.into())
    }
}

impl<E> Agent<E> for MlpAgent
where
    E: Env,
    E::Obs: AsRef<[f32]>,
    E::Act: From<usize>,
{
    type Config = MlpConfig;

    fn random<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self {
        MlpAgent::random(config, rng)
    }

    fn mutate<R: Rng + ?Sized>(&self, power: f32, rng: &mut R) -> Self {
        MlpAgent::mutate(self, power, rng)
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        self.save(path)
    }

    fn load_params(path: &Path) -> Result<Self> {
        Self::load(path)
    }
}
