use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use neuroevo::{
    neuroevo_cartpole_env::{CartPoleConfig, CartPoleEnv},
    neuroevo_core::{record::NullRecorder, Env as _, Evolution, EvolutionConfig},
    neuroevo_policy_no_backend::{MlpAgent, MlpConfig},
    replay,
};
use rand::{rngs::SmallRng, SeedableRng};
use std::path::{Path, PathBuf};

const HIDDEN_DIM: usize = 128;
const POPULATION_SIZE: usize = 500;
const TOP_LIMIT: usize = 20;
const N_REPLAYS: usize = 1;
const WAIT_IN_MILLIS: u64 = 20;
const MODEL_PATH: &str = "./fully_trained.bincode";

type Evo = Evolution<CartPoleEnv, MlpAgent>;

/// Evolve MLP agents in the cart-pole environment with a genetic algorithm
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Train for some generations, save the elite, then replay it
    Train {
        /// Number of generations
        #[arg(short, long)]
        generations: usize,

        /// YAML file of the evolution configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Where to save the elite
        #[arg(short, long, default_value = MODEL_PATH)]
        model: PathBuf,

        /// Random seed, overrides the configuration file
        #[arg(short, long)]
        seed: Option<u64>,

        /// Render replays
        #[arg(short, long, default_value_t = false)]
        render: bool,
    },

    /// Load a saved agent and replay it
    Play {
        /// The saved agent
        #[arg(short, long, default_value = MODEL_PATH)]
        model: PathBuf,

        /// Render replays
        #[arg(short, long, default_value_t = false)]
        render: bool,
    },
}

fn env_config(render: bool) -> CartPoleConfig {
    let config = CartPoleConfig::default();
    match render {
        true => config.render(true).wait_in_millis(WAIT_IN_MILLIS),
        false => config,
    }
}

fn evolution_config(
    config: Option<&Path>,
    generations: usize,
    seed: Option<u64>,
) -> Result<EvolutionConfig> {
    let config = match config {
        Some(path) => EvolutionConfig::load(path)?,
        None => EvolutionConfig::default()
            .population_size(POPULATION_SIZE)
            .top_limit(TOP_LIMIT),
    };
    let config = config.n_generations(generations);
    Ok(match seed {
        Some(seed) => config.seed(seed),
        None => config,
    })
}

fn train(config: EvolutionConfig, model: &Path) -> Result<()> {
    let env_config = env_config(false);
    let agent_config = {
        let env = CartPoleEnv::build(&env_config, 0)?;
        MlpConfig::new(env.obs_dim(), HIDDEN_DIM, env.n_actions())
    };
    let evolution = Evo::build(config, env_config, agent_config)?;
    let result = evolution.run(&mut NullRecorder::default())?;

    match result.elite_index {
        Some(ix) => info!("Elite index: {}", ix),
        None => info!("No elite was confirmed, saving agent 0"),
    }
    result.best().save(model)?;
    Ok(())
}

fn play(model: &Path, render: bool, seed: u64) -> Result<Vec<f32>> {
    let agent = MlpAgent::load(model)?;
    let env = CartPoleEnv::build(&env_config(render), seed as i64)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    replay(env, &agent, N_REPLAYS, &mut rng)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.mode {
        Mode::Train {
            generations,
            config,
            model,
            seed,
            render,
        } => {
            let config = evolution_config(config.as_deref(), generations, seed)?;
            let seed = config.seed;
            train(config, &model)?;
            play(&model, render, seed)?;
        }
        Mode::Play { model, render } => {
            play(&model, render, EvolutionConfig::default().seed)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_ga_cartpole() -> Result<()> {
        let tmp_dir = TempDir::new("ga_cartpole")?;
        let model = tmp_dir.path().join("agent.bincode");
        let config = EvolutionConfig::default()
            .population_size(10)
            .top_limit(4)
            .n_generations(2);

        train(config, &model)?;
        let returns = play(&model, false, 0)?;
        assert_eq!(returns.len(), N_REPLAYS);
        assert!(returns.iter().all(|&r| (1.0..=200.0).contains(&r)));
        Ok(())
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["ga_cartpole", "train", "--generations", "5", "--seed", "3"]);
        match args.mode {
            Mode::Train {
                generations, seed, ..
            } => {
                assert_eq!(generations, 5);
                assert_eq!(seed, Some(3));
            }
            _ => panic!("expected train mode"),
        }
        assert!(Args::try_parse_from(["ga_cartpole", "train"]).is_err());
    }
}
