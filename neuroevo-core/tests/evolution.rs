use anyhow::Result;
use neuroevo_core::{
    dummy::{DummyAgent, DummyEnv, DummyEnvConfig, FixedLenAgent, FIXED_LEN_MAX},
    record::{BufferedRecorder, NullRecorder},
    util::mean,
    Evolution, EvolutionConfig,
};

type DummyEvolution = Evolution<DummyEnv, DummyAgent>;

/// Every agent plays a fixed number of steps, so scores carry no noise.
type FixedLenEvolution = Evolution<DummyEnv, FixedLenAgent>;

const INIT_LOGIT_RANGE: f32 = 4.0;

fn env_config() -> DummyEnvConfig {
    DummyEnvConfig::default().max_len(50)
}

#[test]
fn test_small_run_completes() -> Result<()> {
    let config = EvolutionConfig::default()
        .population_size(10)
        .top_limit(4)
        .mutation_power(0.02)
        .n_generations(3);
    let evolution = FixedLenEvolution::build(config, env_config(), INIT_LOGIT_RANGE)?;
    let mut recorder = BufferedRecorder::new();
    let result = evolution.run(&mut recorder)?;

    assert_eq!(result.population.len(), 10);
    let elite_index = result.elite_index.unwrap();
    assert!(elite_index < result.population.len());
    assert_eq!(recorder.len(), 3);
    for record in recorder.iter() {
        let scores = record.get_array1("parent_scores")?;
        assert!(scores
            .iter()
            .all(|&s| s.fract() == 0.0 && (1.0..=FIXED_LEN_MAX as f32).contains(&s)));
    }

    // The elite is carried unchanged and replays its exact length.
    let elite = result.best();
    let last_elite_score = recorder.iter().last().unwrap().get_scalar("elite_score")?;
    assert_eq!(last_elite_score, elite.episode_len() as f32);
    Ok(())
}

#[test]
fn test_top_scores_improve_on_average() -> Result<()> {
    let n_runs = 20;
    let mut first = Vec::new();
    let mut last = Vec::new();

    for seed in 0..n_runs {
        let config = EvolutionConfig::default()
            .population_size(10)
            .top_limit(4)
            .mutation_power(0.02)
            .n_generations(3)
            .seed(seed);
        let evolution = FixedLenEvolution::build(config, env_config(), INIT_LOGIT_RANGE)?;
        let mut recorder = BufferedRecorder::new();
        evolution.run(&mut recorder)?;

        let top5: Vec<f32> = recorder
            .iter()
            .map(|r| r.get_scalar("mean_top5"))
            .collect::<Result<_, _>>()?;
        first.push(top5[0]);
        last.push(top5[top5.len() - 1]);
    }

    let (first, last) = (mean(&first), mean(&last));
    assert!(last >= first, "mean top-5: first {}, last {}", first, last);
    Ok(())
}

#[test]
fn test_population_size_is_preserved() -> Result<()> {
    for population_size in 1..=6 {
        for top_limit in 1..=population_size {
            let config = EvolutionConfig::default()
                .population_size(population_size)
                .top_limit(top_limit)
                .n_generations(2)
                .seed((population_size * 10 + top_limit) as u64);
            let evolution = DummyEvolution::build(config, env_config(), INIT_LOGIT_RANGE)?;
            let result = evolution.run(&mut NullRecorder::default())?;

            assert_eq!(result.population.len(), population_size);
            if let Some(ix) = result.elite_index {
                assert!(ix < population_size);
            }
        }
    }
    Ok(())
}

#[test]
fn test_single_agent_population() -> Result<()> {
    let config = EvolutionConfig::default()
        .population_size(1)
        .top_limit(1)
        .n_generations(3);
    let evolution = DummyEvolution::build(config, env_config(), INIT_LOGIT_RANGE)?;
    let result = evolution.run(&mut NullRecorder::default())?;

    // Every episode pays at least one step, so the lone agent is always the elite.
    assert_eq!(result.population.len(), 1);
    assert_eq!(result.elite_index, Some(0));
    Ok(())
}

#[test]
fn test_environment_failure_aborts_the_run() {
    let config = EvolutionConfig::default()
        .population_size(4)
        .top_limit(2)
        .n_generations(2);
    let evolution =
        DummyEvolution::build(config, env_config().fail_on_reset(true), INIT_LOGIT_RANGE).unwrap();
    let mut recorder = BufferedRecorder::new();
    assert!(evolution.run(&mut recorder).is_err());
    assert!(recorder.is_empty());
}
