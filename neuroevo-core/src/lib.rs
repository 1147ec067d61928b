#![warn(missing_docs)]
//! Neuroevolution of policy networks with a genetic algorithm.
//!
//! A population of [`Agent`]s is scored by an [`Evaluator`] against an [`Env`],
//! ranked by the [`selector`], and replaced every generation by mutated children
//! of the best agents, plus one re-validated elite. [`Evolution`] drives the loop.
pub mod dummy;
pub mod error;
pub mod record;
pub mod selector;
pub mod util;

mod base;
pub use base::{Act, Agent, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod elite;
pub use elite::{Elite, EliteSelector};

mod reproducer;
pub use reproducer::{Offspring, Reproducer};

mod evolution;
pub use evolution::{Evolution, EvolutionConfig, EvolutionResult, Generation};
