use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Configuration of [`CartPoleEnv`](super::CartPoleEnv).
pub struct CartPoleConfig {
    pub(super) max_episode_steps: Option<usize>,
    pub(super) render: bool,
    pub(super) wait_in_millis: u64,
}

impl Default for CartPoleConfig {
    /// Settings of `CartPole-v0`: episodes are truncated at 200 steps.
    fn default() -> Self {
        Self {
            max_episode_steps: Some(200),
            render: false,
            wait_in_millis: 0,
        }
    }
}

impl CartPoleConfig {
    /// Sets the step at which episodes are truncated, `None` for no limit.
    pub fn max_episode_steps(mut self, v: Option<usize>) -> Self {
        self.max_episode_steps = v;
        self
    }

    /// Renders the track at every step when `true`.
    pub fn render(mut self, v: bool) -> Self {
        self.render = v;
        self
    }

    /// Sets the wait between rendered steps.
    pub fn wait_in_millis(mut self, v: u64) -> Self {
        self.wait_in_millis = v;
        self
    }
}
