//! Headless rollouts with a random agent
//!
//! Runs a number of episodes against the engine without rendering and
//! collects episode statistics. Useful as a smoke test of a gateway and as a
//! baseline for trained agents.

use anyhow::Result;

use crate::metrics::EpisodeStats;
use crate::remote::RemoteEngine;
use crate::rl::{ObservationStrategy, RandomAgent, SnakeEnv};

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Number of episodes to play
    pub episodes: usize,
    /// Engine seed applied before the first episode
    pub seed: Option<u64>,
    /// Seed of the random agent
    pub agent_seed: u64,
    /// Episodes longer than this are cut off
    pub max_steps: usize,
    /// Log a summary every N episodes
    pub log_frequency: usize,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            seed: None,
            agent_seed: 0,
            max_steps: 10_000,
            log_frequency: 10,
        }
    }
}

pub struct RolloutMode<E: RemoteEngine, S: ObservationStrategy> {
    env: SnakeEnv<E, S>,
    agent: RandomAgent,
    stats: EpisodeStats,
    config: RolloutConfig,
}

impl<E: RemoteEngine, S: ObservationStrategy> RolloutMode<E, S> {
    pub fn new(env: SnakeEnv<E, S>, config: RolloutConfig) -> Self {
        let agent = RandomAgent::new(env.actions(), config.agent_seed);
        Self {
            env,
            agent,
            stats: EpisodeStats::new(100),
            config,
        }
    }

    /// Play all configured episodes and return the collected statistics
    pub fn run(&mut self) -> Result<&EpisodeStats> {
        for episode in 0..self.config.episodes {
            match (episode, self.config.seed) {
                (0, Some(seed)) => self.env.seed(seed)?,
                _ => self.env.reset()?,
            };

            let (episode_return, length, truncated) = self.run_episode()?;
            let score = self.env.score()?;
            self.stats.record_episode(episode_return, length, score);

            tracing::debug!(episode, episode_return, length, score, truncated, "episode finished");
            if self.config.log_frequency > 0 && (episode + 1) % self.config.log_frequency == 0 {
                tracing::info!("{}", self.stats.format_summary());
            }
        }

        Ok(&self.stats)
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn env_mut(&mut self) -> &mut SnakeEnv<E, S> {
        &mut self.env
    }

    /// Returns: (episode return, steps taken, whether the step cap was hit)
    fn run_episode(&mut self) -> Result<(f32, usize, bool)> {
        let mut episode_return = 0.0;
        let mut steps = 0;

        while steps < self.config.max_steps {
            let Some(action) = self.agent.act() else {
                break;
            };
            let (_observation, reward, done) = self.env.step(action)?;
            episode_return += reward;
            steps += 1;

            if done {
                return Ok((episode_return, steps, false));
            }
        }

        Ok((episode_return, steps, true))
    }
}
