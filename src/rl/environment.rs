use anyhow::{Context, Result};

use super::config::EnvConfig;
use super::observation::StateSize;
use super::strategy::ObservationStrategy;
use crate::remote::{GatewayClient, RemoteBoard, RemoteEngine, SnakeHandle};
use crate::render::{BoardSnapshot, Renderer, Surface};

/// Reward when the engine reports game over after a tick
pub const DEATH_REWARD: f32 = -1.0;
/// Reward when the snake ate during a tick
pub const FOOD_REWARD: f32 = 1.0;

/// Snake environment for reinforcement learning
///
/// Wraps one board of the remote engine with one registered snake and provides
/// a gym-style interface:
/// - `reset` / `seed` start an episode and return the first observation
/// - `step` applies an action, advances one tick and returns `(observation, reward, done)`
/// - `render` draws the board when visualization is enabled
///
/// How the board is observed and how actions are sent is decided by the
/// strategy `S`.
pub struct SnakeEnv<E: RemoteEngine, S: ObservationStrategy> {
    engine: E,
    strategy: S,
    snake: SnakeHandle,
    idx: usize,
    visualize: bool,
    max_reward: f32,
    renderer: Renderer,
    state: Option<S::Observation>,
}

impl<S: ObservationStrategy> SnakeEnv<RemoteBoard, S> {
    /// Connect to the gateway from `config` and set up a fresh board
    pub fn connect(config: &EnvConfig, strategy: S) -> Result<Self> {
        let board = GatewayClient::connect(config.gateway_addr.as_str())?
            .open_board(config.grid_width, config.grid_height)?;
        Self::new(board, strategy, config)
    }
}

impl<E: RemoteEngine, S: ObservationStrategy> SnakeEnv<E, S> {
    /// Unpause the board, register a snake and remember its handle
    pub fn new(mut engine: E, strategy: S, config: &EnvConfig) -> Result<Self> {
        engine
            .set_pause(false)
            .context("Failed to unpause remote board")?;
        let idx = engine.add_snake().context("Failed to register snake")?;
        let snake = engine
            .snakes()
            .context("Failed to list snakes")?
            .get(idx)
            .copied()
            .with_context(|| format!("Engine has no snake at index {}", idx))?;
        tracing::debug!(idx, ?snake, "registered snake");

        Ok(Self {
            engine,
            strategy,
            snake,
            idx,
            visualize: config.visualize,
            max_reward: config.max_reward,
            renderer: Renderer::new(config.cell_scale, config.surface),
            state: None,
        })
    }

    /// Draw onto `surface` instead of opening the configured one
    pub fn with_surface(mut self, surface: Box<dyn Surface>) -> Self {
        self.renderer = Renderer::with_surface(self.renderer.cell_scale(), surface);
        self
    }

    /// Reseed the engine's RNG, then reset
    pub fn seed(&mut self, seed: u64) -> Result<S::Observation> {
        self.engine.reseed(seed).context("Failed to reseed engine")?;
        self.reset()
    }

    /// Reset the board, unpause it and return the first observation
    pub fn reset(&mut self) -> Result<S::Observation> {
        self.engine.reset().context("Failed to reset engine")?;
        self.engine
            .set_pause(false)
            .context("Failed to unpause remote board")?;

        let observation = self.strategy.get_state(&mut self.engine, self.idx)?;
        self.state = Some(observation.clone());
        Ok(observation)
    }

    /// Draw the current board; does nothing unless visualization is on
    pub fn render(&mut self) -> Result<()> {
        if !self.visualize {
            return Ok(());
        }

        let snapshot = self.snapshot()?;
        self.renderer.render(&snapshot)
    }

    /// Apply an action and advance the engine by one tick
    ///
    /// Returns: (observation, reward, done)
    /// - reward: -1 on death, +1 when the snake ate, 0 otherwise
    /// - done: true exactly when the engine reports game over
    pub fn step(&mut self, action: i32) -> Result<(S::Observation, f32, bool)> {
        self.strategy
            .do_action(&mut self.engine, self.idx, action)
            .with_context(|| format!("Failed to apply action {}", action))?;
        self.engine.update().context("Failed to advance engine")?;

        let observation = self.strategy.get_state(&mut self.engine, self.idx)?;
        self.state = Some(observation.clone());

        let game_over = self.engine.is_game_over()?;
        let eating = !game_over && self.engine.is_eating(self.snake)?;
        let (reward, done) = reward_for(game_over, eating);

        if self.visualize {
            if done {
                tracing::info!("dead");
            } else if eating {
                tracing::info!("nom");
            }
        }

        Ok((observation, reward, done))
    }

    /// Shape of the observations this environment returns
    pub fn state_size(&mut self) -> Result<StateSize> {
        self.strategy.state_size(&mut self.engine, self.idx)
    }

    /// Upper bound on an episode's return, for normalization
    pub fn max_reward(&self) -> f32 {
        self.max_reward
    }

    /// Action codes accepted by the active strategy
    pub fn actions(&self) -> Vec<i32> {
        self.strategy.actions()
    }

    /// Current engine score of the board
    pub fn score(&mut self) -> Result<u32> {
        self.engine.score()
    }

    /// Observation returned by the latest `reset` or `step`
    pub fn last_observation(&self) -> Option<&S::Observation> {
        self.state.as_ref()
    }

    pub fn snake_index(&self) -> usize {
        self.idx
    }

    pub fn snake_handle(&self) -> SnakeHandle {
        self.snake
    }

    pub fn is_visualized(&self) -> bool {
        self.visualize
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Access the engine directly (for testing/debugging)
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Release the render surface, if one was opened
    pub fn close(&mut self) -> Result<()> {
        self.renderer.close()
    }

    fn snapshot(&mut self) -> Result<BoardSnapshot> {
        Ok(BoardSnapshot {
            width: self.engine.width()?,
            height: self.engine.height()?,
            food: self.engine.food()?,
            head: self.engine.head(self.snake)?,
            tail: self.engine.tail(self.snake)?,
        })
    }
}

/// Reward and terminal flag for one tick; death takes precedence over eating
pub fn reward_for(game_over: bool, eating: bool) -> (f32, bool) {
    if game_over {
        (DEATH_REWARD, true)
    } else if eating {
        (FOOD_REWARD, false)
    } else {
        (0.0, false)
    }
}
