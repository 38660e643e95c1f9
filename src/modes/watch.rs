//! Watch a random agent play in the terminal
//!
//! # Controls
//!
//! - Space/P: Pause/unpause
//! - R: Reset episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc/Ctrl+C: Quit
//!
//! Keys are read from the terminal in raw mode, which is only on while `run`
//! is active.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::block_in_place;
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::input::{InputHandler, KeyAction, Speed};
use crate::metrics::EpisodeStats;
use crate::remote::RemoteEngine;
use crate::rl::{ObservationStrategy, RandomAgent, SnakeEnv};

pub struct WatchMode<E: RemoteEngine, S: ObservationStrategy> {
    env: SnakeEnv<E, S>,
    agent: RandomAgent,
    input_handler: InputHandler,
    stats: EpisodeStats,
    speed: Speed,
    /// Stop after this many finished episodes; 0 runs until quit
    max_episodes: usize,
    episode_return: f32,
    episode_steps: usize,
    paused: bool,
    should_quit: bool,
}

impl<E: RemoteEngine, S: ObservationStrategy> WatchMode<E, S> {
    pub fn new(env: SnakeEnv<E, S>, agent_seed: u64, max_episodes: usize) -> Self {
        let agent = RandomAgent::new(env.actions(), agent_seed);
        Self {
            env,
            agent,
            input_handler: InputHandler::new(),
            stats: EpisodeStats::new(100),
            speed: Speed::Normal,
            max_episodes,
            episode_return: 0.0,
            episode_steps: 0,
            paused: false,
            should_quit: false,
        }
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Run until quit or until enough episodes finished.
    ///
    /// The terminal and the render surface are restored before returning, also
    /// on error. If the loop failed, its error is returned and cleanup failures
    /// are only logged.
    pub async fn run(&mut self, seed: Option<u64>) -> Result<EpisodeStats> {
        if !self.env.is_visualized() {
            anyhow::bail!("watch mode needs an environment created with visualize = true");
        }

        enable_raw_mode().context("Failed to enable raw mode")?;
        let result = self.run_loop(seed).await;
        let raw_mode = disable_raw_mode().context("Failed to disable raw mode");
        let surface = self.env.close().context("Failed to close render surface");

        match result {
            Ok(()) => {
                raw_mode?;
                surface?;
                Ok(self.stats.clone())
            }
            Err(err) => {
                for cleanup in [raw_mode, surface] {
                    if let Err(cleanup_err) = cleanup {
                        tracing::warn!("{:#}", cleanup_err);
                    }
                }
                Err(err)
            }
        }
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    async fn run_loop(&mut self, seed: Option<u64>) -> Result<()> {
        match seed {
            Some(seed) => self.env.seed(seed)?,
            None => self.env.reset()?,
        };
        self.env.render()?;

        let mut event_stream = EventStream::new();
        let mut tick_timer = Self::timer(self.speed);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer)?;
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance_blocking()?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::TogglePause => self.paused = !self.paused,
                KeyAction::SetSpeed(speed) => {
                    self.speed = speed;
                    *tick_timer = Self::timer(speed);
                }
                KeyAction::Restart => {
                    self.start_episode()?;
                }
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// `advance` does blocking gateway round trips. On a multi-threaded runtime
    /// the worker hands its other tasks off meanwhile; keys pressed during a
    /// step are buffered and handled once it returns.
    fn advance_blocking(&mut self) -> Result<()> {
        match Handle::try_current().map(|handle| handle.runtime_flavor()) {
            Ok(RuntimeFlavor::MultiThread) => block_in_place(|| self.advance()),
            _ => self.advance(),
        }
    }

    /// One environment step plus redraw
    fn advance(&mut self) -> Result<()> {
        let Some(action) = self.agent.act() else {
            self.should_quit = true;
            return Ok(());
        };

        let (_observation, reward, done) = self.env.step(action)?;
        self.episode_return += reward;
        self.episode_steps += 1;

        if done {
            let score = self.env.score()?;
            self.stats
                .record_episode(self.episode_return, self.episode_steps, score);
            tracing::info!("{}", self.stats.format_summary());

            if self.max_episodes > 0 && self.stats.total_episodes() >= self.max_episodes {
                self.should_quit = true;
                return Ok(());
            }
            self.start_episode()?;
            return Ok(());
        }

        self.env.render()
    }

    fn start_episode(&mut self) -> Result<()> {
        self.env.reset()?;
        self.episode_return = 0.0;
        self.episode_steps = 0;
        self.env.render()
    }

    fn timer(speed: Speed) -> Interval {
        let mut timer = interval(Duration::from_millis(speed.tick_ms()));
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }
}
