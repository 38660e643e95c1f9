//! Deterministic stand-in for the remote engine.
//!
//! It knows no rules: tick outcomes come from a script, features from a seeded
//! RNG, so environment behavior can be checked call by call.

#![allow(dead_code)]

use anyhow::{Result, bail};
use rand::{Rng, SeedableRng, rngs::StdRng};
use snake_gym::remote::{Coordinate, RemoteEngine, SnakeHandle};
use std::collections::VecDeque;

pub const FEATURES: usize = 11;

pub struct ScriptedEngine {
    pub width: usize,
    pub height: usize,
    pub paused: bool,
    pub game_over: bool,
    pub eating: bool,
    pub score: u32,
    pub ticks: usize,
    pub head: Coordinate,
    pub tail: Vec<Coordinate>,
    pub food: Coordinate,
    /// `(game_over, eating)` for upcoming ticks; quiet ticks once empty
    pub outcomes: VecDeque<(bool, bool)>,
    /// Pretend the registered snake is missing from `snakes()`
    pub hide_snakes: bool,
    pub calls: Vec<&'static str>,
    pub relative_turns: Vec<i32>,
    pub absolute_turns: Vec<i32>,
    snakes: Vec<SnakeHandle>,
    seed: u64,
    rng: StdRng,
    features: Vec<f32>,
}

impl ScriptedEngine {
    pub fn new(width: usize, height: usize) -> Self {
        let mut engine = Self {
            width,
            height,
            paused: true,
            game_over: false,
            eating: false,
            score: 0,
            ticks: 0,
            head: Coordinate::new(0, 0),
            tail: Vec::new(),
            food: Coordinate::new(0, 0),
            outcomes: VecDeque::new(),
            hide_snakes: false,
            calls: Vec::new(),
            relative_turns: Vec::new(),
            absolute_turns: Vec::new(),
            snakes: Vec::new(),
            seed: 0,
            rng: StdRng::seed_from_u64(0),
            features: Vec::new(),
        };
        engine.restart();
        engine.paused = true;
        engine
    }

    pub fn with_outcomes(mut self, outcomes: &[(bool, bool)]) -> Self {
        self.outcomes = outcomes.iter().copied().collect();
        self
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    fn restart(&mut self) {
        self.game_over = false;
        self.eating = false;
        self.score = 0;
        self.ticks = 0;
        self.rng = StdRng::seed_from_u64(self.seed);
        self.head = Coordinate::new(self.width as i32 / 2, self.height as i32 / 2);
        self.tail = vec![
            Coordinate::new(self.head.x - 1, self.head.y),
            Coordinate::new(self.head.x - 2, self.head.y),
        ];
        self.food = Coordinate::new(
            self.rng.gen_range(0..self.width as i32),
            self.rng.gen_range(0..self.height as i32),
        );
        self.refresh_features();
    }

    fn refresh_features(&mut self) {
        self.features = (0..FEATURES).map(|_| self.rng.gen_range(0.0f32..1.0)).collect();
    }
}

impl RemoteEngine for ScriptedEngine {
    fn set_pause(&mut self, paused: bool) -> Result<()> {
        self.calls.push("set_pause");
        self.paused = paused;
        Ok(())
    }

    fn is_paused(&mut self) -> Result<bool> {
        self.calls.push("is_paused");
        Ok(self.paused)
    }

    fn add_snake(&mut self) -> Result<usize> {
        self.calls.push("add_snake");
        self.snakes.push(SnakeHandle(100 + self.snakes.len() as u64));
        Ok(self.snakes.len() - 1)
    }

    fn snakes(&mut self) -> Result<Vec<SnakeHandle>> {
        self.calls.push("get_snakes");
        if self.hide_snakes {
            return Ok(Vec::new());
        }
        Ok(self.snakes.clone())
    }

    fn reseed(&mut self, seed: u64) -> Result<()> {
        self.calls.push("reseed");
        self.seed = seed;
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.calls.push("reset");
        self.restart();
        self.paused = true;
        Ok(())
    }

    fn width(&mut self) -> Result<usize> {
        self.calls.push("get_width");
        Ok(self.width)
    }

    fn height(&mut self) -> Result<usize> {
        self.calls.push("get_height");
        Ok(self.height)
    }

    fn food(&mut self) -> Result<Coordinate> {
        self.calls.push("get_food");
        Ok(self.food)
    }

    fn score(&mut self) -> Result<u32> {
        self.calls.push("get_score");
        Ok(self.score)
    }

    fn head(&mut self, snake: SnakeHandle) -> Result<Coordinate> {
        self.calls.push("get_head");
        if !self.snakes.contains(&snake) {
            bail!("unknown snake {:?}", snake);
        }
        Ok(self.head)
    }

    fn tail(&mut self, snake: SnakeHandle) -> Result<Vec<Coordinate>> {
        self.calls.push("get_tail_as_list");
        if !self.snakes.contains(&snake) {
            bail!("unknown snake {:?}", snake);
        }
        Ok(self.tail.clone())
    }

    fn update(&mut self) -> Result<()> {
        self.calls.push("update");
        if self.paused || self.game_over {
            return Ok(());
        }

        self.ticks += 1;
        let (game_over, eating) = self.outcomes.pop_front().unwrap_or((false, false));
        self.game_over = game_over;
        self.eating = eating;
        if eating {
            self.score += 1;
        }

        self.tail.insert(0, self.head);
        self.tail.pop();
        self.head = Coordinate::new(self.head.x + 1, self.head.y);
        self.refresh_features();
        Ok(())
    }

    fn is_game_over(&mut self) -> Result<bool> {
        self.calls.push("is_game_over");
        Ok(self.game_over)
    }

    fn is_eating(&mut self, snake: SnakeHandle) -> Result<bool> {
        self.calls.push("is_eating");
        if !self.snakes.contains(&snake) {
            bail!("unknown snake {:?}", snake);
        }
        Ok(self.eating)
    }

    fn training_state(&mut self, _idx: usize) -> Result<Vec<f32>> {
        self.calls.push("training_state");
        Ok(self.features.clone())
    }

    fn training_bitmap(&mut self, _idx: usize) -> Result<Vec<Vec<Vec<f32>>>> {
        self.calls.push("training_bitmap");
        let mut columns = vec![vec![vec![0.0; 3]; self.height]; self.width];
        let mut mark = |cell: Coordinate, channel: usize| {
            if cell.x >= 0 && cell.y >= 0 {
                if let Some(column) = columns.get_mut(cell.x as usize) {
                    if let Some(values) = column.get_mut(cell.y as usize) {
                        values[channel] = 1.0;
                    }
                }
            }
        };
        mark(self.head, 0);
        for &segment in &self.tail {
            mark(segment, 1);
        }
        mark(self.food, 2);
        Ok(columns)
    }

    fn turn_relative(&mut self, _idx: usize, action: i32) -> Result<()> {
        self.calls.push("turn_relative");
        self.relative_turns.push(action);
        Ok(())
    }

    fn turn_absolute(&mut self, _idx: usize, action: i32) -> Result<()> {
        self.calls.push("turn_absolute");
        self.absolute_turns.push(action);
        Ok(())
    }
}
