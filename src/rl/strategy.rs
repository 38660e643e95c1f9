//! Observation strategies
//!
//! A strategy decides how the environment observes the board and how an agent's
//! action reaches the engine. The environment lifecycle is shared; only these
//! three operations differ between the variants.

use anyhow::{Context, Result};

use super::action::{Direction, RelativeTurn};
use super::config::{AbsoluteActionCodes, RelativeActionCodes};
use super::observation::{Bitmap, Observation, StateSize};
use crate::remote::RemoteEngine;

pub trait ObservationStrategy {
    type Observation: Observation;

    /// Query the engine for the current observation of snake `idx`
    fn get_state<E: RemoteEngine>(&self, engine: &mut E, idx: usize) -> Result<Self::Observation>;

    /// Shape of the observations `get_state` returns
    fn state_size<E: RemoteEngine>(&self, engine: &mut E, idx: usize) -> Result<StateSize>;

    /// Forward an action code for snake `idx`, unvalidated
    fn do_action<E: RemoteEngine>(&self, engine: &mut E, idx: usize, action: i32) -> Result<()>;

    /// Action codes an agent may pick from
    fn actions(&self) -> Vec<i32>;
}

/// Compact per-snake feature vector with turns relative to the heading
#[derive(Debug, Clone, Default)]
pub struct LocalStrategy {
    codes: RelativeActionCodes,
}

impl LocalStrategy {
    pub fn new(codes: RelativeActionCodes) -> Self {
        Self { codes }
    }

    pub fn code(&self, turn: RelativeTurn) -> i32 {
        turn.code(&self.codes)
    }
}

impl ObservationStrategy for LocalStrategy {
    type Observation = Vec<f32>;

    fn get_state<E: RemoteEngine>(&self, engine: &mut E, idx: usize) -> Result<Vec<f32>> {
        engine
            .training_state(idx)
            .context("Failed to fetch training state")
    }

    fn state_size<E: RemoteEngine>(&self, engine: &mut E, idx: usize) -> Result<StateSize> {
        Ok(self.get_state(engine, idx)?.state_size())
    }

    fn do_action<E: RemoteEngine>(&self, engine: &mut E, idx: usize, action: i32) -> Result<()> {
        engine.turn_relative(idx, action)
    }

    fn actions(&self) -> Vec<i32> {
        RelativeTurn::ALL.iter().map(|t| self.code(*t)).collect()
    }
}

/// Full-board bitmap with board-absolute directions
#[derive(Debug, Clone, Default)]
pub struct GlobalStrategy {
    codes: AbsoluteActionCodes,
}

impl GlobalStrategy {
    pub fn new(codes: AbsoluteActionCodes) -> Self {
        Self { codes }
    }

    pub fn code(&self, direction: Direction) -> i32 {
        direction.code(&self.codes)
    }
}

impl ObservationStrategy for GlobalStrategy {
    type Observation = Bitmap;

    fn get_state<E: RemoteEngine>(&self, engine: &mut E, idx: usize) -> Result<Bitmap> {
        let columns = engine
            .training_bitmap(idx)
            .context("Failed to fetch training bitmap")?;
        Ok(Bitmap::from_columns(columns)?)
    }

    fn state_size<E: RemoteEngine>(&self, engine: &mut E, _idx: usize) -> Result<StateSize> {
        Ok(StateSize::Grid {
            width: engine.width()?,
            height: engine.height()?,
            channels: Bitmap::CHANNELS,
        })
    }

    fn do_action<E: RemoteEngine>(&self, engine: &mut E, idx: usize, action: i32) -> Result<()> {
        engine.turn_absolute(idx, action)
    }

    fn actions(&self) -> Vec<i32> {
        Direction::ALL.iter().map(|d| self.code(*d)).collect()
    }
}
