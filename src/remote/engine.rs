use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A cell on the remote board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Opaque identifier of a board living in the remote engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub String);

/// Opaque reference to one snake entity held by the remote engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnakeHandle(pub u64);

/// Call surface of one remote game board.
///
/// Every method is a blocking round trip; implementations hold no copy of the
/// game state. Action codes are forwarded untouched, their meaning is decided
/// by the engine.
pub trait RemoteEngine {
    fn set_pause(&mut self, paused: bool) -> Result<()>;

    fn is_paused(&mut self) -> Result<bool>;

    /// Register a new snake and return its index
    fn add_snake(&mut self) -> Result<usize>;

    /// All snakes on the board, ordered by index
    fn snakes(&mut self) -> Result<Vec<SnakeHandle>>;

    fn reseed(&mut self, seed: u64) -> Result<()>;

    fn reset(&mut self) -> Result<()>;

    fn width(&mut self) -> Result<usize>;

    fn height(&mut self) -> Result<usize>;

    fn food(&mut self) -> Result<Coordinate>;

    fn score(&mut self) -> Result<u32>;

    fn head(&mut self, snake: SnakeHandle) -> Result<Coordinate>;

    /// Body segments, head-adjacent first
    fn tail(&mut self, snake: SnakeHandle) -> Result<Vec<Coordinate>>;

    /// Advance the simulation by one tick
    fn update(&mut self) -> Result<()>;

    fn is_game_over(&mut self) -> Result<bool>;

    fn is_eating(&mut self, snake: SnakeHandle) -> Result<bool>;

    fn training_state(&mut self, idx: usize) -> Result<Vec<f32>>;

    /// Three channel bitmap indexed as `[x][y][channel]`
    fn training_bitmap(&mut self, idx: usize) -> Result<Vec<Vec<Vec<f32>>>>;

    fn turn_relative(&mut self, idx: usize, action: i32) -> Result<()>;

    fn turn_absolute(&mut self, idx: usize, action: i32) -> Result<()>;
}

impl<E: RemoteEngine + ?Sized> RemoteEngine for Box<E> {
    fn set_pause(&mut self, paused: bool) -> Result<()> {
        (**self).set_pause(paused)
    }

    fn is_paused(&mut self) -> Result<bool> {
        (**self).is_paused()
    }

    fn add_snake(&mut self) -> Result<usize> {
        (**self).add_snake()
    }

    fn snakes(&mut self) -> Result<Vec<SnakeHandle>> {
        (**self).snakes()
    }

    fn reseed(&mut self, seed: u64) -> Result<()> {
        (**self).reseed(seed)
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn width(&mut self) -> Result<usize> {
        (**self).width()
    }

    fn height(&mut self) -> Result<usize> {
        (**self).height()
    }

    fn food(&mut self) -> Result<Coordinate> {
        (**self).food()
    }

    fn score(&mut self) -> Result<u32> {
        (**self).score()
    }

    fn head(&mut self, snake: SnakeHandle) -> Result<Coordinate> {
        (**self).head(snake)
    }

    fn tail(&mut self, snake: SnakeHandle) -> Result<Vec<Coordinate>> {
        (**self).tail(snake)
    }

    fn update(&mut self) -> Result<()> {
        (**self).update()
    }

    fn is_game_over(&mut self) -> Result<bool> {
        (**self).is_game_over()
    }

    fn is_eating(&mut self, snake: SnakeHandle) -> Result<bool> {
        (**self).is_eating(snake)
    }

    fn training_state(&mut self, idx: usize) -> Result<Vec<f32>> {
        (**self).training_state(idx)
    }

    fn training_bitmap(&mut self, idx: usize) -> Result<Vec<Vec<Vec<f32>>>> {
        (**self).training_bitmap(idx)
    }

    fn turn_relative(&mut self, idx: usize, action: i32) -> Result<()> {
        (**self).turn_relative(idx, action)
    }

    fn turn_absolute(&mut self, idx: usize, action: i32) -> Result<()> {
        (**self).turn_absolute(idx, action)
    }
}
