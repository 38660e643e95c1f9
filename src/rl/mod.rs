//! Reinforcement learning environment over the remote snake engine
//!
//! Provides:
//! - `SnakeEnv`, the gym-style `reset` / `step` / `render` wrapper
//! - Local (feature vector, relative turns) and global (bitmap, absolute
//!   directions) observation strategies
//! - Environment configuration and action codes
//! - Tensor conversion of observations

pub mod action;
pub mod agent;
pub mod backend;
pub mod config;
pub mod environment;
pub mod observation;
pub mod strategy;

pub use action::{Direction, RelativeTurn};
pub use agent::RandomAgent;
pub use backend::{InferenceBackend, default_device};
pub use config::{AbsoluteActionCodes, EnvConfig, RelativeActionCodes};
pub use environment::{SnakeEnv, reward_for};
pub use observation::{Bitmap, Observation, StateSize, vector_tensor};
pub use strategy::{GlobalStrategy, LocalStrategy, ObservationStrategy};
