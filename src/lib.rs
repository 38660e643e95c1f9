//! Snake Gym - a reinforcement learning environment for a remote snake engine
//!
//! The game rules run in an external process reached through a gateway. This
//! library provides:
//! - The remote call surface and a blocking gateway client (remote module)
//! - The gym-style environment with local and global observations (rl module)
//! - Flat-color board rendering (render module)
//! - Episode statistics, keyboard input and the CLI modes

pub mod input;
pub mod metrics;
pub mod modes;
pub mod remote;
pub mod render;
pub mod rl;
