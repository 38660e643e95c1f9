//! Client side of the remote snake engine
//!
//! The game rules live in an external process. This module provides:
//! - The call surface the environment needs from that process (`RemoteEngine`)
//! - Wire messages and a JSON line codec for the gateway protocol
//! - A blocking TCP client implementing `RemoteEngine` against a live gateway

pub mod client;
pub mod codec;
pub mod engine;
pub mod error;
pub mod messages;

pub use client::{GatewayClient, RemoteBoard};
pub use engine::{BoardId, Coordinate, RemoteEngine, SnakeHandle};
pub use error::GatewayError;
