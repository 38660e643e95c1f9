//! Blocking TCP client for the engine gateway
//!
//! Each call writes one request line and waits for the matching reply line.
//! There is no pipelining, no timeout and no retry: a stalled gateway stalls
//! the caller, and every failure is returned to it.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};

use super::codec::{decode_reply, encode_request};
use super::engine::{BoardId, Coordinate, RemoteEngine, SnakeHandle};
use super::error::GatewayError;
use super::messages::Call;

/// Connection to a gateway, before a board has been requested
pub struct GatewayClient {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    next_id: u64,
}

impl GatewayClient {
    /// Open a connection to the gateway listening at `addr`
    pub fn connect<A: ToSocketAddrs + std::fmt::Debug>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(&addr)
            .with_context(|| format!("Failed to connect to game gateway at {:?}", addr))?;
        stream
            .set_nodelay(true)
            .context("Failed to configure gateway socket")?;

        let client = Self::from_stream(stream)?;
        tracing::info!(?addr, "connected to game gateway");
        Ok(client)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let writer = stream
            .try_clone()
            .context("Failed to clone gateway socket")?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
            next_id: 1,
        })
    }

    /// Perform one blocking round trip and decode the payload as `T`
    pub fn call<T: DeserializeOwned>(&mut self, call: Call) -> Result<T> {
        let id = self.next_id;
        self.next_id += 1;
        let name = call.name();

        let line = encode_request(id, call).context("Failed to encode gateway request")?;
        self.writer
            .write_all(&line)
            .and_then(|_| self.writer.flush())
            .with_context(|| format!("Failed to send `{}` to gateway", name))?;

        let mut reply = String::new();
        let read = self
            .reader
            .read_line(&mut reply)
            .with_context(|| format!("Failed to read reply to `{}`", name))?;
        if read == 0 {
            return Err(GatewayError::Disconnected.into());
        }

        let value = decode_reply(reply.as_bytes())
            .with_context(|| format!("Malformed reply to `{}`", name))?
            .into_result(id)
            .with_context(|| format!("Gateway call `{}` failed", name))?;
        tracing::debug!(call = name, id, "gateway reply");

        serde_json::from_value(value)
            .with_context(|| format!("Unexpected payload type in reply to `{}`", name))
    }

    /// Ask the gateway for a fresh board of the given size
    pub fn open_board(mut self, width: usize, height: usize) -> Result<RemoteBoard> {
        let board: BoardId = self
            .call(Call::GetGameState { width, height })
            .context("Failed to obtain a game state from the gateway")?;
        tracing::info!(board = %board.0, width, height, "opened remote board");

        Ok(RemoteBoard {
            client: self,
            board,
        })
    }
}

/// A board handle bound to its gateway connection
pub struct RemoteBoard {
    client: GatewayClient,
    board: BoardId,
}

impl RemoteBoard {
    pub fn board_id(&self) -> &BoardId {
        &self.board
    }

    fn id(&self) -> BoardId {
        self.board.clone()
    }
}

impl RemoteEngine for RemoteBoard {
    fn set_pause(&mut self, paused: bool) -> Result<()> {
        let board = self.id();
        self.client.call(Call::SetPause { board, paused })
    }

    fn is_paused(&mut self) -> Result<bool> {
        let board = self.id();
        self.client.call(Call::IsPaused { board })
    }

    fn add_snake(&mut self) -> Result<usize> {
        let board = self.id();
        self.client.call(Call::AddSnake { board })
    }

    fn snakes(&mut self) -> Result<Vec<SnakeHandle>> {
        let board = self.id();
        self.client.call(Call::GetSnakes { board })
    }

    fn reseed(&mut self, seed: u64) -> Result<()> {
        let board = self.id();
        self.client.call(Call::Reseed { board, seed })
    }

    fn reset(&mut self) -> Result<()> {
        let board = self.id();
        self.client.call(Call::Reset { board })
    }

    fn width(&mut self) -> Result<usize> {
        let board = self.id();
        self.client.call(Call::GetWidth { board })
    }

    fn height(&mut self) -> Result<usize> {
        let board = self.id();
        self.client.call(Call::GetHeight { board })
    }

    fn food(&mut self) -> Result<Coordinate> {
        let board = self.id();
        self.client.call(Call::GetFood { board })
    }

    fn score(&mut self) -> Result<u32> {
        let board = self.id();
        self.client.call(Call::GetScore { board })
    }

    fn head(&mut self, snake: SnakeHandle) -> Result<Coordinate> {
        let board = self.id();
        self.client.call(Call::GetHead { board, snake })
    }

    fn tail(&mut self, snake: SnakeHandle) -> Result<Vec<Coordinate>> {
        let board = self.id();
        self.client.call(Call::GetTailAsList { board, snake })
    }

    fn update(&mut self) -> Result<()> {
        let board = self.id();
        self.client.call(Call::Update { board })
    }

    fn is_game_over(&mut self) -> Result<bool> {
        let board = self.id();
        self.client.call(Call::IsGameOver { board })
    }

    fn is_eating(&mut self, snake: SnakeHandle) -> Result<bool> {
        let board = self.id();
        self.client.call(Call::IsEating { board, snake })
    }

    fn training_state(&mut self, idx: usize) -> Result<Vec<f32>> {
        let board = self.id();
        self.client.call(Call::TrainingState { board, idx })
    }

    fn training_bitmap(&mut self, idx: usize) -> Result<Vec<Vec<Vec<f32>>>> {
        let board = self.id();
        self.client.call(Call::TrainingBitmap { board, idx })
    }

    fn turn_relative(&mut self, idx: usize, action: i32) -> Result<()> {
        let board = self.id();
        self.client.call(Call::TurnRelative { board, idx, action })
    }

    fn turn_absolute(&mut self, idx: usize, action: i32) -> Result<()> {
        let board = self.id();
        self.client.call(Call::TurnAbsolute { board, idx, action })
    }
}
