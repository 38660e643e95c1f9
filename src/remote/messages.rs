use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::engine::{BoardId, SnakeHandle};
use super::error::GatewayError;

pub const PROTOCOL_VERSION: u8 = 1;

/// One request line sent to the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub v: u8,
    pub id: u64,
    #[serde(flatten)]
    pub call: Call,
}

/// One reply line received from the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    pub v: u8,
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl ReplyEnvelope {
    pub fn ok(id: u64, value: Value) -> Self {
        Self {
            v: PROTOCOL_VERSION,
            id,
            ok: Some(value),
            err: None,
        }
    }

    pub fn err(id: u64, message: impl Into<String>) -> Self {
        Self {
            v: PROTOCOL_VERSION,
            id,
            ok: None,
            err: Some(message.into()),
        }
    }

    /// Check the reply against the request it answers and extract the payload.
    ///
    /// A missing `ok` field is read as `null`, which is what unit calls return.
    pub fn into_result(self, expected_id: u64) -> Result<Value, GatewayError> {
        if self.v != PROTOCOL_VERSION {
            return Err(GatewayError::VersionMismatch {
                expected: PROTOCOL_VERSION,
                got: self.v,
            });
        }
        if self.id != expected_id {
            return Err(GatewayError::UnexpectedReply {
                expected: expected_id,
                got: self.id,
            });
        }
        match self.err {
            Some(message) => Err(GatewayError::Remote(message)),
            None => Ok(self.ok.unwrap_or(Value::Null)),
        }
    }
}

/// Calls understood by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", content = "args", rename_all = "snake_case")]
pub enum Call {
    GetGameState { width: usize, height: usize },
    SetPause { board: BoardId, paused: bool },
    IsPaused { board: BoardId },
    AddSnake { board: BoardId },
    GetSnakes { board: BoardId },
    Reseed { board: BoardId, seed: u64 },
    Reset { board: BoardId },
    GetWidth { board: BoardId },
    GetHeight { board: BoardId },
    GetFood { board: BoardId },
    GetScore { board: BoardId },
    GetHead { board: BoardId, snake: SnakeHandle },
    GetTailAsList { board: BoardId, snake: SnakeHandle },
    Update { board: BoardId },
    IsGameOver { board: BoardId },
    IsEating { board: BoardId, snake: SnakeHandle },
    TrainingState { board: BoardId, idx: usize },
    TrainingBitmap { board: BoardId, idx: usize },
    TurnRelative { board: BoardId, idx: usize, action: i32 },
    TurnAbsolute { board: BoardId, idx: usize, action: i32 },
}

impl Call {
    /// Wire name of the call, used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Call::GetGameState { .. } => "get_game_state",
            Call::SetPause { .. } => "set_pause",
            Call::IsPaused { .. } => "is_paused",
            Call::AddSnake { .. } => "add_snake",
            Call::GetSnakes { .. } => "get_snakes",
            Call::Reseed { .. } => "reseed",
            Call::Reset { .. } => "reset",
            Call::GetWidth { .. } => "get_width",
            Call::GetHeight { .. } => "get_height",
            Call::GetFood { .. } => "get_food",
            Call::GetScore { .. } => "get_score",
            Call::GetHead { .. } => "get_head",
            Call::GetTailAsList { .. } => "get_tail_as_list",
            Call::Update { .. } => "update",
            Call::IsGameOver { .. } => "is_game_over",
            Call::IsEating { .. } => "is_eating",
            Call::TrainingState { .. } => "training_state",
            Call::TrainingBitmap { .. } => "training_bitmap",
            Call::TurnRelative { .. } => "turn_relative",
            Call::TurnAbsolute { .. } => "turn_absolute",
        }
    }
}
