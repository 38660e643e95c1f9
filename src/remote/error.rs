use thiserror::Error;

/// Failures detected by the gateway client itself.
///
/// Errors raised by the engine are forwarded verbatim as `Remote`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway closed the connection")]
    Disconnected,

    #[error("remote engine error: {0}")]
    Remote(String),

    #[error("reply id {got} does not match request id {expected}")]
    UnexpectedReply { expected: u64, got: u64 },

    #[error("gateway speaks protocol v{got}, client expects v{expected}")]
    VersionMismatch { expected: u8, got: u8 },

    #[error("malformed bitmap: {0}")]
    MalformedBitmap(String),
}
