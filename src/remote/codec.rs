//! Newline-delimited JSON framing for the gateway protocol

use super::messages::{Call, PROTOCOL_VERSION, ReplyEnvelope, RequestEnvelope};

pub fn encode_request(id: u64, call: Call) -> Result<Vec<u8>, serde_json::Error> {
    let env = RequestEnvelope {
        v: PROTOCOL_VERSION,
        id,
        call,
    };
    to_line(&env)
}

pub fn decode_request(bytes: &[u8]) -> Result<RequestEnvelope, serde_json::Error> {
    serde_json::from_slice(trim_line(bytes))
}

pub fn encode_reply(reply: &ReplyEnvelope) -> Result<Vec<u8>, serde_json::Error> {
    to_line(reply)
}

pub fn decode_reply(bytes: &[u8]) -> Result<ReplyEnvelope, serde_json::Error> {
    serde_json::from_slice(trim_line(bytes))
}

fn to_line<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn trim_line(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &bytes[..end]
}
