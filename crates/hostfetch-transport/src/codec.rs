//! JSON encoding of bridge messages

use hostfetch_core::BridgeError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Failure to turn a message into bytes or back
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl From<CodecError> for BridgeError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Encode(msg) => BridgeError::Encode(msg),
            CodecError::Decode(msg) => BridgeError::Decode(msg),
        }
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}
