//! Encoding of the request/response messages that cross the boundary

use crate::codec::{CodecError, decode, encode};
use hostfetch_core::{Request, Response};

/// Exception name reported for a zero-length response buffer
pub const BRIDGE_FAILURE_NAME: &str = "hostfetch.BridgeFailure";

/// Exception message reported for a zero-length response buffer
pub const BRIDGE_FAILURE_MESSAGE: &str = "bridge returned an empty response buffer";

/// JSON codec for bridge messages
///
/// Stateless; safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCodec;

impl MessageCodec {
    pub fn new() -> Self {
        Self
    }

    /// Decode a request produced by the native core
    pub fn decode_request(&self, bytes: &[u8]) -> Result<Request, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::Decode("empty request buffer".to_string()));
        }
        decode(bytes)
    }

    /// Encode a request, as the native core does before calling the bridge
    pub fn encode_request(&self, request: &Request) -> Result<Vec<u8>, CodecError> {
        encode(request)
    }

    /// Encode a response for the native core
    pub fn encode_response(&self, response: &Response) -> Result<Vec<u8>, CodecError> {
        encode(response)
    }

    /// Decode a response returned by the bridge
    ///
    /// A zero-length buffer is the bridge's last-resort return value and
    /// decodes to a [`BRIDGE_FAILURE_NAME`] failure.
    pub fn decode_response(&self, bytes: &[u8]) -> Result<Response, CodecError> {
        if bytes.is_empty() {
            return Ok(Response::exception(
                BRIDGE_FAILURE_NAME,
                BRIDGE_FAILURE_MESSAGE,
            ));
        }
        decode(bytes)
    }
}
