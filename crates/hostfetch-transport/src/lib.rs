//! hostfetch-transport - Message codec for the bridge
//!
//! This crate provides:
//! - [`MessageCodec`] for the JSON request/response messages that cross the boundary
//! - [`CodecError`] and its mapping into `BridgeError`

mod codec;
mod message_codec;

pub use codec::CodecError;
pub use message_codec::{BRIDGE_FAILURE_MESSAGE, BRIDGE_FAILURE_NAME, MessageCodec};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CodecError, MessageCodec};
}
