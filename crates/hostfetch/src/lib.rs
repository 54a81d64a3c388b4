//! # hostfetch
//!
//! Lets a native core delegate all of its HTTP traffic to the host
//! application's HTTP client.
//!
//! The native core serializes a request into a buffer and calls back across
//! the C ABI; the bridge decodes it, runs it against the installed
//! [`HttpClient`], and hands back a serialized success or exception response.
//! Buffers are destroyed exactly once, panics never cross the boundary, and
//! the client can be swapped while fetches are in flight.
//!
//! ## Installing a client
//!
//! ```ignore
//! use hostfetch::prelude::*;
//! use std::sync::Arc;
//!
//! struct MyClient;
//!
//! impl HttpClient for MyClient {
//!     fn fetch(&self, request: HostRequest<'_>) -> Result<HostResponse, ClientError> {
//!         // perform the request with the platform's HTTP stack
//!         Ok(HostResponse::new(request.url, 200).with_body("ok"))
//!     }
//! }
//!
//! let config = BridgeConfig::default();
//! let native = NativeLibrary::load("libcore.so", &config)?;
//! let slot = HttpClientSlot::new(Arc::new(native), config);
//!
//! // Registers the bridge with the native core on first use
//! slot.set_client(|| Arc::new(MyClient));
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`hostfetch_core`] - Wire messages, host client capability, translation
//! - [`hostfetch_transport`] - Message codec
//! - [`hostfetch_logging`] - Log forwarding to the embedder
//! - [`hostfetch_runtime`] - Async host clients on a Tokio runtime
//! - [`hostfetch_ffi`] - Buffers, native runtimes, slot, bridge, C exports

// Re-export core types
pub use hostfetch_core::{
    BodyStream, BridgeConfig, BridgeError, BridgeResult, ClientError, CookiePolicy, Header,
    Headers, HostRequest, HostResponse, HttpClient, HttpMethod, LogLevel, Method, Redirect,
    Request, Response, translate,
};

// Re-export the codec
pub use hostfetch_transport::{
    BRIDGE_FAILURE_MESSAGE, BRIDGE_FAILURE_NAME, CodecError, MessageCodec,
};

// Re-export async client support
pub use hostfetch_runtime::{AsyncHttpClient, AsyncRuntime, BlockingClient, RuntimeConfig};

// Re-export the bridge
pub use hostfetch_ffi::{
    BridgeRegistry, ByteBuffer, CallbackBridge, ClientSupplier, FetchCallback, HttpClientSlot,
    LogCallback, LoopbackNative, NativeAbi, NativeLibrary, NativeVTable, init_logging,
};

// Re-export common dependencies that embedders need
pub use async_trait::async_trait;
pub use tokio;
pub use tracing;

/// C functions the shared library must expose.
///
/// Add `pub use hostfetch::ffi_exports::*;` to the `cdylib` crate that links
/// the bridge so the symbols are kept.
pub mod ffi_exports {
    pub use hostfetch_ffi::{
        hostfetch_fetch_callback, hostfetch_init_logging, hostfetch_set_log_level,
    };
}

/// Prelude module for convenient imports.
///
/// Use `use hostfetch::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        AsyncHttpClient, BlockingClient, BridgeConfig, BridgeError, ClientError, Headers,
        HostRequest, HostResponse, HttpClient, HttpClientSlot, LoopbackNative, NativeAbi,
        NativeLibrary, NativeVTable, Request, Response, async_trait,
    };
}
