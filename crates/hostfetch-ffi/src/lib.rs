//! hostfetch-ffi - Fetch bridge across the C ABI
//!
//! This crate provides the boundary layer between a native core and the
//! host application's HTTP client:
//! - [`ByteBuffer`] for passing data across FFI
//! - [`NativeAbi`] with [`NativeVTable`], [`NativeLibrary`] and [`LoopbackNative`]
//! - [`HttpClientSlot`] holding the swappable host client
//! - [`CallbackBridge`] running the per-call fetch protocol
//! - [`BridgeRegistry`] keeping installed bridges alive for the process
//!
//! # FFI Functions
//!
//! The following functions are exported with C linkage:
//!
//! - `hostfetch_fetch_callback` - Run one fetch (installed with the native runtime)
//! - `hostfetch_init_logging` - Forward logs to an embedder callback
//! - `hostfetch_set_log_level` - Change the log level

mod bridge;
mod buffer;
mod exports;
mod library;
mod loopback;
mod native;
mod panic_guard;
mod registry;
mod slot;
mod vtable;

pub use bridge::CallbackBridge;
pub use buffer::ByteBuffer;
pub use library::NativeLibrary;
pub use loopback::LoopbackNative;
pub use native::{FetchCallback, NativeAbi};
pub use panic_guard::{catch_panic, install_panic_hook};
pub use registry::BridgeRegistry;
pub use slot::{ClientSupplier, HttpClientSlot};
pub use vtable::NativeVTable;

pub use exports::{
    hostfetch_fetch_callback, hostfetch_init_logging, hostfetch_set_log_level, init_logging,
};

pub use hostfetch_core::{BridgeConfig, BridgeError, HttpClient, LogLevel};
pub use hostfetch_logging::LogCallback;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ByteBuffer, CallbackBridge, HttpClientSlot, LoopbackNative, NativeAbi, NativeLibrary,
        NativeVTable,
    };
    pub use hostfetch_core::prelude::*;
    pub use hostfetch_transport::prelude::*;
}
